const WWW_BASE: &str = "https://www.flightradar24.com";
const DATA_CLOUD_BASE: &str = "https://data-cloud.flightradar24.com";
const API_BASE: &str = "https://api.flightradar24.com";
const CDN_BASE: &str = "https://cdn.flightradar24.com";

const FEED_QUERY: &str = "faa=1&satellite=1&mlat=1&flarm=1&adsb=1&gnd=1&air=1&vehicles=1\
                          &estimated=1&maxage=14400&gliders=1&stats=1&limit=5000";

/// Builds every endpoint string the client requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    www: String,
    data_cloud: String,
    api: String,
    cdn: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            www: WWW_BASE.to_string(),
            data_cloud: DATA_CLOUD_BASE.to_string(),
            api: API_BASE.to_string(),
            cdn: CDN_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every host at one base, e.g. a mirror or a local test server.
    pub fn with_base(base: &str) -> Self {
        let base = trim(base);
        Self { www: base.clone(), data_cloud: base.clone(), api: base.clone(), cdn: base }
    }

    pub fn with_www_base(mut self, base: &str) -> Self { self.www = trim(base); self }
    pub fn with_data_cloud_base(mut self, base: &str) -> Self { self.data_cloud = trim(base); self }
    pub fn with_api_base(mut self, base: &str) -> Self { self.api = trim(base); self }
    pub fn with_cdn_base(mut self, base: &str) -> Self { self.cdn = trim(base); self }

    pub fn most_tracked(&self) -> String {
        format!("{}/flights/most-tracked", self.www)
    }

    pub fn all_tracked(&self) -> String {
        format!("{}/zones/fcgi/feed.js?{}", self.data_cloud, FEED_QUERY)
    }

    pub fn airlines(&self) -> String {
        format!("{}/_json/airlines.php", self.www)
    }

    pub fn airline_logo(&self, icao: &str) -> String {
        format!("{}/static/images/data/operators/{}_logo0.png", self.www, icao)
    }

    pub fn airline_logo_cdn(&self, icao: &str, iata: &str) -> String {
        format!("{}/assets/airlines/logotypes/{}_{}.png", self.cdn, icao, iata)
    }

    pub fn airport_routes(&self, iata: &str) -> String {
        format!("{}/common/v1/airport.json?code={}&plugin[]=schedule&plugin-setting[schedule][mode]=routes",
                self.api, iata)
    }

    /// Public web page for a live flight.
    pub fn flight_link(&self, callsign: &str, flight_id: &str) -> String {
        format!("{}/{}/{}", self.www, callsign, flight_id)
    }
}

fn trim(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
