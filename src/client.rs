use rand::Rng;
use tracing::{info, warn};

use crate::data::airline::AirlineList;
use crate::data::feed::FeedBatch;
use crate::data::flight::FlightRecord;
use crate::data::most_tracked::MostTracked;
use crate::data::routes::AirportRoutes;
use crate::error::{Error, Result};
use crate::logo;
use crate::sources::sources::Endpoints;
use crate::sources::Requester;

/// Pairs a requester with the endpoint catalogue. Each call is one fetch followed by one
/// stateless decode; nothing is kept between calls.
pub struct Client<R> {
    requester: R,
    endpoints: Endpoints,
}

impl<R: Requester> Client<R> {
    pub fn new(requester: R) -> Self {
        Self::with_endpoints(requester, Endpoints::default())
    }

    pub fn with_endpoints(requester: R, endpoints: Endpoints) -> Self {
        Self { requester, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.requester.fetch(endpoint).map_err(|e| {
            warn!(%endpoint, error = %e, "fetch failed");
            e
        })
    }

    pub fn most_tracked(&self) -> Result<MostTracked> {
        MostTracked::parse(&self.fetch(&self.endpoints.most_tracked())?)
    }

    pub fn airlines(&self) -> Result<AirlineList> {
        AirlineList::parse(&self.fetch(&self.endpoints.airlines())?)
    }

    pub fn feed(&self) -> Result<FeedBatch> {
        FeedBatch::parse(&self.fetch(&self.endpoints.all_tracked())?)
    }

    /// Picks one flight from a fresh feed snapshot.
    pub fn random_flight<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<(String, FlightRecord)> {
        let feed = self.feed()?;
        let (flight_id, flight) = feed.choose_random(rng).ok_or(Error::EmptyFeed)?;

        info!(%flight_id, link = %self.endpoints.flight_link(&flight.callsign, flight_id), "selected flight");
        Ok((flight_id.clone(), flight.clone()))
    }

    pub fn airport_routes(&self, iata: &str) -> Result<AirportRoutes> {
        AirportRoutes::parse(&self.fetch(&self.endpoints.airport_routes(iata))?)
    }

    /// Airline logo from the main site, re-encoded as PNG.
    pub fn airline_logo(&self, icao: &str) -> Result<Vec<u8>> {
        logo::reencode_png(&self.fetch(&self.endpoints.airline_logo(icao))?)
    }

    /// Airline logo from the CDN, re-encoded as PNG.
    pub fn airline_logo_cdn(&self, icao: &str, iata: &str) -> Result<Vec<u8>> {
        logo::reencode_png(&self.fetch(&self.endpoints.airline_logo_cdn(icao, iata))?)
    }
}
