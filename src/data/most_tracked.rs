use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostTrackedFlight {
    #[serde(rename = "flight_id")]  pub flight_id: String,
    #[serde(rename = "flight")]     pub flight: String,
    #[serde(rename = "callsign")]   pub callsign: String,
    #[serde(rename = "squawk")]     pub squawk: String,
    #[serde(rename = "clicks")]     pub clicks: i64,
    #[serde(rename = "from_iata")]  pub from_iata: String,
    #[serde(rename = "from_city")]  pub from_city: String,
    #[serde(rename = "to_iata")]    pub to_iata: String,
    #[serde(rename = "to_city")]    pub to_city: String,
    #[serde(rename = "model")]      pub model: String,
    #[serde(rename = "type")]       pub aircraft_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MostTracked {
    pub version: String,
    pub update_time: f64,
    pub data: Vec<MostTrackedFlight>,
}

impl MostTracked {
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Flights ordered by click count, most watched first.
    pub fn ranked(&self) -> Vec<&MostTrackedFlight> {
        let mut ranked = self.data.iter().collect::<Vec<&MostTrackedFlight>>();
        ranked.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::MostTracked;

    const MOST_TRACKED: &str = r#"{
        "version": "0.1",
        "update_time": 1727163107.25,
        "data": [
            {"flight_id": "37a1c2d4", "flight": "AF1", "callsign": "AFR1", "squawk": "6411", "clicks": 120,
             "from_iata": "JFK", "from_city": "New York", "to_iata": "CDG", "to_city": "Paris",
             "model": "Airbus A350-941", "type": "A359"},
            {"flight_id": "37a1c2d5", "flight": "", "callsign": "RCH445", "squawk": "", "clicks": 900,
             "from_iata": "", "from_city": "", "to_iata": "", "to_city": "",
             "model": "Boeing C-17A Globemaster III", "type": "C17"}
        ]
    }"#;

    #[test]
    fn test_parse() {
        let tracked = MostTracked::parse(MOST_TRACKED.as_bytes()).unwrap();
        assert_eq!(tracked.version, "0.1");
        assert_eq!(tracked.update_time, 1727163107.25);
        assert_eq!(tracked.data.len(), 2);
        assert_eq!(tracked.data[0].aircraft_type, "A359");
    }

    #[test]
    fn test_ranked() {
        let tracked = MostTracked::parse(MOST_TRACKED.as_bytes()).unwrap();
        let ranked = tracked.ranked();
        assert_eq!(ranked[0].callsign, "RCH445");
        assert_eq!(ranked[1].callsign, "AFR1");
    }

    #[test]
    fn test_malformed() {
        assert!(MostTracked::parse(b"not json").is_err());
    }
}
