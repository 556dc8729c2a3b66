use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    #[serde(rename = "Name")]   pub name: String,
    #[serde(rename = "Code")]   pub code: String,       // IATA
    #[serde(rename = "ICAO")]   pub icao: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirlineList {
    pub version: i64,
    pub rows: Vec<Airline>,
}

impl AirlineList {
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn find_by_icao(&self, icao: &str) -> Option<&Airline> {
        self.rows.iter().find(|a| a.icao.eq_ignore_ascii_case(icao))
    }
}
