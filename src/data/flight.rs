use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use serde_tuple::*;

pub const FLIGHT_FIELD_COUNT: usize = 19;

/// Field names in wire order; position `i` of a feed array always lands in `FLIGHT_FIELDS[i]`.
pub const FLIGHT_FIELDS: [&str; FLIGHT_FIELD_COUNT] = [
    "icao_24bit",
    "latitude",
    "longitude",
    "heading",
    "altitude",
    "ground_speed",
    "squawk",
    "flight_number",
    "aircraft_code",
    "registration",
    "time",
    "origin_iata",
    "destination_iata",
    "airline_iata",
    "on_ground",
    "vertical_speed",
    "callsign",
    "unknown",
    "airline_icao",
];

/// One live aircraft observation, encoded on the wire as a fixed-order array.
/// Field order below is the wire order and must not change.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct FlightRecord {
    pub icao_24bit: String,             // Mode-S hex address
    pub latitude: f64,
    pub longitude: f64,
    pub heading: i32,                   // Degrees
    pub altitude: i32,                  // Feet
    pub ground_speed: i32,              // Knots
    pub squawk: String,
    pub flight_number: String,
    pub aircraft_code: String,          // ICAO type designator
    pub registration: String,
    pub time: i64,                      // Unix timestamp of the observation
    pub origin_iata: String,
    pub destination_iata: String,
    pub airline_iata: String,
    pub on_ground: i32,
    pub vertical_speed: i32,            // Feet per minute
    pub callsign: String,
    pub unknown: i64,
    pub airline_icao: String,
}

/// Outcome of decoding one feed entry.
#[derive(Debug, PartialEq)]
pub enum FlightDecode {
    Flight(FlightRecord),
    /// The entry is not an array at all, e.g. envelope metadata sharing the feed's key space
    NotApplicable,
    /// The entry is an array but has the wrong arity or a mistyped position
    Invalid(String),
}

impl FlightRecord {
    /// Classifies `value` structurally before decoding any fields. Non-arrays are not an
    /// error; arrays must hold exactly `FLIGHT_FIELD_COUNT` correctly typed elements.
    pub fn decode(value: &Value) -> FlightDecode {
        let items = match value {
            Value::Array(items) => items,
            _ => return FlightDecode::NotApplicable,
        };

        if items.len() != FLIGHT_FIELD_COUNT {
            return FlightDecode::Invalid(format!(
                "expected {} fields, found {}", FLIGHT_FIELD_COUNT, items.len()));
        }

        match FlightRecord::deserialize(value) {
            Ok(record) => FlightDecode::Flight(record),
            Err(e) => FlightDecode::Invalid(e.to_string()),
        }
    }

    /// Re-encodes the record into its positional wire form. A non-finite coordinate becomes
    /// `null`, which `decode` then rejects.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground != 0
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time, 0).single()
    }
}

impl FlightDecode {
    pub fn into_flight(self) -> Option<FlightRecord> {
        match self {
            FlightDecode::Flight(record) => Some(record),
            _ => None,
        }
    }
}
