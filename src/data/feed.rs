use std::collections::HashMap;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::data::flight::{FlightDecode, FlightRecord};
use crate::error::Result;

/// Envelope fields sitting alongside the flight entries in the feed's top-level object
#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    full_count: i64,
    #[serde(default)]
    version: i64,
}

/// One snapshot of the live feed. `full_count` is reported by the service and is not
/// reconciled against `flights`, which only holds the entries that decoded as flights.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedBatch {
    pub full_count: i64,
    pub version: i64,
    pub flights: HashMap<String, FlightRecord>,
}

impl FeedBatch {
    /// Decodes a full feed body. Only a body that is not a JSON object fails; entries that
    /// are not flights, or are malformed flights, are dropped.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let envelope: FeedEnvelope = serde_json::from_slice(body)?;

        // Flight entries are siblings of the envelope fields, so the body is read again as a flat map
        let entries: HashMap<String, Value> = serde_json::from_slice(body)?;
        let entry_count = entries.len();

        let flights = entries.into_iter()
            .fold(HashMap::new(), |mut flights, (flight_id, entry)| {
                match FlightRecord::decode(&entry) {
                    FlightDecode::Flight(record) => { flights.insert(flight_id, record); }
                    FlightDecode::NotApplicable => debug!(key = %flight_id, "skipping non-flight feed entry"),
                    FlightDecode::Invalid(reason) => debug!(key = %flight_id, %reason, "skipping malformed flight"),
                }
                flights
            });

        info!(full_count = envelope.full_count, entries = entry_count, decoded = flights.len(),
              "decoded feed batch");

        Ok(Self { full_count: envelope.full_count, version: envelope.version, flights })
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn get(&self, flight_id: &str) -> Option<&FlightRecord> {
        self.flights.get(flight_id)
    }

    /// Uniformly picks one decoded flight, or `None` for an empty batch.
    pub fn choose_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&String, &FlightRecord)> {
        self.flights.iter().choose(rng)
    }
}
