//! Client for the Flightradar24 web service. The interesting part is decoding: the live
//! feed mixes positional flight arrays with metadata in one object (`data::feed`), and
//! airport routes arrive as an object tree keyed by data that is flattened into records
//! (`data::routes`).

pub mod client;
pub mod data;
pub mod error;
pub mod logging;
pub mod logo;
pub mod sources;

pub use crate::client::Client;
pub use crate::data::feed::FeedBatch;
pub use crate::data::flight::{FlightDecode, FlightRecord};
pub use crate::data::routes::{AirportRoutes, RouteAirport, RouteCountry, RouteFlight, RouteTime};
pub use crate::error::{Error, Result};
pub use crate::sources::Requester;
