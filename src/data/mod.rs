pub mod airline;
pub mod feed;
pub mod flight;
pub mod keyed;
pub mod most_tracked;
pub mod routes;
