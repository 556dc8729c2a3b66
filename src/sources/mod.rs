use crate::error::Result;

pub mod caching;
pub mod httpclient;
pub mod sources;

/// Fetches the raw body behind an endpoint. The decoders only ever see what this returns.
pub trait Requester {
    fn fetch(&self, endpoint: &str) -> Result<Vec<u8>>;
}

impl<F> Requester for F where F: Fn(&str) -> Result<Vec<u8>> {
    fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        self(endpoint)
    }
}
