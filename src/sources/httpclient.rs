use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sources::Requester;

// The service rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const TIMEOUT_SECS: u64 = 30;

pub struct HttpRequester {
    client: Client,
}

impl HttpRequester {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

impl Requester for HttpRequester {
    fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        debug!(%endpoint, "requesting");

        let response = self.client.get(endpoint).send()
            .map_err(|e| Error::transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%endpoint, %status, "request rejected");
            return Err(Error::transport(endpoint, format!("HTTP {}", status)));
        }

        Ok(response.bytes()
            .map_err(|e| Error::transport(endpoint, e))?
            .to_vec())
    }
}
