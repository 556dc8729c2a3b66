use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sources::Requester;

const DEFAULT_LOCATION: &str = "cache";

/// Serves response bodies previously saved under `<location>/<key>`, where the key is the
/// endpoint normalised by `FilesystemRequester::cache_key`. Never writes.
pub struct FilesystemRequester {
    location: PathBuf,
}

impl FilesystemRequester {
    pub fn new_from_location<P: AsRef<Path>>(location: P) -> Self {
        Self { location: location.as_ref().to_path_buf() }
    }

    pub fn new() -> Self {
        Self::new_from_location(DEFAULT_LOCATION)
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.location.join(key)
    }

    // Returns a normalised name suitable for use as a file name
    pub fn cache_key(endpoint: &str) -> String {
        endpoint.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
    }
}

impl Default for FilesystemRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl Requester for FilesystemRequester {
    fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        let path = self.cache_path(&Self::cache_key(endpoint));
        debug!(%endpoint, path = %path.display(), "reading saved response");

        std::fs::read(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "no saved response");
            Error::transport(endpoint, e)
        })
    }
}
