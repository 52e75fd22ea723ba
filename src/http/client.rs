use std::time::Duration;

use reqwest::{Client, Proxy};

use crate::config::types::RunConfig;
use crate::error::HttpError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the HTTP client shared by every worker.
///
/// # Errors
///
/// Returns an error when the configured proxy URL is invalid or the client
/// cannot be constructed.
pub fn build_client(config: &RunConfig) -> Result<Client, HttpError> {
    let mut builder = Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(CONNECT_TIMEOUT);

    if let Some(proxy_url) = config.proxy_url.as_ref() {
        let proxy = Proxy::all(proxy_url.as_str()).map_err(|err| HttpError::InvalidProxy {
            url: proxy_url.clone(),
            source: err,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|err| HttpError::BuildClient { source: err })
}
