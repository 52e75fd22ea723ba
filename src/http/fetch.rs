use reqwest::Client;
use tokio::time::Instant;
use tracing::error;
use url::Url;

use crate::metrics::FetchRecord;

/// Fetches one map image and returns the record for the report.
///
/// Transport errors, timeouts and non-success statuses become zero-byte
/// records with the elapsed time measured up to the failure; the cause is
/// logged and never surfaced as an error, so a failed fetch cannot stop the
/// batch. Each URL is attempted exactly once.
pub async fn fetch_map(client: &Client, url: Url) -> FetchRecord {
    let started = Instant::now();
    let outcome = request_image(client, url.clone()).await;
    let seconds = started.elapsed().as_secs_f64();

    match outcome {
        Ok(bytes) => FetchRecord {
            seconds,
            bytes,
            url: String::from(url),
        },
        Err(err) => {
            let url = String::from(url);
            error!("Map request failed '{}': {}", url, err);
            FetchRecord {
                seconds,
                bytes: 0,
                url,
            }
        }
    }
}

async fn request_image(client: &Client, url: Url) -> Result<u64, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(body.len() as u64)
}
