use std::time::Duration;

use reqwest::Client;

use crate::Result;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; mju-notice-watcher/1.1)";

/// Upper bound for a single page fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client shared by the listing scraper and the summarizer.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?)
}

/// GET `url` and return the body; any non-2xx status is an error.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
