pub mod auth;
pub mod capture;
pub mod config;
pub mod focus;
pub mod me;
pub mod task;

use daylist_core::{ApiClient, Config, Session};

/// Build an API client from the saved config and session.
pub(crate) fn api_client() -> Result<ApiClient, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = Session::load()?;
    Ok(ApiClient::new(&config.api.base_url, &session)?)
}
