//! Shared request plumbing for the vendor clients.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result};

/// Send a prepared request and decode a JSON body.
///
/// Non-success statuses become [`Error::ProviderApi`] carrying the raw body, so
/// vendor error documents surface unchanged in the rendered message.
pub(crate) async fn send_json<T>(request: reqwest::RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;

    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "provider responded");

    if !status.is_success() {
        return Err(Error::ProviderApi {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|err| Error::InvalidResponse(format!("failed to parse response: {err}")))
}

/// Trim a trailing slash so path joins don't produce `//`.
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
