//! Scheme and host extraction from HTTP requests.

use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, Uri, header, request::Parts};
use std::convert::Infallible;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Public origin of the current request, used to build absolute URLs.
///
/// The host is taken from the `Host` header, then the request URI authority,
/// then `localhost`. Ports are kept. When the service runs behind a proxy,
/// `X-Forwarded-Proto` and `X-Forwarded-Host` take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn from_parts(headers: &HeaderMap, uri: &Uri, behind_proxy: bool) -> Self {
        let forwarded = |name: &str| {
            if !behind_proxy {
                return None;
            }
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let scheme = forwarded(FORWARDED_PROTO)
            .or_else(|| uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        let host = forwarded(FORWARDED_HOST)
            .or_else(|| {
                headers
                    .get(header::HOST)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Self { scheme, host }
    }

    /// Absolute URL of the image for item `id`.
    pub fn image_url(&self, id: i32) -> String {
        format!("{}://{}/images/{}.jpg", self.scheme, self.host, id)
    }
}

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, &parts.uri, state.behind_proxy))
    }
}
