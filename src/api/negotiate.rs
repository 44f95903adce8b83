//! Content negotiation between JSON and XML.
//!
//! Handlers that support both representations return [`Negotiated`] on
//! success and [`NegotiatedError`] on failure. The format is picked once per
//! request from the `Accept` header by [`ResponseFormat::from_accept`].

use crate::error::AppError;
use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{HeaderValue, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const APPLICATION_XML: &str = "application/xml";

/// Representation selected for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// Picks the best supported format for an `Accept` header value.
    ///
    /// Media ranges are weighted by their `q` parameter; equal weights go to
    /// the range listed first. Missing header or no supported range means JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Json;
        };

        let mut best: Option<(Self, f32)> = None;

        for range in accept.split(',') {
            let mut params = range.split(';');
            let media = params.next().unwrap_or("").trim().to_ascii_lowercase();

            let Some(format) = Self::for_media_type(&media) else {
                continue;
            };

            let quality = params
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            if quality <= 0.0 {
                continue;
            }

            match best {
                Some((_, best_q)) if best_q >= quality => {}
                _ => best = Some((format, quality)),
            }
        }

        best.map(|(format, _)| format).unwrap_or_default()
    }

    fn for_media_type(media: &str) -> Option<Self> {
        match media {
            "application/json" | "*/*" | "application/*" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Wraps `error` so it renders in this format.
    pub fn error(self, error: AppError) -> NegotiatedError {
        NegotiatedError {
            format: self,
            error,
        }
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());
        Ok(Self::from_accept(accept))
    }
}

/// A body with an XML rendering.
pub trait XmlDocument {
    /// Serializes `self` as a complete XML document.
    fn to_xml(&self) -> Result<String, AppError>;
}

/// Serializes `value` under the root element `root`, prefixed with the XML declaration.
pub fn render_xml<T: Serialize>(root: &str, value: &T) -> Result<String, AppError> {
    let body = quick_xml::se::to_string_with_root(root, value).map_err(|e| {
        tracing::error!(error = %e, "XML serialization failed");
        AppError::internal("Serialization failed", json!({}))
    })?;

    Ok(format!("{}\n{}", XML_DECLARATION, body))
}

fn xml_response(status: StatusCode, document: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_XML))],
        document,
    )
        .into_response()
}

/// Successful response rendered as JSON or XML.
pub struct Negotiated<T> {
    pub format: ResponseFormat,
    pub status: StatusCode,
    pub body: T,
}

impl<T> Negotiated<T> {
    pub fn ok(format: ResponseFormat, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            body,
        }
    }
}

impl<T> IntoResponse for Negotiated<T>
where
    T: Serialize + XmlDocument,
{
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => (self.status, Json(self.body)).into_response(),
            ResponseFormat::Xml => match self.body.to_xml() {
                Ok(document) => xml_response(self.status, document),
                Err(e) => self.format.error(e).into_response(),
            },
        }
    }
}

#[derive(Serialize)]
struct XmlError<'a> {
    code: &'a str,
    message: &'a str,
}

/// Error rendered as JSON or as `<error><code/><message/></error>`.
#[derive(Debug)]
pub struct NegotiatedError {
    pub format: ResponseFormat,
    pub error: AppError,
}

impl IntoResponse for NegotiatedError {
    fn into_response(self) -> Response {
        if self.format == ResponseFormat::Json {
            return self.error.into_response();
        }

        let info = self.error.to_error_info();
        let body = XmlError {
            code: info.code,
            message: &info.message,
        };

        match render_xml("error", &body) {
            Ok(document) => xml_response(self.error.status(), document),
            Err(e) => e.into_response(),
        }
    }
}
