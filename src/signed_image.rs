//! Signed image URL resolution.
//!
//! Product images live in private storage; the POS API hands out short-lived
//! signed URLs for them. The bearer token is passed in explicitly by the
//! caller.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SignedImageConfig;
use crate::error::ImageError;

const SIGNED_URL_PATH: &str = "/api/imagekit/signed-url";

/// Bearer credential for the POS API.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// What an image slot should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Signed(String),
    Fallback(String),
    Placeholder,
}

impl ImageSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Signed(url) | Self::Fallback(url) => Some(url),
            Self::Placeholder => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedUrlRequest<'a> {
    file_path: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedUrlResponse {
    #[serde(default)]
    signed_url: Option<String>,
}

pub struct SignedImageClient {
    client: Client,
    endpoint: String,
    token: AuthToken,
}

impl SignedImageClient {
    pub fn new(config: &SignedImageConfig, token: AuthToken) -> Result<Self, ImageError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{SIGNED_URL_PATH}", normalize_base_url(&config.base_url)),
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the signing endpoint for a short-lived URL to `file_path`.
    pub async fn request_signed_url(&self, file_path: &str) -> Result<String, ImageError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.token.bearer())
            .json(&SignedUrlRequest { file_path })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let body: SignedUrlResponse = resp.json().await?;
        body.signed_url
            .filter(|url| !url.is_empty())
            .ok_or(ImageError::EmptyUrl)
    }

    /// Resolve what to display for an image slot.
    ///
    /// A stored file is signed when possible; otherwise the static fallback
    /// URL is used, and without one the slot shows a placeholder.
    pub async fn resolve(&self, file_path: Option<&str>, fallback_url: Option<&str>) -> ImageSource {
        let fallback = || {
            fallback_url
                .filter(|url| !url.is_empty())
                .map(|url| ImageSource::Fallback(url.to_string()))
                .unwrap_or(ImageSource::Placeholder)
        };

        let Some(file_path) = file_path.filter(|path| !path.is_empty()) else {
            return fallback();
        };

        match self.request_signed_url(file_path).await {
            Ok(url) => {
                info!(file_path, "Signed image URL issued");
                ImageSource::Signed(url)
            }
            Err(e) => {
                warn!(file_path, error = %e, "Signed image URL unavailable");
                fallback()
            }
        }
    }
}

/// Strip trailing slashes and a trailing `/api` segment.
fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().trim_end_matches('/').to_string();
    if url.ends_with("/api") {
        url.truncate(url.len() - 4);
    }
    url.trim_end_matches('/').to_string()
}
