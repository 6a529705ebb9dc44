use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Session};
use crate::content::resolve_asset_url;
use crate::error::PageError;
use crate::models::{Novel, NovelPayload};
use crate::render::NO_IMAGE_SRC;

/// HTTP client for the novel API. Carries the endpoint configuration and
/// the reader session; a bearer header is attached whenever the session
/// holds a token, and plain requests go out when it does not.
pub struct NovelClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl NovelClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, PageError> {
        let http = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match self.session.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetches the novel aggregate and collapses the ambiguous payload
    /// shape to a canonical [`Novel`].
    pub async fn fetch_novel(&self, id: &str) -> Result<Novel, PageError> {
        let url = format!("{}/novels/{}", self.config.api_base, id);
        debug!(%url, "fetching novel");

        let response = self.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The API puts a human-readable `message` in JSON error bodies.
            let reason = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| Some(body.get("message")?.as_str()?.to_string()))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(PageError::Http {
                status: status.as_u16(),
                reason,
            });
        }

        let body: serde_json::Value = response.json().await?;
        if body.is_null() {
            return Err(PageError::NovelNotFound(id.to_string()));
        }
        let payload: NovelPayload = serde_json::from_value(body)?;
        Ok(payload.into_novel())
    }

    /// Plain GET against an absolute or static-base-relative URL.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PageError> {
        let full = resolve_asset_url(url, &self.config.static_base);
        debug!(url = %full, "fetching content bytes");

        let response = self.get(&full).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Http {
                status: status.as_u16(),
                reason: format!("GET {full}"),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, PageError> {
        let full = resolve_asset_url(url, &self.config.static_base);
        debug!(url = %full, "fetching content text");

        let response = self.get(&full).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Http {
                status: status.as_u16(),
                reason: format!("GET {full}"),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetches the cover and embeds it as a data URL, the server-side
    /// stand-in for the original blob URL. Any failure degrades to the
    /// "No Image" placeholder; covers never fail a page.
    pub async fn cover_data_url(&self, img: Option<&str>) -> String {
        let Some(img) = img.filter(|img| !img.is_empty()) else {
            return NO_IMAGE_SRC.to_string();
        };
        match self.fetch_bytes(img).await {
            Ok(bytes) => format!(
                "data:{};base64,{}",
                guess_image_mime(img),
                BASE64.encode(&bytes)
            ),
            Err(err) => {
                warn!(img, error = %err, "cover fetch failed, using placeholder");
                NO_IMAGE_SRC.to_string()
            }
        }
    }
}

fn guess_image_mime(url: &str) -> &'static str {
    if url.ends_with(".png") {
        "image/png"
    } else if url.ends_with(".gif") {
        "image/gif"
    } else if url.ends_with(".webp") {
        "image/webp"
    } else if url.ends_with(".svg") {
        "image/svg+xml"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guesses_follow_the_extension() {
        assert_eq!(guess_image_mime("/uploads/a.png"), "image/png");
        assert_eq!(guess_image_mime("/uploads/a.webp"), "image/webp");
        assert_eq!(guess_image_mime("/uploads/a.jpg"), "image/jpeg");
        assert_eq!(guess_image_mime("/uploads/a"), "image/jpeg");
    }
}
