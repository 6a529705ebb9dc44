//! Chapter content resolution.
//!
//! A chapter's `content` field is either inline text or a URL pointing at a
//! `.docx` or plain-text resource. The resolver normalizes whichever form
//! it gets into a pair: plain text for the excerpt and trusted HTML for the
//! full reader body. Content-loading failures degrade into a placeholder
//! string; they never fail the page.

pub mod docx;

use tracing::warn;

use crate::client::NovelClient;
use crate::render::TrustedHtml;

/// Maximum excerpt length in characters, before the ellipsis marker.
pub const EXCERPT_LIMIT: usize = 420;

/// Shown when a chapter has no content at all.
pub const MISSING_CONTENT: &str = "[content unavailable]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    Docx,
    Text,
}

/// Where a chapter's body comes from, decided purely from the `content`
/// field before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Inline(String),
    Remote { url: String, kind: RemoteKind },
}

impl ContentSource {
    /// Anything that is not a well-formed absolute http(s) URL is literal
    /// inline text. Remote URLs are resolved against the static base and
    /// branched on file extension.
    pub fn classify(content: Option<&str>, static_base: &str) -> Self {
        match content {
            Some(raw) if is_http_url(raw) => {
                let url = resolve_asset_url(raw, static_base);
                let kind = if url.ends_with(".docx") {
                    RemoteKind::Docx
                } else {
                    RemoteKind::Text
                };
                ContentSource::Remote { url, kind }
            }
            Some(raw) if !raw.is_empty() => ContentSource::Inline(raw.to_string()),
            _ => ContentSource::Inline(MISSING_CONTENT.to_string()),
        }
    }

    /// The resolved absolute URL, for the raw-file link on the chapter page.
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            ContentSource::Remote { url, .. } => Some(url),
            ContentSource::Inline(_) => None,
        }
    }
}

/// A chapter body normalized to both of its rendered forms.
#[derive(Debug, Clone)]
pub struct ResolvedContent {
    /// Plain text the excerpt is cut from.
    pub excerpt_source: String,
    /// Full reader body; already HTML, rendered unescaped.
    pub body: TrustedHtml,
}

impl ResolvedContent {
    pub fn from_plain_text(text: String) -> Self {
        let body = TrustedHtml::from_text(&text);
        Self {
            excerpt_source: text,
            body,
        }
    }

    pub fn from_docx_html(html: String) -> Self {
        Self {
            excerpt_source: strip_tags(&html),
            body: TrustedHtml::from_converted(html),
        }
    }

    fn from_failure(reason: &str) -> Self {
        Self::from_plain_text(format!("[failed to load file: {reason}]"))
    }

    /// Excerpt for the chapter card blockquote.
    pub fn excerpt(&self) -> String {
        excerpt(&self.excerpt_source, EXCERPT_LIMIT)
    }
}

/// Fetches and normalizes one chapter's content. Runs after the novel
/// fetch has identified the target chapter; at most one request.
pub async fn resolve(client: &NovelClient, source: &ContentSource) -> ResolvedContent {
    match source {
        ContentSource::Inline(text) => ResolvedContent::from_plain_text(text.clone()),
        ContentSource::Remote {
            url,
            kind: RemoteKind::Docx,
        } => {
            let converted = match client.fetch_bytes(url).await {
                Ok(bytes) => docx::convert_to_html(&bytes).map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            match converted {
                Ok(html) => ResolvedContent::from_docx_html(html),
                Err(reason) => {
                    warn!(%url, %reason, "docx content degraded to placeholder");
                    ResolvedContent::from_failure(&reason)
                }
            }
        }
        ContentSource::Remote {
            url,
            kind: RemoteKind::Text,
        } => match client.fetch_text(url).await {
            Ok(text) => ResolvedContent::from_plain_text(text),
            Err(err) => {
                warn!(%url, error = %err, "text content degraded to placeholder");
                ResolvedContent::from_failure(&err.to_string())
            }
        },
    }
}

/// True for well-formed absolute http(s) URLs only.
pub fn is_http_url(s: &str) -> bool {
    match reqwest::Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Absolute URLs pass through; anything else is prefixed with the
/// static-asset base.
pub fn resolve_asset_url(url: &str, static_base: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{static_base}{url}")
    }
}

/// Plain text of an HTML fragment, for excerpting converted documents.
pub fn strip_tags(html: &str) -> String {
    scraper::Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}

/// Truncates to at most `limit` characters, backing up to the last space so
/// the cut never splits a word (unless the head has no space at all), then
/// appends an ellipsis.
pub fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    let head = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{head}…")
}
