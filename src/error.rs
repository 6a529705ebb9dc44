use thiserror::Error;

/// Fatal-for-page failures. Any of these short-circuits rendering and is
/// shown as a single inline error fragment; degraded-content failures never
/// reach this type and are substituted with placeholders instead.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("incomplete page URL: `{0}` parameter not found")]
    MissingParam(&'static str),

    #[error("chapter not found")]
    ChapterNotFound,

    #[error("novel not found for id={0}")]
    NovelNotFound(String),

    #[error("upstream returned HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to decode novel payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures while turning a `.docx` resource into HTML. These stay inside
/// the content resolver and degrade into a placeholder string.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to read word/document.xml: {0}")]
    Io(#[from] std::io::Error),

    #[error("document.xml parse error: {0}")]
    Xml(String),
}
