use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One readable unit of a novel. Chapters have no identifier of their own:
/// their position in `Novel::chapters` is the only addressing scheme, so
/// links break if the server reorders the sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub views: u64,
    /// Inline text, or a URL (absolute or static-base-relative) pointing to
    /// a `.docx` or plain-text resource.
    #[serde(default)]
    pub content: Option<String>,
}

impl Chapter {
    pub fn display_title(&self, index: usize) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Chapter {}", index + 1),
        }
    }
}

/// The novel aggregate as served by `GET /novels/{id}`. Every field is
/// optional on the wire; accessors fill in the display fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Novel {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genre1: Option<String>,
    #[serde(default)]
    pub genre2: Option<String>,
    #[serde(default)]
    pub genre3: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Novel {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or("Unknown Series")
    }

    /// Up to three non-empty genre labels.
    pub fn genres(&self) -> Vec<&str> {
        [&self.genre1, &self.genre2, &self.genre3]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|genre| !genre.is_empty())
            .collect()
    }
}

/// Wire shape of the novel endpoint. The server sometimes wraps the novel
/// in `{ "novel": {...} }` and sometimes returns the bare object; this is
/// collapsed to a canonical [`Novel`] at the API-client boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NovelPayload {
    Wrapped { novel: Novel },
    Bare(Novel),
}

impl NovelPayload {
    pub fn into_novel(self) -> Novel {
        match self {
            NovelPayload::Wrapped { novel } => novel,
            NovelPayload::Bare(novel) => novel,
        }
    }
}

/// Accepts a JSON string or number where the API is inconsistent about
/// which one it serves (`rating`, `year`, `id`).
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_and_bare_payloads_decode_to_the_same_novel() {
        let bare = r#"{"title":"Ashes","chapters":[{"title":"One","views":3}]}"#;
        let wrapped = format!(r#"{{"novel":{bare}}}"#);

        let a: NovelPayload = serde_json::from_str(bare).unwrap();
        let b: NovelPayload = serde_json::from_str(&wrapped).unwrap();
        let (a, b) = (a.into_novel(), b.into_novel());
        assert_eq!(a.title.as_deref(), Some("Ashes"));
        assert_eq!(b.title.as_deref(), Some("Ashes"));
        assert_eq!(a.chapters.len(), 1);
        assert_eq!(b.chapters[0].views, 3);
    }

    #[test]
    fn rating_and_year_accept_numbers_or_strings() {
        let novel: Novel =
            serde_json::from_str(r#"{"rating":8.5,"year":"2021","id":42}"#).unwrap();
        assert_eq!(novel.rating.as_deref(), Some("8.5"));
        assert_eq!(novel.year.as_deref(), Some("2021"));
        assert_eq!(novel.id.as_deref(), Some("42"));
    }

    #[test]
    fn views_tolerate_string_counters() {
        let chapter: Chapter = serde_json::from_str(r#"{"views":"17"}"#).unwrap();
        assert_eq!(chapter.views, 17);
        let chapter: Chapter = serde_json::from_str(r#"{"views":null}"#).unwrap();
        assert_eq!(chapter.views, 0);
    }

    #[test]
    fn genres_filter_missing_and_empty_slots() {
        let novel: Novel =
            serde_json::from_str(r#"{"genre1":"Action","genre2":"","genre3":"Drama"}"#).unwrap();
        assert_eq!(novel.genres(), vec!["Action", "Drama"]);
        assert!(Novel::default().genres().is_empty());
    }

    #[test]
    fn display_fallbacks() {
        let novel = Novel::default();
        assert_eq!(novel.display_title(), "Unknown Series");
        let chapter = Chapter::default();
        assert_eq!(chapter.display_title(4), "Chapter 5");
    }
}
