//! Page URL query-string handling.
//!
//! The chapter page needs `id` (novel identifier) and `ch` (zero-based
//! chapter index); the novel-detail page needs `id` only. Missing either
//! required parameter is the single validation gate for a page: nothing
//! else runs after it fails.

use crate::error::PageError;

/// Parameters of the chapter page (`ch.html?id=..&ch=..`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterParams {
    pub novel_id: String,
    pub chapter_index: usize,
}

impl ChapterParams {
    pub fn from_query(raw: &str) -> Result<Self, PageError> {
        let novel_id = query_param(raw, "id")
            .filter(|id| !id.is_empty())
            .ok_or(PageError::MissingParam("id"))?;
        let ch = query_param(raw, "ch").ok_or(PageError::MissingParam("ch"))?;
        // Anything that is not a non-negative base-10 integer resolves to no
        // chapter, same as an out-of-bounds index.
        let chapter_index = ch.parse::<usize>().map_err(|_| PageError::ChapterNotFound)?;
        Ok(Self {
            novel_id,
            chapter_index,
        })
    }
}

/// Parameters of the novel-detail page (`desk.html?id=..`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelParams {
    pub novel_id: String,
}

impl NovelParams {
    pub fn from_query(raw: &str) -> Result<Self, PageError> {
        let novel_id = query_param(raw, "id")
            .filter(|id| !id.is_empty())
            .ok_or(PageError::MissingParam("id"))?;
        Ok(Self { novel_id })
    }
}

/// First value of `name` in a query string, percent-decoded. Accepts the
/// string with or without the leading `?`.
pub fn query_param(raw: &str, name: &str) -> Option<String> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == name).then(|| decode_component(value))
        })
}

/// Percent-decode one query component (`+` is a space).
pub fn decode_component(component: &str) -> String {
    let bytes = component.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode one query component, keeping unreserved characters.
pub fn encode_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn hex_value(byte: Option<&u8>) -> Option<u8> {
    match *byte? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
