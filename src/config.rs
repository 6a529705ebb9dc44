//! Endpoint configuration and the reader session.
//!
//! The browser original kept the auth token and display preferences in
//! ambient key-value storage; here they live in an explicit [`Session`]
//! that is loaded once at startup and passed into the client and renderer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MIN_BODY_PX: u32 = 12;
pub const MAX_BODY_PX: u32 = 24;
pub const DEFAULT_BODY_PX: u32 = 16;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API prefix, e.g. `https://api.limenovel.my.id/api`.
    pub api_base: String,
    /// Prefix for relative asset paths returned by the API.
    pub static_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.limenovel.my.id/api".to_string(),
            static_base: "https://api.limenovel.my.id".to_string(),
        }
    }
}

impl ClientConfig {
    /// Production defaults, overridable via `LIMENOVEL_API_BASE` and
    /// `LIMENOVEL_STATIC_BASE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("LIMENOVEL_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = std::env::var("LIMENOVEL_STATIC_BASE") {
            config.static_base = base;
        }
        config
    }
}

/// Per-user state: opaque auth token plus presentation preferences.
/// Requests proceed unauthenticated when no token is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub preferred_font: Option<String>,
    #[serde(default)]
    pub preferred_size: Option<u32>,
}

impl Session {
    /// Loads the session file, falling back to defaults when it is missing
    /// or unreadable. A corrupt session is never a page error.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        home::home_dir()
            .unwrap_or_default()
            .join(".limenovel")
            .join("session.json")
    }

    /// Preferred base font size, clamped to the supported range.
    pub fn body_px(&self) -> u32 {
        self.preferred_size
            .map(clamp_body_px)
            .unwrap_or(DEFAULT_BODY_PX)
    }

    pub fn set_body_px(&mut self, px: u32) {
        self.preferred_size = Some(clamp_body_px(px));
    }

    /// Size stepper used by the +/- controls.
    pub fn step_body_px(&mut self, delta: i32) {
        let px = i64::from(self.body_px()) + i64::from(delta);
        self.set_body_px(px.clamp(i64::from(MIN_BODY_PX), i64::from(MAX_BODY_PX)) as u32);
    }
}

pub fn clamp_body_px(px: u32) -> u32 {
    px.clamp(MIN_BODY_PX, MAX_BODY_PX)
}

/// Font sizes derived from the base size, one slot per CSS variable the
/// page defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeScale {
    pub body: u32,
    pub h1: u32,
    pub quote: u32,
    pub btn: u32,
    pub meta: u32,
    pub small: u32,
}

impl TypeScale {
    pub fn from_body(px: u32) -> Self {
        let scaled = |factor: f64| (f64::from(px) * factor).round() as u32;
        Self {
            body: px,
            h1: scaled(1.25),
            quote: scaled(0.95),
            btn: scaled(0.875),
            meta: scaled(0.8125),
            small: scaled(0.75),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_size_is_clamped_to_range() {
        let mut session = Session::default();
        assert_eq!(session.body_px(), DEFAULT_BODY_PX);

        session.set_body_px(8);
        assert_eq!(session.body_px(), MIN_BODY_PX);
        session.set_body_px(99);
        assert_eq!(session.body_px(), MAX_BODY_PX);
        session.set_body_px(18);
        assert_eq!(session.body_px(), 18);
    }

    #[test]
    fn stepping_stops_at_the_bounds() {
        let mut session = Session::default();
        session.set_body_px(MIN_BODY_PX);
        session.step_body_px(-1);
        assert_eq!(session.body_px(), MIN_BODY_PX);
        session.step_body_px(1);
        assert_eq!(session.body_px(), MIN_BODY_PX + 1);
        session.set_body_px(MAX_BODY_PX);
        session.step_body_px(1);
        assert_eq!(session.body_px(), MAX_BODY_PX);
    }

    #[test]
    fn type_scale_uses_the_page_multipliers() {
        let scale = TypeScale::from_body(16);
        assert_eq!(scale.body, 16);
        assert_eq!(scale.h1, 20);
        assert_eq!(scale.quote, 15);
        assert_eq!(scale.btn, 14);
        assert_eq!(scale.meta, 13);
        assert_eq!(scale.small, 12);
    }

    #[test]
    fn session_round_trips_through_the_file() {
        let path = std::env::temp_dir().join(format!(
            "limenovel-session-test-{}.json",
            std::process::id()
        ));
        let mut session = Session::default();
        session.token = Some("tok".to_string());
        session.preferred_font = Some("serif".to_string());
        session.set_body_px(20);
        session.save(&path).unwrap();

        let loaded = Session::load(&path);
        assert_eq!(loaded.token.as_deref(), Some("tok"));
        assert_eq!(loaded.preferred_font.as_deref(), Some("serif"));
        assert_eq!(loaded.body_px(), 20);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_or_corrupt_session_loads_defaults() {
        let missing = Session::load(Path::new("/nonexistent/limenovel/session.json"));
        assert!(missing.token.is_none());

        let path = std::env::temp_dir().join(format!(
            "limenovel-session-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json").unwrap();
        let corrupt = Session::load(&path);
        assert!(corrupt.token.is_none());
        std::fs::remove_file(&path).unwrap();
    }
}
