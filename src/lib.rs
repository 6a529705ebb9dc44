pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod nav;
pub mod page;
pub mod query;
pub mod render;

pub use client::NovelClient;
pub use config::{ClientConfig, Session};
pub use error::PageError;
pub use models::{Chapter, Novel, NovelPayload};
pub use nav::ChapterOrder;
