//! The two page controllers.
//!
//! Each follows the same shape: read identifiers from the query string,
//! fetch the novel aggregate, optionally fetch chapter content, render.
//! Fatal failures short-circuit into the single inline error fragment;
//! degraded-content failures were already converted to placeholders by the
//! time rendering happens, so the surrounding UI stays usable.

use tracing::{info, warn};

use crate::client::NovelClient;
use crate::config::Session;
use crate::content::{self, ContentSource, ResolvedContent};
use crate::error::PageError;
use crate::models::Novel;
use crate::nav::ChapterOrder;
use crate::query::{ChapterParams, NovelParams};
use crate::render::{self, ChapterView};

/// Renders the chapter-detail page for a `?id=..&ch=..` query string.
/// `open_reader` additionally mounts the full-reader sheet.
pub async fn chapter_page(client: &NovelClient, raw_query: &str, open_reader: bool) -> String {
    match try_chapter_page(client, raw_query, open_reader).await {
        Ok(html) => html,
        Err(err) => {
            warn!(raw_query, error = %err, "chapter page failed");
            render::error_fragment(&err.to_string())
        }
    }
}

async fn try_chapter_page(
    client: &NovelClient,
    raw_query: &str,
    open_reader: bool,
) -> Result<String, PageError> {
    let params = ChapterParams::from_query(raw_query)?;
    let novel = client.fetch_novel(&params.novel_id).await?;
    let source = classify_chapter(&novel, params.chapter_index, &client.config().static_base)?;
    let resolved = content::resolve(client, &source).await;
    info!(
        novel_id = %params.novel_id,
        chapter = params.chapter_index,
        "chapter page rendered"
    );

    Ok(assemble_chapter_page(
        &novel,
        &params.novel_id,
        params.chapter_index,
        &resolved,
        source.remote_url(),
        open_reader,
        client.session(),
    ))
}

/// Bounds check before any content fetch: an out-of-range index fails here,
/// so no network request for the body ever goes out.
fn classify_chapter(
    novel: &Novel,
    index: usize,
    static_base: &str,
) -> Result<ContentSource, PageError> {
    let chapter = novel
        .chapters
        .get(index)
        .ok_or(PageError::ChapterNotFound)?;
    Ok(ContentSource::classify(
        chapter.content.as_deref(),
        static_base,
    ))
}

/// Pure assembly of the chapter page from already-fetched data. The session
/// carries the reader's presentation preferences into the full-reader sheet.
pub fn assemble_chapter_page(
    novel: &Novel,
    novel_id: &str,
    index: usize,
    resolved: &ResolvedContent,
    raw_url: Option<&str>,
    open_reader: bool,
    session: &Session,
) -> String {
    let Some(view) = ChapterView::new(novel, novel_id, index, resolved, raw_url, session) else {
        return render::error_fragment(&PageError::ChapterNotFound.to_string());
    };
    let mut html = render::chapter_card(&view);
    if open_reader {
        html.push_str(&render::reader_sheet(&view));
    }
    html
}

/// Renders the novel-detail page (cover card, synopsis, chapter list) for
/// a `?id=..` query string.
pub async fn novel_page(client: &NovelClient, raw_query: &str, order: ChapterOrder) -> String {
    match try_novel_page(client, raw_query, order).await {
        Ok(html) => html,
        Err(err) => {
            warn!(raw_query, error = %err, "novel page failed");
            render::error_fragment(&err.to_string())
        }
    }
}

async fn try_novel_page(
    client: &NovelClient,
    raw_query: &str,
    order: ChapterOrder,
) -> Result<String, PageError> {
    let params = NovelParams::from_query(raw_query)?;
    let novel = client.fetch_novel(&params.novel_id).await?;
    let cover_src = client.cover_data_url(novel.img.as_deref()).await;
    info!(
        novel_id = %params.novel_id,
        chapters = novel.chapters.len(),
        "novel page rendered"
    );
    Ok(assemble_novel_page(&novel, &params.novel_id, &cover_src, order))
}

/// Pure assembly of the novel-detail page from already-fetched data.
pub fn assemble_novel_page(
    novel: &Novel,
    novel_id: &str,
    cover_src: &str,
    order: ChapterOrder,
) -> String {
    let mut html = render::novel_detail(novel, cover_src);
    html.push_str(&render::chapter_list(novel_id, &order.apply(&novel.chapters)));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, Session};
    use crate::models::Chapter;
    use crate::render::NO_IMAGE_SRC;

    fn offline_client() -> NovelClient {
        // Never actually dialed in these tests: every case fails validation
        // before the first request.
        NovelClient::new(ClientConfig::default(), Session::default()).unwrap()
    }

    fn novel_abc() -> Novel {
        Novel {
            id: Some("n1".to_string()),
            title: Some("Ashes".to_string()),
            chapters: ["A", "B", "C"]
                .iter()
                .map(|t| Chapter {
                    title: Some(t.to_string()),
                    views: 1,
                    content: Some(format!("Body of {t}")),
                })
                .collect(),
            ..Novel::default()
        }
    }

    #[tokio::test]
    async fn missing_parameters_render_one_error_and_no_controls() {
        let client = offline_client();
        for query in ["", "id=n1", "ch=0", "id=&ch=0"] {
            let html = chapter_page(&client, query, false).await;
            assert_eq!(html.matches("class=\"error\"").count(), 1, "query {query:?}");
            assert!(!html.contains("prevBtn"));
            assert!(!html.contains("nextBtn"));
        }
    }

    #[tokio::test]
    async fn malformed_chapter_index_is_chapter_not_found() {
        let client = offline_client();
        let html = chapter_page(&client, "id=n1&ch=x", false).await;
        assert_eq!(html, "<div class=\"error\">chapter not found</div>");
    }

    #[tokio::test]
    async fn novel_page_requires_id() {
        let client = offline_client();
        let html = novel_page(&client, "", ChapterOrder::Newest).await;
        assert_eq!(html.matches("class=\"error\"").count(), 1);
        assert!(!html.contains("chapterList"));
    }

    #[test]
    fn middle_chapter_scenario() {
        let novel = novel_abc();
        let resolved = ResolvedContent::from_plain_text("Body of B".to_string());
        let html =
            assemble_chapter_page(&novel, "n1", 1, &resolved, None, false, &Session::default());
        assert!(html.contains("<h1>B</h1>"));
        assert!(html.contains("href=\"ch.html?id=n1&amp;ch=0\""));
        assert!(html.contains("href=\"ch.html?id=n1&amp;ch=2\""));
        assert!(!html.contains("aria-disabled"));
        assert!(!html.contains("class=\"reader\""));
    }

    #[test]
    fn last_chapter_scenario() {
        let novel = novel_abc();
        let resolved = ResolvedContent::from_plain_text("Body of C".to_string());
        let html =
            assemble_chapter_page(&novel, "n1", 2, &resolved, None, false, &Session::default());
        assert!(html.contains("id=\"nextBtn\" href=\"#\" aria-disabled=\"true\""));
        assert!(html.contains("href=\"ch.html?id=n1&amp;ch=1\""));
    }

    #[test]
    fn failed_remote_content_still_shows_the_page_chrome() {
        let novel = novel_abc();
        // What the resolver produces when the docx fetch/conversion fails.
        let resolved = ResolvedContent::from_plain_text(
            "[failed to load file: upstream returned HTTP 500: GET https://static/x.docx]"
                .to_string(),
        );
        let html = assemble_chapter_page(
            &novel,
            "n1",
            1,
            &resolved,
            Some("https://static/x.docx"),
            true,
            &Session::default(),
        );
        assert!(html.contains("[failed to load file:"));
        assert!(html.contains("<h1>B</h1>"));
        assert!(html.contains("prevBtn"));
        assert!(html.contains("nextBtn"));
        assert!(html.contains("id=\"rawLink\""));
        // The reader body carries the same placeholder.
        assert!(html.contains("class=\"chapter-content\" style=\"font-size:16px\">[failed to load file:"));
    }

    #[test]
    fn out_of_bounds_index_fails_before_any_content_classification() {
        let novel = novel_abc();
        assert!(matches!(
            classify_chapter(&novel, 3, "https://static.example"),
            Err(PageError::ChapterNotFound)
        ));
        assert!(classify_chapter(&novel, 2, "https://static.example").is_ok());
    }

    #[test]
    fn out_of_bounds_assembly_renders_the_error_fragment() {
        let novel = novel_abc();
        let resolved = ResolvedContent::from_plain_text("x".to_string());
        let html =
            assemble_chapter_page(&novel, "n1", 3, &resolved, None, true, &Session::default());
        assert_eq!(html, "<div class=\"error\">chapter not found</div>");
    }

    #[test]
    fn reader_honors_the_session_presentation_preferences() {
        let novel = novel_abc();
        let resolved = ResolvedContent::from_plain_text("Body of B".to_string());
        let mut session = Session::default();
        session.set_body_px(22);
        session.preferred_font = Some("serif".to_string());

        let html = assemble_chapter_page(&novel, "n1", 1, &resolved, None, true, &session);
        assert!(html.contains("--fs-body:22px"));
        assert!(html.contains("font-family:serif"));
    }

    #[test]
    fn novel_page_lists_chapters_in_either_order() {
        let novel = novel_abc();
        let newest = assemble_novel_page(&novel, "n1", NO_IMAGE_SRC, ChapterOrder::Newest);
        let oldest = assemble_novel_page(&novel, "n1", NO_IMAGE_SRC, ChapterOrder::Oldest);
        assert!(newest.find("ch=0").unwrap() < newest.find("ch=2").unwrap());
        assert!(oldest.find("ch=2").unwrap() < oldest.find("ch=0").unwrap());
        // Both orders link every chapter by its canonical index.
        for html in [&newest, &oldest] {
            for ch in 0..3 {
                assert!(html.contains(&format!("ch.html?id=n1&amp;ch={ch}")));
            }
        }
    }
}
