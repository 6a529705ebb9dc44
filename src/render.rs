//! HTML fragment rendering.
//!
//! Every interpolated string goes through [`escape_html`]; the single
//! exception is [`TrustedHtml`], which can only be built from converter
//! output or from text that was escaped on the way in.

use crate::config::{Session, TypeScale};
use crate::content::ResolvedContent;
use crate::models::{Chapter, Novel};
use crate::nav::{ChapterNav, NavLink};

/// Inline "No Image" graphic used when a cover cannot be loaded.
pub const NO_IMAGE_SRC: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22300%22 height=%22400%22%3E%3Crect fill=%22%23ddd%22 width=%22300%22 height=%22400%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 text-anchor=%22middle%22 dy=%22.3em%22 fill=%22%23999%22%3ENo Image%3C/text%3E%3C/svg%3E";

/// Maps `& < > " '` to their entity equivalents.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML that is rendered without further escaping. There are exactly two
/// ways in: converter output (itself generated HTML) and plain text that
/// gets escaped here before newlines become `<br>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wraps HTML produced by the document converter.
    pub fn from_converted(html: String) -> Self {
        Self(html)
    }

    /// Escapes plain text and turns newlines into line breaks.
    pub fn from_text(text: &str) -> Self {
        Self(escape_html(text).replace('\n', "<br>"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The single inline error element fatal failures render to.
pub fn error_fragment(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", escape_html(message))
}

/// Everything the chapter card needs, resolved ahead of rendering.
pub struct ChapterView<'a> {
    novel: &'a Novel,
    novel_id: &'a str,
    index: usize,
    chapter: &'a Chapter,
    content: &'a ResolvedContent,
    /// Resolved URL of the raw content file, when the chapter is remote.
    raw_url: Option<&'a str>,
    scale: TypeScale,
    font: Option<&'a str>,
}

impl<'a> ChapterView<'a> {
    /// Resolves the chapter up front; `None` for an out-of-range index, so
    /// rendering itself never indexes into the chapter list.
    pub fn new(
        novel: &'a Novel,
        novel_id: &'a str,
        index: usize,
        content: &'a ResolvedContent,
        raw_url: Option<&'a str>,
        session: &'a Session,
    ) -> Option<Self> {
        let chapter = novel.chapters.get(index)?;
        Some(Self {
            novel,
            novel_id,
            index,
            chapter,
            content,
            raw_url,
            scale: TypeScale::from_body(session.body_px()),
            font: session.preferred_font.as_deref(),
        })
    }
}

/// The chapter-detail card: cover, series line, title, views, excerpt and
/// the navigation controls.
pub fn chapter_card(view: &ChapterView<'_>) -> String {
    let chapter = view.chapter;
    let series_title = view.novel.display_title();
    let chapter_title = chapter.display_title(view.index);
    let nav = ChapterNav::new(view.index, view.novel.chapters.len());

    let mut html = String::new();
    html.push_str("<article class=\"read-card\" aria-label=\"Chapter card\">\n");

    if let Some(cover) = view.novel.img.as_deref().filter(|img| !img.is_empty()) {
        html.push_str(&format!(
            "  <img class=\"cover\" src=\"{}\" alt=\"Cover {}\">\n",
            escape_html(cover),
            escape_html(series_title)
        ));
    }

    html.push_str(&format!(
        "  <div class=\"meta\"><strong>Series</strong> • <span>{}</span></div>\n",
        escape_html(series_title)
    ));
    html.push_str(&format!("  <h1>{}</h1>\n", escape_html(&chapter_title)));
    html.push_str(&format!(
        "  <div class=\"meta\">Views: <strong>{}</strong></div>\n",
        chapter.views
    ));
    html.push_str(&format!(
        "  <blockquote aria-label=\"Chapter excerpt\">{}</blockquote>\n",
        escape_html(&view.content.excerpt())
    ));

    html.push_str("  <div class=\"controls\" role=\"navigation\" aria-label=\"Chapter navigation\">\n");
    html.push_str(&nav_anchor(
        "prevBtn",
        "btn ghost",
        "‹ Previous Chapter",
        &nav.prev_link(view.novel_id),
    ));
    html.push_str(&nav_anchor(
        "readBtn",
        "btn primary",
        "Read Full",
        &NavLink {
            href: Some("#reader".to_string()),
        },
    ));
    html.push_str(&nav_anchor(
        "nextBtn",
        "btn ghost",
        "Next Chapter ›",
        &nav.next_link(view.novel_id),
    ));
    if let Some(raw_url) = view.raw_url {
        html.push_str(&format!(
            "    <a class=\"btn raw\" id=\"rawLink\" href=\"{}\" target=\"_blank\">Open Raw</a>\n",
            escape_html(raw_url)
        ));
    }
    html.push_str("  </div>\n");

    html.push_str("  <span class=\"small\">Estimated reading time: ~12 min</span>\n");
    html.push_str("</article>\n");
    html
}

fn nav_anchor(id: &str, class: &str, label: &str, link: &NavLink) -> String {
    match link.href.as_deref() {
        Some(href) => format!(
            "    <a class=\"{class}\" id=\"{id}\" href=\"{}\">{label}</a>\n",
            escape_html(href)
        ),
        None => format!(
            "    <a class=\"{class}\" id=\"{id}\" href=\"#\" aria-disabled=\"true\">{label}</a>\n"
        ),
    }
}

/// The full-reader overlay sheet. The body is the only unescaped
/// interpolation in the crate. The session's presentation preferences
/// land here: the type scale as CSS variables and the preferred font and
/// base size on the chapter body.
pub fn reader_sheet(view: &ChapterView<'_>) -> String {
    let chapter_title = view.chapter.display_title(view.index);
    let scale = view.scale;
    let body_style = match view.font {
        Some(font) => format!(
            "font-size:{}px;font-family:{}",
            scale.body,
            escape_html(font)
        ),
        None => format!("font-size:{}px", scale.body),
    };
    format!(
        concat!(
            "<div class=\"reader\" id=\"reader\">\n",
            "  <style>:root{{--fs-body:{fs_body}px;--fs-h1:{fs_h1}px;--fs-quote:{fs_quote}px;",
            "--fs-btn:{fs_btn}px;--fs-meta:{fs_meta}px;--fs-small:{fs_small}px}}</style>\n",
            "  <div class=\"sheet\" role=\"dialog\" aria-label=\"Full reader\">\n",
            "    <a href=\"#\" class=\"close closeReader\">Close</a>\n",
            "    <h2>{series} — {chapter}</h2>\n",
            "    <div id=\"chapterBody\" class=\"chapter-content\" style=\"{body_style}\">{body}</div>\n",
            "    <a href=\"#\" class=\"close closeReader\">Close</a>\n",
            "  </div>\n",
            "</div>\n",
        ),
        fs_body = scale.body,
        fs_h1 = scale.h1,
        fs_quote = scale.quote,
        fs_btn = scale.btn,
        fs_meta = scale.meta,
        fs_small = scale.small,
        series = escape_html(view.novel.display_title()),
        chapter = escape_html(&chapter_title),
        body_style = body_style,
        body = view.content.body.as_str(),
    )
}

/// The novel-detail card plus synopsis section for the desk page.
pub fn novel_detail(novel: &Novel, cover_src: &str) -> String {
    let title = novel.display_title();
    let genres = novel.genres();
    let genre_label = if genres.is_empty() {
        "-".to_string()
    } else {
        genres.join(", ")
    };

    let mut html = String::new();
    html.push_str("<div class=\"card\">\n");
    html.push_str(&format!(
        "  <img src=\"{}\" alt=\"{}\">\n",
        escape_html(cover_src),
        escape_html(title)
    ));
    html.push_str(&format!("  <h2>{}</h2>\n", escape_html(title)));
    html.push_str(&format!(
        "  <div class=\"meta\">{} • {} • {}</div>\n",
        escape_html(novel.rating.as_deref().unwrap_or("-")),
        escape_html(novel.year.as_deref().unwrap_or("-")),
        escape_html(novel.status.as_deref().unwrap_or("-"))
    ));
    html.push_str(&format!(
        "  <div class=\"genre\">{}</div>\n",
        escape_html(&genre_label)
    ));
    html.push_str("  <a class=\"btn-back\" href=\"index.html\">Back</a>\n");
    html.push_str("</div>\n");
    html.push_str("<div class=\"section\">\n  <h3>Synopsis</h3>\n");
    html.push_str(&format!(
        "  <p>{}</p>\n",
        escape_html(
            novel
                .summary
                .as_deref()
                .filter(|summary| !summary.is_empty())
                .unwrap_or("No synopsis.")
        )
    ));
    html.push_str("</div>\n");
    html
}

/// The desk page chapter list. `rows` carry the canonical chapter index so
/// links survive display reordering.
pub fn chapter_list(novel_id: &str, rows: &[(usize, &Chapter)]) -> String {
    let mut html = String::new();
    html.push_str("<div id=\"chapterList\">\n");
    for (index, chapter) in rows {
        html.push_str(&format!(
            concat!(
                "  <div class=\"chapter-item\">\n",
                "    <a href=\"{href}\">{title}</a>\n",
                "    <div class=\"views\">{views}</div>\n",
                "  </div>\n",
            ),
            href = escape_html(&crate::nav::chapter_href(novel_id, *index)),
            title = escape_html(&chapter.display_title(*index)),
            views = chapter.views,
        ));
    }
    html.push_str("</div>\n");
    html
}
