//! Standalone HTML export of a finished comic
//!
//! Every panel image is inlined as its data URI, so the page has no
//! external references.

use chrono::{DateTime, Utc};
use comic_domain::{AppSession, AppState, ComicDocument, Expert, Question};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;background:#fafaf7;color:#222}\
h1{text-align:center}\
.guide{text-align:center;color:#555}\
.grid{display:grid;grid-template-columns:repeat(2,1fr);gap:1rem}\
figure{margin:0;background:#fff;border:3px solid #222;border-radius:8px;overflow:hidden}\
figure img{width:100%;display:block}\
figure .missing{aspect-ratio:1;display:flex;align-items:center;justify-content:center;color:#999}\
figcaption{padding:.75rem;font-size:1.05rem}\
.summary{margin-top:2rem;padding:1rem;background:#fff3c4;border-radius:8px}\
footer{margin-top:2rem;text-align:center;font-size:.8rem;color:#888}";

/// Renders a comic into a self-contained HTML page
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Page for a finished comic; `None` unless the session is in Success
    pub fn render_session(session: &AppSession) -> Option<String> {
        match session.state() {
            AppState::Success {
                question,
                expert,
                comic,
            } => Some(Self::render(question, expert, comic)),
            _ => None,
        }
    }

    pub fn render(question: &Question, expert: &Expert, comic: &ComicDocument) -> String {
        Self::render_at(question, expert, comic, Utc::now())
    }

    pub fn render_at(
        question: &Question,
        expert: &Expert,
        comic: &ComicDocument,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(comic.title())));
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

        html.push_str(&format!("<h1>{}</h1>\n", escape(comic.title())));
        html.push_str(&format!(
            "<p class=\"guide\">{} &middot; with <strong>{}</strong>, {}</p>\n",
            escape(question.content()),
            escape(&expert.name),
            escape(&expert.description)
        ));

        html.push_str("<section class=\"grid\">\n");
        for (index, panel) in comic.panels().iter().enumerate() {
            html.push_str("<figure>\n");
            match panel.image_url() {
                Some(image) => html.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    escape(&image.to_string()),
                    escape(&panel.description)
                )),
                None => html.push_str(&format!(
                    "<div class=\"missing\">Panel {}</div>\n",
                    index + 1
                )),
            }
            html.push_str(&format!(
                "<figcaption>{}</figcaption>\n</figure>\n",
                escape(&panel.narration)
            ));
        }
        html.push_str("</section>\n");

        html.push_str(&format!(
            "<section class=\"summary\">\n<h2>What we learned</h2>\n<p>{}</p>\n</section>\n",
            escape(comic.summary())
        ));
        html.push_str(&format!(
            "<footer>Generated by comic-tutor on {}</footer>\n</body>\n</html>\n",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
