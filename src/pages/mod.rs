use std::fmt::Write;

use axum::extract::{DefaultBodyLimit, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::common::markup::escape;
use crate::state::AppState;

pub mod forecast;
pub mod monitoring;
pub mod text;
pub mod upload;

const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Monitoring,
    Forecast,
    Upload,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Monitoring, Page::Forecast, Page::Upload];

    pub fn label(self) -> &'static str {
        match self {
            Page::Monitoring => text::PAGE_MONITORING,
            Page::Forecast => text::PAGE_FORECAST,
            Page::Upload => text::PAGE_UPLOAD,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Monitoring => "/monitoring",
            Page::Forecast => "/forecast",
            Page::Upload => "/upload",
        }
    }
}

/// Advisory message shown inside a page. Never stops the rest of the page
/// from rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Error(String),
    Warning(String),
    Success(String),
    Info(String),
}

impl Notice {
    pub fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Error(text) => ("error", text),
            Notice::Warning(text) => ("warning", text),
            Notice::Success(text) => ("success", text),
            Notice::Info(text) => ("info", text),
        };

        format!(
            r#"<div class="notice {class}" role="status">{}</div>"#,
            escape(text)
        )
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(show_monitoring))
        .route("/monitoring", get(show_monitoring))
        .route("/forecast", get(show_forecast))
        .route("/upload", get(show_upload).post(upload::receive))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

async fn show_monitoring(State(state): State<AppState>) -> Html<String> {
    show(&state, Page::Monitoring).await
}

async fn show_forecast(State(state): State<AppState>) -> Html<String> {
    show(&state, Page::Forecast).await
}

async fn show_upload(State(state): State<AppState>) -> Html<String> {
    show(&state, Page::Upload).await
}

/// Every interaction reads the store first, whichever page is shown.
async fn show(state: &AppState, page: Page) -> Html<String> {
    let snapshot = state.snapshot().await;

    let content = match page {
        Page::Monitoring => monitoring::render(&snapshot.historical),
        Page::Forecast => forecast::render(&snapshot.forecast),
        Page::Upload => upload::render(&[]),
    };

    Html(layout(page, &content))
}

pub fn layout(current: Page, content: &str) -> String {
    let mut nav = String::new();

    for page in Page::ALL {
        let marker = if page == current {
            r#" class="active" aria-current="page""#
        } else {
            ""
        };
        let _ = write!(
            nav,
            r#"<li><a href="{}"{marker}>{}</a></li>"#,
            page.path(),
            escape(page.label())
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav class="sidebar">
<h2>{nav_title}</h2>
<p>{nav_prompt}</p>
<ul>{nav}</ul>
</nav>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(current.label()),
        nav_title = escape(text::NAV_TITLE),
        nav_prompt = escape(text::NAV_PROMPT),
    )
}

const STYLE: &str = "\
body{margin:0;display:flex;font-family:sans-serif;color:#262730}\
.sidebar{width:16rem;min-height:100vh;padding:1rem;background:#f0f2f6}\
.sidebar ul{list-style:none;padding:0}\
.sidebar a{display:block;padding:.4rem;color:inherit;text-decoration:none}\
.sidebar a.active{font-weight:bold;background:#fff;border-radius:.3rem}\
main{flex:1;padding:1rem 2rem}\
.chart{width:100%;height:auto}\
.notice{padding:.8rem;margin:.8rem 0;border-radius:.3rem}\
.notice.error{background:#ffe0e0}\
.notice.warning{background:#fff5d6}\
.notice.success{background:#dff5e3}\
.notice.info{background:#e0ecff}\
table.alerts{border-collapse:collapse}\
table.alerts td,table.alerts th{border:1px solid #ddd;padding:.3rem .6rem}";
