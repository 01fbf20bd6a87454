pub mod health;
pub mod summarize;

use axum::response::Html;

/// Upload form; the page posts to `/api/summarize` and renders the JSON.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
