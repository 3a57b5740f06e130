use axum::response::Response;

use crate::template::render;

#[derive(askama::Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(askama::Template)]
#[template(path = "success.html")]
struct SuccessTemplate;

pub async fn index() -> Response {
    render(IndexTemplate)
}

pub async fn success() -> Response {
    render(SuccessTemplate)
}
