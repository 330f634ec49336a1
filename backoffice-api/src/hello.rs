//! Playground demo routes, kept apart from the admin surface.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use backoffice_core::repository::ProductQuery;
use backoffice_invoice::pdf::hello_document;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(say_hello))
        .route("/hello/download_pdf", get(download_pdf))
}

/// GET /hello
/// Demo listing page: a plain HTML table of products
pub async fn say_hello(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let products = state.products.list(&ProductQuery::default()).await?;

    let mut rows = String::new();
    for view in &products {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            view.product.id, view.product.title, view.product.unit_price
        ));
    }

    let body = format!(
        "<html><body><h1>Hello</h1>\
         <table>\
         <tr><th>id</th><th>title</th><th>unit_price</th></tr>\n{rows}</table>\
         </body></html>"
    );
    Ok(Html(body))
}

/// GET /hello/download_pdf
/// Demo endpoint: a static single-page PDF, downloaded as hello.pdf
pub async fn download_pdf() -> Result<impl IntoResponse, AppError> {
    let bytes = hello_document().map_err(AppError::Export)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"hello.pdf\""),
    );
    Ok((headers, bytes))
}
