use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::blog::pages::{home_page, HomePage};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub page: HomePage,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => AppError::from(e).into_response(),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let page = home_page(state.repo.as_ref(), &state.config).await?;

    Ok(Html(IndexTemplate {
        site_title: state.config.blog.site_title.clone(),
        page,
    })
    .into_response())
}
