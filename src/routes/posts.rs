use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::blog::pages::{post_page, PostPage};
use crate::error::AppResult;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/post_detail.html")]
pub struct PostDetailTemplate {
    pub site_title: String,
    pub page: PostPage,
}

pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let page = post_page(state.repo.as_ref(), &state.config, &slug).await?;

    Ok(Html(PostDetailTemplate {
        site_title: state.config.blog.site_title.clone(),
        page,
    })
    .into_response())
}
