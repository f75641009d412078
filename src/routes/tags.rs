use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::blog::pages::{tag_page, TagPage};
use crate::error::AppResult;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/posts_list.html")]
pub struct PostsListTemplate {
    pub site_title: String,
    pub page: TagPage,
}

pub async fn filter(
    State(state): State<AppState>,
    Path(tag_title): Path<String>,
) -> AppResult<Response> {
    let page = tag_page(state.repo.as_ref(), &state.config, &tag_title).await?;

    Ok(Html(PostsListTemplate {
        site_title: state.config.blog.site_title.clone(),
        page,
    })
    .into_response())
}
