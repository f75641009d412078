use askama::Template;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/contacts.html")]
pub struct ContactsTemplate {
    pub site_title: String,
}

pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    Html(ContactsTemplate {
        site_title: state.config.blog.site_title.clone(),
    })
}
