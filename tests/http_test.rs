mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::TestBlog;
use tower::ServiceExt;

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn seeded_blog() -> TestBlog {
    let blog = TestBlog::new();
    let alice = blog.user("alice");
    let bob = blog.user("bob");
    let rust = blog.tag("rust");
    blog.tag("django");
    let post = blog.post(alice, "hello-world", 0);
    blog.tag_post(post, rust);
    blog.comment(post, bob, "Great post, thanks!", 1);
    blog.like(post, bob);
    blog
}

#[tokio::test]
async fn home_page_renders_posts_and_tags() {
    let blog = seeded_blog();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let body = body_text(response).await;
    assert!(body.contains("href=\"/posts/hello-world\""));
    assert!(body.contains("#rust"));
    assert!(body.contains("#django"));
}

#[tokio::test]
async fn home_page_renders_on_empty_database() {
    let blog = TestBlog::new();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Nothing has been published yet."));
}

#[tokio::test]
async fn post_detail_renders_comments() {
    let blog = seeded_blog();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/posts/hello-world").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Great post, thanks!"));
    assert!(body.contains("Comments (1)"));
    assert!(body.contains("1 likes"));
}

#[tokio::test]
async fn unknown_post_is_404() {
    let blog = TestBlog::new();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/posts/hello-world").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tag_page_lists_tagged_posts() {
    let blog = seeded_blog();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/tags/rust").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Posts tagged #rust"));
    assert!(body.contains("href=\"/posts/hello-world\""));
}

#[tokio::test]
async fn empty_tag_page_renders() {
    let blog = seeded_blog();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/tags/django").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No posts with this tag yet."));
}

#[tokio::test]
async fn unknown_tag_is_404() {
    let blog = seeded_blog();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/tags/haskell").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contacts_page_renders() {
    let blog = TestBlog::new();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/contacts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<h1>Contacts</h1>"));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let blog = TestBlog::new();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/assets/css/blog.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
}

#[tokio::test]
async fn media_files_are_served_under_prefix() {
    let blog = TestBlog::new();
    std::fs::create_dir_all(blog.media_dir().join("posts")).unwrap();
    std::fs::write(blog.media_dir().join("posts/cover.txt"), "cover").unwrap();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/media/posts/cover.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "cover");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let blog = TestBlog::new();
    let app = blogsite::routes::router(blog.state());

    let response = get(app, "/wp-admin").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn html_in_content_is_escaped() {
    let blog = TestBlog::new();
    let alice = blog.user("alice");
    let post = blog.post(alice, "xss", 0);
    blog.comment(post, alice, "<script>alert(1)</script>", 1);
    let app = blogsite::routes::router(blog.state());

    let body = body_text(get(app, "/posts/xss").await).await;
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn tag_links_survive_slashes_in_titles() {
    let blog = TestBlog::new();
    let alice = blog.user("alice");
    let ci = blog.tag("ci/cd");
    let post = blog.post(alice, "pipelines", 0);
    blog.tag_post(post, ci);
    let app = blogsite::routes::router(blog.state());

    let home = body_text(get(app.clone(), "/").await).await;
    let start = home.find("href=\"/tags/ci").expect("tag link rendered") + "href=\"".len();
    let end = start + home[start..].find('"').unwrap();
    let href = &home[start..end];
    assert_eq!(href, "/tags/ci%2Fcd");

    let response = get(app, href).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("href=\"/posts/pipelines\""));
}
