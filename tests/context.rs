//! Request-scoped overrides: pinned content types, status, binding and
//! per-server render settings.

use std::time::Duration;

use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use jsonapi_render::config::AppConfig;
use jsonapi_render::negotiation::{context, AcceptStrategy};
use jsonapi_render::render::{extract::BoxError, Bind, Bound};
use jsonapi_render::{render, ContentType, Decoded, HttpServer, Negotiated, SetContentTypeLayer};
use tower::ServiceExt;

mod common;
use common::{blog, body_string, request, Blog, BLOG_JSON, BLOG_JSONAPI, JSON, JSONAPI};

#[tokio::test]
async fn test_pinned_content_type_drives_responder() {
    let cases = [(ContentType::JsonApi, BLOG_JSONAPI), (ContentType::JSON, BLOG_JSON)];

    for (content_type, expected) in cases {
        let mut parts = request("GET", "/", "", "", "").into_parts().0;
        parts.headers.clear();
        context::set_content_type(&mut parts.extensions, content_type);

        let resp = render::respond(&parts, &blog(42));
        assert_eq!(body_string(resp).await, expected);
    }
}

#[tokio::test]
async fn test_error_status_from_context() {
    let cases = [
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":[{"title":"Unprocessable Entity","detail":"something went wrong","status":"422"}]}"#,
        ),
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"errors":[{"title":"Internal Server Error","detail":"something went wrong","status":"500"}]}"#,
        ),
    ];

    for (status, expected) in cases {
        let mut parts = request("GET", "/", "", "", "").into_parts().0;
        context::set_content_type(&mut parts.extensions, ContentType::JsonApi);
        context::set_status(&mut parts.extensions, status);

        let resp = render::respond_error(&parts, "something went wrong");
        assert_eq!(resp.status(), status);
        assert_eq!(resp.headers()["content-type"], JSONAPI);
        assert_eq!(body_string(resp).await, expected);
    }
}

async fn echo(negotiated: Negotiated, Decoded(blog): Decoded<Blog>) -> Response {
    negotiated.with_status(StatusCode::ACCEPTED).respond(&blog)
}

#[tokio::test]
async fn test_set_content_type_layer_overrides_headers() {
    let app = Router::new()
        .route("/", post(echo))
        .layer(SetContentTypeLayer::new(ContentType::JsonApi));

    // Headers claim plain JSON, the pinned type wins in both directions.
    let resp = app
        .oneshot(request("POST", "/", JSON, JSON, BLOG_JSONAPI))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(resp.headers()["content-type"], JSONAPI);
    assert_eq!(body_string(resp).await, BLOG_JSONAPI);
}

impl Bind for Blog {
    fn bind(&mut self, _parts: &Parts) -> Result<(), BoxError> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".into());
        }
        self.title = self.title.trim().to_string();
        Ok(())
    }
}

async fn create(negotiated: Negotiated, Bound(blog): Bound<Blog>) -> Response {
    negotiated.with_status(StatusCode::CREATED).respond(&blog)
}

#[tokio::test]
async fn test_bind_hook_validates_and_normalises() {
    let app = Router::new().route("/", post(create));

    let body = r#"{"data":{"type":"blogs","id":"1","attributes":{"title":"  Padded  ","current_post_id":0,"view_count":0}}}"#;
    let resp = app
        .clone()
        .oneshot(request("POST", "/", JSONAPI, JSON, body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let decoded: Blog = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(decoded.title, "Padded");

    let body = r#"{"data":{"type":"blogs","id":"1","attributes":{"title":" ","current_post_id":0,"view_count":0}}}"#;
    let resp = app
        .oneshot(request("POST", "/", JSONAPI, JSONAPI, body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_string(resp).await,
        r#"{"errors":[{"title":"Unprocessable Entity","detail":"title must not be empty","status":"422"}]}"#
    );
}

#[tokio::test]
async fn test_server_render_settings_apply_to_extractors() {
    let mut config = AppConfig::default();
    config.render.accept_strategy = AcceptStrategy::Weighted;
    config.render.max_body_bytes = 64;
    let server = HttpServer::new(config, Router::new().route("/", post(echo)));

    let accept = "application/json;q=0.5, application/vnd.api+json";
    let resp = server
        .router()
        .oneshot(request("POST", "/", JSON, accept, r#"{"id":1,"title":"t"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(resp.headers()["content-type"], JSONAPI);

    let resp = server
        .router()
        .oneshot(request("POST", "/", JSONAPI, JSONAPI, BLOG_JSONAPI))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_to_end_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(AppConfig::default(), Router::new().route("/", post(echo)));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        server
            .run_until(listener, async move {
                let _ = stop_rx.await;
            })
            .await
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let res = client
        .post(format!("http://{addr}/"))
        .header("content-type", JSON)
        .header("accept", JSONAPI)
        .body(BLOG_JSON)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 202);
    assert_eq!(res.headers()["content-type"], JSONAPI);
    assert_eq!(res.text().await.unwrap(), BLOG_JSONAPI);

    let _ = stop_tx.send(());
    handle.await.unwrap().unwrap();
}
