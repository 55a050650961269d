//! Demo server: a blog echo service answering JSON and JSON:API clients
//! from the same handlers.
//!
//! ```text
//! GET  /blogs          → collection
//! GET  /blogs/{id}     → one blog, 404 error document otherwise
//! POST /blogs          → decode (JSON or JSON:API), echo back with 202
//! POST /jsonapi/blogs  → same, but always JSON:API in and out
//! ```

use std::path::PathBuf;

use axum::{
    extract::Path,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use jsonapi_render::config::{load_config, AppConfig};
use jsonapi_render::jsonapi::{CodecError, Relationship, Relationships, Resource};
use jsonapi_render::observability::logging;
use jsonapi_render::{ContentType, Decoded, HttpServer, Negotiated, SetContentTypeLayer};

#[derive(Parser)]
#[command(name = "jsonapi-render")]
#[command(about = "Blog echo server negotiating JSON and JSON:API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Blog {
    id: u64,
    title: String,
    post_ids: Vec<u64>,
    view_count: u64,
}

#[derive(Serialize, Deserialize)]
struct BlogAttributes {
    title: String,
    view_count: u64,
}

impl Resource for Blog {
    const TYPE: &'static str = "blogs";
    type Attributes = BlogAttributes;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> BlogAttributes {
        BlogAttributes {
            title: self.title.clone(),
            view_count: self.view_count,
        }
    }

    fn relationships(&self) -> Relationships {
        let posts = self
            .post_ids
            .iter()
            .map(|id| jsonapi_render::jsonapi::ResourceIdentifier::new("posts", id.to_string()))
            .collect();
        Relationships::from([("posts".to_string(), Relationship::to_many(posts))])
    }

    fn from_parts(
        id: &str,
        attributes: BlogAttributes,
        relationships: &Relationships,
    ) -> Result<Self, CodecError> {
        let post_ids = relationships
            .get("posts")
            .map(|rel| {
                rel.many()
                    .into_iter()
                    .map(|post| post.id.parse().map_err(|_| CodecError::InvalidId(post.id.clone())))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            // Create documents may leave the id to the server.
            id: if id.is_empty() {
                0
            } else {
                id.parse().map_err(|_| CodecError::InvalidId(id.to_string()))?
            },
            title: attributes.title,
            post_ids,
            view_count: attributes.view_count,
        })
    }
}

fn sample_blogs() -> Vec<Blog> {
    vec![
        Blog {
            id: 11,
            title: "The Best Blog".into(),
            post_ids: vec![1, 2],
            view_count: 42,
        },
        Blog {
            id: 12,
            title: "The Second Best Blog".into(),
            post_ids: vec![],
            view_count: 7,
        },
    ]
}

async fn list_blogs(negotiated: Negotiated) -> Response {
    negotiated.respond(&sample_blogs())
}

async fn get_blog(negotiated: Negotiated, Path(id): Path<u64>) -> Response {
    match sample_blogs().into_iter().find(|b| b.id == id) {
        Some(blog) => negotiated.respond(&blog),
        None => negotiated
            .with_status(StatusCode::NOT_FOUND)
            .respond_error(&format!("blog {id} not found")),
    }
}

async fn echo_blog(negotiated: Negotiated, Decoded(blog): Decoded<Blog>) -> Response {
    tracing::debug!(blog_id = blog.id, "Echoing blog");
    negotiated.with_status(StatusCode::ACCEPTED).respond(&blog)
}

fn routes() -> Router {
    let pinned = Router::new()
        .route("/blogs", post(echo_blog))
        .layer(SetContentTypeLayer::new(ContentType::JsonApi));

    Router::new()
        .route("/blogs", get(list_blogs).post(echo_blog))
        .route("/blogs/{id}", get(get_blog))
        .nest("/jsonapi", pinned)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        accept_strategy = ?config.render.accept_strategy,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, routes());
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
