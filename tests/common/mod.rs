//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use jsonapi_render::jsonapi::{
    CodecError, Relationship, Relationships, Resource, ResourceIdentifier,
};
use serde::{Deserialize, Serialize};

pub const JSONAPI: &str = "application/vnd.api+json";
pub const JSON: &str = "application/json";

/// Blog 42 as a JSON:API document.
pub const BLOG_JSONAPI: &str = r#"{"data":{"type":"blogs","id":"42","attributes":{"current_post_id":0,"title":"The Best Blog","view_count":0},"relationships":{"current_post":{"data":null},"posts":{"data":[]}}}}"#;

/// Blog 42 as plain JSON.
pub const BLOG_JSON: &str = r#"{"id":42,"title":"The Best Blog","posts":[],"current_post":null,"current_post_id":0,"view_count":0}"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub posts: Vec<i64>,
    pub current_post: Option<i64>,
    pub current_post_id: i64,
    pub view_count: i64,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogAttributes {
    pub current_post_id: i64,
    pub title: String,
    pub view_count: i64,
}

fn parse_id(id: &str) -> Result<i64, CodecError> {
    id.parse().map_err(|_| CodecError::InvalidId(id.to_string()))
}

/// Client-generated create documents may omit the primary id.
fn parse_primary_id(id: &str) -> Result<i64, CodecError> {
    if id.is_empty() {
        return Ok(0);
    }
    parse_id(id)
}

impl Resource for Blog {
    const TYPE: &'static str = "blogs";
    type Attributes = BlogAttributes;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> BlogAttributes {
        BlogAttributes {
            current_post_id: self.current_post_id,
            title: self.title.clone(),
            view_count: self.view_count,
        }
    }

    fn relationships(&self) -> Relationships {
        let posts = self
            .posts
            .iter()
            .map(|id| ResourceIdentifier::new(Post::TYPE, id.to_string()))
            .collect();
        let current = self
            .current_post
            .map(|id| ResourceIdentifier::new(Post::TYPE, id.to_string()));

        Relationships::from([
            ("current_post".to_string(), Relationship::to_one(current)),
            ("posts".to_string(), Relationship::to_many(posts)),
        ])
    }

    fn from_parts(
        id: &str,
        attributes: BlogAttributes,
        relationships: &Relationships,
    ) -> Result<Self, CodecError> {
        let posts = match relationships.get("posts") {
            Some(rel) => rel
                .many()
                .into_iter()
                .map(|post| parse_id(&post.id))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        let current_post = relationships
            .get("current_post")
            .and_then(Relationship::one)
            .map(|post| parse_id(&post.id))
            .transpose()?;

        Ok(Self {
            id: parse_primary_id(id)?,
            title: attributes.title,
            posts,
            current_post,
            current_post_id: attributes.current_post_id,
            view_count: attributes.view_count,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Deserialize)]
pub struct PostAttributes {
    pub blog_id: i64,
    pub body: String,
    pub title: String,
}

impl Resource for Post {
    const TYPE: &'static str = "posts";
    type Attributes = PostAttributes;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> PostAttributes {
        PostAttributes {
            blog_id: self.blog_id,
            body: self.body.clone(),
            title: self.title.clone(),
        }
    }

    fn from_parts(
        id: &str,
        attributes: PostAttributes,
        _: &Relationships,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            id: parse_primary_id(id)?,
            blog_id: attributes.blog_id,
            title: attributes.title,
            body: attributes.body,
        })
    }
}

pub fn blog(id: i64) -> Blog {
    Blog {
        id,
        title: "The Best Blog".into(),
        ..Blog::default()
    }
}

/// Build a request carrying the given `Content-Type`/`Accept` headers.
pub fn request(
    method: &str,
    uri: &str,
    content_type: &str,
    accept: &str,
    body: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .header("accept", accept)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
