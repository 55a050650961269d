//! Request body decoding.
//!
//! # Responsibilities
//! - Pick the codec from the request's content type
//! - Decode JSON:API bodies natively, hand everything else to the host
//!
//! # Design Decisions
//! - The body is buffered in full (bounded by `max_body_bytes`) before
//!   decoding, so it is always drained whatever the outcome
//! - Codec errors are returned untouched; mapping them to a status is the
//!   caller's business

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::Request;
use serde::de::DeserializeOwned;

use super::host::HostCodec;
use super::Renderer;
use crate::jsonapi::{self, CodecError, Resource};
use crate::negotiation::ContentType;

/// Errors surfaced by [`Renderer::decode`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    JsonApi(#[from] CodecError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("unable to automatically decode the request content type `{0}`")]
    Unsupported(ContentType),
}

impl<H: HostCodec> Renderer<H> {
    /// Decode the request body into `T` according to its content type.
    pub async fn decode<T>(&self, req: Request<Body>) -> Result<T, DecodeError>
    where
        T: Resource + DeserializeOwned,
    {
        let (parts, body) = req.into_parts();
        self.decode_parts(&parts, body).await
    }

    /// [`Renderer::decode`] for a request already split into parts.
    pub async fn decode_parts<T>(&self, parts: &Parts, body: Body) -> Result<T, DecodeError>
    where
        T: Resource + DeserializeOwned,
    {
        let content_type = self.negotiator().resolve_request_content_type(parts);
        let bytes = axum::body::to_bytes(body, self.max_body_bytes())
            .await
            .map_err(DecodeError::Body)?;

        let result = self.decode_bytes(content_type, &bytes);
        if let Err(e) = &result {
            tracing::debug!(
                content_type = %content_type,
                error = %e,
                "Failed to decode request body"
            );
        }
        result
    }

    /// Decode an already buffered body of a known content type.
    pub fn decode_bytes<T>(&self, content_type: ContentType, bytes: &[u8]) -> Result<T, DecodeError>
    where
        T: Resource + DeserializeOwned,
    {
        match content_type {
            ContentType::JsonApi => Ok(jsonapi::unmarshal_payload(bytes)?),
            other => self.host().decode(other, bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::Relationships;
    use crate::negotiation::context;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Author {
        id: u64,
        name: String,
    }

    #[derive(Serialize, Deserialize)]
    struct AuthorAttributes {
        name: String,
    }

    impl Resource for Author {
        const TYPE: &'static str = "authors";
        type Attributes = AuthorAttributes;

        fn id(&self) -> String {
            self.id.to_string()
        }

        fn attributes(&self) -> AuthorAttributes {
            AuthorAttributes { name: self.name.clone() }
        }

        fn from_parts(
            id: &str,
            attributes: AuthorAttributes,
            _: &Relationships,
        ) -> Result<Self, CodecError> {
            Ok(Self {
                id: id.parse().map_err(|_| CodecError::InvalidId(id.to_string()))?,
                name: attributes.name,
            })
        }
    }

    fn request(content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_decode_jsonapi_body() {
        let req = request(
            "application/vnd.api+json",
            r#"{"data":{"type":"authors","id":"4","attributes":{"name":"Ursula"}}}"#,
        );
        let author: Author = Renderer::new().decode(req).await.unwrap();
        assert_eq!(author, Author { id: 4, name: "Ursula".into() });
    }

    #[tokio::test]
    async fn test_decode_delegates_json() {
        let req = request("application/json; charset=utf-8", r#"{"id":4,"name":"Ursula"}"#);
        let author: Author = Renderer::new().decode(req).await.unwrap();
        assert_eq!(author, Author { id: 4, name: "Ursula".into() });
    }

    #[tokio::test]
    async fn test_pinned_content_type_overrides_header() {
        let mut req = request(
            "application/json",
            r#"{"data":{"type":"authors","id":"4","attributes":{"name":"Ursula"}}}"#,
        );
        context::set_content_type(req.extensions_mut(), ContentType::JsonApi);
        let author: Author = Renderer::new().decode(req).await.unwrap();
        assert_eq!(author.id, 4);
    }

    #[tokio::test]
    async fn test_decode_errors_are_returned_verbatim() {
        let body = r#"{"data":{{{"#;
        let err = Renderer::new()
            .decode::<Author>(request("application/json", body))
            .await
            .unwrap_err();
        let expected = serde_json::from_str::<Author>(body).unwrap_err();
        assert_eq!(err.to_string(), expected.to_string());
        assert!(matches!(err, DecodeError::Json(_)));

        let err = Renderer::new()
            .decode::<Author>(request("application/vnd.api+json", body))
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::JsonApi(CodecError::Syntax(_))));
    }

    #[tokio::test]
    async fn test_unknown_content_type_uses_host_path() {
        let err = Renderer::new()
            .decode::<Author>(request("application/bogus", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(ContentType::UNKNOWN)));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let renderer = Renderer::new().with_max_body_bytes(8);
        let err = renderer
            .decode::<Author>(request("application/json", r#"{"id":4,"name":"Ursula"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Body(_)));
    }
}
