//! `Accept` header candidate selection.
//!
//! The default strategy mirrors what existing clients of this adapter rely
//! on: the first listed media type wins and quality values are ignored.
//! [`AcceptStrategy::Weighted`] is opt-in.

use mime::Mime;
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;

/// How a multi-valued `Accept` header is reduced to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptStrategy {
    /// First comma-separated candidate, no `q=` weighting.
    #[default]
    First,
    /// Highest `q` among recognised candidates; wildcards and `q=0` skipped.
    Weighted,
}

/// Pick a content type out of an `Accept` header value.
///
/// Returns [`ContentType::UNKNOWN`] when nothing usable is listed; the
/// caller decides on a fallback.
pub fn select<F>(header: &str, strategy: AcceptStrategy, resolve: F) -> ContentType
where
    F: Fn(&str) -> ContentType,
{
    match strategy {
        AcceptStrategy::First => header
            .split(',')
            .next()
            .map(|candidate| resolve(candidate.trim()))
            .unwrap_or_default(),
        AcceptStrategy::Weighted => weighted(header, resolve),
    }
}

fn weighted<F>(header: &str, resolve: F) -> ContentType
where
    F: Fn(&str) -> ContentType,
{
    let mut best: Option<(f32, ContentType)> = None;

    for candidate in header.split(',').map(str::trim) {
        let Ok(media) = candidate.parse::<Mime>() else {
            continue;
        };
        if media.type_() == mime::STAR || media.subtype() == mime::STAR {
            continue;
        }
        let q = quality(&media);
        if q <= 0.0 {
            continue;
        }
        // Resolve the raw candidate so the configured case handling applies.
        let content_type = resolve(candidate);
        if content_type.is_unknown() {
            continue;
        }
        // Strictly greater keeps the earliest candidate on ties.
        if best.map_or(true, |(best_q, _)| q > best_q) {
            best = Some((q, content_type));
        }
    }

    best.map(|(_, content_type)| content_type).unwrap_or_default()
}

/// Quality value of one `Accept` candidate; 1.0 when absent or malformed.
fn quality(media: &Mime) -> f32 {
    media.params()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| value.as_str().parse::<f32>().ok())
        .filter(|q| q.is_finite())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(1.0)
}
