//! # regsweep HTTP
//!
//! Webhook-facing surface of the cleanup service. A registry is configured to
//! POST notification envelopes here; the handler filters for deletion events
//! and hands the target repository to the [`Cleaner`] for the actual work.
//!
//! Every non-actionable or failing branch is acknowledged with `200 OK` and
//! logged rather than surfaced: the registry's notification sender treats
//! non-2xx responses as retryable, and there is nothing useful it could do by
//! retrying a malformed payload or a cleanup failure. Only a completed
//! cleanup answers `202 Accepted`, which makes success observable in the
//! sender's logs without being load-bearing for any caller.
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::trace::{self, TraceLayer};

use regsweep_core::{Cleaner, Notification, RepositoryName};

/// Webhook service wrapping a [`Cleaner`].
#[derive(Clone)]
pub struct Sweeper {
    cleaner: Arc<Cleaner>,
}

impl Sweeper {
    pub fn new(cleaner: Cleaner) -> Self {
        Self {
            cleaner: Arc::new(cleaner),
        }
    }

    /// Return an [`axum::Router`] that accepts registry notifications on any
    /// path.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(notify)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace::DefaultMakeSpan::new())
                    .on_response(trace::DefaultOnResponse::new())
                    .on_request(trace::DefaultOnRequest::new()),
            )
            .with_state(self.clone())
    }
}

async fn notify(State(sweeper): State<Sweeper>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        tracing::warn!(%method, "invalid request method");
        return StatusCode::OK.into_response();
    }

    let notification: Notification = match serde_json::from_slice(&body) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::error!(error = %e, "failed to decode request body");
            return StatusCode::OK.into_response();
        }
    };

    // the producer emits one event per webhook call; only the first is
    // consulted and an empty list is a no-op, never a panic
    let event = match notification.events.first() {
        Some(event) => event,
        None => {
            tracing::warn!("notification contained no events");
            return StatusCode::OK.into_response();
        }
    };

    if !event.is_delete() {
        tracing::warn!(action = %event.action, "invalid action");
        return StatusCode::OK.into_response();
    }

    let repository = match RepositoryName::try_from(event.target.repository.as_str()) {
        Ok(repository) => repository,
        Err(e) => {
            tracing::error!(error = %e, "refusing event with invalid repository name");
            return StatusCode::OK.into_response();
        }
    };

    match sweeper.cleaner.cleanup(&repository).await {
        Ok(outcome) => {
            tracing::info!(%repository, ?outcome, "cleanup successful");
            StatusCode::ACCEPTED.into_response()
        }
        Err(e) => {
            tracing::error!(%repository, error = %e, "failed to cleanup");
            StatusCode::OK.into_response()
        }
    }
}
