use anyhow::Context;
use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::verify::VerifyResetCode;

mod error;
mod password_reset;

pub use error::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Clone)]
struct ApiContext {
    verifier: Arc<dyn VerifyResetCode>,
}

pub async fn serve(verifier: Arc<dyn VerifyResetCode>) -> anyhow::Result<()> {
    let app = app(verifier);

    axum::Server::bind(&SocketAddr::from(([0, 0, 0, 0], 8000)))
        .serve(app.into_make_service())
        .await
        .context("serve failed")
}

pub fn app(verifier: Arc<dyn VerifyResetCode>) -> Router {
    Router::new()
        .nest("/api/auth/password-reset", password_reset::routes())
        .layer(Extension(ApiContext { verifier }))
        .layer(TraceLayer::new_for_http())
        .route("/health", get(health))
        .layer(CorsLayer::very_permissive())
}

#[derive(Debug, Serialize)]
struct Health {
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    let health = Health {
        version: env!("CARGO_PKG_VERSION"),
    };

    ([("cache-control", "no-cache")], Json(health))
}
