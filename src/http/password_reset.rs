use axum::{body::Body, http::Request, response::Response, routing::post, Extension, Router};
use tracing::instrument;

use super::{ApiContext, Result};

/// Forwards the request to the verification capability, untouched. All
/// parsing and validation happens on the other side of that call.
#[instrument(skip_all)]
async fn verify_code(ctx: Extension<ApiContext>, req: Request<Body>) -> Result<Response> {
    let res = ctx.verifier.verify_reset_code(req).await?;

    Ok(res)
}

pub fn routes() -> Router {
    Router::new().route("/verify-code", post(verify_code))
}
