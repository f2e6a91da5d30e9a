//! Pricing API routes.
//!
//! Thin HTTP/JSON layer over the quote engine. The frontend recomputes on
//! every input change, so handlers stay cheap: the engine is pure and each
//! call is independent.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;

use crate::error::Result;
use crate::AppState;

use super::calculators::compute_quote;
use super::catalog::PricingCatalog;
use super::requests::QuoteRequest;
use super::responses::QuoteResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/catalog", get(catalog))
        .route("/api/pricing/health", get(health))
}

/// Compute a quote for a booking-form request.
async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let outcome = compute_quote(&state.catalog, &request, state.options)?;
    debug!(
        total = %outcome.total_price,
        available = outcome.service_available,
        upgrades = outcome.applied_upgrades.len(),
        "quote computed"
    );
    Ok(Json(QuoteResponse::from_outcome(&request, outcome, &state.catalog.currency)))
}

/// The active rate card, for the booking form's selectors.
async fn catalog(State(state): State<AppState>) -> Json<PricingCatalog> {
    Json((*state.catalog).clone())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
