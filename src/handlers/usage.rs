use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::errors::UsageResult;
use crate::models::AppState;

#[derive(Debug, Deserialize)]
pub struct UsageParams {
    pub limit: Option<u32>,
}

/// Find all usages of an ontology term across the federated services.
///
/// `term` is a compact identifier (`GO:0006915`) or a full URI.
pub async fn usage(
    path: web::Path<String>,
    params: web::Query<UsageParams>,
    state: web::Data<AppState>,
) -> UsageResult<HttpResponse> {
    let term = path.into_inner();
    info!("📦 Usage request: term={}, limit={:?}", term, params.limit);

    let result_set = state.usage.term_usage(&term, None, params.limit).await?;
    Ok(HttpResponse::Ok().json(result_set))
}

/// Discovery endpoint: the catalog of federated services and their
/// query templates.
pub async fn metadata(state: web::Data<AppState>) -> UsageResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.usage.catalog().metadata()))
}
