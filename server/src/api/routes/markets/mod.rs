//! Market API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::extractors::{QueryParamsExtractor, RegisterCodePath, ValidatedJson};
use crate::api::types::ApiError;
use crate::domain::markets::{
    CreateMarketUseCase, DeleteMarketUseCase, GetMarketByQueryUseCase, MarketService,
    UpdateMarketUseCase,
};
use crate::domain::query::{FilterSpec, bind};

use types::{CreateMarketRequest, DeleteMarketResponse, MarketDto, UpdateMarketRequest};

/// Shared state for Markets API endpoints
#[derive(Clone)]
pub struct MarketsApiState {
    pub create: Arc<dyn CreateMarketUseCase>,
    pub query: Arc<dyn GetMarketByQueryUseCase>,
    pub update: Arc<dyn UpdateMarketUseCase>,
    pub delete: Arc<dyn DeleteMarketUseCase>,
    pub filter_spec: Arc<FilterSpec>,
}

impl MarketsApiState {
    /// Every use case served by the same service
    pub fn from_service(service: Arc<MarketService>, filter_spec: Arc<FilterSpec>) -> Self {
        Self {
            create: service.clone(),
            query: service.clone(),
            update: service.clone(),
            delete: service,
            filter_spec,
        }
    }
}

/// Build Markets API routes
pub fn routes(state: MarketsApiState) -> Router<()> {
    Router::new()
        .route("/", get(list_markets).post(create_market))
        .route("/{register_code}", put(update_market).delete(delete_market))
        .with_state(state)
}

/// Search markets. Every parameter is an exact-match criterion; no parameters lists all.
#[utoipa::path(
    get,
    path = "/api/v1/markets",
    tag = "markets",
    params(
        ("id" = Option<i64>, Query, description = "Market ID"),
        ("coddist" = Option<i64>, Query, description = "District code"),
        ("codsubpref" = Option<i64>, Query, description = "Sub-prefecture code"),
        ("distrito" = Option<String>, Query, description = "District name"),
        ("regiao5" = Option<String>, Query, description = "Region (5 areas)"),
        ("nome_feira" = Option<String>, Query, description = "Market name (alias: nome)"),
        ("registro" = Option<String>, Query, description = "Register code"),
        ("bairro" = Option<String>, Query, description = "Neighbourhood")
    ),
    responses(
        (status = 200, description = "Matching markets", body = Vec<MarketDto>),
        (status = 400, description = "Unknown parameter or non-integer value for an integer field")
    )
)]
pub async fn list_markets(
    State(state): State<MarketsApiState>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Json<Vec<MarketDto>>, ApiError> {
    let filter = bind(&state.filter_spec, &params)?;
    let markets = state.query.execute(&filter).await?;
    Ok(Json(markets.into_iter().map(MarketDto::from).collect()))
}

/// Create a market. An existing register code returns the stored market instead.
#[utoipa::path(
    post,
    path = "/api/v1/markets",
    tag = "markets",
    request_body = CreateMarketRequest,
    responses(
        (status = 201, description = "Market created", body = MarketDto),
        (status = 200, description = "Market with this register code already exists", body = MarketDto),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_market(
    State(state): State<MarketsApiState>,
    ValidatedJson(body): ValidatedJson<CreateMarketRequest>,
) -> Result<(StatusCode, Json<MarketDto>), ApiError> {
    let outcome = state.create.execute(body.into()).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(MarketDto::from(outcome.into_market()))))
}

/// Update a market by register code
#[utoipa::path(
    put,
    path = "/api/v1/markets/{register_code}",
    tag = "markets",
    params(
        ("register_code" = String, Path, description = "Market register code")
    ),
    request_body = UpdateMarketRequest,
    responses(
        (status = 200, description = "Market updated", body = MarketDto),
        (status = 400, description = "Invalid request or register code in body"),
        (status = 404, description = "Market not found")
    )
)]
pub async fn update_market(
    State(state): State<MarketsApiState>,
    path: RegisterCodePath,
    ValidatedJson(body): ValidatedJson<UpdateMarketRequest>,
) -> Result<Json<MarketDto>, ApiError> {
    let market = state
        .update
        .execute(&path.register_code, body.into())
        .await?;
    Ok(Json(MarketDto::from(market)))
}

/// Delete a market by register code
#[utoipa::path(
    delete,
    path = "/api/v1/markets/{register_code}",
    tag = "markets",
    params(
        ("register_code" = String, Path, description = "Market register code")
    ),
    responses(
        (status = 200, description = "Market deleted", body = DeleteMarketResponse),
        (status = 404, description = "Market not found")
    )
)]
pub async fn delete_market(
    State(state): State<MarketsApiState>,
    path: RegisterCodePath,
) -> Result<Json<DeleteMarketResponse>, ApiError> {
    state.delete.execute(&path.register_code).await?;
    Ok(Json(DeleteMarketResponse { deleted: true }))
}
