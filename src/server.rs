use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::engine::RedemptionEngine;
use crate::insights::{LocalSummary, SummaryProvider, SummaryRequest, SummaryResponse};
use crate::rate_limit::RateLimiter;
use crate::reference::partners::{TransferPartner, TransferSource};
use crate::reference::sweet_spots::SweetSpot;
use crate::reference::ReferenceData;
use crate::transfer::transfer_options_for;
use crate::types::{SearchOutcome, TripRequest};
use crate::wallet::store::WalletStore;
use crate::wallet::{into_programs, SearchRecord, WalletRecord};

#[derive(Clone)]
struct ApiState {
    config: Config,
    engine: RedemptionEngine,
    db_path: PathBuf,
    limiter: Arc<RateLimiter>,
    summaries: Arc<dyn SummaryProvider>,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Deserialize)]
struct SearchRequest {
    trip: TripRequest,
    programs: Option<Vec<WalletRecord>>,
    #[serde(default = "default_true")]
    persist_history: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct TransfersQuery {
    card: Option<String>,
    into: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct SweetSpotsResponse {
    sweet_spots: Vec<SweetSpot>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TransfersResponse {
    Partners {
        card: String,
        partners: Vec<TransferPartner>,
    },
    Sources {
        program: String,
        sources: Vec<TransferSource>,
    },
}

#[derive(Debug)]
struct ReasoningError {
    status: StatusCode,
    message: String,
}

impl ReasoningError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ReasoningError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let engine = RedemptionEngine::new(ReferenceData::shared(), config.valuation.clone());
    let state = ApiState {
        db_path: config.resolved_db_path(),
        limiter: Arc::new(RateLimiter::from_config(&config.server)),
        summaries: Arc::new(LocalSummary::new(engine.clone())),
        engine,
        config,
    };

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/v1/search", post(search))
        .route("/v1/sweet-spots", get(sweet_spots))
        .route("/v1/transfers", get(transfers))
        .route("/api/get-ai-reasoning", post(ai_reasoning))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn search(
    State(state): State<ApiState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SearchOutcome> {
    let store = open_store(&state)?;
    let programs = match request.programs {
        Some(records) => into_programs(records),
        None => store.list_programs().map_err(ApiError::internal)?,
    };

    let outcome = state.engine.search(&request.trip, &programs);

    if request.persist_history {
        let record = SearchRecord::from_outcome(&request.trip, &outcome, Utc::now());
        store
            .save_last_search(&request.trip)
            .and_then(|_| store.insert_search(&record))
            .map_err(ApiError::internal)?;
        info!(
            fingerprint = %record.fingerprint,
            options = record.option_count,
            "persisted search"
        );
    }

    Ok(ok(outcome))
}

async fn sweet_spots(State(state): State<ApiState>) -> Json<ApiResponse<SweetSpotsResponse>> {
    ok(SweetSpotsResponse {
        sweet_spots: state.engine.reference().sweet_spots().to_vec(),
    })
}

async fn transfers(
    State(state): State<ApiState>,
    Query(query): Query<TransfersQuery>,
) -> ApiResult<TransfersResponse> {
    let reference = state.engine.reference();
    match (query.card, query.into) {
        (Some(card), None) => Ok(ok(TransfersResponse::Partners {
            partners: reference.partners_from(&card).to_vec(),
            card,
        })),
        (None, Some(program)) => Ok(ok(TransfersResponse::Sources {
            sources: transfer_options_for(reference, &program),
            program,
        })),
        _ => Err(ApiError::bad_request(
            "exactly one of `card` or `into` is required",
        )),
    }
}

async fn ai_reasoning(
    State(state): State<ApiState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<Value>,
) -> Response {
    let client = addr.ip().to_string();
    let decision = state.limiter.check(&client);
    if !decision.allowed {
        warn!(%client, retry_at = %decision.retry_at, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests, please try again later." })),
        )
            .into_response();
    }

    let request = match parse_reasoning_request(&body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    match state
        .summaries
        .summarize(&request.query, &request.programs)
        .await
    {
        Ok(summary) => Json(SummaryResponse { summary }).into_response(),
        Err(err) => {
            error!("summary generation failed: {err:#}");
            ReasoningError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to generate AI reasoning".to_string(),
            }
            .into_response()
        }
    }
}

fn parse_reasoning_request(body: &Value) -> std::result::Result<SummaryRequest, ReasoningError> {
    let Some(query) = body.get("query").filter(|q| q.is_object()) else {
        return Err(ReasoningError::bad_request("Query object is required"));
    };
    let has_text = |field: &str| {
        query
            .get(field)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    };
    if !has_text("origin") || !has_text("destination") {
        return Err(ReasoningError::bad_request(
            "Origin and destination required",
        ));
    }
    let Some(programs) = body.get("programs").filter(|p| p.is_array()) else {
        return Err(ReasoningError::bad_request("Programs array is required"));
    };

    let query: TripRequest = serde_json::from_value(query.clone())
        .map_err(|err| ReasoningError::bad_request(&format!("Invalid query: {err}")))?;
    let records: Vec<WalletRecord> = serde_json::from_value(programs.clone())
        .map_err(|err| ReasoningError::bad_request(&format!("Invalid programs: {err}")))?;
    Ok(SummaryRequest {
        query,
        programs: into_programs(records),
    })
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn default_true() -> bool {
    true
}

fn open_store(state: &ApiState) -> std::result::Result<WalletStore, ApiError> {
    WalletStore::open(&state.db_path).map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::server::{parse_reasoning_request, SearchRequest};
    use crate::types::ProgramKind;
    use crate::wallet::into_programs;

    #[test]
    fn reasoning_body_is_validated_in_order() {
        let missing_query = parse_reasoning_request(&json!({ "programs": [] })).unwrap_err();
        assert_eq!(missing_query.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing_query.message, "Query object is required");

        let missing_destination =
            parse_reasoning_request(&json!({ "query": { "origin": "JFK" }, "programs": [] }))
                .unwrap_err();
        assert_eq!(missing_destination.message, "Origin and destination required");

        let missing_programs = parse_reasoning_request(&json!({
            "query": { "origin": "JFK", "destination": "LHR" }
        }))
        .unwrap_err();
        assert_eq!(missing_programs.message, "Programs array is required");
    }

    #[test]
    fn reasoning_body_accepts_camel_case_trips() {
        let request = parse_reasoning_request(&json!({
            "query": {
                "origin": "JFK",
                "destination": "LHR",
                "departDate": "2025-03-01",
                "cabin": "business"
            },
            "programs": [
                { "name": "Chase Ultimate Rewards", "type": "card", "balance": 120000 }
            ]
        }))
        .expect("valid body");
        assert_eq!(request.query.destination, "LHR");
        assert!(request.query.depart_date.is_some());
        assert_eq!(request.programs.len(), 1);
    }

    #[test]
    fn untyped_programs_are_inferred_from_their_names() {
        let request: SearchRequest = serde_json::from_value(json!({
            "trip": {
                "origin": "JFK",
                "destination": "LHR",
                "departDate": "2025-03-01",
                "cabin": "economy"
            },
            "programs": [
                { "name": "Chase Ultimate Rewards", "balance": 100000 },
                { "name": "World of Hyatt", "balance": 40000 },
                { "name": "  ", "balance": 5 }
            ]
        }))
        .expect("search body");
        assert!(request.persist_history);
        let programs = into_programs(request.programs.expect("programs"));
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].kind, ProgramKind::Card);
        assert_eq!(programs[1].kind, ProgramKind::Hotel);

        let reasoning = parse_reasoning_request(&json!({
            "query": { "origin": "JFK", "destination": "LHR" },
            "programs": [{ "name": "Delta SkyMiles", "balance": 60000 }]
        }))
        .expect("valid body");
        assert_eq!(reasoning.programs[0].kind, ProgramKind::Airline);
    }
}
