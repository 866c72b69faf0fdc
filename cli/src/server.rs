use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::QueryRejection},
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::spoonacular::SpoonacularClient;
use recipebook_core::error::RecipeError;
use recipebook_core::models::{
    DEFAULT_PAGE_SIZE, Recipe, SearchPage, SearchRequest, parse_page_param, parse_recipe_id,
};
use recipebook_core::service::RecipeService;

#[derive(Clone)]
struct AppState {
    service: Arc<RecipeService<SpoonacularClient>>,
}

// --- Request / Response types ---

#[derive(Deserialize)]
struct SearchQuery {
    query: Option<String>,
    cuisine: Option<String>,
    diet: Option<String>,
    #[serde(rename = "type")]
    dish_type: Option<String>,
    number: Option<String>,
    offset: Option<String>,
}

impl SearchQuery {
    fn into_request(self) -> Result<SearchRequest, RecipeError> {
        let number = parse_page_param("number", self.number.as_deref(), DEFAULT_PAGE_SIZE)?;
        let offset = parse_page_param("offset", self.offset.as_deref(), 0)?;
        SearchRequest::default()
            .with_query(self.query.as_deref())
            .with_cuisine(self.cuisine.as_deref())
            .with_diet(self.diet.as_deref())
            .with_dish_type(self.dish_type.as_deref())
            .with_page(number, offset)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    cached: usize,
    api_key_configured: bool,
}

// --- Error handling ---

enum ApiError {
    BadRequest(String),
    NotFound(String),
    Upstream(RecipeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Upstream(err) => {
                error!("Recipe request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Validation(msg) => Self::BadRequest(msg),
            RecipeError::NotFound { .. } => Self::NotFound("Recipe not found".to_string()),
            other => Self::Upstream(other),
        }
    }
}

// --- Middleware ---

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    response
}

// --- Handlers ---

async fn search_recipes(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchPage>, ApiError> {
    let Query(params) = params?;
    let request = params.into_request()?;
    let page = state.service.search(&request).await?;
    Ok(Json(page))
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_recipe_id(&raw_id)?;
    let recipe = state.service.get_detail(id).await?;
    Ok(Json(recipe))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached: state.service.cache().len(),
        api_key_configured: state.service.source().has_api_key(),
    })
}

// --- Router builder ---

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/recipes/search", get(search_recipes))
        .route("/api/recipes/{id}", get(get_recipe))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(
    service: RecipeService<SpoonacularClient>,
    port: u16,
    bind: &str,
) -> anyhow::Result<()> {
    if !service.source().has_api_key() {
        warn!("No Spoonacular API key configured; only cached recipes can be served");
    }
    info!(cached = service.cache().len(), "recipe cache ready");

    let state = AppState {
        service: Arc::new(service),
    };
    let app = build_router(state);

    let address = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => {
            warn!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    }
}
