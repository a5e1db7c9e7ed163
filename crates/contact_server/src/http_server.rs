//! HTTP server with Axum
//!
//! Routes: `GET /health` and `POST /api/contact`. Everything else gets the 404 envelope.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use portfolio_contract::{
    validate_submission, ApiEnvelope, ContactSubmission, HealthResponse, HEALTH_STATUS_OK,
    MSG_CONTACT_SENT,
};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::{
    config::Config,
    cors::{cors_layer, enforce_origin, OriginPolicy},
    error::{handle_panic, ApiError},
    rate_limit::{self, RateLimiter},
    store::ContactStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ContactStore>,
    pub limiter: Arc<RateLimiter>,
    pub origins: Arc<OriginPolicy>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<dyn ContactStore>) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit_max,
            config.rate_limit_window,
        ));
        let origins = Arc::new(OriginPolicy::new(&config.allowed_origins));
        Self {
            config,
            store,
            limiter,
            origins,
        }
    }
}

pub async fn run_server(state: AppState) -> Result<()> {
    let bind_addr = state.config.bind;
    let sweeper = state.limiter.spawn_sweeper();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("HTTP server listening on {}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    sweeper.abort();
    info!("HTTP server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let contact_routes = Router::new()
        .route(
            "/api/contact",
            post(submit_contact).fallback(route_not_found),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ));

    Router::new()
        .route("/health", get(health_check).fallback(route_not_found))
        .merge(contact_routes)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .layer(middleware::from_fn_with_state(
            state.origins.clone(),
            enforce_origin,
        ))
        .layer(cors_layer(state.origins.clone()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS_OK.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        supabase: state.store.status(),
    })
}

async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ApiEnvelope>, ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::InvalidBody(rejection.body_text())
        }
    })?;

    let submission = validate_submission(&submission).map_err(|errors| {
        debug!(error_count = errors.len(), "contact submission failed validation");
        ApiError::Validation(errors)
    })?;

    let stored = state.store.insert(&submission).await?;
    info!(
        id = %stored.id,
        store = state.store.name(),
        created_at = %stored.created_at,
        "contact submission accepted"
    );

    Ok(Json(ApiEnvelope::ok(MSG_CONTACT_SENT)))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
