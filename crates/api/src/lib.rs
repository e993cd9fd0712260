//! # TableBook API
//!
//! The API crate provides the web server for the TableBook restaurant backend.
//! It exposes one endpoint to book a table and one to forward a food order.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and drive the allocator and notifier
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence and email delivery
//! are reached only through the `BookingRepository` and `Notifier` traits.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tablebook_core::{
    allocator::TableAllocator, models::MessageResponse, notify::Notifier,
    repository::BookingRepository,
};
use tablebook_db::PgBookingRepository;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::middleware::error_handling::SERVER_ERROR_MESSAGE;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Table allocator over the configured repository
    pub allocator: TableAllocator<dyn BookingRepository>,
    /// Delivers booking and order notifications
    pub notifier: Arc<dyn Notifier>,
}

impl ApiState {
    pub fn new(repository: Arc<dyn BookingRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            allocator: TableAllocator::new(repository),
            notifier,
        }
    }

    /// State backed by PostgreSQL.
    pub fn with_pool(db_pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(Arc::new(PgBookingRepository::new(db_pool)), notifier)
    }
}

/// Builds the application router with all routes and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Table booking endpoint
        .merge(routes::booking::routes())
        // Food order endpoint
        .merge(routes::order::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer for the configured origins. `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.iter().any(|origin| origin == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(origins))
}

/// Turns errors from the timeout middleware into `{"message"}` responses.
pub async fn handle_timeout(err: BoxError) -> (StatusCode, Json<MessageResponse>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(MessageResponse::new("Request timed out.")),
        )
    } else {
        error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new(SERVER_ERROR_MESSAGE)),
        )
    }
}

/// Starts the API server with the provided configuration and database connection
///
/// Sets up logging, builds the notifier from the mail settings, configures
/// routes and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Absent credentials disable notifications without blocking bookings
    let notifier = tablebook_mail::notifier_from_config(config.mail.as_ref())?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState::with_pool(db_pool, notifier));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
