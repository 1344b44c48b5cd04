pub mod booking;
pub mod catalog;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod ledger;
pub mod models;
pub mod openapi;
pub mod query;
pub mod seed;
pub mod settings;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::Utc;
use config::ConfigError;
use handlers::{
    book_class, get_availability, get_bookings, get_class, get_classes, get_classes_ical,
    healthz_live, healthz_ready, root,
};
use http::Method;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::booking::BookingService;
use crate::catalog::{Catalog, CatalogError};
use crate::ical::ICalExporter;
use crate::ledger::Ledger;
use crate::models::FitnessClass;
use crate::openapi::ApiDoc;
use crate::query::QueryService;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) bookings: Arc<BookingService>,
    pub(crate) queries: Arc<QueryService>,
    pub(crate) exporter: Arc<ICalExporter>,
}

impl AppState {
    /// Builds state over `classes` with an empty ledger, in the studio
    /// timezone named by `settings`.
    pub fn new(settings: Settings, classes: Vec<FitnessClass>) -> Result<Self, StateError> {
        let tz = settings.studio_tz()?;
        let catalog = Arc::new(Catalog::new(classes)?);
        let ledger = Arc::new(Ledger::new());
        Ok(Self {
            bookings: Arc::new(BookingService::new(catalog.clone(), ledger.clone(), tz)),
            queries: Arc::new(QueryService::new(catalog, ledger, tz)),
            exporter: Arc::new(ICalExporter::new(settings.studio_name.clone())),
            settings,
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let tz = settings.studio_tz()?;
    let schedule = seed::generate_schedule(Utc::now().with_timezone(&tz), settings.seed_days);
    info!(classes = schedule.len(), timezone = %tz, "seeded class schedule");

    let state = AppState::new(settings.clone(), schedule)?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("Starting {} Booking API on {addr}", settings.studio_name);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Booking API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/classes", get(get_classes))
        .route("/classes.ical", get(get_classes_ical))
        .route("/classes/{class_id}", get(get_class))
        .route("/classes/{class_id}/availability", get(get_availability))
        .route("/book", post(book_class))
        .route("/bookings", get(get_bookings))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(ServiceBuilder::new().layer(trace_layer).layer(cors))
}
