//! HTTP surface: shared state, routes, and the server loop.

use crate::config::Config;
use crate::error::AppError;
use crate::i18n::{Dictionary, DictionaryLoader, DictionaryValidator, Locale, RoutingMetrics};
use crate::routing::{locale_routing, PathFilter};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dictionaries: Arc<DictionaryLoader>,
    pub metrics: Arc<RoutingMetrics>,
    pub filter: PathFilter,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let metrics = Arc::new(RoutingMetrics::new());
        let dictionaries = DictionaryLoader::new(Arc::clone(&metrics))
            .context("Failed to register dictionaries")?;

        Ok(Self {
            config: Arc::new(config),
            dictionaries: Arc::new(dictionaries),
            metrics,
            filter: PathFilter::default(),
        })
    }
}

/// Build the application router with locale routing in front of every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/:lang", get(locale_page))
        .route("/:lang/", get(locale_page))
        .route("/api/health", get(health))
        .route("/api/locales", get(list_locales))
        .route("/api/metrics", get(metrics_report))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), locale_routing))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Check dictionaries, bind, and serve until Ctrl+C.
pub async fn serve(config: Config) -> Result<()> {
    let address = config.bind_address();
    let state = AppState::new(config)?;

    preload_dictionaries(&state.dictionaries).await?;

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Parse every dictionary up front and log key mismatches.
///
/// A broken default dictionary aborts startup; inconsistencies between
/// locales are only logged.
pub async fn preload_dictionaries(loader: &DictionaryLoader) -> Result<()> {
    let default_locale = loader.default_locale();
    let reference = loader
        .load(default_locale.code())
        .await
        .with_context(|| format!("Default dictionary '{}' is unusable", default_locale))?;

    for dictionary in loader.load_all().await? {
        if dictionary.locale() == default_locale {
            continue;
        }
        let report = DictionaryValidator::validate(&reference, &dictionary);
        for problem in report.errors.iter().chain(report.warnings.iter()) {
            warn!("Dictionary check: {}", problem);
        }
    }

    info!(
        "Dictionaries ready: {}",
        loader
            .registered()
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, shutting down gracefully"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}

// ==================== Handlers ====================

/// `GET /`: only reached when locale routing did not handle the request.
pub async fn root_redirect() -> Redirect {
    Redirect::temporary(&format!("/{}", Locale::default_locale()))
}

/// `GET /{lang}`: the greeting page.
///
/// The locale comes from the routing middleware, which only lets supported
/// locale segments through.
async fn locale_page(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
) -> Result<Html<String>, AppError> {
    let dictionary = state.dictionaries.load(locale.code()).await?;
    Ok(Html(render_page(&dictionary)))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
struct LocaleSummary {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
}

#[derive(Debug, Serialize)]
struct LocalesResponse {
    default: &'static str,
    locales: Vec<LocaleSummary>,
}

async fn list_locales() -> Json<LocalesResponse> {
    let locales = Locale::all()
        .into_iter()
        .map(|locale| LocaleSummary {
            code: locale.code(),
            name: locale.name(),
            native_name: locale.native_name(),
        })
        .collect();

    Json(LocalesResponse {
        default: Locale::default_locale().code(),
        locales,
    })
}

async fn metrics_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.report())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

// ==================== Rendering ====================

/// Render the greeting page for a dictionary.
pub fn render_page(dictionary: &Dictionary) -> String {
    let title = dictionary.get("page.title").unwrap_or_default();
    let greeting = dictionary.get("page.greeting").unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body><main><h1>{}</h1></main></body>\n</html>\n",
        dictionary.locale(),
        html_escape::encode_text(title),
        html_escape::encode_text(greeting)
    )
}
