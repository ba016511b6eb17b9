#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Dharma Gates directory.
//!
//! Serves the center listing, its filter options and the geographic
//! grouping from an in-memory snapshot of the center list, plus geocoding
//! and the "suggest a center" workflow backed by Nominatim.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use dharma_gates_center_models::Center;
use dharma_gates_directory::CountryOrder;
use dharma_gates_geocoder::{GeocodeError, Geocoder, NominatimClient};
use thiserror::Error;

/// Default location of the center list snapshot.
pub const DEFAULT_CENTERS_PATH: &str = "data/centers.json";

/// Errors starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding or running the HTTP server failed, or the center list
    /// could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The center list is not valid JSON.
    #[error("Invalid center list: {0}")]
    Json(#[from] serde_json::Error),

    /// The geocoder configuration is invalid or the client could not be
    /// built.
    #[error(transparent)]
    Geocoder(#[from] GeocodeError),
}

/// Shared application state.
pub struct AppState {
    /// Forward and reverse geocoding backend.
    pub geocoder: Arc<dyn Geocoder>,
    /// Full center list; every listing endpoint derives from it.
    pub centers: Arc<Vec<Center>>,
    /// Top-level country ordering for the grouped listing.
    pub country_order: CountryOrder,
}

/// Reads the center list snapshot. A missing file is an empty list.
///
/// # Errors
///
/// Returns [`ServerError`] if the file exists but cannot be read or
/// parsed.
pub fn load_centers(path: &Path) -> Result<Vec<Center>, ServerError> {
    if !path.exists() {
        log::warn!(
            "Center list {} not found; serving an empty directory",
            path.display()
        );
        return Ok(Vec::new());
    }

    let data = std::fs::read_to_string(path)?;
    let centers: Vec<Center> = serde_json::from_str(&data)?;
    log::info!("Loaded {} centers from {}", centers.len(), path.display());
    Ok(centers)
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/geocode", web::get().to(handlers::geocode))
            .route("/centers", web::get().to(handlers::centers))
            .route("/centers/grouped", web::get().to(handlers::grouped))
            .route("/centers/suggest", web::post().to(handlers::suggest))
            .route("/filters", web::get().to(handlers::filters)),
    );
}

/// Starts the Dharma Gates API server.
///
/// Loads the center list from `CENTERS_PATH`, builds the Nominatim client
/// from the embedded configuration plus environment overrides, and
/// serves on `BIND_ADDR:PORT`. The caller provides the async runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns [`ServerError`] if the center list or geocoder configuration
/// is invalid, or if the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    let centers_path =
        std::env::var("CENTERS_PATH").unwrap_or_else(|_| DEFAULT_CENTERS_PATH.to_string());
    let centers = load_centers(Path::new(&centers_path))?;

    let country_order = std::env::var("PINNED_COUNTRY")
        .map(|value| CountryOrder::from_setting(&value))
        .unwrap_or_default();
    log::info!("Country ordering: {country_order:?}");

    let geocoder = NominatimClient::from_env()?;
    log::info!("Geocoding via {}", geocoder.config().search_url);

    let state = web::Data::new(AppState {
        geocoder: Arc::new(geocoder),
        centers: Arc::new(centers),
        country_order,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
