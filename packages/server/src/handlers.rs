//! HTTP handler functions for the Dharma Gates API.

use actix_web::{HttpResponse, web};
use dharma_gates_center_models::{Center, CenterSuggestion};
use dharma_gates_directory::{
    CenterFilter, FilterOptions, group_by_location,
    submission::{self, SubmissionError},
};
use dharma_gates_geocoder::{GeocodeError, GeocodeErrorKind};
use dharma_gates_server_models::{
    ApiError, ApiFieldErrors, ApiGroupedListing, ApiHealth, CenterQueryParams,
    GeocodeQueryParams, GeocodeRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        centers: state.centers.len(),
    })
}

/// `GET /api/geocode`
///
/// Forward geocodes `address`, or reverse geocodes `lat`/`lon`.
pub async fn geocode(
    state: web::Data<AppState>,
    params: web::Query<GeocodeQueryParams>,
) -> HttpResponse {
    let Some(request) = params.request() else {
        return HttpResponse::BadRequest().json(ApiError::new(
            "Provide either an address or both lat and lon",
        ));
    };

    let (result, not_found) = match &request {
        GeocodeRequest::Forward(address) => {
            (state.geocoder.forward(address).await, "Address not found")
        }
        GeocodeRequest::Reverse {
            latitude,
            longitude,
        } => (
            state.geocoder.reverse(*latitude, *longitude).await,
            "Coordinates not found",
        ),
    };

    match result {
        Ok(place) => HttpResponse::Ok().json(place),
        Err(e) => geocode_error_response(&e, not_found),
    }
}

/// `GET /api/centers`
///
/// Lists the centers matching the filter parameters, in stored order.
pub async fn centers(
    state: web::Data<AppState>,
    params: web::Query<CenterQueryParams>,
) -> HttpResponse {
    let filter = CenterFilter::from(params.into_inner());
    let matched: Vec<&Center> = filter.apply(state.centers.as_slice());
    log::debug!("{} of {} centers match", matched.len(), state.centers.len());
    HttpResponse::Ok().json(matched)
}

/// `GET /api/centers/grouped`
///
/// Returns the country → state → center listing.
pub async fn grouped(state: web::Data<AppState>) -> HttpResponse {
    let grouped = group_by_location(state.centers.as_slice());
    HttpResponse::Ok().json(ApiGroupedListing::from_grouped(
        &grouped,
        &state.country_order,
    ))
}

/// `GET /api/filters`
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(FilterOptions::from_centers(state.centers.as_slice()))
}

/// `POST /api/centers/suggest`
///
/// Validates and reverse geocodes a suggestion, returning the pending
/// center for moderation.
pub async fn suggest(
    state: web::Data<AppState>,
    body: web::Json<CenterSuggestion>,
) -> HttpResponse {
    match submission::prepare(state.geocoder.as_ref(), body.into_inner()).await {
        Ok(center) => HttpResponse::Ok().json(center),
        Err(SubmissionError::Invalid(fields)) => {
            HttpResponse::UnprocessableEntity().json(ApiFieldErrors {
                error: "Please correct the highlighted fields".to_string(),
                fields,
            })
        }
        Err(SubmissionError::Geocode(e)) => geocode_error_response(&e, "Coordinates not found"),
    }
}

fn geocode_error_response(e: &GeocodeError, not_found: &str) -> HttpResponse {
    match e.kind() {
        GeocodeErrorKind::NotFound => HttpResponse::NotFound().json(ApiError::new(not_found)),
        GeocodeErrorKind::InvalidInput => {
            HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
        }
        GeocodeErrorKind::ServiceUnavailable => {
            log::error!("Geocoding failed: {e}");
            HttpResponse::ServiceUnavailable().json(ApiError::new(
                "Geocoding service is unavailable, please try again later",
            ))
        }
    }
}
