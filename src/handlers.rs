use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    AppState,
    error::ApiError,
    models::{
        Availability, BookingRequest, BookingResponse, BookingsResponse, ClassesResponse,
        ErrorBody, FitnessClass,
    },
    validation::{validate_booking_request, validate_email},
};

#[derive(Debug, serde::Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "health")]
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": format!("{} Booking API", state.settings.studio_name),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy"
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "health")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "health")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "Upcoming classes, earliest first", body = ClassesResponse)
    ),
    tag = "classes"
)]
pub async fn get_classes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let classes = state.queries.classes()?;
    Ok(Json(ClassesResponse { classes }))
}

#[utoipa::path(
    get,
    path = "/classes/{class_id}",
    params(("class_id" = i64, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class details", body = FitnessClass),
        (status = 404, description = "Class not found", body = ErrorBody)
    ),
    tag = "classes"
)]
pub async fn get_class(
    State(state): State<AppState>,
    WithRejection(Path(class_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<FitnessClass>, ApiError> {
    let class = state.queries.class(path_id(class_id)?)?;
    Ok(Json(class))
}

#[utoipa::path(
    get,
    path = "/classes/{class_id}/availability",
    params(("class_id" = i64, Path, description = "Class id")),
    responses(
        (status = 200, description = "Seat availability", body = Availability),
        (status = 404, description = "Class not found", body = ErrorBody)
    ),
    tag = "classes"
)]
pub async fn get_availability(
    State(state): State<AppState>,
    WithRejection(Path(class_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<Availability>, ApiError> {
    let availability = state.queries.availability(path_id(class_id)?)?;
    Ok(Json(availability))
}

#[utoipa::path(
    get,
    path = "/classes.ical",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 404, description = "No upcoming classes", body = ErrorBody)
    ),
    tag = "classes"
)]
pub async fn get_classes_ical(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let classes = state.queries.classes()?;
    if classes.is_empty() {
        return Err(ApiError::NotFound("No upcoming classes".into()));
    }

    let body = state.exporter.generate(&classes);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=fitness_classes.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    post,
    path = "/book",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 404, description = "Class not found", body = ErrorBody),
        (
            status = 409,
            description = "Class full, already started, or already booked",
            body = ErrorBody
        ),
        (status = 422, description = "Invalid booking fields", body = ErrorBody)
    ),
    tag = "bookings"
)]
pub async fn book_class(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<BookingRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = validate_booking_request(request)?;
    let response = state.bookings.book(booking)?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/bookings",
    params(("email" = String, Query, description = "Client email address")),
    responses(
        (status = 200, description = "Bookings made with this email", body = BookingsResponse),
        (status = 422, description = "Missing or malformed email", body = ErrorBody)
    ),
    tag = "bookings"
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BookingsQuery>, ApiError>,
) -> Result<Json<BookingsResponse>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("email query parameter is required".into()))?;
    let email = validate_email(&email)?;
    let bookings = state.queries.bookings_by_email(&email)?;
    Ok(Json(BookingsResponse { bookings }))
}

/// Ids that cannot exist are reported as missing, not malformed.
fn path_id(value: i64) -> Result<u64, ApiError> {
    u64::try_from(value)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::NotFound(format!("Class with ID {value} not found")))
}
