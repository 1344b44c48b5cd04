use utoipa::OpenApi;

use crate::models::{
    Availability, Booking, BookingRequest, BookingResponse, BookingsResponse, ClassesResponse,
    ErrorBody, FitnessClass,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Fitness Studio Booking API"),
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_classes,
        crate::handlers::get_class,
        crate::handlers::get_availability,
        crate::handlers::get_classes_ical,
        crate::handlers::book_class,
        crate::handlers::get_bookings
    ),
    components(schemas(
        FitnessClass,
        Booking,
        BookingRequest,
        BookingResponse,
        Availability,
        ClassesResponse,
        BookingsResponse,
        ErrorBody
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "classes", description = "Class schedule and seat availability"),
        (name = "bookings", description = "Booking and booking lookup")
    ),
)]
pub struct ApiDoc;
