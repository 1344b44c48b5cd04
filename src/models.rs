use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FitnessClass {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, format = "date-time", example = "2025-11-24T06:00:00+05:30")]
    pub date_time: DateTime<FixedOffset>,
    pub duration_min: u32,
    pub instructor: String,
    pub available_slots: u32,
    pub total_slots: u32,
    pub timezone: String,
}

impl FitnessClass {
    pub fn is_full(&self) -> bool {
        self.available_slots == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Booking {
    pub id: u64,
    pub class_id: u64,
    pub class_name: String,
    pub client_name: String,
    pub client_email: String,
    /// Scheduled start of the booked class.
    #[schema(value_type = String, format = "date-time")]
    pub booking_date: DateTime<FixedOffset>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<FixedOffset>,
}

/// Raw `POST /book` body. Checked by [`crate::validation::validate_booking_request`]
/// before anything touches the catalog or ledger.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub class_id: i64,
    pub client_name: String,
    pub client_email: String,
}

/// Booking input that passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub class_id: u64,
    pub client_name: String,
    pub client_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BookingResponse {
    pub booking_id: u64,
    pub class_name: String,
    pub client_name: String,
    pub client_email: String,
    #[schema(value_type = String, format = "date-time")]
    pub booking_date: DateTime<FixedOffset>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Availability {
    pub available: bool,
    pub message: String,
    pub available_slots: u32,
    pub total_slots: u32,
    pub class_name: String,
    #[schema(value_type = String, format = "date-time")]
    pub date_time: DateTime<FixedOffset>,
}

impl From<&FitnessClass> for Availability {
    fn from(class: &FitnessClass) -> Self {
        let available = !class.is_full();
        let message = if available {
            "Slots available"
        } else {
            "Class is full"
        };
        Self {
            available,
            message: message.to_string(),
            available_slots: class.available_slots,
            total_slots: class.total_slots,
            class_name: class.name.clone(),
            date_time: class.date_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassesResponse {
    pub classes: Vec<FitnessClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
