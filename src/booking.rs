use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::StudioError;
use crate::ledger::{BookingDraft, Ledger};
use crate::models::{BookingResponse, NewBooking};

pub const BOOKING_SUCCESS_MESSAGE: &str = "Booking successful!";

#[derive(Clone)]
pub struct BookingService {
    catalog: Arc<Catalog>,
    ledger: Arc<Ledger>,
    tz: Tz,
}

impl BookingService {
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<Ledger>, tz: Tz) -> Self {
        Self {
            catalog,
            ledger,
            tz,
        }
    }

    pub fn book(&self, request: NewBooking) -> Result<BookingResponse, StudioError> {
        let now = Utc::now().with_timezone(&self.tz).fixed_offset();
        self.book_at(request, now)
    }

    /// Runs the admission check for `request` as of `now` and, if it passes,
    /// records the booking and takes a seat under the class lock.
    pub fn book_at(
        &self,
        request: NewBooking,
        now: DateTime<FixedOffset>,
    ) -> Result<BookingResponse, StudioError> {
        let class_id = request.class_id;
        let mut slot = self.catalog.lock(class_id).inspect_err(|err| {
            if matches!(err, StudioError::ClassNotFound(_)) {
                warn!(class_id, "class not found");
            }
        })?;

        if slot.class.date_time <= now {
            warn!(class_id, "class already started");
            return Err(StudioError::ClassExpired(class_id));
        }
        if slot.class.is_full() {
            warn!(class_id, "class is full");
            return Err(StudioError::ClassFull(class_id));
        }
        if slot.has_booking_for(&request.client_email) {
            warn!(class_id, email = %request.client_email, "duplicate booking");
            return Err(StudioError::AlreadyBooked {
                class_id,
                email: request.client_email,
            });
        }

        // The ledger insert is the only fallible step, so it goes before the seat.
        let booking = self.ledger.insert(BookingDraft {
            class_id,
            class_name: slot.class.name.clone(),
            client_name: request.client_name,
            client_email: request.client_email,
            booking_date: slot.class.date_time,
            created_at: now,
        })?;
        slot.take_seat(&booking.client_email);

        info!(
            booking_id = booking.id,
            class_id,
            remaining = slot.class.available_slots,
            "booking created"
        );

        Ok(BookingResponse {
            booking_id: booking.id,
            class_name: booking.class_name,
            client_name: booking.client_name,
            client_email: booking.client_email,
            booking_date: booking.booking_date,
            message: BOOKING_SUCCESS_MESSAGE.to_string(),
        })
    }
}
