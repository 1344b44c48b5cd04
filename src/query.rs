use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::StudioError;
use crate::ledger::Ledger;
use crate::models::{Availability, Booking, FitnessClass};

/// Read-only lookups over the catalog and ledger.
#[derive(Clone)]
pub struct QueryService {
    catalog: Arc<Catalog>,
    ledger: Arc<Ledger>,
    tz: Tz,
}

impl QueryService {
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<Ledger>, tz: Tz) -> Self {
        Self {
            catalog,
            ledger,
            tz,
        }
    }

    pub fn classes(&self) -> Result<Vec<FitnessClass>, StudioError> {
        let now = Utc::now().with_timezone(&self.tz).fixed_offset();
        self.classes_at(now)
    }

    /// Classes starting at or after `now`, earliest first.
    pub fn classes_at(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<FitnessClass>, StudioError> {
        let mut classes: Vec<FitnessClass> = self
            .catalog
            .snapshot()?
            .into_iter()
            .filter(|c| c.date_time >= now)
            .collect();
        classes.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.cmp(&b.id)));
        debug!(count = classes.len(), "listed upcoming classes");
        Ok(classes)
    }

    pub fn class(&self, id: u64) -> Result<FitnessClass, StudioError> {
        self.catalog.get(id).inspect_err(|err| {
            if matches!(err, StudioError::ClassNotFound(_)) {
                warn!(class_id = id, "class not found");
            }
        })
    }

    pub fn availability(&self, id: u64) -> Result<Availability, StudioError> {
        let class = self.class(id)?;
        Ok(Availability::from(&class))
    }

    pub fn bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, StudioError> {
        let bookings = self.ledger.by_email(email)?;
        debug!(email, count = bookings.len(), "listed bookings");
        Ok(bookings)
    }
}
