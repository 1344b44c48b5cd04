use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{DateTime, FixedOffset};

use crate::error::StudioError;
use crate::models::Booking;

/// A booking that has been admitted but not yet assigned an id.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub class_id: u64,
    pub class_name: String,
    pub client_name: String,
    pub client_email: String,
    pub booking_date: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug)]
struct LedgerInner {
    next_id: u64,
    bookings: BTreeMap<u64, Booking>,
    by_email: HashMap<String, Vec<u64>>,
}

/// Every booking ever made, keyed by id, with an index on lower-cased email.
#[derive(Debug)]
pub struct Ledger {
    inner: RwLock<LedgerInner>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerInner {
                next_id: 1,
                bookings: BTreeMap::new(),
                by_email: HashMap::new(),
            }),
        }
    }

    /// Stores `draft` under the next id and returns the stored record.
    pub fn insert(&self, draft: BookingDraft) -> Result<Booking, StudioError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StudioError::Storage("ledger lock poisoned".into()))?;

        let id = inner.next_id;
        inner.next_id += 1;

        let booking = Booking {
            id,
            class_id: draft.class_id,
            class_name: draft.class_name,
            client_name: draft.client_name,
            client_email: draft.client_email,
            booking_date: draft.booking_date,
            created_at: draft.created_at,
        };
        inner
            .by_email
            .entry(booking.client_email.to_lowercase())
            .or_default()
            .push(id);
        inner.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    #[cfg(test)]
    pub fn get(&self, id: u64) -> Result<Option<Booking>, StudioError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StudioError::Storage("ledger lock poisoned".into()))?;
        Ok(inner.bookings.get(&id).cloned())
    }

    /// Bookings for `email` (case-insensitive), oldest first.
    pub fn by_email(&self, email: &str) -> Result<Vec<Booking>, StudioError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StudioError::Storage("ledger lock poisoned".into()))?;
        let bookings: Vec<Booking> = inner
            .by_email
            .get(&email.to_lowercase())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.bookings.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(bookings)
    }

    #[cfg(test)]
    pub fn count_for_class(&self, class_id: u64) -> Result<usize, StudioError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StudioError::Storage("ledger lock poisoned".into()))?;
        Ok(inner
            .bookings
            .values()
            .filter(|b| b.class_id == class_id)
            .count())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.read().expect("ledger lock").bookings.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
