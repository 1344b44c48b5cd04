use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::error::StudioError;
use crate::models::FitnessClass;

const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate class id {0}")]
    DuplicateId(u64),
    #[error("class {0} must have a positive id")]
    InvalidId(u64),
    #[error("class {0} must have a capacity of at least 1")]
    ZeroCapacity(u64),
    #[error("class {0} has more available slots than its capacity")]
    SlotsExceedCapacity(u64),
    #[error("class {0} name must be between 1 and 100 characters")]
    InvalidName(u64),
}

/// One class plus everything its admission check needs, guarded together.
#[derive(Debug)]
pub struct ClassSlot {
    pub class: FitnessClass,
    booked_emails: HashSet<String>,
}

impl ClassSlot {
    fn new(class: FitnessClass) -> Self {
        Self {
            class,
            booked_emails: HashSet::new(),
        }
    }

    pub fn has_booking_for(&self, email: &str) -> bool {
        self.booked_emails.contains(&email.to_lowercase())
    }

    /// Takes one seat for `email`. Callers check fullness and duplicates first.
    pub fn take_seat(&mut self, email: &str) {
        self.class.available_slots = self.class.available_slots.saturating_sub(1);
        self.booked_emails.insert(email.to_lowercase());
    }
}

/// Seeded class records. The set of classes is fixed after construction;
/// only seat counters change, each behind its own lock.
#[derive(Debug)]
pub struct Catalog {
    slots: BTreeMap<u64, Mutex<ClassSlot>>,
}

impl Catalog {
    pub fn new(classes: Vec<FitnessClass>) -> Result<Self, CatalogError> {
        let mut slots = BTreeMap::new();
        for class in classes {
            let id = class.id;
            if id == 0 {
                return Err(CatalogError::InvalidId(id));
            }
            if class.total_slots == 0 {
                return Err(CatalogError::ZeroCapacity(id));
            }
            if class.available_slots > class.total_slots {
                return Err(CatalogError::SlotsExceedCapacity(id));
            }
            let name_len = class.name.chars().count();
            if name_len == 0 || name_len > MAX_NAME_CHARS {
                return Err(CatalogError::InvalidName(id));
            }
            if slots.insert(id, Mutex::new(ClassSlot::new(class))).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self { slots })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Locks the slot for `id`. The guard is the per-class critical section.
    pub fn lock(&self, id: u64) -> Result<MutexGuard<'_, ClassSlot>, StudioError> {
        let slot = self.slots.get(&id).ok_or(StudioError::ClassNotFound(id))?;
        slot.lock().map_err(|_| StudioError::Storage(format!("class {id} lock poisoned")))
    }

    pub fn get(&self, id: u64) -> Result<FitnessClass, StudioError> {
        Ok(self.lock(id)?.class.clone())
    }

    /// Snapshot of every class, ordered by id.
    pub fn snapshot(&self) -> Result<Vec<FitnessClass>, StudioError> {
        self.slots.keys().map(|id| self.get(*id)).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Duration;
    use chrono_tz::Asia::Kolkata;

    use super::*;

    pub(crate) fn sample_class(id: u64, capacity: u32, hours_from_now: i64) -> FitnessClass {
        let start = chrono::Utc::now().with_timezone(&Kolkata) + Duration::hours(hours_from_now);
        FitnessClass {
            id,
            name: "Yoga Flow".to_string(),
            description: "Test class".to_string(),
            date_time: start.fixed_offset(),
            duration_min: 60,
            instructor: "Sarah Johnson".to_string(),
            available_slots: capacity,
            total_slots: capacity,
            timezone: "Asia/Kolkata".to_string(),
        }
    }

    #[test]
    fn test_rejects_invalid_seed() {
        let mut over = sample_class(1, 5, 24);
        over.available_slots = 6;
        assert_eq!(
            Catalog::new(vec![over]).unwrap_err(),
            CatalogError::SlotsExceedCapacity(1)
        );
        assert_eq!(
            Catalog::new(vec![sample_class(1, 0, 24)]).unwrap_err(),
            CatalogError::ZeroCapacity(1)
        );
        assert_eq!(
            Catalog::new(vec![sample_class(2, 5, 24), sample_class(2, 5, 48)]).unwrap_err(),
            CatalogError::DuplicateId(2)
        );
        assert_eq!(
            Catalog::new(vec![sample_class(0, 5, 24)]).unwrap_err(),
            CatalogError::InvalidId(0)
        );
        let mut unnamed = sample_class(3, 5, 24);
        unnamed.name.clear();
        assert_eq!(
            Catalog::new(vec![unnamed]).unwrap_err(),
            CatalogError::InvalidName(3)
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(vec![sample_class(1, 5, 24), sample_class(7, 5, 48)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(7).unwrap().id, 7);
        assert_eq!(catalog.get(8).unwrap_err(), StudioError::ClassNotFound(8));
        let ids: Vec<u64> = catalog.snapshot().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 7]);
    }

    #[test]
    fn test_take_seat_tracks_email_case_insensitively() {
        let catalog = Catalog::new(vec![sample_class(1, 2, 24)]).unwrap();
        {
            let mut slot = catalog.lock(1).unwrap();
            slot.take_seat("John@Example.com");
        }
        let slot = catalog.lock(1).unwrap();
        assert_eq!(slot.class.available_slots, 1);
        assert!(slot.has_booking_for("john@example.com"));
        assert!(!slot.has_booking_for("jane@example.com"));
    }

    #[test]
    fn test_fixture_is_in_kolkata() {
        let class = sample_class(1, 1, 1);
        assert_eq!(class.date_time.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }
}
