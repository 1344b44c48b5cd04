use chrono::{Duration, Utc};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::FitnessClass;

#[derive(Clone)]
pub struct ICalExporter {
    studio_name: String,
}

impl ICalExporter {
    pub fn new(studio_name: impl Into<String>) -> Self {
        Self {
            studio_name: studio_name.into(),
        }
    }

    pub fn generate(&self, classes: &[FitnessClass]) -> Vec<u8> {
        if classes.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name(&format!("{} Classes", self.studio_name));

        for class in classes {
            let start = class.date_time.with_timezone(&Utc);
            let end = start + Duration::minutes(i64::from(class.duration_min));

            let mut event = Event::new();
            event.summary(&class.name);
            event.starts(start);
            event.ends(end);
            event.location(&self.studio_name);
            event.description(&format!(
                "{}\nInstructor: {}\nSeats: {}/{}",
                class.description, class.instructor, class.available_slots, class.total_slots
            ));
            event.uid(&format!(
                "class-{}-{}@fitness-studio-booking",
                class.id,
                start.format("%Y%m%dT%H%M%SZ")
            ));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_class;

    #[test]
    fn test_generate_single_class() {
        let exporter = ICalExporter::new("Fitness Studio");
        let bytes = exporter.generate(&[sample_class(4, 20, 24)]);
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains("BEGIN:VCALENDAR"));
        assert!(body.contains("BEGIN:VEVENT"));
        assert!(body.contains("SUMMARY:Yoga Flow"));
        assert!(body.contains("class-4-"));
    }

    #[test]
    fn test_generate_empty() {
        let exporter = ICalExporter::new("Fitness Studio");
        assert!(exporter.generate(&[]).is_empty());
    }
}
