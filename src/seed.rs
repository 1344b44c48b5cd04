use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::models::FitnessClass;

pub struct ClassTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub duration_min: u32,
    pub capacity: u32,
    pub instructor: &'static str,
}

pub const YOGA_FLOW: ClassTemplate = ClassTemplate {
    name: "Yoga Flow",
    description: "A dynamic vinyasa flow class that builds strength and flexibility",
    duration_min: 60,
    capacity: 20,
    instructor: "Sarah Johnson",
};

pub const ZUMBA_FITNESS: ClassTemplate = ClassTemplate {
    name: "Zumba Fitness",
    description: "High-energy dance fitness class with Latin rhythms",
    duration_min: 45,
    capacity: 25,
    instructor: "Maria Rodriguez",
};

pub const HIIT_CIRCUIT: ClassTemplate = ClassTemplate {
    name: "HIIT Circuit",
    description: "High-intensity interval training with strength and cardio",
    duration_min: 30,
    capacity: 15,
    instructor: "Mike Chen",
};

/// Classes run every day, in start order.
const DAILY_PLAN: [(&ClassTemplate, u32); 7] = [
    (&YOGA_FLOW, 6),
    (&YOGA_FLOW, 7),
    (&YOGA_FLOW, 8),
    (&ZUMBA_FITNESS, 14),
    (&ZUMBA_FITNESS, 15),
    (&HIIT_CIRCUIT, 18),
    (&HIIT_CIRCUIT, 19),
];

impl ClassTemplate {
    pub fn schedule(&self, id: u64, date_time: DateTime<Tz>) -> FitnessClass {
        FitnessClass {
            id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            date_time: date_time.fixed_offset(),
            duration_min: self.duration_min,
            instructor: self.instructor.to_string(),
            available_slots: self.capacity,
            total_slots: self.capacity,
            timezone: date_time.timezone().name().to_string(),
        }
    }
}

/// Builds the schedule for the `days_ahead` days following `now`, starting
/// tomorrow. Ids are assigned from 1 in chronological order.
pub fn generate_schedule(now: DateTime<Tz>, days_ahead: u32) -> Vec<FitnessClass> {
    let tz = now.timezone();
    let mut classes = Vec::new();
    let mut next_id = 1;

    for day in 1..=i64::from(days_ahead) {
        let date = (now + Duration::days(day)).date_naive();
        for (template, hour) in DAILY_PLAN {
            let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
                continue;
            };
            // Skip local times that do not exist in the studio timezone.
            let Some(start) = tz.from_local_datetime(&date.and_time(time)).earliest() else {
                continue;
            };
            classes.push(template.schedule(next_id, start));
            next_id += 1;
        }
    }

    classes
}
