#![allow(dead_code)]

use clinic_schedule_cell::*;

pub fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).expect("fixture times are HH:MM")
}

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).expect("fixture time is HH:MM")
}

pub fn open_day(day: DayOfWeek, slots: &[(&str, &str)]) -> DaySchedule {
    DaySchedule::available(day, slots.iter().map(|(s, e)| slot(s, e)).collect())
}

pub fn closed_day(day: DayOfWeek) -> DaySchedule {
    DaySchedule::unavailable(day)
}

/// Monday to Thursday 09:00-13:00 and 14:00-17:00, Friday off.
pub fn standard_week() -> Vec<DaySchedule> {
    let mut week: Vec<DaySchedule> = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
    ]
    .into_iter()
    .map(|day| open_day(day, &[("09:00", "13:00"), ("14:00", "17:00")]))
    .collect();
    week.push(closed_day(DayOfWeek::Friday));
    week
}

pub fn attach_request(clinic_id: &str, working_hours: Vec<DaySchedule>) -> AttachClinicRequest {
    AttachClinicRequest {
        clinic_id: ClinicId::new(clinic_id),
        working_hours,
        notes: None,
        is_active: None,
    }
}
