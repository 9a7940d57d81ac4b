//! Availability validation shared by the schedule editor, the association
//! service and the storage layer. Everything here is pure: no I/O, no logging,
//! no state beyond the configured limits.

use std::collections::HashSet;

use shared_config::AppConfig;

use crate::error::ScheduleValidationError;
use crate::models::{ClinicAssociation, DayOfWeek, DaySchedule, DoctorClinics, TimeSlot};

pub type ValidationResult = Result<(), ScheduleValidationError>;

/// Reject a slot whose end is not strictly after its start.
pub fn validate_time_slot(slot: &TimeSlot) -> ValidationResult {
    if slot.is_well_formed() {
        Ok(())
    } else {
        Err(ScheduleValidationError::InvalidSlot {
            day: None,
            slot: *slot,
        })
    }
}

/// Reject a set of slots in which any two intersect. Slots sharing only a
/// boundary (`a.end == b.start`) are allowed.
///
/// Sorts by start time and scans once, comparing each slot with the
/// furthest-reaching slot seen so far. Slots are expected to be individually
/// well formed.
pub fn validate_no_overlap(slots: &[TimeSlot]) -> ValidationResult {
    match find_overlap(slots) {
        Some((first, second)) => Err(ScheduleValidationError::OverlappingSlots {
            day: None,
            first,
            second,
        }),
        None => Ok(()),
    }
}

fn find_overlap(slots: &[TimeSlot]) -> Option<(TimeSlot, TimeSlot)> {
    let mut sorted: Vec<&TimeSlot> = slots.iter().collect();
    sorted.sort_by_key(|slot| (slot.start_time, slot.end_time));

    let mut reach: Option<&TimeSlot> = None;
    for slot in sorted {
        if let Some(furthest) = reach {
            if furthest.overlaps(slot) {
                return Some((*furthest, *slot));
            }
            if slot.end_time > furthest.end_time {
                reach = Some(slot);
            }
        } else {
            reach = Some(slot);
        }
    }

    None
}

/// Days marked unavailable pass unconditionally, whatever stale slots they
/// still carry.
pub fn validate_day_schedule(schedule: &DaySchedule) -> ValidationResult {
    if !schedule.is_available {
        return Ok(());
    }

    for slot in &schedule.time_slots {
        validate_time_slot(slot).map_err(|e| e.on(schedule.day_of_week))?;
    }

    validate_no_overlap(&schedule.time_slots).map_err(|e| e.on(schedule.day_of_week))
}

pub fn validate_association_schedule(days: &[DaySchedule]) -> ValidationResult {
    if let Some(day) = first_duplicate_day(days) {
        return Err(ScheduleValidationError::DuplicateDay { day });
    }

    days.iter().try_for_each(validate_day_schedule)
}

fn first_duplicate_day(days: &[DaySchedule]) -> Option<DayOfWeek> {
    let mut seen = HashSet::with_capacity(days.len());
    days.iter()
        .map(|d| d.day_of_week)
        .find(|day| !seen.insert(*day))
}

pub fn validate_notes(notes: Option<&str>, max_length: usize) -> ValidationResult {
    let actual_length = notes.map(|n| n.chars().count()).unwrap_or(0);
    if actual_length > max_length {
        return Err(ScheduleValidationError::NotesTooLong {
            max_length,
            actual_length,
        });
    }
    Ok(())
}

/// Every problem in a weekly schedule rather than only the first one, so an
/// editor can highlight all offending days at once.
///
/// Each duplicated day is reported once. Within a day, malformed slots are
/// all listed; the overlap check only runs if every slot is well formed.
pub fn collect_schedule_errors(days: &[DaySchedule]) -> Vec<ScheduleValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for day in days.iter().map(|d| d.day_of_week) {
        if !seen.insert(day) && reported.insert(day) {
            errors.push(ScheduleValidationError::DuplicateDay { day });
        }
    }

    for schedule in days.iter().filter(|d| d.is_available) {
        let malformed: Vec<ScheduleValidationError> = schedule
            .time_slots
            .iter()
            .filter_map(|slot| validate_time_slot(slot).err())
            .map(|e| e.on(schedule.day_of_week))
            .collect();

        if malformed.is_empty() {
            if let Err(e) = validate_no_overlap(&schedule.time_slots) {
                errors.push(e.on(schedule.day_of_week));
            }
        } else {
            errors.extend(malformed);
        }
    }

    errors
}

/// The one validator both the application layer and the storage layer run
/// before a doctor's clinic associations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleValidator {
    notes_max_length: usize,
}

impl Default for ScheduleValidator {
    fn default() -> Self {
        Self {
            notes_max_length: shared_config::DEFAULT_NOTES_MAX_LENGTH,
        }
    }
}

impl ScheduleValidator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            notes_max_length: config.notes_max_length,
        }
    }

    pub fn notes_max_length(&self) -> usize {
        self.notes_max_length
    }

    pub fn validate_notes(&self, notes: Option<&str>) -> ValidationResult {
        validate_notes(notes, self.notes_max_length)
    }

    pub fn validate_association(&self, association: &ClinicAssociation) -> ValidationResult {
        validate_association_schedule(&association.working_hours)?;
        self.validate_notes(association.notes.as_deref())
    }

    pub fn validate_record(&self, record: &DoctorClinics) -> ValidationResult {
        let mut clinics = HashSet::with_capacity(record.clinics.len());
        for association in &record.clinics {
            if !clinics.insert(&association.clinic_id) {
                return Err(ScheduleValidationError::DuplicateClinic {
                    clinic_id: association.clinic_id.clone(),
                });
            }
        }

        record
            .clinics
            .iter()
            .try_for_each(|association| self.validate_association(association))
    }
}
