use std::collections::BTreeMap;

use crate::error::ScheduleValidationError;
use crate::models::{DayOfWeek, DaySchedule, TimeSlot};
use crate::services::validation::{self, ValidationResult};

/// Edit-in-progress state for one association's weekly schedule.
///
/// Drafts are values: every edit consumes the draft and returns the edited
/// one, so the state a caller validates is exactly the state it submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    days: BTreeMap<DayOfWeek, DaySchedule>,
}

impl ScheduleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing schedule. Fails if a day appears twice.
    pub fn from_working_hours(days: &[DaySchedule]) -> Result<Self, ScheduleValidationError> {
        let mut draft = BTreeMap::new();
        for day in days {
            if draft.insert(day.day_of_week, day.clone()).is_some() {
                return Err(ScheduleValidationError::DuplicateDay { day: day.day_of_week });
            }
        }
        Ok(Self { days: draft })
    }

    pub fn day(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    fn edit_day(mut self, day: DayOfWeek, edit: impl FnOnce(&mut DaySchedule)) -> Self {
        let entry = self
            .days
            .entry(day)
            .or_insert_with(|| DaySchedule::unavailable(day));
        edit(entry);
        self
    }

    /// Turning a day off clears its slots; turning it on keeps them.
    #[must_use]
    pub fn set_availability(self, day: DayOfWeek, is_available: bool) -> Self {
        self.edit_day(day, |schedule| {
            schedule.is_available = is_available;
            if !is_available {
                schedule.time_slots.clear();
            }
        })
    }

    /// Adding a slot marks the day available.
    #[must_use]
    pub fn add_slot(self, day: DayOfWeek, slot: TimeSlot) -> Self {
        self.edit_day(day, |schedule| {
            schedule.is_available = true;
            schedule.time_slots.push(slot);
        })
    }

    #[must_use]
    pub fn remove_slot(self, day: DayOfWeek, slot: &TimeSlot) -> Self {
        if !self.days.contains_key(&day) {
            return self;
        }
        self.edit_day(day, |schedule| {
            schedule.time_slots.retain(|s| s != slot);
        })
    }

    #[must_use]
    pub fn set_slots(self, day: DayOfWeek, slots: Vec<TimeSlot>) -> Self {
        self.edit_day(day, |schedule| {
            schedule.is_available = !slots.is_empty() || schedule.is_available;
            schedule.time_slots = slots;
        })
    }

    /// Forget the day entirely; it will not appear in the submitted schedule.
    #[must_use]
    pub fn clear_day(mut self, day: DayOfWeek) -> Self {
        self.days.remove(&day);
        self
    }

    pub fn validate(&self) -> ValidationResult {
        let days: Vec<DaySchedule> = self.days.values().cloned().collect();
        validation::validate_association_schedule(&days)
    }

    pub fn errors(&self) -> Vec<ScheduleValidationError> {
        let days: Vec<DaySchedule> = self.days.values().cloned().collect();
        validation::collect_schedule_errors(&days)
    }

    /// Pairs of back-to-back slots on a day. These are legal, but an editor
    /// may want to point them out separately from overlaps.
    pub fn adjacent_slots(&self, day: DayOfWeek) -> Vec<(TimeSlot, TimeSlot)> {
        let Some(schedule) = self.days.get(&day) else {
            return Vec::new();
        };

        let mut slots = schedule.time_slots.clone();
        slots.sort_by_key(|s| (s.start_time, s.end_time));

        slots
            .windows(2)
            .filter(|pair| pair[0].end_time == pair[1].start_time)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// The schedule as it should be submitted: Monday first, slots ordered by
    /// start time, unavailable days without slots.
    pub fn into_working_hours(self) -> Vec<DaySchedule> {
        self.days
            .into_values()
            .map(|day| {
                let mut day = day.normalized();
                day.time_slots.sort_by_key(|s| (s.start_time, s.end_time));
                day
            })
            .collect()
    }

    /// Validate and, if valid, return the schedule ready to submit.
    pub fn finish(self) -> Result<Vec<DaySchedule>, ScheduleValidationError> {
        self.validate()?;
        Ok(self.into_working_hours())
    }
}
