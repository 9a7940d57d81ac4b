use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use shared_models::Locale;

use crate::error::ScheduleValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn from_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn localized_name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name(),
            Locale::Ar => match self {
                DayOfWeek::Monday => "الاثنين",
                DayOfWeek::Tuesday => "الثلاثاء",
                DayOfWeek::Wednesday => "الأربعاء",
                DayOfWeek::Thursday => "الخميس",
                DayOfWeek::Friday => "الجمعة",
                DayOfWeek::Saturday => "السبت",
                DayOfWeek::Sunday => "الأحد",
            },
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn hh_mm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("HH:MM pattern is valid")
    })
}

/// A wall-clock time of day with minute resolution, written as 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn parse(value: &str) -> Result<Self, ScheduleValidationError> {
        let invalid = || ScheduleValidationError::InvalidTimeFormat {
            value: value.to_string(),
        };

        let captures = hh_mm_pattern().captures(value).ok_or_else(invalid)?;
        let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u32 = captures[2].parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(time: TimeOfDay) -> Self {
        time.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Half-open interval `[start_time, end_time)` within a single day.
///
/// Construction does not enforce ordering; that is the validator's job so
/// that a rejected slot can still be reported back to the editor verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self { start_time, end_time }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleValidationError> {
        Ok(Self::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?))
    }

    pub fn is_well_formed(&self) -> bool {
        self.end_time > self.start_time
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    /// True when the two slots touch at exactly one boundary.
    pub fn is_adjacent_to(&self, other: &TimeSlot) -> bool {
        self.end_time == other.start_time || other.end_time == self.start_time
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start_time <= time && time < self.end_time
    }

    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_time.minutes_since_midnight())
            - i64::from(self.start_time.minutes_since_midnight())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    pub is_available: bool,
}

impl DaySchedule {
    pub fn available(day_of_week: DayOfWeek, time_slots: Vec<TimeSlot>) -> Self {
        Self {
            day_of_week,
            time_slots,
            is_available: true,
        }
    }

    pub fn unavailable(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            time_slots: Vec::new(),
            is_available: false,
        }
    }

    /// Drop slots from a day marked unavailable, as required on every write.
    pub fn normalized(mut self) -> Self {
        if !self.is_available {
            self.time_slots.clear();
        }
        self
    }

    pub fn is_open_at(&self, time: TimeOfDay) -> bool {
        self.is_available && self.time_slots.iter().any(|slot| slot.contains(time))
    }
}

/// Opaque identifier of a clinic owned by another part of the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicId(pub String);

impl ClinicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClinicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicAssociation {
    pub clinic_id: ClinicId,
    #[serde(default)]
    pub working_hours: Vec<DaySchedule>,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClinicAssociation {
    pub fn schedule_for(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.working_hours.iter().find(|d| d.day_of_week == day)
    }

    pub fn is_open_at(&self, day: DayOfWeek, time: TimeOfDay) -> bool {
        self.is_active
            && self
                .schedule_for(day)
                .map(|schedule| schedule.is_open_at(time))
                .unwrap_or(false)
    }

    pub fn available_days(&self) -> Vec<DayOfWeek> {
        let mut days: Vec<DayOfWeek> = self
            .working_hours
            .iter()
            .filter(|d| d.is_available && !d.time_slots.is_empty())
            .map(|d| d.day_of_week)
            .collect();
        days.sort();
        days
    }
}

/// The schedule-bearing part of a doctor's record: every clinic the doctor
/// is attached to, referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorClinics {
    pub doctor_id: Uuid,
    #[serde(default)]
    pub clinics: Vec<ClinicAssociation>,
    pub updated_at: DateTime<Utc>,
}

impl DoctorClinics {
    pub fn new(doctor_id: Uuid) -> Self {
        Self {
            doctor_id,
            clinics: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn association(&self, clinic_id: &ClinicId) -> Option<&ClinicAssociation> {
        self.clinics.iter().find(|a| &a.clinic_id == clinic_id)
    }

    pub fn association_mut(&mut self, clinic_id: &ClinicId) -> Option<&mut ClinicAssociation> {
        self.clinics.iter_mut().find(|a| &a.clinic_id == clinic_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachClinicRequest {
    pub clinic_id: ClinicId,
    #[serde(default)]
    pub working_hours: Vec<DaySchedule>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkingHoursRequest {
    pub working_hours: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssociationRequest {
    pub is_active: Option<bool>,
    /// `None` keeps the current notes; an empty string clears them.
    pub notes: Option<String>,
}
