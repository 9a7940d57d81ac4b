use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, Locale};

use crate::models::{ClinicId, DayOfWeek, TimeSlot};

fn on_day(day: &Option<DayOfWeek>) -> String {
    day.map(|d| format!(" on {}", d)).unwrap_or_default()
}

/// Rejections produced by the availability validator. All of them are
/// correctable by the person editing the schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleValidationError {
    #[error("Invalid time '{value}': expected 24-hour HH:MM")]
    InvalidTimeFormat { value: String },

    #[error("Invalid time slot {slot}{}: end time must be after start time", on_day(.day))]
    InvalidSlot {
        day: Option<DayOfWeek>,
        slot: TimeSlot,
    },

    #[error("Overlapping time slots{}: {first} and {second}", on_day(.day))]
    OverlappingSlots {
        day: Option<DayOfWeek>,
        first: TimeSlot,
        second: TimeSlot,
    },

    #[error("{day} appears more than once in the schedule")]
    DuplicateDay { day: DayOfWeek },

    #[error("Notes exceed the maximum length of {max_length} characters ({actual_length} given)")]
    NotesTooLong {
        max_length: usize,
        actual_length: usize,
    },

    #[error("Clinic {clinic_id} is listed more than once for the same doctor")]
    DuplicateClinic { clinic_id: ClinicId },
}

impl ScheduleValidationError {
    /// Attach the day being validated to slot-level errors.
    pub fn on(self, day: DayOfWeek) -> Self {
        match self {
            ScheduleValidationError::InvalidSlot { slot, .. } => {
                ScheduleValidationError::InvalidSlot { day: Some(day), slot }
            }
            ScheduleValidationError::OverlappingSlots { first, second, .. } => {
                ScheduleValidationError::OverlappingSlots {
                    day: Some(day),
                    first,
                    second,
                }
            }
            other => other,
        }
    }

    /// Message suitable for showing to the person editing the schedule.
    pub fn localized_message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::Ar => self.arabic_message(),
        }
    }

    fn arabic_message(&self) -> String {
        let on_day_ar = |day: &Option<DayOfWeek>| {
            day.map(|d| format!(" يوم {}", d.localized_name(Locale::Ar)))
                .unwrap_or_default()
        };

        match self {
            ScheduleValidationError::InvalidTimeFormat { value } => {
                format!("الوقت '{}' غير صالح: الصيغة المطلوبة HH:MM بنظام 24 ساعة", value)
            }
            ScheduleValidationError::InvalidSlot { day, slot } => format!(
                "الفترة الزمنية {}{} غير صالحة: يجب أن يكون وقت الانتهاء بعد وقت البدء",
                slot,
                on_day_ar(day)
            ),
            ScheduleValidationError::OverlappingSlots { day, first, second } => format!(
                "الفترتان {} و {} متداخلتان{}",
                first,
                second,
                on_day_ar(day)
            ),
            ScheduleValidationError::DuplicateDay { day } => format!(
                "يوم {} مكرر في الجدول",
                day.localized_name(Locale::Ar)
            ),
            ScheduleValidationError::NotesTooLong {
                max_length,
                actual_length,
            } => format!(
                "الملاحظات تتجاوز الحد الأقصى البالغ {} حرفًا ({} حرفًا)",
                max_length, actual_length
            ),
            ScheduleValidationError::DuplicateClinic { clinic_id } => {
                format!("العيادة {} مرتبطة بالطبيب أكثر من مرة", clinic_id)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Schedule validation failed: {0}")]
    Validation(#[from] ScheduleValidationError),

    #[error("Doctor {doctor_id} is not associated with clinic {clinic_id}")]
    AssociationNotFound { doctor_id: Uuid, clinic_id: ClinicId },

    #[error("Doctor {doctor_id} is already associated with clinic {clinic_id}")]
    AlreadyAssociated { doctor_id: Uuid, clinic_id: ClinicId },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let app_error = match err {
            ScheduleError::Validation(e) => AppError::ValidationError(e.to_string()),
            e @ ScheduleError::AssociationNotFound { .. } => AppError::NotFound(e.to_string()),
            e @ ScheduleError::AlreadyAssociated { .. } => AppError::Conflict(e.to_string()),
            ScheduleError::Storage(msg) => AppError::Database(msg),
        };
        app_error.logged()
    }
}
