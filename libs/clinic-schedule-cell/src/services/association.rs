use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::Locale;

use crate::error::ScheduleError;
use crate::models::{
    AttachClinicRequest, ClinicAssociation, ClinicId, DayOfWeek, DaySchedule, DoctorClinics,
    TimeOfDay, UpdateAssociationRequest, UpdateWorkingHoursRequest,
};
use crate::services::store::DoctorStore;
use crate::services::validation::ScheduleValidator;

/// Attaches doctors to clinics and maintains each association's weekly
/// schedule. Every write is validated here and again by the store.
pub struct ClinicAssociationService<S: DoctorStore> {
    store: Arc<S>,
    validator: ScheduleValidator,
    locale: Locale,
}

impl<S: DoctorStore> ClinicAssociationService<S> {
    pub fn new(store: Arc<S>, config: &AppConfig) -> Self {
        Self {
            store,
            validator: ScheduleValidator::new(config),
            locale: config.default_locale,
        }
    }

    /// Text for the person editing the schedule, in the configured language.
    pub fn user_message(&self, err: &ScheduleError) -> String {
        match err {
            ScheduleError::Validation(e) => e.localized_message(self.locale),
            other => other.to_string(),
        }
    }

    pub async fn list_associations(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<ClinicAssociation>, ScheduleError> {
        debug!("Fetching clinic associations for doctor: {}", doctor_id);

        Ok(self
            .store
            .load(doctor_id)
            .await?
            .map(|record| record.clinics)
            .unwrap_or_default())
    }

    pub async fn get_association(
        &self,
        doctor_id: Uuid,
        clinic_id: &ClinicId,
    ) -> Result<ClinicAssociation, ScheduleError> {
        self.store
            .load(doctor_id)
            .await?
            .and_then(|record| record.association(clinic_id).cloned())
            .ok_or_else(|| ScheduleError::AssociationNotFound {
                doctor_id,
                clinic_id: clinic_id.clone(),
            })
    }

    #[instrument(skip(self, request), fields(clinic_id = %request.clinic_id))]
    pub async fn attach_clinic(
        &self,
        doctor_id: Uuid,
        request: AttachClinicRequest,
    ) -> Result<ClinicAssociation, ScheduleError> {
        debug!("Attaching doctor {} to clinic {}", doctor_id, request.clinic_id);

        let association = ClinicAssociation {
            clinic_id: request.clinic_id,
            working_hours: normalize(request.working_hours),
            is_active: request.is_active.unwrap_or(true),
            joined_at: Utc::now(),
            notes: request.notes.filter(|n| !n.trim().is_empty()),
        };
        self.validator.validate_association(&association)?;

        let attached = self
            .store
            .update(doctor_id, |record: &mut DoctorClinics| {
                if record.association(&association.clinic_id).is_some() {
                    warn!(
                        "Doctor {} already attached to clinic {}",
                        doctor_id, association.clinic_id
                    );
                    return Err(ScheduleError::AlreadyAssociated {
                        doctor_id,
                        clinic_id: association.clinic_id,
                    });
                }
                record.clinics.push(association.clone());
                Ok(association)
            })
            .await?;

        info!("Doctor {} attached to clinic {}", doctor_id, attached.clinic_id);
        Ok(attached)
    }

    #[instrument(skip(self))]
    pub async fn detach_clinic(
        &self,
        doctor_id: Uuid,
        clinic_id: &ClinicId,
    ) -> Result<ClinicAssociation, ScheduleError> {
        let removed = self
            .store
            .update(doctor_id, |record: &mut DoctorClinics| {
                let position = record
                    .clinics
                    .iter()
                    .position(|a| &a.clinic_id == clinic_id)
                    .ok_or_else(|| ScheduleError::AssociationNotFound {
                        doctor_id,
                        clinic_id: clinic_id.clone(),
                    })?;
                Ok(record.clinics.remove(position))
            })
            .await?;

        info!("Doctor {} detached from clinic {}", doctor_id, clinic_id);
        Ok(removed)
    }

    /// Replace an association's weekly schedule. On failure the stored
    /// schedule is left as it was.
    #[instrument(skip(self, request))]
    pub async fn update_working_hours(
        &self,
        doctor_id: Uuid,
        clinic_id: &ClinicId,
        request: UpdateWorkingHoursRequest,
    ) -> Result<ClinicAssociation, ScheduleError> {
        self.modify(doctor_id, clinic_id, |association| {
            association.working_hours = normalize(request.working_hours);
        })
        .await
    }

    #[instrument(skip(self, request))]
    pub async fn update_association(
        &self,
        doctor_id: Uuid,
        clinic_id: &ClinicId,
        request: UpdateAssociationRequest,
    ) -> Result<ClinicAssociation, ScheduleError> {
        self.modify(doctor_id, clinic_id, |association| {
            if let Some(is_active) = request.is_active {
                association.is_active = is_active;
            }
            if let Some(notes) = request.notes {
                association.notes = Some(notes).filter(|n| !n.trim().is_empty());
            }
        })
        .await
    }

    /// Clinics where the doctor is seeing patients at the given time.
    pub async fn available_clinics(
        &self,
        doctor_id: Uuid,
        day: DayOfWeek,
        time: TimeOfDay,
    ) -> Result<Vec<ClinicId>, ScheduleError> {
        let associations = self.list_associations(doctor_id).await?;

        Ok(associations
            .into_iter()
            .filter(|a| a.is_open_at(day, time))
            .map(|a| a.clinic_id)
            .collect())
    }

    async fn modify(
        &self,
        doctor_id: Uuid,
        clinic_id: &ClinicId,
        edit: impl FnOnce(&mut ClinicAssociation) + Send,
    ) -> Result<ClinicAssociation, ScheduleError> {
        let validator = self.validator;

        let updated = self
            .store
            .update(doctor_id, |record: &mut DoctorClinics| {
                let association = record.association_mut(clinic_id).ok_or_else(|| {
                    ScheduleError::AssociationNotFound {
                        doctor_id,
                        clinic_id: clinic_id.clone(),
                    }
                })?;

                edit(association);
                if let Err(e) = validator.validate_association(association) {
                    debug!(
                        "Rejected update for doctor {} at clinic {}: {}",
                        doctor_id, clinic_id, e
                    );
                    return Err(e.into());
                }
                Ok(association.clone())
            })
            .await?;

        debug!("Updated association for doctor {} at clinic {}", doctor_id, clinic_id);
        Ok(updated)
    }
}

fn normalize(days: Vec<DaySchedule>) -> Vec<DaySchedule> {
    days.into_iter().map(DaySchedule::normalized).collect()
}
