use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::DoctorClinics;
use crate::services::validation::ScheduleValidator;

/// Persistence for the clinic associations held on doctor records.
///
/// Implementations must re-run [`ScheduleValidator::validate_record`] before
/// writing: the application-side check cannot protect against concurrent
/// writers on its own.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn load(&self, doctor_id: Uuid) -> Result<Option<DoctorClinics>, ScheduleError>;

    /// Replace the whole record.
    async fn save(&self, record: DoctorClinics) -> Result<(), ScheduleError>;

    /// Apply `edit` to the doctor's record as one atomic read-modify-write.
    ///
    /// A doctor with no record yet gets an empty one. Nothing is written when
    /// `edit` or the re-validation fails, and no other write for the same
    /// doctor may interleave between the read and the write.
    async fn update<T, F>(&self, doctor_id: Uuid, edit: F) -> Result<T, ScheduleError>
    where
        T: Send,
        F: FnOnce(&mut DoctorClinics) -> Result<T, ScheduleError> + Send;

    async fn list_doctors(&self) -> Result<Vec<Uuid>, ScheduleError>;
}

#[derive(Debug, Default)]
pub struct InMemoryDoctorStore {
    records: RwLock<HashMap<Uuid, DoctorClinics>>,
    validator: ScheduleValidator,
}

impl InMemoryDoctorStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            validator: ScheduleValidator::new(config),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DoctorStore for InMemoryDoctorStore {
    async fn load(&self, doctor_id: Uuid) -> Result<Option<DoctorClinics>, ScheduleError> {
        Ok(self.records.read().await.get(&doctor_id).cloned())
    }

    async fn save(&self, record: DoctorClinics) -> Result<(), ScheduleError> {
        if let Err(e) = self.validator.validate_record(&record) {
            warn!("Refusing to store clinics for doctor {}: {}", record.doctor_id, e);
            return Err(e.into());
        }

        debug!(
            "Storing {} clinic association(s) for doctor {}",
            record.clinics.len(),
            record.doctor_id
        );
        self.records.write().await.insert(record.doctor_id, record);
        Ok(())
    }

    async fn update<T, F>(&self, doctor_id: Uuid, edit: F) -> Result<T, ScheduleError>
    where
        T: Send,
        F: FnOnce(&mut DoctorClinics) -> Result<T, ScheduleError> + Send,
    {
        let mut records = self.records.write().await;

        let mut record = records
            .get(&doctor_id)
            .cloned()
            .unwrap_or_else(|| DoctorClinics::new(doctor_id));
        let output = edit(&mut record)?;

        if let Err(e) = self.validator.validate_record(&record) {
            warn!("Refusing to store clinics for doctor {}: {}", doctor_id, e);
            return Err(e.into());
        }

        record.updated_at = Utc::now();
        debug!(
            "Storing {} clinic association(s) for doctor {}",
            record.clinics.len(),
            doctor_id
        );
        records.insert(doctor_id, record);
        Ok(output)
    }

    async fn list_doctors(&self) -> Result<Vec<Uuid>, ScheduleError> {
        let mut ids: Vec<Uuid> = self.records.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
