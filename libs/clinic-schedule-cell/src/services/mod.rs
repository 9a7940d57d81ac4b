pub mod association;
pub mod editor;
pub mod store;
pub mod validation;

pub use association::ClinicAssociationService;
pub use editor::ScheduleDraft;
pub use store::{DoctorStore, InMemoryDoctorStore};
pub use validation::ScheduleValidator;
