pub mod error;
pub mod locale;

pub use error::AppError;
pub use locale::Locale;
