use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

use shared_config::AppConfig;
use shared_models::Locale;

static TEST_TRACING: Once = Once::new();

/// Route test logs through the test harness writer. Safe to call from every test.
pub fn init_test_tracing() {
    TEST_TRACING.call_once(|| {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub struct TestConfig {
    pub notes_max_length: usize,
    pub default_locale: Locale,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            notes_max_length: shared_config::DEFAULT_NOTES_MAX_LENGTH,
            default_locale: Locale::En,
        }
    }
}

impl TestConfig {
    pub fn with_notes_max_length(mut self, max: usize) -> Self {
        self.notes_max_length = max;
        self
    }

    pub fn arabic(mut self) -> Self {
        self.default_locale = Locale::Ar;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            notes_max_length: self.notes_max_length,
            default_locale: self.default_locale,
            log_filter: "warn".to_string(),
        }
    }
}
