//! Reconciliation and reporting for property inspections: matches what was
//! seen at entry against what is seen at exit, assembles printable reports
//! and cuts rendered reports into pages without splitting photo blocks.

pub mod analysis;
pub mod comparison;
pub mod db;
pub mod errors;
pub mod guard;
pub mod markers;
pub mod models;
pub mod pagination;
pub mod report;
pub mod service;
pub mod settings;
mod utils;

pub use errors::InspectionError;
pub use service::InspectionService;
pub use settings::{ReportSettings, SettingsStore};

/// Initialize logging. `RUST_LOG` sets the filter when present; otherwise
/// `info` and above are shown. Later calls are no-ops.
pub fn init_logging() {
    let _ = logger_builder(env_logger::Env::default()).try_init();
}

fn logger_builder(env: env_logger::Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_env_var_overrides_default_level() {
        std::env::set_var("VISTORIA_TEST_LOG_DEBUG", "debug");
        let logger = logger_builder(env_logger::Env::new().filter("VISTORIA_TEST_LOG_DEBUG")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);

        let fallback = logger_builder(env_logger::Env::new().filter("VISTORIA_TEST_LOG_UNSET")).build();
        assert_eq!(fallback.filter(), log::LevelFilter::Info);
    }
}
