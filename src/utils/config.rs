use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_NAME: &str = "petclinic";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    /// When unset the clinic runs on the in-memory store.
    pub database_url: Option<String>,
    pub database_name: String,
    pub sample_data: bool,
    pub log_filter: String,
}

impl AppConfig {

    pub fn global() -> &'static AppConfig {
        CONFIG.get_or_init(|| {
            dotenv().ok();
            AppConfig::from_env()
        })
    }

    pub fn from_env() -> AppConfig {
        AppConfig {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            sample_data: env::var("SAMPLE_DATA")
                .map(|value| parse_flag(&value))
                .unwrap_or(true),
            log_filter: env::var("RUST_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_env;

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(
            vec!["BIND_ADDRESS", "DATABASE_URL", "DATABASE_NAME", "SAMPLE_DATA", "RUST_LOG"],
            || {
                let config = AppConfig::from_env();

                assert_eq!(config.bind_address, "127.0.0.1:8080");
                assert!(config.database_url.is_none());
                assert_eq!(config.database_name, "petclinic");
                assert!(config.sample_data);
                assert_eq!(config.log_filter, "info");
            },
        );
    }

    #[test]
    fn test_values_are_loaded_from_env() {
        temp_env::with_vars(vec![
            ("BIND_ADDRESS", Some("0.0.0.0:9966")),
            ("DATABASE_URL", Some("mongodb://localhost:27017")),
            ("DATABASE_NAME", Some("clinic_test")),
            ("SAMPLE_DATA", Some("false")),
            ("RUST_LOG", Some("debug")),
        ], || {
            let config = AppConfig::from_env();

            assert_eq!(config.bind_address, "0.0.0.0:9966");
            assert_eq!(config.database_url.as_deref(), Some("mongodb://localhost:27017"));
            assert_eq!(config.database_name, "clinic_test");
            assert!(!config.sample_data);
            assert_eq!(config.log_filter, "debug");
        });
    }

    #[test]
    fn test_blank_database_url_selects_memory_store() {
        temp_env::with_var("DATABASE_URL", Some("   "), || {
            assert!(AppConfig::from_env().database_url.is_none());
        });
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(" off "));
    }

    #[test]
    fn test_config_is_singleton() {
        let config1 = AppConfig::global();
        let config2 = AppConfig::global();

        assert!(std::ptr::eq(config1, config2));
    }
}
