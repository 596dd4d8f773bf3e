pub mod errors;
pub mod config;
pub mod logging;

pub use errors::ApiError;
pub use config::AppConfig;
pub use logging::init_logging;
