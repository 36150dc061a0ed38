pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use services::data_access::{DataScope, IntelligenceStore};
pub use services::intelligence_service::IntelligenceService;
pub use services::settings_service::SettingsService;
