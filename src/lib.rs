pub mod commands;
pub mod database;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

pub use commands::router;
pub use errors::{AppError, AppResult};
pub use services::AppState;
