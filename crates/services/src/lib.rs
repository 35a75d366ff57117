#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressError};
pub use progress_service::{PROGRESS_SLOT_KEY, ProgressService, ProgressStats};
