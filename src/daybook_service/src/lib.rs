pub mod app_service;
pub mod helpers;
pub mod pages;
pub mod telemetry;

pub use app_service::AppService;
