//! Domain layer - business logic and services

pub mod guard;
pub mod predictor;
pub mod repository;
pub mod service;
pub mod strategy;
pub mod validation;
pub mod weekly;

pub use predictor::GamePrediction;
pub use repository::{CatalogRepository, GameStore, GameStoreTx, ReportingRepository};
pub use service::Service;
pub use strategy::{Direction, ProcessGameStrategy};
pub use weekly::WeeklyUpdateService;
