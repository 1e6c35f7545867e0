//! Paid-time-off tracker: leave-day calculation, balance ledger and request
//! journal behind an actix-web API.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod leave;
pub mod model;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod utils;

pub use error::{AppError, AppResult};
pub use service::LeaveService;
