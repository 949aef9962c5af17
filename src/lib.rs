//! CxC Reporting API Library
//!
//! Accounts-receivable reporting over the Postgres `reporting` views and
//! payment-reminder composition.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `cors`: CORS policy built from configuration.
//! - `db`: Database connection pool and DSN masking.
//! - `docs`: OpenAPI document and Swagger UI.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and routes.
//! - `models`: View rows and request/response payloads.
//! - `money`: Amount coercion and currency formatting.
//! - `reminder`: Tone/language-selected reminder composition.
//! - `reports`: Read-only queries over the reporting views.
//! - `suggestion`: Suggested collection messages and caller templates.

pub mod config;
pub mod cors;
pub mod db;
pub mod docs;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod money;
pub mod reminder;
pub mod reports;
pub mod suggestion;
