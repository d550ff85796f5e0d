pub mod catalog;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod services;
pub mod term;
