pub mod sparql_client;
pub mod usage_service;
