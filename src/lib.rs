pub mod config;
pub mod models;
pub mod routes;
pub mod store;
pub mod validate;
pub mod video;
