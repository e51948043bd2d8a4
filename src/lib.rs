pub mod collection;
pub mod errors;
pub mod folio_config;
pub mod hub;
pub mod logging;
pub mod profile;
pub mod section;
pub mod server;
pub mod staleness;
pub mod store;
pub mod ui;
