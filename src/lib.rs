pub mod aggregate;
pub mod apis;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod rank;
pub mod snapshot;
pub mod types;
