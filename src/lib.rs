pub mod config;
pub mod domain;
pub mod event_queue;
pub mod klaviyo;
pub mod pipeline;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use startup::run;
