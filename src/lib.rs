//! # Route Advisor
//!
//! A small backend that turns a trip request into advice from a language
//! model.
//!
//! This library provides:
//! - An HTTP API accepting trips (origin, destination, vehicle, departure time)
//! - A route prompt template describing the expected answer format
//! - Direct dispatch to Gemini, or a tool loop with weather, traffic and
//!   directions lookups
//!
//! ## Example
//!
//! ```rust,ignore
//! use route_advisor::{agent::Dispatcher, api::types::TripRequest, Config};
//!
//! let config = Config::from_env()?;
//! let dispatcher = Dispatcher::from_config(&config);
//! let trip = TripRequest {
//!     origin: "Sousse".into(),
//!     destination: "Tunis".into(),
//!     vehicle_type: "car".into(),
//!     departure_time: "08:00".into(),
//! };
//! let advice = dispatcher.direct(&trip).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;
mod util;

#[cfg(test)]
mod test_support;

pub use config::Config;
