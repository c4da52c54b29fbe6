//! daqloop: sampled-sensor history with an operator console.
//!
//! Exposes the store, acquisition controller, command pipeline and
//! session loop for the host binary and for integration testing.
//! Hardware-facing pieces sit behind the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod acquisition;
pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod sensors;
pub mod session;
pub mod store;
