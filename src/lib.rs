//! Domain core for a bowtie-style risk register.
//!
//! The backend owns persistence and workflow; this crate owns the typed
//! wire contract, the risk scoring engine, view-model construction, and
//! the owned-state register the UI layer drives. Everything here is pure,
//! synchronous computation and safe to call from any number of concurrent
//! render passes.

pub mod config;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod services;
