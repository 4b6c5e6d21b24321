//! Time-dependent, multi-criteria transit routing core.
//!
//! This crate implements the Range-RAPTOR family of schedule-based transit
//! routing algorithms (RAPTOR and McRAPTOR) behind a narrow, direction- and
//! profile-polymorphic search API. It has no opinion about where a
//! [`provider::TransitDataProvider`] comes from (GTFS ingestion, a graph
//! database, synthetic fixtures) and no opinion about what a caller does
//! with a [`response::Response`] once it has one — there is no HTTP layer,
//! no CLI, and no persistence here.
//!
//! The entry point is [`search`]: build a [`request::Request`] against a
//! [`provider::TransitDataProvider`], call it, and walk the returned
//! [`response::Response`]'s paths.

pub mod batch;
pub mod calculator;
pub mod destination;
pub mod diag;
pub mod error;
pub mod fare;
pub mod hooks;
pub mod model;
pub mod path;
pub mod provider;
pub mod request;
pub mod response;
pub mod service;
pub mod state;
pub mod trip_search;
mod worker;

pub use batch::{run_many, run_many_with_lifecycle};
pub use error::{CoreError, ErrorCategory, ProviderError, RequestError, SearchFault};
pub use hooks::{NoopLifecycle, SearchLifecycle};
pub use provider::{InMemoryProvider, InMemoryProviderBuilder, TransitDataProvider};
pub use request::{DebugFilter, Direction, Profile, Request, RequestBuilder};
pub use response::{Diagnostics, Path, PathLeg, Response};

/// Runs a single search with the default (no-op) lifecycle. Most callers
/// want this; `worker::run` with an explicit lifecycle (via
/// [`batch::run_many_with_lifecycle`]) is for progress reporting and
/// diagnostic dumps (spec §9).
pub fn search(provider: &dyn TransitDataProvider, request: &Request) -> Result<Response, CoreError> {
    worker::run(provider, request, &NoopLifecycle)
}
