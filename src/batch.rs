//! Cross-request batch entry point: each `Request` in a batch is searched
//! independently, so a batch parallelizes trivially across a `rayon` pool
//! rather than sharing any mutable state between requests.

use rayon::prelude::*;

use crate::error::CoreError;
use crate::hooks::{NoopLifecycle, SearchLifecycle};
use crate::provider::TransitDataProvider;
use crate::request::Request;
use crate::response::Response;
use crate::worker;

/// Runs every request in `requests` against `provider`, one worker per
/// request, using the default no-op lifecycle. Order of the returned
/// `Vec` matches the order of `requests`.
pub fn run_many(provider: &(dyn TransitDataProvider + Sync), requests: &[Request]) -> Vec<Result<Response, CoreError>> {
    requests
        .par_iter()
        .map(|request| worker::run(provider, request, &NoopLifecycle))
        .collect()
}

/// Like `run_many`, but with a caller-supplied lifecycle shared read-only
/// across every request in the batch (e.g. a progress counter keyed by
/// request index is the lifecycle's own responsibility to maintain).
pub fn run_many_with_lifecycle(
    provider: &(dyn TransitDataProvider + Sync),
    requests: &[Request],
    lifecycle: &(dyn SearchLifecycle + Sync),
) -> Vec<Result<Response, CoreError>> {
    requests
        .par_iter()
        .map(|request| worker::run(provider, request, lifecycle))
        .collect()
}
