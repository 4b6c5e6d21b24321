//! State Store (SS, spec §4.4/§4.5): the per-request working memory the
//! range-RAPTOR worker reads and writes each round. Two variants share the
//! same arena-reuse shape but differ in what "improves" means: Best-Times
//! keeps one scalar per stop per round, Pareto-Set keeps a bounded
//! non-dominated set.

pub mod best_times;
pub mod pareto;

pub use best_times::BestTimesStore;
pub use pareto::{Dominance, ParetoSet, PARETO_SET_CAPACITY};
