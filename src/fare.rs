//! Fare-Transfer Observer (FTO, spec §4.8): an optional, pluggable callback
//! consulted when a transit arrival is constructed. A faithful New York
//! style fare-rule state machine is application logic layered on top of
//! this hook (spec §9) — this crate only defines the seam.

use crate::model::{FareTag, GlobalTripRef, PatternIndex, StopIndex, Timestamp};

/// Outcome of boarding a trip, given the previous arrival's fare tag.
#[derive(Debug, Clone, Copy)]
pub struct FareOutcome {
    pub cost: crate::model::Cost,
    pub tag: FareTag,
}

pub trait FareTransferObserver: Sync {
    /// `pattern` identifies the boarded route; `previous_tag` is `None` for
    /// the very first boarding of a journey. The observer is pure with
    /// respect to the arrival graph: it may consult immutable reference
    /// data, but must not mutate search state.
    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        previous_tag: Option<FareTag>,
        pattern: PatternIndex,
        trip: GlobalTripRef,
        board_stop: StopIndex,
        board_time: Timestamp,
        alight_stop: StopIndex,
        alight_time: Timestamp,
    ) -> FareOutcome;
}

/// Default observer when no fare engine is attached: every boarding costs
/// nothing and carries no transfer allowance.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFareObserver;

impl FareTransferObserver for NoFareObserver {
    fn evaluate(
        &self,
        _previous_tag: Option<FareTag>,
        _pattern: PatternIndex,
        _trip: GlobalTripRef,
        _board_stop: StopIndex,
        _board_time: Timestamp,
        _alight_stop: StopIndex,
        _alight_time: Timestamp,
    ) -> FareOutcome {
        FareOutcome {
            cost: 0.0,
            tag: FareTag {
                value: 0,
                expires_at: Timestamp::MAX,
            },
        }
    }
}

/// Two tags participate in dominance as an additional, incomparable
/// coordinate unless they match exactly (spec §4.8).
pub fn tags_match(a: FareTag, b: FareTag) -> bool {
    a.value == b.value && a.expires_at == b.expires_at
}
