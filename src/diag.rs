//! The one bit-exact format the core defines (spec §6): a diagnostic leg
//! encoding used only to compare runs in golden tests. Not a transport
//! format — compression and endianness-for-the-wire are out of scope.

use crate::response::{Path, PathLeg};

/// `(kind, from_stop, to_stop, departure_time, arrival_time, trip_index_or_-1)`,
/// each a 32-bit little-endian field, 24 bytes per leg.
const KIND_ACCESS: i32 = 0;
const KIND_TRANSIT: i32 = 1;
const KIND_TRANSFER: i32 = 2;
const KIND_EGRESS: i32 = 3;

pub fn encode_path(path: &Path) -> Vec<u8> {
    let mut out = Vec::with_capacity(path.legs.len() * 24);
    for leg in &path.legs {
        let (kind, from_stop, to_stop, departure, arrival, trip_index) = match leg {
            PathLeg::Access {
                stop,
                departure_time,
                arrival_time,
            } => (KIND_ACCESS, *stop as i32, *stop as i32, *departure_time, *arrival_time, -1),
            PathLeg::Transit {
                trip,
                board_stop,
                board_time,
                alight_stop,
                alight_time,
            } => (
                KIND_TRANSIT,
                *board_stop as i32,
                *alight_stop as i32,
                *board_time,
                *alight_time,
                trip.trip as i32,
            ),
            PathLeg::Transfer {
                from_stop,
                to_stop,
                departure_time,
                arrival_time,
            } => (
                KIND_TRANSFER,
                *from_stop as i32,
                *to_stop as i32,
                *departure_time,
                *arrival_time,
                -1,
            ),
            PathLeg::Egress {
                stop,
                departure_time,
                arrival_time,
            } => (KIND_EGRESS, *stop as i32, *stop as i32, *departure_time, *arrival_time, -1),
        };
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&from_stop.to_le_bytes());
        out.extend_from_slice(&to_stop.to_le_bytes());
        out.extend_from_slice(&(departure as i32).to_le_bytes());
        out.extend_from_slice(&(arrival as i32).to_le_bytes());
        out.extend_from_slice(&trip_index.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GlobalTripRef;

    #[test]
    fn encoding_is_deterministic() {
        let path = Path {
            legs: vec![
                PathLeg::Access {
                    stop: 0,
                    departure_time: 0,
                    arrival_time: 0,
                },
                PathLeg::Transit {
                    trip: GlobalTripRef { pattern: 2, trip: 5 },
                    board_stop: 0,
                    board_time: 0,
                    alight_stop: 4,
                    alight_time: 240,
                },
            ],
            departure_time: 0,
            arrival_time: 240,
            num_transfers: 0,
            travel_duration: 240,
            cost: 0.0,
        };
        let a = encode_path(&path);
        let b = encode_path(&path);
        assert_eq!(a, b);
        assert_eq!(a.len(), 48);
        // trip_index_or_-1 field of the transit leg.
        assert_eq!(&a[44..48], &5i32.to_le_bytes());
    }
}
