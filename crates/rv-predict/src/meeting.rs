//! Meeting prediction between two projected routes.

use rv_core::Place;

use crate::Route;

/// Where and when two routes meet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Meeting {
    pub offset: u64,
    pub place:  Place,
}

/// Earliest meeting of `a` and `b` before `horizon`.
///
/// Every pair of waypoints (one per route) at the same place whose offsets
/// differ by at most `tolerance` minutes is a candidate, meeting at the
/// smaller of the two offsets.  Ties on offset go to the smaller place, so
/// the result does not depend on argument order.
pub fn earliest_meeting(a: &Route, b: &Route, horizon: u64, tolerance: u32) -> Option<Meeting> {
    let tolerance = tolerance as u64;
    a.waypoints()
        .iter()
        .flat_map(|wa| b.waypoints().iter().map(move |wb| (wa, wb)))
        .filter(|(wa, wb)| wa.place == wb.place && wa.offset.abs_diff(wb.offset) <= tolerance)
        .map(|(wa, wb)| Meeting { offset: wa.offset.min(wb.offset), place: wa.place })
        .filter(|m| m.offset < horizon)
        .min()
}

/// Offset of the earliest meeting of `a` and `b` before `horizon`.
///
/// Symmetric: `predict_meeting(a, b, ..) == predict_meeting(b, a, ..)`.
pub fn predict_meeting(a: &Route, b: &Route, horizon: u64, tolerance: u32) -> Option<u64> {
    earliest_meeting(a, b, horizon, tolerance).map(|m| m.offset)
}
