//! Locally synthesized slots for degraded mode.

use rand::Rng;

use crate::models::{SlotTime, TimeSlot};

/// Probability that a synthesized slot is marked available.
pub const FALLBACK_AVAILABILITY: f64 = 0.7;

/// One slot per half hour between opening and closing, each available with
/// probability [`FALLBACK_AVAILABILITY`].
///
/// Only the shape is meaningful; availability is a guess and the server
/// re-validates whatever the customer picks.
pub fn fallback_slots<R: Rng + ?Sized>(rng: &mut R) -> Vec<TimeSlot> {
    SlotTime::opening_grid()
        .map(|time| TimeSlot::new(time, rng.gen_bool(FALLBACK_AVAILABILITY)))
        .collect()
}
