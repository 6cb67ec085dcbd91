//! Scoring module - points awarded for crushes
//!
//! Scoring is linear: a crush is worth one point per candy it covers, with no
//! combo or cascade multiplier. Every crush is scored on its own, so a candy
//! shared by a horizontal and a vertical run counts once for each.

use crate::rules::Crush;

/// Points for a single crush of `len` candies
pub fn crush_score(len: usize) -> u32 {
    len as u32
}

/// Points for a batch of crushes found in one detection pass
pub fn total_score(crushes: &[Crush]) -> u32 {
    crushes
        .iter()
        .map(|crush| crush_score(crush.len()))
        .fold(0u32, u32::saturating_add)
}
