//! Seeded draw of the competitor order.

use crate::models::Competitor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle a copy of `competitors`. The same seed always gives the same order.
pub fn draw_order(competitors: &[Competitor], seed: u64) -> Vec<Competitor> {
    let mut order = competitors.to_vec();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    order
}
