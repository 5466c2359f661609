//! Elimination brackets: one gameday per round and leg, fixtures left unresolved.

use crate::models::{number_fixtures, Fixture, Gameday, Group, Leg, LegPolicy};

/// Deepest bracket we generate (4096 slots). Larger counts are treated as malformed.
const MAX_ROUNDS: u32 = 12;

/// ceil(log2(count)), 0 for a count of 0 or 1.
pub fn total_rounds(count: u32) -> u32 {
    if count <= 1 {
        0
    } else {
        u32::BITS - (count - 1).leading_zeros()
    }
}

/// Display name of round `index`, counted back from the final (0).
pub fn round_name(index: u32) -> String {
    match index {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        _ => match index.checked_add(1).and_then(|shift| 1u64.checked_shl(shift)) {
            Some(teams) => format!("Round of {}", teams),
            None => format!("Round {} before the final", index),
        },
    }
}

/// Every round of a single-elimination bracket for `count` competitors, earliest round first.
///
/// Round `k` (0 = final) holds 2^k fixtures per leg; `policy` decides the legs per round and
/// whether labels carry a leg suffix. Gameday numbers run from 1, one per (round, leg).
/// A count of 1 still gets a final; a count of 0 gets nothing.
pub fn elimination(group: &Group, count: u32, policy: LegPolicy) -> Vec<Gameday> {
    if count == 0 {
        return Vec::new();
    }
    let rounds = total_rounds(count).max(1);
    if rounds > MAX_ROUNDS {
        log::warn!(
            "{}: bracket for {} competitors is too large, nothing generated",
            group.name,
            count
        );
        return Vec::new();
    }

    let mut gamedays = Vec::new();
    let mut number = 0;
    for round_index in (0..rounds).rev() {
        let name = round_name(round_index);
        let matches = 1usize << round_index;

        for leg_index in 0..policy.legs_for_round(round_index) {
            number += 1;
            let leg = Leg::from_index(leg_index);
            let label = if policy.leg_suffix_for_round(round_index) {
                format!("{} {}", name, leg.label())
            } else {
                name.clone()
            };

            let mut gameday = Gameday::new(group.id, label.as_str(), leg);
            gameday.fixtures = (0..matches)
                .map(|slot| Fixture::new(group, number, slot, None, None, label.as_str()))
                .collect();
            log::debug!("{}: {} with {} fixtures", group.name, label, matches);
            gamedays.push(gameday);
        }
    }

    number_fixtures(&mut gamedays);
    gamedays
}
