//! Round robin: circle-method pairing for one leg.

use crate::models::{number_fixtures, Competitor, CompetitorId, Fixture, Gameday, Group, Leg};

/// Next round's order for the circle method: position 0 stays put, the last competitor moves to
/// the front of the rest. Returns a new vector; `order` is left untouched.
pub fn rotate<T: Clone>(order: &[T]) -> Vec<T> {
    if order.len() <= 2 {
        return order.to_vec();
    }
    let last = order.len() - 1;
    let mut next = Vec::with_capacity(order.len());
    next.push(order[0].clone());
    next.push(order[last].clone());
    next.extend_from_slice(&order[1..last]);
    next
}

/// "Gameday N", zero-padded to two digits when a leg has more than nine gamedays.
pub fn gameday_label(number: u32, gamedays_per_leg: u32) -> String {
    if gamedays_per_leg > 9 {
        format!("Gameday {:02}", number)
    } else {
        format!("Gameday {}", number)
    }
}

/// Gamedays of one round-robin leg over `competitors`, in the given order.
///
/// 1. Odd counts get a bye slot, so the working count is even.
/// 2. Each gameday pairs slot `i` with slot `n - 1 - i`; pairings with the bye are skipped.
/// 3. The first leg puts slot `i` at home, the second leg flips it and continues the numbering.
/// 4. The order is rotated between gamedays.
///
/// Fewer than two competitors yield no gamedays.
pub fn round_robin(group: &Group, competitors: &[Competitor], leg: Leg) -> Vec<Gameday> {
    if competitors.len() <= 1 {
        return Vec::new();
    }

    // None is the bye.
    let mut order: Vec<Option<CompetitorId>> = competitors.iter().map(|c| Some(c.id)).collect();
    if order.len() % 2 == 1 {
        order.push(None);
    }

    let slots = order.len();
    let per_leg = (slots - 1) as u32;
    let offset = match leg {
        Leg::First => 0,
        Leg::Second => per_leg,
    };

    let mut gamedays = Vec::with_capacity(slots - 1);
    for round in 0..per_leg {
        let number = round + 1 + offset;
        let label = gameday_label(number, per_leg);
        let mut gameday = Gameday::new(group.id, label.as_str(), leg);

        for i in 0..slots / 2 {
            let (first, second) = match (order[i], order[slots - 1 - i]) {
                (Some(first), Some(second)) => (first, second),
                _ => continue,
            };
            let (home, away) = match leg {
                Leg::First => (first, second),
                Leg::Second => (second, first),
            };
            let slot = gameday.fixtures.len();
            gameday.fixtures.push(Fixture::new(
                group,
                number,
                slot,
                Some(home),
                Some(away),
                label.as_str(),
            ));
        }

        log::debug!(
            "{}: {} ({}) with {} fixtures",
            group.name,
            label,
            leg.label(),
            gameday.fixtures.len()
        );
        gamedays.push(gameday);
        order = rotate(&order);
    }

    number_fixtures(&mut gamedays);
    gamedays
}
