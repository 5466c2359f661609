//! Schedule assembly: dispatch a group to the pairing or bracket engine.

use crate::logic::bracket::elimination;
use crate::logic::draw::draw_order;
use crate::logic::pairing::round_robin;
use crate::models::{number_fixtures, Competitor, Gameday, Group, Leg, TournamentFormat};

/// All gamedays for `group`, in generation order, with ids `<group id>-1..n` and fixtures
/// numbered across the whole schedule.
///
/// Round robins get a second, flipped leg when the leg policy asks for it. Brackets use the
/// group's bracket size and leg policy. Malformed groups (no competitors, zero count) give an
/// empty schedule rather than an error.
pub fn generate_schedule(group: &Group) -> Vec<Gameday> {
    let mut gamedays = match group.format {
        TournamentFormat::RoundRobin => {
            let drawn: Vec<Competitor>;
            let competitors = match group.draw_seed {
                Some(seed) => {
                    drawn = draw_order(&group.competitors, seed);
                    drawn.as_slice()
                }
                None => group.competitors.as_slice(),
            };
            let mut gamedays = round_robin(group, competitors, Leg::First);
            if group.legs.round_robin_legs() == 2 {
                gamedays.extend(round_robin(group, competitors, Leg::Second));
            }
            gamedays
        }
        TournamentFormat::Elimination => elimination(group, group.bracket_size(), group.legs),
    };

    for (seq, gameday) in gamedays.iter_mut().enumerate() {
        gameday.id = format!("{}-{}", group.id, seq + 1);
    }
    number_fixtures(&mut gamedays);

    log::info!(
        "Generated {} gamedays ({} fixtures) for group {}",
        gamedays.len(),
        gamedays.iter().map(|g| g.fixtures.len()).sum::<usize>(),
        group.name
    );
    gamedays
}
