//! Data structures for the league: competitors, groups, fixtures and the league store.

mod competitor;
mod fixture;
mod group;
mod league;
mod record;

pub use competitor::{Competitor, CompetitorId};
pub use fixture::{fixture_id, number_fixtures, Fixture, FixtureId, Gameday, Leg};
pub use group::{CompetitionId, Group, GroupId, LegPolicy, RoundId, TournamentFormat};
pub use league::{FixtureUpsert, League, LeagueError};
pub use record::{CompetitorRecord, GroupRecord};
