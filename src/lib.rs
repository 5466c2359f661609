//! Football league fixtures: library with models, schedule generation and the league store.

pub mod access;
pub mod config;
pub mod logic;
pub mod models;

pub use access::{bearer_token, Authorizer, Permission, TokenAuthorizer};
pub use config::ServerConfig;
pub use logic::{
    draw_order, elimination, gameday_label, generate_schedule, rotate, round_name, round_robin,
    total_rounds, write_schedule_csv,
};
pub use models::{
    fixture_id, number_fixtures, CompetitionId, Competitor, CompetitorId, CompetitorRecord,
    Fixture, FixtureId, FixtureUpsert, Gameday, Group, GroupId, GroupRecord, League, LeagueError,
    Leg, LegPolicy, RoundId, TournamentFormat,
};
