//! Fixture, Gameday and Leg.

use crate::models::competitor::CompetitorId;
use crate::models::group::{CompetitionId, Group, GroupId, RoundId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Which meeting of a pairing a gameday belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    #[default]
    First,
    Second,
}

impl Leg {
    pub fn label(self) -> &'static str {
        match self {
            Leg::First => "First leg",
            Leg::Second => "Second leg",
        }
    }

    /// Leg for a 0-based leg index within a round.
    pub fn from_index(index: u32) -> Self {
        if index == 0 {
            Leg::First
        } else {
            Leg::Second
        }
    }
}

/// One scheduled pairing. Elimination fixtures start with both sides unresolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub group_id: GroupId,
    pub competition_id: CompetitionId,
    pub round_id: RoundId,
    /// Global gameday number within the group, starting at 1.
    pub gameday: u32,
    /// Match number within the generated schedule, starting at 1.
    pub number: u32,
    pub home: Option<CompetitorId>,
    pub away: Option<CompetitorId>,
    pub label: String,
    /// Filled in by the operator before saving.
    pub scheduled_at: Option<NaiveDateTime>,
    pub venue: Option<String>,
}

impl Fixture {
    /// Unscheduled fixture for `group`. The id is derived from group, gameday and slot so that
    /// regenerating a schedule yields the same ids.
    pub fn new(
        group: &Group,
        gameday: u32,
        slot: usize,
        home: Option<CompetitorId>,
        away: Option<CompetitorId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: fixture_id(group.id, gameday, slot),
            group_id: group.id,
            competition_id: group.competition_id,
            round_id: group.round_id,
            gameday,
            number: 0,
            home,
            away,
            label: label.into(),
            scheduled_at: None,
            venue: None,
        }
    }

    /// True if `competitor` plays in this fixture.
    pub fn involves(&self, competitor: CompetitorId) -> bool {
        self.home == Some(competitor) || self.away == Some(competitor)
    }
}

/// Name-based fixture id: stable for the same group, gameday and slot.
pub fn fixture_id(group_id: GroupId, gameday: u32, slot: usize) -> FixtureId {
    let name = format!("{gameday}/{slot}");
    Uuid::new_v5(&group_id, name.as_bytes())
}

/// Number every fixture 1..n in gameday order.
pub fn number_fixtures(gamedays: &mut [Gameday]) {
    let fixtures = gamedays.iter_mut().flat_map(|g| g.fixtures.iter_mut());
    for (number, fixture) in (1..).zip(fixtures) {
        fixture.number = number;
    }
}

/// A labeled date slot holding the fixtures played together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Gameday {
    /// `<group id>-<sequence>`, assigned by the schedule assembler.
    pub id: String,
    pub group_id: GroupId,
    pub label: String,
    /// Unset until the operator picks a date.
    pub date: Option<NaiveDate>,
    pub leg: Leg,
    pub fixtures: Vec<Fixture>,
}

impl Gameday {
    pub fn new(group_id: GroupId, label: impl Into<String>, leg: Leg) -> Self {
        Self {
            id: String::new(),
            group_id,
            label: label.into(),
            date: None,
            leg,
            fixtures: Vec::new(),
        }
    }
}
