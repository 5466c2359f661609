//! League store: groups, draft schedules and saved fixtures.

use crate::logic::generate_schedule;
use crate::models::competitor::CompetitorId;
use crate::models::fixture::{Fixture, FixtureId, Gameday};
use crate::models::group::{Group, GroupId};
use crate::models::record::GroupRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// No group with this id.
    GroupNotFound(GroupId),
    /// Groups need a non-blank name.
    EmptyGroupName,
    /// Fixtures need a non-blank round label.
    EmptyLabel,
    /// Home and away are the same competitor.
    SameCompetitor,
    /// Competitor is not part of the fixture's group.
    UnknownCompetitor(CompetitorId),
    /// Fixture is already saved under another group.
    FixtureGroupMismatch(FixtureId),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            LeagueError::EmptyGroupName => write!(f, "Group name must not be empty"),
            LeagueError::EmptyLabel => write!(f, "Fixture label must not be empty"),
            LeagueError::SameCompetitor => write!(f, "A team cannot play against itself"),
            LeagueError::UnknownCompetitor(id) => write!(f, "Team {} is not in this group", id),
            LeagueError::FixtureGroupMismatch(id) => {
                write!(f, "Fixture {} belongs to another group", id)
            }
        }
    }
}

impl std::error::Error for LeagueError {}

/// Edited fixture as submitted by the operator. Label and kick-off are required; teams may stay
/// unresolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureUpsert {
    pub group_id: GroupId,
    pub gameday: u32,
    #[serde(default)]
    pub number: u32,
    pub label: String,
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub home: Option<CompetitorId>,
    #[serde(default)]
    pub away: Option<CompetitorId>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// In-memory league state.
#[derive(Clone, Debug, Default)]
pub struct League {
    groups: Vec<Group>,
    /// Generated, not yet saved, gamedays per group.
    schedules: HashMap<GroupId, Vec<Gameday>>,
    /// Saved fixtures keyed by fixture id.
    fixtures: HashMap<FixtureId, Fixture>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group from a query-layer record. A record with a known id replaces that group,
    /// discards its draft schedule and drops saved fixtures naming teams it no longer has.
    pub fn add_group(&mut self, record: GroupRecord) -> Result<&Group, LeagueError> {
        let group = record.into_group();
        if group.name.is_empty() {
            return Err(LeagueError::EmptyGroupName);
        }
        let id = group.id;
        self.schedules.remove(&id);
        let before = self.fixtures.len();
        self.fixtures.retain(|_, f| {
            f.group_id != id
                || f.home
                    .iter()
                    .chain(f.away.iter())
                    .all(|c| group.competitor(*c).is_some())
        });
        let dropped = before - self.fixtures.len();
        if dropped > 0 {
            log::info!("Dropped {} saved fixture(s) of group {}", dropped, id);
        }
        let idx = match self.groups.iter().position(|g| g.id == id) {
            Some(idx) => {
                self.groups[idx] = group;
                idx
            }
            None => {
                self.groups.push(group);
                self.groups.len() - 1
            }
        };
        log::info!("Stored group {} ({})", self.groups[idx].name, id);
        Ok(&self.groups[idx])
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, LeagueError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(LeagueError::GroupNotFound(id))
    }

    /// Generate the draft schedule for a group, replacing any previous draft. Saved fixtures
    /// with a matching id keep their edits.
    pub fn generate_schedule(&mut self, group_id: GroupId) -> Result<&[Gameday], LeagueError> {
        let mut gamedays = generate_schedule(self.group(group_id)?);
        for fixture in gamedays.iter_mut().flat_map(|g| g.fixtures.iter_mut()) {
            if let Some(saved) = self.fixtures.get(&fixture.id) {
                apply_saved(fixture, saved);
            }
        }
        let slot = self.schedules.entry(group_id).or_default();
        *slot = gamedays;
        Ok(slot.as_slice())
    }

    /// Current draft schedule of a group (empty if never generated).
    pub fn schedule(&self, group_id: GroupId) -> Result<&[Gameday], LeagueError> {
        self.group(group_id)?;
        Ok(self
            .schedules
            .get(&group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Insert or replace a saved fixture. The matching draft fixture, if any, takes the edits.
    pub fn upsert_fixture(
        &mut self,
        id: FixtureId,
        upsert: FixtureUpsert,
    ) -> Result<&Fixture, LeagueError> {
        let group = self.group(upsert.group_id)?;
        if let Some(existing) = self.fixtures.get(&id) {
            if existing.group_id != upsert.group_id {
                return Err(LeagueError::FixtureGroupMismatch(id));
            }
        }
        let label = upsert.label.trim();
        if label.is_empty() {
            return Err(LeagueError::EmptyLabel);
        }
        if upsert.home.is_some() && upsert.home == upsert.away {
            return Err(LeagueError::SameCompetitor);
        }
        for competitor in upsert.home.iter().chain(upsert.away.iter()) {
            if group.competitor(*competitor).is_none() {
                return Err(LeagueError::UnknownCompetitor(*competitor));
            }
        }
        let fixture = Fixture {
            id,
            group_id: group.id,
            competition_id: group.competition_id,
            round_id: group.round_id,
            gameday: upsert.gameday,
            number: upsert.number,
            home: upsert.home,
            away: upsert.away,
            label: label.to_string(),
            scheduled_at: Some(upsert.scheduled_at),
            venue: upsert
                .venue
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        };
        log::debug!("Saving fixture {} ({})", id, fixture.label);
        if let Some(draft) = self
            .schedules
            .get_mut(&fixture.group_id)
            .and_then(|days| {
                days.iter_mut()
                    .flat_map(|g| g.fixtures.iter_mut())
                    .find(|f| f.id == id)
            })
        {
            apply_saved(draft, &fixture);
        }
        self.fixtures.insert(id, fixture);
        Ok(&self.fixtures[&id])
    }

    /// Saved fixtures of a group, ordered by gameday then kick-off.
    pub fn fixtures_for_group(&self, group_id: GroupId) -> Result<Vec<&Fixture>, LeagueError> {
        self.group(group_id)?;
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.group_id == group_id)
            .collect();
        fixtures.sort_by_key(|f| (f.gameday, f.scheduled_at, f.id));
        Ok(fixtures)
    }
}

/// Copy operator edits onto a draft fixture; gameday and match number stay as generated.
fn apply_saved(draft: &mut Fixture, saved: &Fixture) {
    draft.home = saved.home;
    draft.away = saved.away;
    draft.label = saved.label.clone();
    draft.scheduled_at = saved.scheduled_at;
    draft.venue = saved.venue.clone();
}
