//! Wire records from the remote query layer and their mapping onto the canonical model.
//!
//! The query layer is inconsistent about key casing (`name` vs `Name`), so records accept both
//! spellings here and nothing past `into_group` ever sees them.

use crate::models::competitor::Competitor;
use crate::models::group::{Group, LegPolicy, TournamentFormat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team row as returned by the query layer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompetitorRecord {
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: Option<Uuid>,
    #[serde(alias = "Name")]
    pub name: String,
}

impl CompetitorRecord {
    pub fn into_competitor(self) -> Competitor {
        match self.id {
            Some(id) => Competitor::with_id(id, self.name.trim()),
            None => Competitor::new(self.name.trim()),
        }
    }
}

/// A group row as returned by the query layer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GroupRecord {
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: Option<Uuid>,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Format")]
    pub format: Option<String>,
    #[serde(default, alias = "Legs")]
    pub legs: Option<String>,
    #[serde(default, alias = "Teams")]
    pub teams: Vec<CompetitorRecord>,
    /// Signed on the wire; negative values are treated as undeclared.
    #[serde(default, alias = "TeamCount")]
    pub team_count: i64,
    #[serde(default, alias = "CompetitionId")]
    pub competition_id: Option<Uuid>,
    #[serde(default, alias = "RoundId")]
    pub round_id: Option<Uuid>,
    #[serde(default, alias = "DrawSeed")]
    pub draw_seed: Option<u64>,
}

impl GroupRecord {
    /// Map the record onto a `Group`. Unknown format or leg strings fall back to the defaults.
    pub fn into_group(self) -> Group {
        let format = self
            .format
            .as_deref()
            .map(parse_format)
            .unwrap_or_default();
        let legs = self.legs.as_deref().map(parse_legs).unwrap_or_default();
        let declared_count = u32::try_from(self.team_count.max(0)).unwrap_or(u32::MAX);
        Group {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name.trim().to_string(),
            format,
            legs,
            competitors: self
                .teams
                .into_iter()
                .map(CompetitorRecord::into_competitor)
                .collect(),
            declared_count,
            competition_id: self.competition_id.unwrap_or_else(Uuid::nil),
            round_id: self.round_id.unwrap_or_else(Uuid::nil),
            draw_seed: self.draw_seed,
        }
    }
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

fn parse_format(value: &str) -> TournamentFormat {
    match normalize(value).as_str() {
        "elimination" | "knockout" | "cup" => TournamentFormat::Elimination,
        "round_robin" | "roundrobin" | "league" => TournamentFormat::RoundRobin,
        other => {
            log::warn!("Unknown group format {:?}, using round robin", other);
            TournamentFormat::RoundRobin
        }
    }
}

fn parse_legs(value: &str) -> LegPolicy {
    match normalize(value).as_str() {
        "two_legs" | "double" | "home_and_away" => LegPolicy::TwoLegs,
        "single_leg_final" | "one_leg_final" => LegPolicy::SingleLegFinal,
        "single_leg" | "one_leg" | "single" => LegPolicy::SingleLeg,
        other => {
            log::warn!("Unknown leg policy {:?}, using single leg", other);
            LegPolicy::SingleLeg
        }
    }
}
