//! Group, TournamentFormat and LegPolicy.

use crate::models::competitor::{Competitor, CompetitorId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;
/// Competition the group belongs to.
pub type CompetitionId = Uuid;
/// Competition round the group belongs to.
pub type RoundId = Uuid;

/// How the fixtures of a group are played out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Everyone plays everyone (circle method).
    #[default]
    RoundRobin,
    /// Single-elimination bracket.
    Elimination,
}

/// How many legs each pairing is played over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegPolicy {
    /// One leg throughout.
    #[default]
    SingleLeg,
    /// Two legs throughout.
    TwoLegs,
    /// Two legs in every round except a single-leg final.
    SingleLegFinal,
}

impl LegPolicy {
    /// Legs played in the bracket round `round_index` (0 = final).
    pub fn legs_for_round(self, round_index: u32) -> u32 {
        match self {
            LegPolicy::SingleLeg => 1,
            LegPolicy::TwoLegs => 2,
            LegPolicy::SingleLegFinal if round_index == 0 => 1,
            LegPolicy::SingleLegFinal => 2,
        }
    }

    /// Whether gameday labels of bracket round `round_index` carry a "First leg"/"Second leg" suffix.
    pub fn leg_suffix_for_round(self, round_index: u32) -> bool {
        match self {
            LegPolicy::SingleLeg => false,
            LegPolicy::TwoLegs => true,
            LegPolicy::SingleLegFinal => round_index != 0,
        }
    }

    /// Legs of a round robin. A round robin has no final, so single-leg-final plays two legs.
    pub fn round_robin_legs(self) -> u32 {
        match self {
            LegPolicy::SingleLeg => 1,
            LegPolicy::TwoLegs | LegPolicy::SingleLegFinal => 2,
        }
    }
}

/// A competition subdivision whose fixtures are generated together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub format: TournamentFormat,
    pub legs: LegPolicy,
    /// Ordered competitor list; the order drives the circle method.
    pub competitors: Vec<Competitor>,
    /// Declared competitor count (brackets may be declared before teams are known).
    pub declared_count: u32,
    pub competition_id: CompetitionId,
    pub round_id: RoundId,
    /// When set, competitors are shuffled with this seed before pairing.
    #[serde(default)]
    pub draw_seed: Option<u64>,
}

impl Group {
    pub fn new(name: impl Into<String>, format: TournamentFormat, legs: LegPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            legs,
            competitors: Vec::new(),
            declared_count: 0,
            competition_id: Uuid::nil(),
            round_id: Uuid::nil(),
            draw_seed: None,
        }
    }

    /// Builder-style helper: set competitors and the declared count to match.
    pub fn with_competitors(mut self, competitors: Vec<Competitor>) -> Self {
        self.declared_count = competitors.len() as u32;
        self.competitors = competitors;
        self
    }

    /// Number of bracket slots: the declared count, or the competitor list length when undeclared.
    pub fn bracket_size(&self) -> u32 {
        if self.declared_count > 0 {
            self.declared_count
        } else {
            self.competitors.len() as u32
        }
    }

    pub fn competitor(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }
}
