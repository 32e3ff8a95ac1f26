// Canonical save shape (schema version 2) and its zero-state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current persisted schema version. Every save leaving a merge carries it.
pub const SCHEMA_VERSION: u32 = 2;

/// Season a fresh career starts in.
pub const DEFAULT_SEASON: u32 = 2026;

// ---------------------------------------------------------------------------
// Categorical values
// ---------------------------------------------------------------------------

/// A textual value did not name any variant of a categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a fieldless enum whose wire form is a fixed string per variant.
///
/// The same table drives `as_str`, `Display`, `FromStr`, and serde, so the
/// persisted spelling cannot drift from the parsed one.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The persisted spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(ParseChoiceError {
                        kind: $kind,
                        value: other.to_string(),
                        expected: [$($wire),+].join(", "),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Where the league calendar currently sits.
    LeaguePhase as "league phase" {
        Offseason => "offseason",
        RegularSeason => "regular_season",
    }
}

wire_enum! {
    /// One discrete phase of the offseason/season calendar, declared in
    /// timeline order.
    TimelineStep as "timeline step" {
        StaffBuild => "STAFF_BUILD",
        OrgStrategyMeeting => "ORG_STRATEGY_MEETING",
        SeniorBowl => "SENIOR_BOWL",
        Combine => "COMBINE",
        FaW1 => "FA_W1",
        FaW2 => "FA_W2",
        PreDraftVisits => "PRE_DRAFT_VISITS",
        DraftDay => "DRAFT_DAY",
        TrainingCamp => "TRAINING_CAMP",
        Preseason => "PRESEASON",
        RegSeason => "REG_SEASON",
    }
}

wire_enum! {
    DraftPhilosophy as "draft philosophy" {
        Balanced => "balanced",
        BestPlayerAvailable => "best_player_available",
        Trenches => "trenches",
        Playmakers => "playmakers",
    }
}

wire_enum! {
    FaAggressiveness as "free-agency aggressiveness" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

wire_enum! {
    ExtensionPriority as "extension priority" {
        Stars => "stars",
        Depth => "depth",
        Youth => "youth",
    }
}

wire_enum! {
    /// Whether a coordinator seat is filled by a hire or left to the head coach.
    StaffDecision as "staff decision" {
        Hire => "hire",
        Delegate => "delegate",
    }
}

wire_enum! {
    /// Coordinator seats decided during the staff build.
    StaffSlot as "staff slot" {
        Oc => "oc",
        Dc => "dc",
        Stc => "stc",
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// The user's head-coach character, created once during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachProfile {
    pub name: String,
    pub age: u32,
    pub hometown: String,
    pub personality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueState {
    pub season: u32,
    /// Non-decreasing within a season.
    pub week: u32,
    pub phase: LeaguePhase,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    /// Team ids interviewed so far. Grows, never shrinks; no duplicates.
    pub interviews_completed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub current_step: TimelineStep,
    pub started_at: DateTime<Utc>,
    /// Steps entered so far, each at most once.
    pub history: Vec<TimelineStep>,
}

/// Completion flags gating timeline advancement. Once set, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    pub staff_built: bool,
    pub org_meeting_done: bool,
}

/// A timestamped user-facing event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub headline: String,
    pub description: String,
    pub timestamp: String,
    /// Call-to-action label, if the item links somewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

/// Front-office standing and the choices made in the strategy meeting.
///
/// The four numeric stats are meant to live in 0..=100 but nothing clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub reputation: i32,
    pub owner_trust: i32,
    pub scouting_efficiency: i32,
    pub negotiation_edge: i32,
    pub draft_philosophy: DraftPhilosophy,
    pub fa_aggressiveness: FaAggressiveness,
    pub extension_priority: ExtensionPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPlan {
    pub oc: StaffDecision,
    pub dc: StaffDecision,
    pub stc: StaffDecision,
}

impl StaffPlan {
    pub fn get(&self, slot: StaffSlot) -> StaffDecision {
        match slot {
            StaffSlot::Oc => self.oc,
            StaffSlot::Dc => self.dc,
            StaffSlot::Stc => self.stc,
        }
    }

    pub fn set(&mut self, slot: StaffSlot, decision: StaffDecision) {
        match slot {
            StaffSlot::Oc => self.oc = decision,
            StaffSlot::Dc => self.dc = decision,
            StaffSlot::Stc => self.stc = decision,
        }
    }
}

/// A generated draft-eligible player. Never edited after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProspect {
    pub id: String,
    pub name: String,
    pub position: String,
    pub archetype: String,
    pub age: u32,
    pub ovr: u32,
}

/// Draft progress for the current season.
///
/// `board` holds exactly the ids in `prospects`, ranked; both shrink together
/// as picks are made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub class_generated: bool,
    pub started: bool,
    pub completed: bool,
    pub current_pick: u32,
    pub prospects: Vec<DraftProspect>,
    pub board: Vec<String>,
}

impl DraftState {
    /// Look up an undrafted prospect by id.
    pub fn prospect(&self, id: &str) -> Option<&DraftProspect> {
        self.prospects.iter().find(|p| p.id == id)
    }

    /// Number of picks the user has made since the draft was last started.
    pub fn picks_made(&self) -> u32 {
        self.current_pick.saturating_sub(1)
    }
}

/// The root aggregate: one career's complete persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub schema_version: u32,
    pub user_character_id: Option<String>,
    pub user_team_id: Option<String>,
    pub coach: Option<CoachProfile>,
    pub league: LeagueState,
    pub onboarding: Onboarding,
    pub timeline: Timeline,
    pub flags: Flags,
    /// Newest first.
    pub news: Vec<NewsItem>,
    pub inbox: Vec<NewsItem>,
    pub career: Career,
    pub staff_plan: StaffPlan,
    pub draft: DraftState,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// 2026-01-05T09:00:00Z, the moment every new career's calendar opens.
pub fn default_started_at() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl Default for LeagueState {
    fn default() -> Self {
        LeagueState {
            season: DEFAULT_SEASON,
            week: 1,
            phase: LeaguePhase::Offseason,
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline {
            current_step: TimelineStep::StaffBuild,
            started_at: default_started_at(),
            history: vec![TimelineStep::StaffBuild],
        }
    }
}

impl Default for Career {
    fn default() -> Self {
        Career {
            reputation: 50,
            owner_trust: 50,
            scouting_efficiency: 50,
            negotiation_edge: 50,
            draft_philosophy: DraftPhilosophy::Balanced,
            fa_aggressiveness: FaAggressiveness::Medium,
            extension_priority: ExtensionPriority::Stars,
        }
    }
}

impl Default for StaffPlan {
    fn default() -> Self {
        StaffPlan {
            oc: StaffDecision::Delegate,
            dc: StaffDecision::Delegate,
            stc: StaffDecision::Delegate,
        }
    }
}

impl Default for DraftState {
    fn default() -> Self {
        DraftState {
            class_generated: false,
            started: false,
            completed: false,
            current_pick: 1,
            prospects: Vec::new(),
            board: Vec::new(),
        }
    }
}

impl Default for SaveData {
    fn default() -> Self {
        SaveData {
            schema_version: SCHEMA_VERSION,
            user_character_id: None,
            user_team_id: None,
            coach: None,
            league: LeagueState::default(),
            onboarding: Onboarding::default(),
            timeline: Timeline::default(),
            flags: Flags::default(),
            news: Vec::new(),
            inbox: Vec::new(),
            career: Career::default(),
            staff_plan: StaffPlan::default(),
            draft: DraftState::default(),
        }
    }
}

/// The zero-state save: what a brand-new career looks like, and the base
/// every partial save is merged onto.
pub fn default_save() -> SaveData {
    SaveData::default()
}

impl SaveData {
    /// Re-establish the invariants every merge guarantees: current schema
    /// version, duplicate-free interview list, and a duplicate-free history
    /// that contains the current step.
    pub fn normalized(mut self) -> Self {
        self.schema_version = SCHEMA_VERSION;
        dedup_in_order(&mut self.onboarding.interviews_completed);
        dedup_in_order(&mut self.timeline.history);
        if !self.timeline.history.contains(&self.timeline.current_step) {
            self.timeline.history.push(self.timeline.current_step);
        }
        self
    }
}

/// Drop repeated elements, keeping the first occurrence of each.
fn dedup_in_order<T: PartialEq + Clone>(items: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
