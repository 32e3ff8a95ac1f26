// Default merging: turns partial or malformed save data into a complete save.
//
// Every field of a partial decodes leniently. A value of the wrong shape is
// treated as absent instead of failing the whole record, so a single bad
// field in a hand-edited save never costs the rest of the career.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::schema::*;

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

/// Decode a present field, treating a wrong-shaped value as absent.
pub(super) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

/// Decode a nullable field. Absent stays `None`, an explicit `null` becomes
/// `Some(None)`, and a wrong-shaped value is treated as absent.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(Some(None));
    }
    Ok(serde_json::from_value(raw).ok().map(Some))
}

/// Decode a sequence field: taken when array-shaped, with malformed elements
/// dropped; any other shape is treated as absent.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Partial aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLeague {
    #[serde(default, deserialize_with = "lenient")]
    pub season: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub week: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub phase: Option<LeaguePhase>,
}

impl PartialLeague {
    pub fn overlay(self, base: LeagueState) -> LeagueState {
        LeagueState {
            season: self.season.unwrap_or(base.season),
            week: self.week.unwrap_or(base.week),
            phase: self.phase.unwrap_or(base.phase),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOnboarding {
    #[serde(default, deserialize_with = "lenient_items")]
    pub interviews_completed: Option<Vec<String>>,
}

impl PartialOnboarding {
    pub fn overlay(self, base: Onboarding) -> Onboarding {
        Onboarding {
            interviews_completed: self
                .interviews_completed
                .unwrap_or(base.interviews_completed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTimeline {
    #[serde(default, deserialize_with = "lenient")]
    pub current_step: Option<TimelineStep>,
    #[serde(default, deserialize_with = "lenient")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub history: Option<Vec<TimelineStep>>,
}

impl PartialTimeline {
    pub fn overlay(self, base: Timeline) -> Timeline {
        Timeline {
            current_step: self.current_step.unwrap_or(base.current_step),
            started_at: self.started_at.unwrap_or(base.started_at),
            history: self.history.unwrap_or(base.history),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFlags {
    #[serde(default, deserialize_with = "lenient")]
    pub staff_built: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub org_meeting_done: Option<bool>,
}

impl PartialFlags {
    pub fn overlay(self, base: Flags) -> Flags {
        Flags {
            staff_built: self.staff_built.unwrap_or(base.staff_built),
            org_meeting_done: self.org_meeting_done.unwrap_or(base.org_meeting_done),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCareer {
    #[serde(default, deserialize_with = "lenient")]
    pub reputation: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner_trust: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub scouting_efficiency: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub negotiation_edge: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub draft_philosophy: Option<DraftPhilosophy>,
    #[serde(default, deserialize_with = "lenient")]
    pub fa_aggressiveness: Option<FaAggressiveness>,
    #[serde(default, deserialize_with = "lenient")]
    pub extension_priority: Option<ExtensionPriority>,
}

impl PartialCareer {
    pub fn overlay(self, base: Career) -> Career {
        Career {
            reputation: self.reputation.unwrap_or(base.reputation),
            owner_trust: self.owner_trust.unwrap_or(base.owner_trust),
            scouting_efficiency: self.scouting_efficiency.unwrap_or(base.scouting_efficiency),
            negotiation_edge: self.negotiation_edge.unwrap_or(base.negotiation_edge),
            draft_philosophy: self.draft_philosophy.unwrap_or(base.draft_philosophy),
            fa_aggressiveness: self.fa_aggressiveness.unwrap_or(base.fa_aggressiveness),
            extension_priority: self.extension_priority.unwrap_or(base.extension_priority),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialStaffPlan {
    #[serde(default, deserialize_with = "lenient")]
    pub oc: Option<StaffDecision>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc: Option<StaffDecision>,
    #[serde(default, deserialize_with = "lenient")]
    pub stc: Option<StaffDecision>,
}

impl PartialStaffPlan {
    pub fn overlay(self, base: StaffPlan) -> StaffPlan {
        StaffPlan {
            oc: self.oc.unwrap_or(base.oc),
            dc: self.dc.unwrap_or(base.dc),
            stc: self.stc.unwrap_or(base.stc),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialDraft {
    #[serde(default, deserialize_with = "lenient")]
    pub class_generated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub started: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_pick: Option<u32>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub prospects: Option<Vec<DraftProspect>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub board: Option<Vec<String>>,
}

impl PartialDraft {
    pub fn overlay(self, base: DraftState) -> DraftState {
        DraftState {
            class_generated: self.class_generated.unwrap_or(base.class_generated),
            started: self.started.unwrap_or(base.started),
            completed: self.completed.unwrap_or(base.completed),
            current_pick: self.current_pick.unwrap_or(base.current_pick),
            prospects: self.prospects.unwrap_or(base.prospects),
            board: self.board.unwrap_or(base.board),
        }
    }
}

// ---------------------------------------------------------------------------
// PartialSave
// ---------------------------------------------------------------------------

/// A save with any subset of its fields present.
///
/// Used both to decode persisted records of uncertain shape and as the patch
/// form accepted by the mutation API. `schemaVersion` is never read from
/// input; merging always stamps the current version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSave {
    #[serde(default, deserialize_with = "nullable")]
    pub user_character_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub user_team_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub coach: Option<Option<CoachProfile>>,
    #[serde(default, deserialize_with = "lenient")]
    pub league: Option<PartialLeague>,
    #[serde(default, deserialize_with = "lenient")]
    pub onboarding: Option<PartialOnboarding>,
    #[serde(default, deserialize_with = "lenient")]
    pub timeline: Option<PartialTimeline>,
    #[serde(default, deserialize_with = "lenient")]
    pub flags: Option<PartialFlags>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub news: Option<Vec<NewsItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub inbox: Option<Vec<NewsItem>>,
    #[serde(default, deserialize_with = "lenient")]
    pub career: Option<PartialCareer>,
    #[serde(default, deserialize_with = "lenient")]
    pub staff_plan: Option<PartialStaffPlan>,
    #[serde(default, deserialize_with = "lenient")]
    pub draft: Option<PartialDraft>,
}

impl PartialSave {
    /// Decode a partial from an arbitrary JSON value. Returns `None` only when
    /// the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Lay the present fields over `base`. Top-level fields replace; nested
    /// aggregates merge key by key, so a partial nested object keeps its
    /// siblings from `base`.
    pub fn overlay(self, base: SaveData) -> SaveData {
        SaveData {
            schema_version: SCHEMA_VERSION,
            user_character_id: self.user_character_id.unwrap_or(base.user_character_id),
            user_team_id: self.user_team_id.unwrap_or(base.user_team_id),
            coach: self.coach.unwrap_or(base.coach),
            league: overlay_nested(self.league, base.league, PartialLeague::overlay),
            onboarding: overlay_nested(self.onboarding, base.onboarding, PartialOnboarding::overlay),
            timeline: overlay_nested(self.timeline, base.timeline, PartialTimeline::overlay),
            flags: overlay_nested(self.flags, base.flags, PartialFlags::overlay),
            news: self.news.unwrap_or(base.news),
            inbox: self.inbox.unwrap_or(base.inbox),
            career: overlay_nested(self.career, base.career, PartialCareer::overlay),
            staff_plan: overlay_nested(self.staff_plan, base.staff_plan, PartialStaffPlan::overlay),
            draft: overlay_nested(self.draft, base.draft, PartialDraft::overlay),
        }
    }
}

fn overlay_nested<P, T>(partial: Option<P>, base: T, merge: fn(P, T) -> T) -> T {
    match partial {
        Some(partial) => merge(partial, base),
        None => base,
    }
}

/// Fill every field missing from `partial` with the default save's value and
/// return a schema-valid save. Idempotent.
pub fn merge_with_default_save(partial: PartialSave) -> SaveData {
    partial.overlay(default_save()).normalized()
}
