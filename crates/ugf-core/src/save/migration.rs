// Save migration: upgrades any decoded record to the current schema.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::merge::{lenient, merge_with_default_save, PartialLeague, PartialOnboarding, PartialSave};
use super::schema::*;

/// The unversioned (v1) record shape. Only these fields carried over into
/// the versioned schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySave {
    #[serde(default, deserialize_with = "lenient")]
    pub user_character_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_team_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub coach: Option<CoachProfile>,
    #[serde(default, deserialize_with = "lenient")]
    pub league: Option<PartialLeague>,
    #[serde(default, deserialize_with = "lenient")]
    pub onboarding: Option<PartialOnboarding>,
    #[serde(default, deserialize_with = "lenient")]
    pub staff_meeting_completed: Option<bool>,
}

/// A persisted record, classified by the schema it was written with.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRecord {
    /// Tagged `schemaVersion: 2`; possibly partial or hand-edited.
    Current(PartialSave),
    /// Any other object: the unversioned v1 shape.
    Legacy(LegacySave),
    /// Not an object at all.
    Unreadable,
}

impl SaveRecord {
    pub fn decode(value: &Value) -> Self {
        if !value.is_object() {
            return SaveRecord::Unreadable;
        }

        let tagged_current = value
            .get("schemaVersion")
            .and_then(Value::as_f64)
            .is_some_and(|v| v == f64::from(SCHEMA_VERSION));

        if tagged_current {
            match PartialSave::from_value(value) {
                Some(partial) => SaveRecord::Current(partial),
                None => SaveRecord::Unreadable,
            }
        } else {
            match serde_json::from_value::<LegacySave>(value.clone()) {
                Ok(legacy) => SaveRecord::Legacy(legacy),
                Err(_) => SaveRecord::Unreadable,
            }
        }
    }

    /// Upgrade this record to a complete current-schema save.
    pub fn into_latest(self) -> SaveData {
        match self {
            SaveRecord::Current(partial) => merge_with_default_save(partial),
            SaveRecord::Legacy(legacy) => migrate_legacy_save(legacy),
            SaveRecord::Unreadable => {
                debug!("Save record is not an object; using default save");
                default_save()
            }
        }
    }
}

/// Upgrade an arbitrary decoded value to the current schema. Total: any input
/// yields a valid save.
pub fn migrate_to_latest(value: &Value) -> SaveData {
    SaveRecord::decode(value).into_latest()
}

/// Carry a v1 save's stable fields into the current schema.
///
/// The v1 `staffMeetingCompleted` flag covered what is now two timeline steps,
/// so a completed meeting marks both done and resumes at the Senior Bowl.
pub fn migrate_legacy_save(legacy: LegacySave) -> SaveData {
    let partial = PartialSave {
        user_character_id: Some(legacy.user_character_id),
        user_team_id: Some(legacy.user_team_id),
        coach: Some(legacy.coach),
        league: legacy.league,
        onboarding: legacy.onboarding,
        ..PartialSave::default()
    };
    let mut save = merge_with_default_save(partial);

    if legacy.staff_meeting_completed == Some(true) {
        save.flags.staff_built = true;
        save.flags.org_meeting_done = true;
        save.timeline.current_step = TimelineStep::SeniorBowl;
        save.timeline.history = vec![
            TimelineStep::StaffBuild,
            TimelineStep::OrgStrategyMeeting,
            TimelineStep::SeniorBowl,
        ];
    }

    info!(
        "Migrated legacy save to schema v{} (timeline at {})",
        SCHEMA_VERSION, save.timeline.current_step
    );
    save
}
