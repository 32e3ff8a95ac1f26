// Save session: the in-memory career state and its single mutation entry point.

use std::fmt;

use tracing::{debug, info};

use crate::gateway::SaveGateway;
use crate::save::{default_save, PartialSave, SaveData};
use crate::store::SaveStore;

/// A requested change to the current save.
pub enum SaveUpdate {
    /// Present fields are laid over the current state; nested aggregates merge
    /// key by key.
    Patch(PartialSave),
    /// A transform from the current state to the next one.
    Apply(Box<dyn FnOnce(SaveData) -> SaveData>),
}

impl SaveUpdate {
    pub fn apply(f: impl FnOnce(SaveData) -> SaveData + 'static) -> Self {
        SaveUpdate::Apply(Box::new(f))
    }
}

impl From<PartialSave> for SaveUpdate {
    fn from(partial: PartialSave) -> Self {
        SaveUpdate::Patch(partial)
    }
}

impl fmt::Debug for SaveUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveUpdate::Patch(partial) => f.debug_tuple("Patch").field(partial).finish(),
            SaveUpdate::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// Owns the live save for one play session.
///
/// Every mutation goes through [`SaveSession::set_save`]: the result is
/// normalized, becomes the current state, and is written through the gateway.
/// A failed write leaves the in-memory state in place.
pub struct SaveSession<S: SaveStore> {
    save: SaveData,
    gateway: SaveGateway<S>,
}

impl<S: SaveStore> SaveSession<S> {
    /// Start a session from whatever `store` holds, or a fresh career.
    pub fn open(store: S) -> Self {
        let gateway = SaveGateway::new(store);
        let save = match gateway.load_save() {
            Some(save) => {
                info!(
                    "Resumed career at {} (season {}, week {})",
                    save.timeline.current_step, save.league.season, save.league.week
                );
                save
            }
            None => {
                info!("Starting a new career");
                default_save()
            }
        };
        Self { save, gateway }
    }

    /// The current state.
    pub fn save(&self) -> &SaveData {
        &self.save
    }

    pub fn gateway(&self) -> &SaveGateway<S> {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    pub fn into_save(self) -> SaveData {
        self.save
    }

    pub fn set_save(&mut self, update: SaveUpdate) -> &SaveData {
        let prev = std::mem::take(&mut self.save);
        let next = match update {
            SaveUpdate::Patch(partial) => partial.overlay(prev),
            SaveUpdate::Apply(f) => f(prev),
        };
        self.save = next.normalized();
        self.gateway.write_save(&self.save);
        debug!("Save updated at {}", self.save.timeline.current_step);
        &self.save
    }

    pub fn patch(&mut self, partial: PartialSave) -> &SaveData {
        self.set_save(SaveUpdate::Patch(partial))
    }

    pub fn apply(&mut self, f: impl FnOnce(SaveData) -> SaveData + 'static) -> &SaveData {
        self.set_save(SaveUpdate::apply(f))
    }

    /// Forget the persisted career and start over from the default save.
    pub fn clear_save(&mut self) -> &SaveData {
        self.gateway.clear_save();
        self.save = default_save();
        &self.save
    }

    /// Read the persisted save without touching the current state.
    pub fn load_save(&self) -> Option<SaveData> {
        self.gateway.load_save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{SAVE_KEY_V1, SAVE_KEY_V2};
    use crate::save::{PartialFlags, TimelineStep};
    use crate::store::{MemoryStore, StoreError};
    use crate::timeline::advance_timeline;

    struct ReadOnlyStore;

    impl SaveStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    fn flags_patch(staff_built: bool) -> PartialSave {
        PartialSave {
            flags: Some(PartialFlags {
                staff_built: Some(staff_built),
                ..PartialFlags::default()
            }),
            ..PartialSave::default()
        }
    }

    #[test]
    fn open_on_empty_store_starts_from_default() {
        let session = SaveSession::open(MemoryStore::new());
        assert_eq!(session.save(), &default_save());
        assert!(session.store().is_empty());
    }

    #[test]
    fn open_resumes_persisted_save() {
        let store = MemoryStore::new();
        store
            .set(SAVE_KEY_V2, r#"{"schemaVersion":2,"userTeamId":"ATLANTA_APEX"}"#)
            .unwrap();
        let session = SaveSession::open(store);
        assert_eq!(session.save().user_team_id.as_deref(), Some("ATLANTA_APEX"));
    }

    #[test]
    fn patch_keeps_unmentioned_fields() {
        let mut session = SaveSession::open(MemoryStore::new());
        session.apply(|mut s| {
            s.user_team_id = Some("ATLANTA_APEX".into());
            s.flags.org_meeting_done = true;
            s
        });
        session.patch(flags_patch(true));

        let save = session.save();
        assert!(save.flags.staff_built);
        assert!(save.flags.org_meeting_done);
        assert_eq!(save.user_team_id.as_deref(), Some("ATLANTA_APEX"));
    }

    #[test]
    fn every_update_is_persisted() {
        let mut session = SaveSession::open(MemoryStore::new());
        session.patch(flags_patch(true));
        session.apply(advance_timeline);

        let persisted = session.load_save().unwrap();
        assert_eq!(&persisted, session.save());
        assert_eq!(persisted.timeline.current_step, TimelineStep::OrgStrategyMeeting);
    }

    #[test]
    fn functional_updates_observe_latest_state() {
        let mut session = SaveSession::open(MemoryStore::new());
        for _ in 0..3 {
            session.apply(|mut s| {
                s.career.reputation += 1;
                s
            });
        }
        assert_eq!(session.save().career.reputation, default_save().career.reputation + 3);
    }

    #[test]
    fn apply_result_is_normalized() {
        let mut session = SaveSession::open(MemoryStore::new());
        session.apply(|mut s| {
            s.schema_version = 1;
            s.onboarding.interviews_completed = vec!["ATLANTA_APEX".into(), "ATLANTA_APEX".into()];
            s.timeline.history.clear();
            s
        });
        let save = session.save();
        assert_eq!(save.schema_version, 2);
        assert_eq!(save.onboarding.interviews_completed, vec!["ATLANTA_APEX"]);
        assert_eq!(save.timeline.history, vec![TimelineStep::StaffBuild]);
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let mut session = SaveSession::open(ReadOnlyStore);
        session.patch(flags_patch(true));
        assert!(session.save().flags.staff_built);
        assert!(session.load_save().is_none());
    }

    #[test]
    fn clear_resets_state_and_store() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY_V1, r#"{"userTeamId":"ATLANTA_APEX"}"#).unwrap();
        let mut session = SaveSession::open(store);
        assert_eq!(session.save().user_team_id.as_deref(), Some("ATLANTA_APEX"));

        session.clear_save();
        assert_eq!(session.save(), &default_save());
        assert!(session.store().is_empty());
    }

    #[test]
    fn load_save_does_not_replace_current_state() {
        let mut session = SaveSession::open(MemoryStore::new());
        session.patch(flags_patch(true));
        session.store().remove(SAVE_KEY_V2).unwrap();

        assert!(session.load_save().is_none());
        assert!(session.save().flags.staff_built);
    }
}
