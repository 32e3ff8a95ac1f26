// Persisted save model: schema, default merging, and legacy migration.

pub mod merge;
pub mod migration;
pub mod schema;

pub use merge::{
    merge_with_default_save, PartialCareer, PartialDraft, PartialFlags, PartialLeague,
    PartialOnboarding, PartialSave, PartialStaffPlan, PartialTimeline,
};
pub use migration::{migrate_legacy_save, migrate_to_latest, LegacySave, SaveRecord};
pub use schema::*;
