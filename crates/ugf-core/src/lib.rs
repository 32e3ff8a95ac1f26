// Library root: the career save model and every engine that transforms it.
//
// Engine functions take a `SaveData` by value and hand back the next one;
// only `gateway` and `store` touch storage.

pub mod draft;
pub mod front_office;
pub mod gateway;
pub mod hub;
pub mod league;
pub mod news;
pub mod onboarding;
pub mod save;
pub mod session;
pub mod store;
pub mod timeline;

pub use save::{default_save, merge_with_default_save, migrate_to_latest, PartialSave, SaveData};
pub use session::{SaveSession, SaveUpdate};
