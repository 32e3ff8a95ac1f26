// Draft engine: seeded class generation and the user's pick sequence.
//
// State moves one way: no class -> class generated -> started -> completed.
// `start_draft` may be called again at any point and restarts the pick count.

pub mod class;
pub mod pick;

pub use class::{ensure_draft_class, generate_class, rank_board, seeded_value, CLASS_SIZE};
pub use pick::{make_pick, make_pick_at, start_draft, DRAFT_ROUNDS};
