// Draft session: starting the draft and making the user's picks.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::class::ensure_draft_class;
use crate::news::push_news;
use crate::save::{NewsItem, SaveData};

/// Picks the user makes before the draft closes.
pub const DRAFT_ROUNDS: u32 = 7;

/// Open the draft at pick 1, generating the class first if needed.
///
/// Calling this mid-draft restarts the pick count; prospects already taken
/// stay off the board.
pub fn start_draft(save: SaveData) -> SaveData {
    let mut save = ensure_draft_class(save);
    save.draft.started = true;
    save.draft.completed = false;
    save.draft.current_pick = 1;
    debug!("Draft started with {} prospects on the board", save.draft.board.len());
    save
}

/// Select `prospect_id` with the current pick.
pub fn make_pick(save: SaveData, prospect_id: &str) -> SaveData {
    make_pick_at(save, prospect_id, Utc::now())
}

/// [`make_pick`] with the news item stamped at `now`.
///
/// A no-op unless the user has a team, the draft is open, and the prospect is
/// still available.
pub fn make_pick_at(mut save: SaveData, prospect_id: &str, now: DateTime<Utc>) -> SaveData {
    if save.user_team_id.is_none() || !save.draft.started || save.draft.completed {
        debug!("Pick of {prospect_id} rejected: draft not open for the user");
        return save;
    }

    let Some(index) = save.draft.prospects.iter().position(|p| p.id == prospect_id) else {
        debug!("Pick of {prospect_id} rejected: not on the board");
        return save;
    };

    let pick_number = save.draft.current_pick;
    let prospect = save.draft.prospects.remove(index);
    save.draft.board.retain(|id| id != prospect_id);

    push_news(
        &mut save,
        NewsItem::stamped(
            "draft_pick",
            format!("Draft Pick {pick_number}: {}", prospect.name),
            format!(
                "You selected {} {} ({} OVR).",
                prospect.position, prospect.name, prospect.ovr
            ),
            now,
        ),
    );

    let completed = pick_number >= DRAFT_ROUNDS;
    save.draft.current_pick = pick_number.saturating_add(1);
    save.draft.completed = completed;
    save.draft.started = !completed;

    debug!("Pick {pick_number}: {} ({})", prospect.name, prospect.id);
    save
}
