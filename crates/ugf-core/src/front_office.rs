// Front-office actions: the staff build and the organizational strategy meeting.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::news::push_news;
use crate::save::{
    DraftPhilosophy, ExtensionPriority, FaAggressiveness, NewsItem, SaveData, StaffDecision,
    StaffSlot,
};

pub fn set_staff_plan(mut save: SaveData, slot: StaffSlot, decision: StaffDecision) -> SaveData {
    save.staff_plan.set(slot, decision);
    save
}

/// Lock in the coordinator plan and unlock the strategy meeting.
pub fn finalize_staff_build(save: SaveData) -> SaveData {
    finalize_staff_build_at(save, Utc::now())
}

pub fn finalize_staff_build_at(mut save: SaveData, now: DateTime<Utc>) -> SaveData {
    if save.flags.staff_built {
        debug!("Staff build already finalized");
        return save;
    }

    save.flags.staff_built = true;
    push_news(
        &mut save,
        NewsItem::stamped(
            "staff_build",
            "Staff Build Completed",
            "You finalized OC/DC/STC responsibilities. Strategy Meeting is now unlocked.",
            now,
        )
        .with_cta("Open Hub"),
    );

    info!(
        "Staff build finalized (oc={}, dc={}, stc={})",
        save.staff_plan.oc, save.staff_plan.dc, save.staff_plan.stc
    );
    save
}

pub fn set_draft_philosophy(mut save: SaveData, value: DraftPhilosophy) -> SaveData {
    save.career.draft_philosophy = value;
    save
}

pub fn set_fa_aggressiveness(mut save: SaveData, value: FaAggressiveness) -> SaveData {
    save.career.fa_aggressiveness = value;
    save
}

pub fn set_extension_priority(mut save: SaveData, value: ExtensionPriority) -> SaveData {
    save.career.extension_priority = value;
    save
}

/// Lock in the front-office priorities for the offseason.
pub fn complete_org_meeting(save: SaveData) -> SaveData {
    complete_org_meeting_at(save, Utc::now())
}

/// [`complete_org_meeting`] stamped at `now`.
///
/// A no-op until the staff build is finalized, and once the meeting is done.
pub fn complete_org_meeting_at(mut save: SaveData, now: DateTime<Utc>) -> SaveData {
    if !save.flags.staff_built || save.flags.org_meeting_done {
        debug!("Strategy meeting not available");
        return save;
    }

    save.flags.org_meeting_done = true;
    push_news(
        &mut save,
        NewsItem::stamped(
            "org_meeting",
            "Organizational Strategy Set",
            "Your front office priorities are locked in for the offseason cycle.",
            now,
        )
        .with_cta("Advance Timeline"),
    );

    info!(
        "Strategy set: draft={}, fa={}, extensions={}",
        save.career.draft_philosophy, save.career.fa_aggressiveness, save.career.extension_priority
    );
    save
}
