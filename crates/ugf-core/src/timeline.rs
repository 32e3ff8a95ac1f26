// Offseason timeline: the fixed step sequence and its gated advancement.

use tracing::debug;

use crate::save::{LeaguePhase, SaveData, TimelineStep};

/// Every step of a career year, in the only order they can be visited.
pub const OFFSEASON_TIMELINE: [TimelineStep; 11] = [
    TimelineStep::StaffBuild,
    TimelineStep::OrgStrategyMeeting,
    TimelineStep::SeniorBowl,
    TimelineStep::Combine,
    TimelineStep::FaW1,
    TimelineStep::FaW2,
    TimelineStep::PreDraftVisits,
    TimelineStep::DraftDay,
    TimelineStep::TrainingCamp,
    TimelineStep::Preseason,
    TimelineStep::RegSeason,
];

/// Steps whose entry moves the league calendar forward one week.
const WEEK_ADVANCING_STEPS: [TimelineStep; 4] = [
    TimelineStep::FaW1,
    TimelineStep::FaW2,
    TimelineStep::Preseason,
    TimelineStep::RegSeason,
];

impl TimelineStep {
    /// Position of this step in [`OFFSEASON_TIMELINE`].
    pub fn index(&self) -> Option<usize> {
        OFFSEASON_TIMELINE.iter().position(|s| s == self)
    }

    /// The step that follows this one, or `None` at the regular season.
    pub fn next(&self) -> Option<TimelineStep> {
        self.index()
            .and_then(|i| OFFSEASON_TIMELINE.get(i + 1))
            .copied()
    }

    /// Human-readable name for display.
    pub fn label(&self) -> &'static str {
        match self {
            TimelineStep::StaffBuild => "Staff Build",
            TimelineStep::OrgStrategyMeeting => "Organizational Strategy Meeting",
            TimelineStep::SeniorBowl => "Senior Bowl",
            TimelineStep::Combine => "Scouting Combine",
            TimelineStep::FaW1 => "Free Agency Week 1",
            TimelineStep::FaW2 => "Free Agency Week 2",
            TimelineStep::PreDraftVisits => "Pre-Draft Visits",
            TimelineStep::DraftDay => "Draft Day",
            TimelineStep::TrainingCamp => "Training Camp",
            TimelineStep::Preseason => "Preseason",
            TimelineStep::RegSeason => "Regular Season",
        }
    }

    /// Whether this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// Display name of `step`.
pub fn step_label(step: TimelineStep) -> &'static str {
    step.label()
}

/// Whether `step`'s completion gate is satisfied in `save`.
///
/// Only the staff build and the strategy meeting have gates; every other step
/// can always be left.
pub fn can_advance_from_step(save: &SaveData, step: TimelineStep) -> bool {
    match step {
        TimelineStep::StaffBuild => save.flags.staff_built,
        TimelineStep::OrgStrategyMeeting => save.flags.org_meeting_done,
        _ => true,
    }
}

/// Whether [`advance_timeline`] would move `save` to a new step.
pub fn can_advance(save: &SaveData) -> bool {
    let step = save.timeline.current_step;
    can_advance_from_step(save, step) && !step.is_terminal()
}

/// Move the save to the next timeline step.
///
/// Returns the save unchanged when the current step's gate is not met or the
/// timeline is already at the regular season.
pub fn advance_timeline(mut save: SaveData) -> SaveData {
    let current = save.timeline.current_step;
    if !can_advance_from_step(&save, current) {
        debug!("Timeline advance blocked: {} gate not met", current);
        return save;
    }

    let Some(next) = current.next() else {
        debug!("Timeline advance ignored: {} is terminal", current);
        return save;
    };

    if WEEK_ADVANCING_STEPS.contains(&next) {
        save.league.week = save.league.week.saturating_add(1);
    }
    save.league.phase = if next == TimelineStep::RegSeason {
        LeaguePhase::RegularSeason
    } else {
        LeaguePhase::Offseason
    };

    save.timeline.current_step = next;
    if !save.timeline.history.contains(&next) {
        save.timeline.history.push(next);
    }

    debug!("Timeline advanced {} -> {}", current, next);
    save
}
