// Home-screen projection of the save plus league reference data.

use serde::Serialize;

use crate::league::LeagueDb;
use crate::save::{LeaguePhase, NewsItem, SaveData, TimelineStep};
use crate::timeline::can_advance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    pub label: &'static str,
    pub route: &'static str,
}

const fn cta(label: &'static str, route: &'static str) -> Cta {
    Cta { label, route }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub name: String,
    pub abbrev: String,
    pub avg_ovr: u32,
    pub roster_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubViewModel {
    pub phase_label: String,
    pub step_label: &'static str,
    pub can_advance: bool,
    pub primary_cta: Cta,
    pub secondary_ctas: Vec<Cta>,
    pub team_summary: Option<TeamSummary>,
    pub news: Vec<NewsItem>,
}

fn phase_label(save: &SaveData) -> String {
    match save.league.phase {
        LeaguePhase::RegularSeason => "Regular Season".to_string(),
        LeaguePhase::Offseason => format!("Offseason {}", save.league.season),
    }
}

fn primary_cta(step: TimelineStep) -> Cta {
    match step {
        TimelineStep::StaffBuild => cta("Build Your Staff", "/staff"),
        TimelineStep::OrgStrategyMeeting => cta("Run Strategy Meeting", "/staff-meeting"),
        TimelineStep::DraftDay => cta("Open Draft War Room", "/draft"),
        _ => cta("Manage Team", "/roster"),
    }
}

fn team_summary(team_id: &str, league: &LeagueDb) -> TeamSummary {
    let roster = league.roster(team_id);
    let avg_ovr = if roster.is_empty() {
        0
    } else {
        let total: u32 = roster.iter().map(|p| p.ovr).sum();
        (f64::from(total) / roster.len() as f64).round() as u32
    };

    TeamSummary {
        name: league.team_display_name(team_id),
        abbrev: league.team_abbrev(team_id).to_string(),
        avg_ovr,
        roster_size: roster.len(),
    }
}

/// Everything the home screen shows, derived without side effects.
pub fn select_hub_view_model(save: &SaveData, league: &LeagueDb) -> HubViewModel {
    let step = save.timeline.current_step;
    HubViewModel {
        phase_label: phase_label(save),
        step_label: step.label(),
        can_advance: can_advance(save),
        primary_cta: primary_cta(step),
        secondary_ctas: vec![
            cta("Roster", "/roster"),
            cta("Staff", "/staff"),
            cta("Draft", "/draft"),
        ],
        team_summary: save
            .user_team_id
            .as_deref()
            .map(|team_id| team_summary(team_id, league)),
        news: save.news.clone(),
    }
}
