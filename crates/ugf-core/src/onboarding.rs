// Career onboarding: coach creation, team interviews, and accepting an offer.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::save::{CoachProfile, LeagueState, SaveData};

/// Teams that interview a newly created coach.
pub const INTERVIEW_TEAMS: [&str; 3] = ["MILWAUKEE_NORTHSHORE", "ATLANTA_APEX", "BIRMINGHAM_VULCANS"];

/// A head-coaching contract offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    pub team_id: &'static str,
    pub years: u32,
    pub salary: u64,
}

/// Offers extended once every interview is done.
pub const OFFERS: [Offer; 3] = [
    Offer {
        team_id: "BIRMINGHAM_VULCANS",
        years: 5,
        salary: 7_500_000,
    },
    Offer {
        team_id: "MILWAUKEE_NORTHSHORE",
        years: 4,
        salary: 4_500_000,
    },
    Offer {
        team_id: "ATLANTA_APEX",
        years: 4,
        salary: 6_000_000,
    },
];

pub fn offer_for(team_id: &str) -> Option<&'static Offer> {
    OFFERS.iter().find(|o| o.team_id == team_id)
}

/// Whether the coach has sat with every interviewing team.
pub fn interviews_complete(save: &SaveData) -> bool {
    INTERVIEW_TEAMS
        .iter()
        .all(|t| save.onboarding.interviews_completed.iter().any(|c| c == t))
}

/// Create the user's coach and reset the league calendar to a new career.
pub fn create_coach(save: SaveData, profile: CoachProfile) -> SaveData {
    create_coach_at(save, profile, Utc::now())
}

/// [`create_coach`] with the character id derived from `now`.
///
/// A no-op when a coach already exists or the name is blank. A blank hometown
/// is recorded as "Unknown".
pub fn create_coach_at(mut save: SaveData, profile: CoachProfile, now: DateTime<Utc>) -> SaveData {
    if save.coach.is_some() {
        debug!("Coach creation ignored: a coach already exists");
        return save;
    }
    let name = profile.name.trim();
    if name.is_empty() {
        debug!("Coach creation ignored: blank name");
        return save;
    }

    let hometown = match profile.hometown.trim() {
        "" => "Unknown".to_string(),
        h => h.to_string(),
    };

    save.user_character_id = Some(format!("COACH_{}", now.timestamp_millis()));
    save.coach = Some(CoachProfile {
        name: name.to_string(),
        hometown,
        ..profile
    });
    save.league = LeagueState::default();
    save.onboarding.interviews_completed.clear();

    info!("Created coach {name}");
    save
}

/// Record an interview with `team_id`. Repeats are ignored.
pub fn complete_interview(mut save: SaveData, team_id: &str) -> SaveData {
    if save.coach.is_none() || !INTERVIEW_TEAMS.contains(&team_id) {
        debug!("Interview with {team_id} ignored");
        return save;
    }
    if !save.onboarding.interviews_completed.iter().any(|t| t == team_id) {
        save.onboarding.interviews_completed.push(team_id.to_string());
    }
    save
}

/// Sign with `team_id`.
///
/// Requires all interviews done, a standing offer from that team, and no team
/// already signed with.
pub fn accept_offer(mut save: SaveData, team_id: &str) -> SaveData {
    if save.user_team_id.is_some() || !interviews_complete(&save) || offer_for(team_id).is_none() {
        debug!("Offer from {team_id} not accepted");
        return save;
    }
    save.user_team_id = Some(team_id.to_string());
    info!("Accepted offer from {team_id}");
    save
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::{default_save, LeaguePhase};
    use chrono::TimeZone;

    fn profile(name: &str, hometown: &str) -> CoachProfile {
        CoachProfile {
            name: name.into(),
            age: 42,
            hometown: hometown.into(),
            personality: "balanced".into(),
        }
    }

    fn coached() -> SaveData {
        create_coach(default_save(), profile("Pat Riley", "Tulsa"))
    }

    fn interviewed() -> SaveData {
        INTERVIEW_TEAMS
            .iter()
            .fold(coached(), |save, team| complete_interview(save, team))
    }

    // -----------------------------------------------------------------------
    // create_coach
    // -----------------------------------------------------------------------

    #[test]
    fn create_coach_sets_profile_and_id() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let save = create_coach_at(default_save(), profile("Pat Riley", "Tulsa"), now);
        assert_eq!(
            save.user_character_id,
            Some(format!("COACH_{}", now.timestamp_millis()))
        );
        let coach = save.coach.unwrap();
        assert_eq!(coach.name, "Pat Riley");
        assert_eq!(coach.hometown, "Tulsa");
        assert_eq!(coach.age, 42);
    }

    #[test]
    fn blank_hometown_becomes_unknown() {
        let save = create_coach(default_save(), profile("Pat", "  "));
        assert_eq!(save.coach.unwrap().hometown, "Unknown");
    }

    #[test]
    fn blank_name_is_rejected() {
        let save = default_save();
        assert_eq!(create_coach(save.clone(), profile("   ", "Tulsa")), save);
    }

    #[test]
    fn second_coach_is_rejected() {
        let save = coached();
        assert_eq!(create_coach(save.clone(), profile("Other", "Reno")), save);
    }

    #[test]
    fn create_coach_resets_league_and_interviews() {
        let mut save = default_save();
        save.league.season = 2031;
        save.league.week = 9;
        save.league.phase = LeaguePhase::RegularSeason;
        save.onboarding.interviews_completed = vec!["ATLANTA_APEX".into()];

        let save = create_coach(save, profile("Pat", "Tulsa"));
        assert_eq!(save.league, LeagueState::default());
        assert!(save.onboarding.interviews_completed.is_empty());
    }

    // -----------------------------------------------------------------------
    // Interviews and offers
    // -----------------------------------------------------------------------

    #[test]
    fn interview_requires_coach() {
        let save = default_save();
        assert_eq!(complete_interview(save.clone(), "ATLANTA_APEX"), save);
    }

    #[test]
    fn interview_with_unlisted_team_is_ignored() {
        let save = coached();
        assert_eq!(complete_interview(save.clone(), "NOWHERE_FC"), save);
    }

    #[test]
    fn interviews_are_recorded_once() {
        let save = complete_interview(coached(), "ATLANTA_APEX");
        let save = complete_interview(save, "ATLANTA_APEX");
        assert_eq!(save.onboarding.interviews_completed, vec!["ATLANTA_APEX"]);
        assert!(!interviews_complete(&save));
    }

    #[test]
    fn offer_requires_all_interviews() {
        let save = complete_interview(coached(), "ATLANTA_APEX");
        assert!(accept_offer(save, "ATLANTA_APEX").user_team_id.is_none());
    }

    #[test]
    fn accepting_an_offer_sets_team() {
        let save = accept_offer(interviewed(), "BIRMINGHAM_VULCANS");
        assert_eq!(save.user_team_id.as_deref(), Some("BIRMINGHAM_VULCANS"));
    }

    #[test]
    fn only_one_offer_can_be_accepted() {
        let save = accept_offer(interviewed(), "BIRMINGHAM_VULCANS");
        let again = accept_offer(save.clone(), "ATLANTA_APEX");
        assert_eq!(again, save);
    }

    #[test]
    fn unknown_offer_is_ignored() {
        let save = interviewed();
        assert_eq!(accept_offer(save.clone(), "NOWHERE_FC"), save);
    }

    #[test]
    fn offer_table_lookup() {
        let offer = offer_for("BIRMINGHAM_VULCANS").unwrap();
        assert_eq!(offer.years, 5);
        assert_eq!(offer.salary, 7_500_000);
        assert!(offer_for("ATLANTA").is_none());
    }
}
