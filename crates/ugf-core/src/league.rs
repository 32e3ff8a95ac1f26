// League reference dataset: teams, players, and personnel, looked up by id.
//
// Read-only. The career save refers to entries here only by id.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Contract team id carried by unsigned personnel.
pub const FREE_AGENT: &str = "FREE_AGENT";

/// Shown when a team id cannot be resolved.
pub const UNKNOWN_ABBREV: &str = "—";

const COORDINATOR_ROLES: [&str; 4] = ["HC", "OC", "DC", "STC"];

#[derive(Debug, Error)]
pub enum LeagueDataError {
    #[error("failed to read league data at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed league data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: String,
    pub abbrev: String,
    pub name: String,
    pub region: String,
    pub conference_id: String,
    pub division_id: String,
    pub stadium: String,
    pub logo_key: String,
    pub is_active: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Team {
    /// "Region Name", e.g. "Atlanta Apex".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.region, self.name)
    }

    pub fn logo_path(&self) -> String {
        format!("/logos/{}.png", self.logo_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTrait {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TraitKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Normal,
    Injured,
    Rising,
    Declining,
}

/// Attribute groups, each a map of rating name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatings {
    #[serde(default)]
    pub physical: BTreeMap<String, f64>,
    #[serde(default)]
    pub mental: BTreeMap<String, f64>,
    #[serde(default)]
    pub technical: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub archetype: String,
    pub age: u32,
    pub ovr: u32,
    pub contract_team_id: String,
    pub contract_years: u32,
    pub contract_salary: u64,
    #[serde(default)]
    pub ratings: Option<PlayerRatings>,
    #[serde(default)]
    pub traits: Vec<PlayerTrait>,
    #[serde(default)]
    pub status: Option<PlayerStatus>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub personnel_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub age: u32,
    pub ovr: u32,
    pub contract_team_id: String,
    pub contract_years: u32,
    pub contract_salary: u64,
    pub specialty: String,
}

impl Personnel {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Display form of a personnel role code.
pub fn normalize_role(role: &str) -> &str {
    match role {
        "WR_RB_COACH" => "WR/RB Coach",
        other => other,
    }
}

/// Whether `role` is a position coach rather than the head coach or a
/// coordinator.
pub fn is_position_coach(role: &str) -> bool {
    !COORDINATOR_ROLES.contains(&role)
}

/// The whole reference dataset. An empty dataset is valid; every lookup
/// simply misses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueDb {
    #[serde(rename = "Teams", default)]
    pub teams: Vec<Team>,
    #[serde(rename = "Players", default)]
    pub players: Vec<Player>,
    #[serde(rename = "Personnel", default)]
    pub personnel: Vec<Personnel>,
}

impl LeagueDb {
    pub fn from_json(json: &str) -> Result<Self, LeagueDataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LeagueDataError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LeagueDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let db = Self::from_json(&raw)?;
        info!(
            "Loaded league data: {} teams, {} players, {} personnel",
            db.teams.len(),
            db.players.len(),
            db.personnel.len()
        );
        Ok(db)
    }

    /// Canonical team id for a team id or abbreviation. Ids take precedence.
    pub fn resolve_team_id(&self, id_or_abbrev: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.team_id == id_or_abbrev)
            .or_else(|| self.teams.iter().find(|t| t.abbrev == id_or_abbrev))
            .map(|t| t.team_id.as_str())
    }

    pub fn team(&self, id_or_abbrev: &str) -> Option<&Team> {
        let team_id = self.resolve_team_id(id_or_abbrev)?;
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    /// Team display name, or the input itself when the team is unknown.
    pub fn team_display_name(&self, id_or_abbrev: &str) -> String {
        self.team(id_or_abbrev)
            .map(Team::display_name)
            .unwrap_or_else(|| id_or_abbrev.to_string())
    }

    pub fn team_abbrev(&self, id_or_abbrev: &str) -> &str {
        self.team(id_or_abbrev)
            .map(|t| t.abbrev.as_str())
            .unwrap_or(UNKNOWN_ABBREV)
    }

    /// Players under contract with the team.
    pub fn roster(&self, id_or_abbrev: &str) -> Vec<&Player> {
        let Some(team_id) = self.resolve_team_id(id_or_abbrev) else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|p| p.contract_team_id == team_id)
            .collect()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Coaches and coordinators under contract with the team.
    pub fn staff(&self, id_or_abbrev: &str) -> Vec<&Personnel> {
        let Some(team_id) = self.resolve_team_id(id_or_abbrev) else {
            return Vec::new();
        };
        self.personnel
            .iter()
            .filter(|p| p.contract_team_id == team_id)
            .collect()
    }

    pub fn free_agent_coaches(&self) -> Vec<&Personnel> {
        self.personnel
            .iter()
            .filter(|p| p.contract_team_id == FREE_AGENT)
            .collect()
    }

    pub fn personnel(&self, personnel_id: &str) -> Option<&Personnel> {
        self.personnel.iter().find(|p| p.personnel_id == personnel_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "Teams": [
            {
                "teamId": "ATLANTA_APEX", "abbrev": "ATL", "name": "Apex", "region": "Atlanta",
                "conferenceId": "EAST", "divisionId": "EAST_SOUTH", "stadium": "Peachtree Field",
                "logoKey": "atl_apex", "isActive": true
            },
            {
                "teamId": "BIRMINGHAM_VULCANS", "abbrev": "BHM", "name": "Vulcans",
                "region": "Birmingham", "conferenceId": "EAST", "divisionId": "EAST_SOUTH",
                "stadium": "Iron Bowl", "logoKey": "bhm_vulcans", "isActive": true, "notes": null
            }
        ],
        "Players": [
            {
                "playerId": "P1", "firstName": "Marcus", "lastName": "Hale", "position": "QB",
                "archetype": "Field General", "age": 27, "ovr": 81, "contractTeamId": "ATLANTA_APEX",
                "contractYears": 3, "contractSalary": 21000000,
                "ratings": { "physical": { "speed": 72 } },
                "traits": [{ "text": "Film junkie", "type": "positive" }],
                "status": "rising"
            },
            {
                "playerId": "P2", "firstName": "Dre", "lastName": "Olsen", "position": "CB",
                "archetype": "Ball Hawk", "age": 24, "ovr": 74, "contractTeamId": "ATLANTA_APEX",
                "contractYears": 2, "contractSalary": 3000000
            },
            {
                "playerId": "P3", "firstName": "Lou", "lastName": "Banks", "position": "OT",
                "archetype": "Pass Protector", "age": 30, "ovr": 69,
                "contractTeamId": "BIRMINGHAM_VULCANS", "contractYears": 1, "contractSalary": 900000
            }
        ],
        "Personnel": [
            {
                "personnelId": "C1", "firstName": "Ray", "lastName": "Dunn", "role": "OC", "age": 51,
                "ovr": 77, "contractTeamId": "ATLANTA_APEX", "contractYears": 2,
                "contractSalary": 1500000, "specialty": "West Coast"
            },
            {
                "personnelId": "C2", "firstName": "Ike", "lastName": "Moss", "role": "WR_RB_COACH",
                "age": 44, "ovr": 66, "contractTeamId": "FREE_AGENT", "contractYears": 0,
                "contractSalary": 0, "specialty": "Route Running"
            }
        ]
    }"#;

    pub(crate) fn sample_db() -> LeagueDb {
        LeagueDb::from_json(SAMPLE).expect("sample league data should parse")
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    #[test]
    fn sample_parses_with_optional_fields() {
        let db = sample_db();
        assert_eq!(db.teams.len(), 2);
        let p1 = db.player("P1").unwrap();
        assert_eq!(p1.status, Some(PlayerStatus::Rising));
        assert_eq!(p1.traits[0].kind, TraitKind::Positive);
        assert_eq!(p1.ratings.as_ref().unwrap().physical["speed"], 72.0);
        assert!(db.player("P2").unwrap().traits.is_empty());
    }

    #[test]
    fn empty_object_is_an_empty_league() {
        assert_eq!(LeagueDb::from_json("{}").unwrap(), LeagueDb::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = LeagueDb::from_json(r#"{"Teams": 5}"#).unwrap_err();
        assert!(matches!(err, LeagueDataError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(LeagueDb::load(&path).unwrap(), sample_db());

        let missing = LeagueDb::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, LeagueDataError::Io { .. }));
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[test]
    fn resolves_by_id_or_abbrev() {
        let db = sample_db();
        assert_eq!(db.resolve_team_id("ATLANTA_APEX"), Some("ATLANTA_APEX"));
        assert_eq!(db.resolve_team_id("BHM"), Some("BIRMINGHAM_VULCANS"));
        assert_eq!(db.resolve_team_id("XYZ"), None);
    }

    #[test]
    fn display_name_and_abbrev_fall_back() {
        let db = sample_db();
        assert_eq!(db.team_display_name("ATL"), "Atlanta Apex");
        assert_eq!(db.team_display_name("MILWAUKEE_NORTHSHORE"), "MILWAUKEE_NORTHSHORE");
        assert_eq!(db.team_abbrev("BIRMINGHAM_VULCANS"), "BHM");
        assert_eq!(db.team_abbrev("MILWAUKEE_NORTHSHORE"), UNKNOWN_ABBREV);
        assert_eq!(db.team("ATL").unwrap().logo_path(), "/logos/atl_apex.png");
    }

    #[test]
    fn roster_and_staff_filter_by_contract() {
        let db = sample_db();
        let roster: Vec<_> = db.roster("ATL").into_iter().map(|p| p.player_id.as_str()).collect();
        assert_eq!(roster, ["P1", "P2"]);
        assert!(db.roster("XYZ").is_empty());

        let staff: Vec<_> = db.staff("ATLANTA_APEX").into_iter().map(|p| p.full_name()).collect();
        assert_eq!(staff, ["Ray Dunn"]);

        let free: Vec<_> = db.free_agent_coaches().into_iter().map(|p| p.personnel_id.as_str()).collect();
        assert_eq!(free, ["C2"]);
        assert_eq!(db.personnel("C1").unwrap().role, "OC");
    }

    #[test]
    fn role_helpers() {
        assert_eq!(normalize_role("WR_RB_COACH"), "WR/RB Coach");
        assert_eq!(normalize_role("QB_COACH"), "QB_COACH");
        assert!(!is_position_coach("HC"));
        assert!(!is_position_coach("STC"));
        assert!(is_position_coach("WR_RB_COACH"));
    }
}
