// Deterministic draft class generation.

use tracing::debug;

use crate::save::{DraftProspect, SaveData};

/// Prospects in every generated class.
pub const CLASS_SIZE: usize = 32;

const FIRST_NAMES: [&str; 8] = [
    "Jayden", "Malik", "Trent", "Isaiah", "Roman", "Darnell", "Cameron", "Tyrese",
];
const LAST_NAMES: [&str; 8] = [
    "Miller", "Johnson", "Davis", "Reed", "Brooks", "Carter", "Fields", "Bryant",
];
const POSITIONS: [&str; 8] = ["QB", "RB", "WR", "TE", "OT", "EDGE", "CB", "S"];
const ARCHETYPES: [&str; 6] = [
    "Field General",
    "Power Back",
    "Route Runner",
    "Pass Protector",
    "Ball Hawk",
    "Speed Rusher",
];

const MIN_AGE: u32 = 21;
const AGE_SPAN: u32 = 3;
const MIN_OVR: u32 = 65;
const OVR_SPAN: u32 = 25;

/// Map `seed` to a value in `[0, 1)`: the fractional part of
/// `sin(seed) * 10000`. Not suitable for anything but repeatable flavor.
pub fn seeded_value(seed: u64) -> f64 {
    let x = (seed as f64).sin() * 10000.0;
    x - x.floor()
}

/// Scale a unit value onto `0..len`.
fn scaled(value: f64, len: usize) -> usize {
    ((value * len as f64).floor() as usize).min(len.saturating_sub(1))
}

fn choose<'a>(table: &[&'a str], seed: u64) -> &'a str {
    table[scaled(seeded_value(seed), table.len())]
}

/// Prospect `index` (zero-based) of `season`'s class.
///
/// Fields draw from consecutive seeds starting at `season * 100 + index`:
/// first name, last name, position, archetype, age, then overall rating.
pub fn generate_prospect(index: usize, season: u32) -> DraftProspect {
    let seed = u64::from(season) * 100 + index as u64;

    let first = choose(&FIRST_NAMES, seed);
    let last = choose(&LAST_NAMES, seed + 1);
    let position = choose(&POSITIONS, seed + 2);
    let archetype = choose(&ARCHETYPES, seed + 3);
    let age = MIN_AGE + scaled(seeded_value(seed + 4), AGE_SPAN as usize) as u32;
    let ovr = MIN_OVR + scaled(seeded_value(seed + 5), OVR_SPAN as usize) as u32;

    DraftProspect {
        id: format!("DR_{season}_{}", index + 1),
        name: format!("{first} {last}"),
        position: position.to_string(),
        archetype: archetype.to_string(),
        age,
        ovr,
    }
}

/// The full class for `season`, in generation order.
pub fn generate_class(season: u32) -> Vec<DraftProspect> {
    (0..CLASS_SIZE).map(|i| generate_prospect(i, season)).collect()
}

/// Prospect ids by descending overall rating. Ties keep generation order.
pub fn rank_board(prospects: &[DraftProspect]) -> Vec<String> {
    let mut ranked: Vec<&DraftProspect> = prospects.iter().collect();
    ranked.sort_by(|a, b| b.ovr.cmp(&a.ovr));
    ranked.into_iter().map(|p| p.id.clone()).collect()
}

/// Generate the current season's class unless one already exists.
pub fn ensure_draft_class(mut save: SaveData) -> SaveData {
    if save.draft.class_generated {
        return save;
    }

    let prospects = generate_class(save.league.season);
    save.draft.board = rank_board(&prospects);
    save.draft.prospects = prospects;
    save.draft.class_generated = true;

    debug!("Generated {} draft class", save.league.season);
    save
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::default_save;

    #[test]
    fn seeded_value_is_in_unit_range() {
        for seed in 0..5_000 {
            let v = seeded_value(seed);
            assert!((0.0..1.0).contains(&v), "seed {seed} gave {v}");
        }
    }

    #[test]
    fn seeded_value_matches_sine_hash() {
        let x = 1.0f64.sin() * 10000.0;
        assert_eq!(seeded_value(1), x - x.floor());
        assert_eq!(seeded_value(0), 0.0);
    }

    #[test]
    fn prospects_stay_within_ranges() {
        for p in generate_class(2026) {
            assert!((21..=23).contains(&p.age), "{p:?}");
            assert!((65..=89).contains(&p.ovr), "{p:?}");
            assert!(POSITIONS.contains(&p.position.as_str()));
            assert!(ARCHETYPES.contains(&p.archetype.as_str()));
            let (first, last) = p.name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }

    #[test]
    fn ids_follow_season_and_position() {
        let class = generate_class(2026);
        assert_eq!(class.len(), CLASS_SIZE);
        assert_eq!(class[0].id, "DR_2026_1");
        assert_eq!(class[31].id, "DR_2026_32");
    }

    #[test]
    fn class_generation_is_deterministic() {
        assert_eq!(generate_class(2026), generate_class(2026));
        assert_ne!(generate_class(2026), generate_class(2027));
    }

    #[test]
    fn board_ranks_by_ovr_with_stable_ties() {
        let mk = |id: &str, ovr| DraftProspect {
            id: id.into(),
            name: String::new(),
            position: "QB".into(),
            archetype: "Field General".into(),
            age: 21,
            ovr,
        };
        let prospects = [mk("a", 70), mk("b", 80), mk("c", 70), mk("d", 90)];
        assert_eq!(rank_board(&prospects), ["d", "b", "a", "c"]);
    }

    #[test]
    fn ensure_generates_once() {
        let save = ensure_draft_class(default_save());
        assert!(save.draft.class_generated);
        assert_eq!(save.draft.prospects.len(), CLASS_SIZE);
        assert_eq!(save.draft.board, rank_board(&save.draft.prospects));

        let again = ensure_draft_class(save.clone());
        assert_eq!(again, save);
    }

    #[test]
    fn ensure_keeps_existing_class_even_if_season_changes() {
        let mut save = ensure_draft_class(default_save());
        save.league.season = 2030;
        let again = ensure_draft_class(save.clone());
        assert_eq!(again.draft.prospects[0].id, "DR_2026_1");
    }

    #[test]
    fn serialized_class_is_byte_identical() {
        let a = serde_json::to_string(&ensure_draft_class(default_save()).draft).unwrap();
        let b = serde_json::to_string(&ensure_draft_class(default_save()).draft).unwrap();
        assert_eq!(a, b);
    }
}
