//! Deterministic staff name generation from curated lists.
//!
//! Same seed, same roster. Lists are intentionally short; the runner's
//! rosters are dozens of people, not thousands.

use crate::rng::ScenarioRng;

pub struct NameGenerator;

impl NameGenerator {
    pub fn full_name(rng: &mut ScenarioRng) -> String {
        let first = Self::pick(rng, Self::first_names());
        let last = Self::pick(rng, Self::last_names());
        format!("{first} {last}")
    }

    fn pick(rng: &mut ScenarioRng, names: &'static [&'static str]) -> &'static str {
        names[rng.next_u64_below(names.len() as u64) as usize]
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "Maria", "Robert", "Wei", "Linda", "Ahmed", "Patricia", "Jose",
            "Michael", "Fatima", "David", "Elena", "Kenji", "Sarah", "Omar", "Nadia",
            "Daniel", "Priya", "Carlos", "Ingrid", "Samuel", "Yuki", "Rosa", "Viktor",
            "Grace", "Mateo", "Hannah", "Tariq", "Sofia", "Andre", "Amara", "Lucas",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Garcia", "Chen", "Johnson", "Nguyen", "Williams", "Patel", "Brown",
            "Kim", "Martinez", "Okafor", "Davis", "Silva", "Anderson", "Haddad", "Lopez",
            "Kowalski", "Taylor", "Yamamoto", "Hernandez", "Schmidt", "Moore", "Ivanov",
            "Jackson", "Ferreira", "White", "Osei", "Harris", "Lindqvist", "Clark",
        ]
    }
}
