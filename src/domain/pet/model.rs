use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::domain::validation::{required, Rule, Validate, Violation};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PetType {
    pub id: u32,
    pub name: String,
}

impl PetType {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        PetType { id, name: name.into() }
    }

    pub fn defaults() -> Vec<PetType> {
        ["cat", "dog", "lizard", "snake", "bird", "hamster"]
            .iter()
            .zip(1..)
            .map(|(name, id)| PetType::new(id, *name))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Option<u32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    pub owner_id: u32,
}

impl Pet {
    pub fn new(owner_id: u32) -> Self {
        Pet {
            owner_id,
            ..Pet::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

fn name_required(pet: &Pet) -> Option<Violation> {
    required(&pet.name)
}

fn type_required_when_new(pet: &Pet) -> Option<Violation> {
    if pet.is_new() && pet.pet_type.is_none() {
        Some(Violation::Required)
    } else {
        None
    }
}

fn birth_date_required(pet: &Pet) -> Option<Violation> {
    pet.birth_date.is_none().then_some(Violation::Required)
}

const PET_RULES: &[Rule<Pet>] = &[
    Rule::new("name", name_required),
    Rule::new("type", type_required_when_new),
    Rule::new("birthDate", birth_date_required),
];

impl Validate for Pet {
    fn rules() -> &'static [Rule<Self>] {
        PET_RULES
    }
}
