use serde::{Serialize, Deserialize};

use crate::domain::pet::model::Pet;
use crate::domain::validation::{digits, required, Rule, Validate, Violation};

pub const TELEPHONE_MAX_DIGITS: usize = 10;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Search form placeholder carrying only the queried last name.
    pub fn with_last_name(last_name: impl Into<String>) -> Self {
        Owner {
            last_name: last_name.into(),
            ..Owner::default()
        }
    }

    pub fn pet_named(&self, name: &str) -> Option<&Pet> {
        let name = name.trim();
        self.pets.iter().find(|pet| pet.name.trim().eq_ignore_ascii_case(name))
    }

    /// Copies the editable fields of `other`, keeping identity and pets.
    pub fn apply(&mut self, other: Owner) {
        self.first_name = other.first_name;
        self.last_name = other.last_name;
        self.address = other.address;
        self.city = other.city;
        self.telephone = other.telephone;
    }
}

fn address_required(owner: &Owner) -> Option<Violation> {
    required(&owner.address)
}

fn telephone_required(owner: &Owner) -> Option<Violation> {
    required(&owner.telephone)
}

fn telephone_digits(owner: &Owner) -> Option<Violation> {
    digits(&owner.telephone, TELEPHONE_MAX_DIGITS)
}

const OWNER_RULES: &[Rule<Owner>] = &[
    Rule::new("address", address_required),
    Rule::new("telephone", telephone_required),
    Rule::new("telephone", telephone_digits),
];

impl Validate for Owner {
    fn rules() -> &'static [Rule<Self>] {
        OWNER_RULES
    }
}
