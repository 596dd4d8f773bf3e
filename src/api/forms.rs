//! Typed request decoding.
//!
//! Every field is optional at the wire level: a missing parameter binds as an
//! empty value and is left to the entity's validation rules. Conversion
//! failures are returned as `TypeMismatch` binding errors.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::validation::{Errors, Violation};
use crate::domain::visit::model::{today, Visit};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOwnersQuery {
    pub last_name: Option<String>,
}

impl FindOwnersQuery {
    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
}

impl OwnerForm {
    pub fn into_owner(self, id: Option<u32>) -> Owner {
        Owner {
            id,
            first_name: text(self.first_name),
            last_name: text(self.last_name),
            address: text(self.address),
            city: text(self.city),
            telephone: text(self.telephone),
            pets: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetForm {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
}

impl PetForm {
    /// Applies the submission to `pet`; the type is looked up by name in `types`.
    pub fn bind(self, pet: &mut Pet, types: &[PetType]) -> Errors {
        let mut errors = Errors::new();

        pet.name = text(self.name);

        match parse_date(self.birth_date.as_deref()) {
            Ok(date) => pet.birth_date = date,
            Err(violation) => {
                pet.birth_date = None;
                errors.reject("birthDate", violation, self.birth_date.unwrap_or_default());
            }
        }

        match self.pet_type.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => match types.iter().find(|pet_type| pet_type.name.eq_ignore_ascii_case(name)) {
                Some(pet_type) => pet.pet_type = Some(pet_type.clone()),
                None => errors.reject("type", Violation::TypeMismatch, name),
            },
            None if pet.is_new() => pet.pet_type = None,
            None => {}
        }

        errors
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitForm {
    pub date: Option<String>,
    pub description: Option<String>,
}

impl VisitForm {
    pub fn bind(self, visit: &mut Visit) -> Errors {
        let mut errors = Errors::new();

        visit.description = text(self.description);

        match parse_date(self.date.as_deref()) {
            Ok(Some(date)) => visit.date = date,
            Ok(None) => visit.date = today(),
            Err(violation) => errors.reject("date", violation, self.date.unwrap_or_default()),
        }

        errors
    }
}

/// Missing parameters bind empty; surrounding whitespace is dropped.
fn text(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, Violation> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| Violation::TypeMismatch),
        None => Ok(None),
    }
}
