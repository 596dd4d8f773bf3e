use chrono::{Local, NaiveDate};
use serde::{Serialize, Deserialize};

use crate::domain::validation::{required, Rule, Validate, Violation};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: Option<u32>,
    pub date: NaiveDate,
    pub description: String,
    pub pet_id: u32,
}

impl Visit {
    /// A fresh visit dated today.
    pub fn new(pet_id: u32) -> Self {
        Visit {
            id: None,
            date: today(),
            description: String::new(),
            pet_id,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn description_required(visit: &Visit) -> Option<Violation> {
    required(&visit.description)
}

const VISIT_RULES: &[Rule<Visit>] = &[
    Rule::new("description", description_required),
];

impl Validate for Visit {
    fn rules() -> &'static [Rule<Self>] {
        VISIT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_visit_is_dated_today() {
        let visit = Visit::new(7);

        assert_eq!(visit.date, today());
        assert_eq!(visit.pet_id, 7);
        assert!(visit.id.is_none());
    }

    #[test]
    fn test_description_required() {
        assert_eq!(Visit::new(1).validate().fields(), vec!["description"]);

        let visit = Visit { description: "general checkup".to_string(), ..Visit::new(1) };
        assert!(visit.validate().is_empty());
    }
}
