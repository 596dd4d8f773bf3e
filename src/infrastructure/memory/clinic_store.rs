use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::clinic::service::ClinicService;
use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::visit::model::Visit;
use crate::utils::errors::ApiError;

#[derive(Default)]
struct ClinicTables {
    owners: BTreeMap<u32, Owner>,
    pets: BTreeMap<u32, Pet>,
    pet_types: Vec<PetType>,
    visits: BTreeMap<u32, Visit>,
}

impl ClinicTables {
    fn pets_of(&self, owner_id: u32) -> Vec<Pet> {
        let mut pets: Vec<Pet> = self.pets
            .values()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        pets
    }

    fn with_pets(&self, owner: &Owner) -> Owner {
        let mut owner = owner.clone();
        owner.pets = owner.id.map(|id| self.pets_of(id)).unwrap_or_default();
        owner
    }
}

fn next_id<V>(table: &BTreeMap<u32, V>) -> Result<u32, ApiError> {
    match table.keys().next_back() {
        Some(last) => last
            .checked_add(1)
            .ok_or_else(|| ApiError::InternalServerError("id space exhausted".to_string())),
        None => Ok(1),
    }
}

/// Process-local clinic store, used when no database is configured and by tests.
pub struct InMemoryClinicService {
    tables: RwLock<ClinicTables>,
}

impl InMemoryClinicService {
    pub fn new() -> Self {
        InMemoryClinicService {
            tables: RwLock::new(ClinicTables {
                pet_types: PetType::defaults(),
                ..ClinicTables::default()
            }),
        }
    }

    /// Store pre-populated with the clinic's demo owners, pets and visits.
    pub async fn with_sample_data() -> Result<Self, ApiError> {
        let store = InMemoryClinicService::new();
        let types = PetType::defaults();

        let owners = [
            ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
            ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
            ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
            ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
            ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
            ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
        ];
        for (first_name, last_name, address, city, telephone) in owners {
            store.save_owner(Owner {
                id: None,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                telephone: telephone.to_string(),
                pets: Vec::new(),
            }).await?;
        }

        let pets = [
            ("Leo", (2010, 9, 7), 0, 1),
            ("Basil", (2012, 8, 6), 5, 2),
            ("Rosy", (2011, 4, 17), 1, 3),
            ("Jewel", (2010, 3, 7), 1, 3),
            ("Iggy", (2010, 11, 30), 2, 4),
            ("George", (2010, 1, 20), 3, 5),
            ("Samantha", (2012, 9, 4), 0, 6),
            ("Max", (2012, 9, 4), 0, 6),
        ];
        for (name, (year, month, day), type_index, owner_id) in pets {
            store.save_pet(Pet {
                id: None,
                name: name.to_string(),
                birth_date: NaiveDate::from_ymd_opt(year, month, day),
                pet_type: types.get(type_index).cloned(),
                owner_id,
            }).await?;
        }

        let visits = [
            (7, (2013, 1, 1), "rabies shot"),
            (8, (2013, 1, 2), "rabies shot"),
            (8, (2013, 1, 3), "neutered"),
            (7, (2013, 1, 4), "spayed"),
        ];
        for (pet_id, (year, month, day), description) in visits {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| ApiError::InternalServerError("invalid sample date".to_string()))?;
            store.save_visit(Visit {
                id: None,
                date,
                description: description.to_string(),
                pet_id,
            }).await?;
        }

        Ok(store)
    }
}

impl Default for InMemoryClinicService {
    fn default() -> Self {
        InMemoryClinicService::new()
    }
}

#[async_trait]
impl ClinicService for InMemoryClinicService {

    async fn find_owner_by_id(&self, id: u32) -> Result<Option<Owner>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.owners.get(&id).map(|owner| tables.with_pets(owner)))
    }

    async fn find_owners_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.owners
            .values()
            .filter(|owner| owner.last_name.starts_with(last_name))
            .map(|owner| tables.with_pets(owner))
            .collect())
    }

    async fn save_owner(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        let mut tables = self.tables.write().await;
        let id = match owner.id {
            Some(id) => id,
            None => next_id(&tables.owners)?,
        };
        owner.id = Some(id);
        owner.pets = Vec::new();
        tables.owners.insert(id, owner.clone());
        Ok(tables.with_pets(&owner))
    }

    async fn find_pet_by_id(&self, id: u32) -> Result<Option<Pet>, ApiError> {
        Ok(self.tables.read().await.pets.get(&id).cloned())
    }

    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError> {
        Ok(self.tables.read().await.pet_types.clone())
    }

    async fn save_pet(&self, mut pet: Pet) -> Result<Pet, ApiError> {
        let mut tables = self.tables.write().await;
        if !tables.owners.contains_key(&pet.owner_id) {
            return Err(ApiError::owner_not_found(pet.owner_id));
        }
        let id = match pet.id {
            Some(id) => id,
            None => next_id(&tables.pets)?,
        };
        pet.id = Some(id);
        tables.pets.insert(id, pet.clone());
        Ok(pet)
    }

    async fn save_visit(&self, mut visit: Visit) -> Result<Visit, ApiError> {
        let mut tables = self.tables.write().await;
        if !tables.pets.contains_key(&visit.pet_id) {
            return Err(ApiError::pet_not_found(visit.pet_id));
        }
        let id = match visit.id {
            Some(id) => id,
            None => next_id(&tables.visits)?,
        };
        visit.id = Some(id);
        tables.visits.insert(id, visit.clone());
        Ok(visit)
    }

    async fn find_visits_by_pet_id(&self, pet_id: u32) -> Result<Vec<Visit>, ApiError> {
        let tables = self.tables.read().await;
        let mut visits: Vec<Visit> = tables.visits
            .values()
            .filter(|visit| visit.pet_id == pet_id)
            .cloned()
            .collect();
        visits.sort_by_key(|visit| visit.date);
        Ok(visits)
    }
}
