use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::domain::clinic::service::ClinicService;
use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::visit::model::Visit;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::ApiError;

const OWNERS: &str = "owners";
const PETS: &str = "pets";
const PET_TYPES: &str = "pet_types";
const VISITS: &str = "visits";
const COUNTERS: &str = "counters";

#[derive(Serialize, Deserialize, Debug)]
struct OwnerDocument {
    #[serde(rename = "_id")]
    id: i64,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    telephone: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct PetDocument {
    #[serde(rename = "_id")]
    id: i64,
    name: String,
    birth_date: Option<NaiveDate>,
    type_id: Option<i64>,
    owner_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
struct PetTypeDocument {
    #[serde(rename = "_id")]
    id: i64,
    name: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct VisitDocument {
    #[serde(rename = "_id")]
    id: i64,
    date: NaiveDate,
    description: String,
    pet_id: i64,
}

fn to_id(value: i64) -> Result<u32, ApiError> {
    u32::try_from(value)
        .map_err(|_| ApiError::InvalidData(format!("stored id {} is out of range", value)))
}

/// Anchored prefix match on `last_name`; the input is matched literally.
fn last_name_filter(last_name: &str) -> Document {
    let pattern = format!("^{}", regex::escape(last_name));
    doc! { "last_name": { "$regex": pattern } }
}

/// Raises a sequence to at least `id` so generated ids never land on an explicit one.
fn counter_floor(id: u32) -> Document {
    doc! { "$max": { "seq": i64::from(id) } }
}

impl OwnerDocument {
    fn from_owner(id: u32, owner: &Owner) -> Self {
        OwnerDocument {
            id: i64::from(id),
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }

    fn into_owner(self) -> Result<Owner, ApiError> {
        Ok(Owner {
            id: Some(to_id(self.id)?),
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            telephone: self.telephone,
            pets: Vec::new(),
        })
    }
}

impl PetDocument {
    fn into_pet(self, types: &HashMap<i64, PetType>) -> Result<Pet, ApiError> {
        Ok(Pet {
            id: Some(to_id(self.id)?),
            name: self.name,
            birth_date: self.birth_date,
            pet_type: self.type_id.and_then(|id| types.get(&id).cloned()),
            owner_id: to_id(self.owner_id)?,
        })
    }
}

impl VisitDocument {
    fn into_visit(self) -> Result<Visit, ApiError> {
        Ok(Visit {
            id: Some(to_id(self.id)?),
            date: self.date,
            description: self.description,
            pet_id: to_id(self.pet_id)?,
        })
    }
}

/// MongoDB-backed clinic store. Integer ids come from a `counters` collection.
pub struct MongoClinicService {
    owners: Collection<OwnerDocument>,
    pets: Collection<PetDocument>,
    pet_types: Collection<PetTypeDocument>,
    visits: Collection<VisitDocument>,
    counters: Collection<Document>,
}

impl MongoClinicService {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            owners: context.collection(OWNERS),
            pets: context.collection(PETS),
            pet_types: context.collection(PET_TYPES),
            visits: context.collection(VISITS),
            counters: context.collection(COUNTERS),
        }
    }

    /// Inserts the default pet types into an empty `pet_types` collection.
    pub async fn ensure_pet_types(&self) -> Result<(), ApiError> {
        if self.pet_types.count_documents(doc! {}).await? > 0 {
            return Ok(());
        }
        let defaults: Vec<PetTypeDocument> = PetType::defaults()
            .into_iter()
            .map(|pet_type| PetTypeDocument { id: i64::from(pet_type.id), name: pet_type.name })
            .collect();
        self.pet_types.insert_many(defaults).await?;
        log::info!("Seeded default pet types");
        Ok(())
    }

    async fn next_id(&self, sequence: &str) -> Result<u32, ApiError> {
        let counter = self.counters
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ApiError::InternalServerError(format!("counter '{}' was not created", sequence)))?;

        let seq = counter
            .get_i64("seq")
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
        to_id(seq)
    }

    async fn reserve_id(&self, sequence: &str, id: u32) -> Result<u32, ApiError> {
        self.counters
            .update_one(doc! { "_id": sequence }, counter_floor(id))
            .upsert(true)
            .await?;
        Ok(id)
    }

    async fn type_index(&self) -> Result<HashMap<i64, PetType>, ApiError> {
        Ok(self.find_pet_types()
            .await?
            .into_iter()
            .map(|pet_type| (i64::from(pet_type.id), pet_type))
            .collect())
    }

    async fn pets_of(&self, owner_id: u32, types: &HashMap<i64, PetType>) -> Result<Vec<Pet>, ApiError> {
        let mut cursor = self.pets
            .find(doc! { "owner_id": i64::from(owner_id) })
            .sort(doc! { "name": 1 })
            .await?;
        let mut pets = Vec::new();

        while let Some(document) = cursor.next().await {
            match document {
                Ok(pet) => pets.push(pet.into_pet(types)?),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(pets)
    }
}

#[async_trait]
impl ClinicService for MongoClinicService {

    async fn find_owner_by_id(&self, id: u32) -> Result<Option<Owner>, ApiError> {
        let document = match self.owners.find_one(doc! { "_id": i64::from(id) }).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        let mut owner = document.into_owner()?;
        let types = self.type_index().await?;
        owner.pets = self.pets_of(id, &types).await?;
        Ok(Some(owner))
    }

    async fn find_owners_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, ApiError> {
        let mut cursor = self.owners
            .find(last_name_filter(last_name))
            .sort(doc! { "_id": 1 })
            .await?;
        let types = self.type_index().await?;
        let mut owners = Vec::new();

        while let Some(document) = cursor.next().await {
            match document {
                Ok(document) => {
                    let mut owner = document.into_owner()?;
                    if let Some(id) = owner.id {
                        owner.pets = self.pets_of(id, &types).await?;
                    }
                    owners.push(owner);
                },
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(owners)
    }

    async fn save_owner(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        let id = match owner.id {
            Some(id) => self.reserve_id(OWNERS, id).await?,
            None => self.next_id(OWNERS).await?,
        };
        let document = OwnerDocument::from_owner(id, &owner);
        self.owners
            .replace_one(doc! { "_id": document.id }, &document)
            .upsert(true)
            .await?;

        owner.id = Some(id);
        let types = self.type_index().await?;
        owner.pets = self.pets_of(id, &types).await?;
        Ok(owner)
    }

    async fn find_pet_by_id(&self, id: u32) -> Result<Option<Pet>, ApiError> {
        let document = match self.pets.find_one(doc! { "_id": i64::from(id) }).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        let types = self.type_index().await?;
        document.into_pet(&types).map(Some)
    }

    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError> {
        let mut cursor = self.pet_types.find(doc! {}).sort(doc! { "name": 1 }).await?;
        let mut types = Vec::new();

        while let Some(document) = cursor.next().await {
            match document {
                Ok(document) => types.push(PetType::new(to_id(document.id)?, document.name)),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(types)
    }

    async fn save_pet(&self, mut pet: Pet) -> Result<Pet, ApiError> {
        if self.owners.count_documents(doc! { "_id": i64::from(pet.owner_id) }).await? == 0 {
            return Err(ApiError::owner_not_found(pet.owner_id));
        }
        let id = match pet.id {
            Some(id) => self.reserve_id(PETS, id).await?,
            None => self.next_id(PETS).await?,
        };
        let document = PetDocument {
            id: i64::from(id),
            name: pet.name.clone(),
            birth_date: pet.birth_date,
            type_id: pet.pet_type.as_ref().map(|pet_type| i64::from(pet_type.id)),
            owner_id: i64::from(pet.owner_id),
        };
        self.pets
            .replace_one(doc! { "_id": document.id }, &document)
            .upsert(true)
            .await?;

        pet.id = Some(id);
        Ok(pet)
    }

    async fn save_visit(&self, mut visit: Visit) -> Result<Visit, ApiError> {
        if self.pets.count_documents(doc! { "_id": i64::from(visit.pet_id) }).await? == 0 {
            return Err(ApiError::pet_not_found(visit.pet_id));
        }
        let id = match visit.id {
            Some(id) => self.reserve_id(VISITS, id).await?,
            None => self.next_id(VISITS).await?,
        };
        let document = VisitDocument {
            id: i64::from(id),
            date: visit.date,
            description: visit.description.clone(),
            pet_id: i64::from(visit.pet_id),
        };
        self.visits
            .replace_one(doc! { "_id": document.id }, &document)
            .upsert(true)
            .await?;

        visit.id = Some(id);
        Ok(visit)
    }

    async fn find_visits_by_pet_id(&self, pet_id: u32) -> Result<Vec<Visit>, ApiError> {
        let mut cursor = self.visits
            .find(doc! { "pet_id": i64::from(pet_id) })
            .sort(doc! { "date": 1 })
            .await?;
        let mut visits = Vec::new();

        while let Some(document) = cursor.next().await {
            match document {
                Ok(document) => visits.push(document.into_visit()?),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(visits)
    }
}
