use async_trait::async_trait;

use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::visit::model::Visit;
use crate::utils::errors::ApiError;

/// Data-access facade used by the controllers.
///
/// Lookups return `Ok(None)` for unknown ids; the controllers decide how a
/// missing entity surfaces. Saves are upserts: an entity without an id gets
/// the next id, an entity with an id replaces (or creates) that record.
#[async_trait]
pub trait ClinicService: Send + Sync {
    /// Returns the owner with its pets attached.
    async fn find_owner_by_id(&self, id: u32) -> Result<Option<Owner>, ApiError>;
    /// Prefix match on last name; an empty string matches every owner.
    async fn find_owners_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, ApiError>;
    async fn save_owner(&self, owner: Owner) -> Result<Owner, ApiError>;
    async fn find_pet_by_id(&self, id: u32) -> Result<Option<Pet>, ApiError>;
    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError>;
    async fn save_pet(&self, pet: Pet) -> Result<Pet, ApiError>;
    async fn save_visit(&self, visit: Visit) -> Result<Visit, ApiError>;
    async fn find_visits_by_pet_id(&self, pet_id: u32) -> Result<Vec<Visit>, ApiError>;
}
