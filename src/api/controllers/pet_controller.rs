use crate::api::controllers::owner_controller::owner_path;
use crate::api::forms::PetForm;
use crate::api::view::{attr, Model, View, ViewOutcome};
use crate::domain::clinic::service::ClinicService;
use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::validation::{Errors, Validate, Violation};
use crate::utils::errors::ApiError;

pub struct PetController<'a> {
    clinic: &'a dyn ClinicService,
}

impl<'a> PetController<'a> {
    pub fn new(clinic: &'a dyn ClinicService) -> Self {
        PetController { clinic }
    }

    async fn load_owner(&self, owner_id: u32) -> Result<Owner, ApiError> {
        match self.clinic.find_owner_by_id(owner_id).await? {
            Some(owner) => Ok(owner),
            None => {
                log::warn!("Owner {} not found", owner_id);
                Err(ApiError::owner_not_found(owner_id))
            }
        }
    }

    /// The pet must exist and belong to `owner_id`.
    async fn load_pet(&self, owner_id: u32, pet_id: u32) -> Result<Pet, ApiError> {
        match self.clinic.find_pet_by_id(pet_id).await? {
            Some(pet) if pet.owner_id == owner_id => Ok(pet),
            _ => {
                log::warn!("Pet {} not found for owner {}", pet_id, owner_id);
                Err(ApiError::pet_not_found(pet_id))
            }
        }
    }

    fn pet_form(owner: Owner, pet: Pet, types: Vec<PetType>, errors: Errors) -> ViewOutcome {
        ViewOutcome::render(
            View::PetForm,
            Model::new()
                .with(attr::OWNER, owner)
                .with(attr::PET, pet)
                .with(attr::TYPES, types)
                .with_errors(attr::PET, errors),
        )
    }

    pub async fn init_creation_form(&self, owner_id: u32) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        let types = self.clinic.find_pet_types().await?;
        Ok(Self::pet_form(owner, Pet::new(owner_id), types, Errors::new()))
    }

    pub async fn process_creation_form(&self, owner_id: u32, form: PetForm) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        let types = self.clinic.find_pet_types().await?;

        let mut pet = Pet::new(owner_id);
        let mut errors = form.bind(&mut pet, &types);
        if !pet.name.trim().is_empty() && owner.pet_named(&pet.name).is_some() {
            errors.push("name", Violation::Duplicate);
        }
        errors.extend(pet.validate());

        if !errors.is_empty() {
            return Ok(Self::pet_form(owner, pet, types, errors));
        }

        let saved = self.clinic.save_pet(pet).await?;
        log::info!("Added pet {:?} to owner {}", saved.id, owner_id);
        Ok(ViewOutcome::redirect(owner_path(owner_id)))
    }

    pub async fn init_update_form(&self, owner_id: u32, pet_id: u32) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        let pet = self.load_pet(owner_id, pet_id).await?;
        let types = self.clinic.find_pet_types().await?;
        Ok(Self::pet_form(owner, pet, types, Errors::new()))
    }

    pub async fn process_update_form(&self, owner_id: u32, pet_id: u32, form: PetForm) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        let mut pet = self.load_pet(owner_id, pet_id).await?;
        let types = self.clinic.find_pet_types().await?;

        let mut errors = form.bind(&mut pet, &types);
        let clashes = owner
            .pet_named(&pet.name)
            .map_or(false, |other| other.id != Some(pet_id));
        if clashes {
            errors.push("name", Violation::Duplicate);
        }
        errors.extend(pet.validate());

        if !errors.is_empty() {
            return Ok(Self::pet_form(owner, pet, types, errors));
        }

        self.clinic.save_pet(pet).await?;
        log::info!("Updated pet {} of owner {}", pet_id, owner_id);
        Ok(ViewOutcome::redirect(owner_path(owner_id)))
    }
}
