use crate::api::controllers::owner_controller::owner_path;
use crate::api::forms::VisitForm;
use crate::api::view::{attr, Model, View, ViewOutcome};
use crate::domain::clinic::service::ClinicService;
use crate::domain::pet::model::Pet;
use crate::domain::validation::{Errors, Validate};
use crate::domain::visit::model::Visit;
use crate::utils::errors::ApiError;

/// Visit flows are addressed by pet; the owner segment of the path is not consulted.
pub struct VisitController<'a> {
    clinic: &'a dyn ClinicService,
}

impl<'a> VisitController<'a> {
    pub fn new(clinic: &'a dyn ClinicService) -> Self {
        VisitController { clinic }
    }

    async fn load_pet(&self, pet_id: u32) -> Result<Pet, ApiError> {
        match self.clinic.find_pet_by_id(pet_id).await? {
            Some(pet) => Ok(pet),
            None => {
                log::warn!("Pet {} not found", pet_id);
                Err(ApiError::pet_not_found(pet_id))
            }
        }
    }

    fn visit_form(pet: Pet, visit: Visit, errors: Errors) -> ViewOutcome {
        ViewOutcome::render(
            View::VisitForm,
            Model::new()
                .with(attr::PET, pet)
                .with(attr::VISIT, visit)
                .with_errors(attr::VISIT, errors),
        )
    }

    pub async fn init_new_visit_form(&self, pet_id: u32) -> Result<ViewOutcome, ApiError> {
        let pet = self.load_pet(pet_id).await?;
        Ok(Self::visit_form(pet, Visit::new(pet_id), Errors::new()))
    }

    pub async fn process_new_visit_form(&self, pet_id: u32, form: VisitForm) -> Result<ViewOutcome, ApiError> {
        let pet = self.load_pet(pet_id).await?;

        let mut visit = Visit::new(pet_id);
        let mut errors = form.bind(&mut visit);
        errors.extend(visit.validate());
        if !errors.is_empty() {
            return Ok(Self::visit_form(pet, visit, errors));
        }

        self.clinic.save_visit(visit).await?;
        log::info!("Recorded visit for pet {}", pet_id);
        Ok(ViewOutcome::redirect(owner_path(pet.owner_id)))
    }

    pub async fn show_visits(&self, pet_id: u32) -> Result<ViewOutcome, ApiError> {
        let pet = self.load_pet(pet_id).await?;
        let visits = self.clinic.find_visits_by_pet_id(pet_id).await?;
        Ok(ViewOutcome::render(
            View::VisitList,
            Model::new()
                .with(attr::PET, pet)
                .with(attr::VISITS, visits),
        ))
    }
}
