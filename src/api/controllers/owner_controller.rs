use crate::api::forms::{FindOwnersQuery, OwnerForm};
use crate::api::view::{attr, Model, View, ViewOutcome};
use crate::domain::clinic::service::ClinicService;
use crate::domain::owner::model::Owner;
use crate::domain::validation::{Errors, Validate, Violation};
use crate::utils::errors::ApiError;

pub fn owner_path(id: u32) -> String {
    format!("/owners/{}", id)
}

pub struct OwnerController<'a> {
    clinic: &'a dyn ClinicService,
}

impl<'a> OwnerController<'a> {
    pub fn new(clinic: &'a dyn ClinicService) -> Self {
        OwnerController { clinic }
    }

    async fn load_owner(&self, id: u32) -> Result<Owner, ApiError> {
        match self.clinic.find_owner_by_id(id).await? {
            Some(owner) => Ok(owner),
            None => {
                log::warn!("Owner {} not found", id);
                Err(ApiError::owner_not_found(id))
            }
        }
    }

    fn owner_form(owner: Owner, errors: Errors) -> ViewOutcome {
        ViewOutcome::render(
            View::OwnerForm,
            Model::new()
                .with(attr::OWNER, owner)
                .with_errors(attr::OWNER, errors),
        )
    }

    pub fn init_creation_form(&self) -> ViewOutcome {
        Self::owner_form(Owner::default(), Errors::new())
    }

    pub async fn process_creation_form(&self, form: OwnerForm) -> Result<ViewOutcome, ApiError> {
        let owner = form.into_owner(None);
        let errors = owner.validate();
        if !errors.is_empty() {
            return Ok(Self::owner_form(owner, errors));
        }

        let saved = self.clinic.save_owner(owner).await?;
        let id = saved
            .id
            .ok_or_else(|| ApiError::InternalServerError("saved owner has no id".to_string()))?;
        log::info!("Created owner {}", id);
        Ok(ViewOutcome::redirect(owner_path(id)))
    }

    pub fn init_find_form(&self) -> ViewOutcome {
        ViewOutcome::render(View::FindOwners, Model::new().with(attr::OWNER, Owner::default()))
    }

    /// No match re-renders the search form with a `lastName` error, a single
    /// match goes straight to that owner, several matches are listed.
    pub async fn process_find_form(&self, query: FindOwnersQuery) -> Result<ViewOutcome, ApiError> {
        let last_name = query.last_name();
        let mut results = self.clinic.find_owners_by_last_name(last_name).await?;

        match results.len() {
            0 => {
                let mut errors = Errors::new();
                errors.push("lastName", Violation::NotFound);
                Ok(ViewOutcome::render(
                    View::FindOwners,
                    Model::new()
                        .with(attr::OWNER, Owner::with_last_name(last_name))
                        .with_errors(attr::OWNER, errors),
                ))
            },
            1 => {
                let owner = results.remove(0);
                match owner.id {
                    Some(id) => Ok(ViewOutcome::redirect(owner_path(id))),
                    None => Err(ApiError::InternalServerError("stored owner has no id".to_string())),
                }
            },
            _ => Ok(ViewOutcome::render(
                View::OwnersList,
                Model::new().with(attr::SELECTIONS, results),
            )),
        }
    }

    pub async fn show_owner(&self, owner_id: u32) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        Ok(ViewOutcome::render(View::OwnerDetails, Model::new().with(attr::OWNER, owner)))
    }

    pub async fn init_update_form(&self, owner_id: u32) -> Result<ViewOutcome, ApiError> {
        let owner = self.load_owner(owner_id).await?;
        Ok(Self::owner_form(owner, Errors::new()))
    }

    pub async fn process_update_form(&self, owner_id: u32, form: OwnerForm) -> Result<ViewOutcome, ApiError> {
        let mut owner = self.load_owner(owner_id).await?;
        owner.apply(form.into_owner(Some(owner_id)));

        let errors = owner.validate();
        if !errors.is_empty() {
            return Ok(Self::owner_form(owner, errors));
        }

        self.clinic.save_owner(owner).await?;
        log::info!("Updated owner {}", owner_id);
        Ok(ViewOutcome::redirect(owner_path(owner_id)))
    }
}
