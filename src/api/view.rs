use std::collections::BTreeMap;

use actix_web::{http::header, HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::owner::model::Owner;
use crate::domain::pet::model::{Pet, PetType};
use crate::domain::validation::Errors;
use crate::domain::visit::model::Visit;
use crate::utils::errors::ApiError;

/// Model attribute keys consumed by the templates.
pub mod attr {
    pub const OWNER: &str = "owner";
    pub const SELECTIONS: &str = "selections";
    pub const PET: &str = "pet";
    pub const TYPES: &str = "types";
    pub const VISIT: &str = "visit";
    pub const VISITS: &str = "visits";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    OwnerForm,
    FindOwners,
    OwnersList,
    OwnerDetails,
    PetForm,
    VisitForm,
    VisitList,
    Welcome,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::OwnerForm => "owners/createOrUpdateOwnerForm",
            View::FindOwners => "owners/findOwners",
            View::OwnersList => "owners/ownersList",
            View::OwnerDetails => "owners/ownerDetails",
            View::PetForm => "pets/createOrUpdatePetForm",
            View::VisitForm => "pets/createOrUpdateVisitForm",
            View::VisitList => "visitList",
            View::Welcome => "welcome",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelValue {
    Owner(Owner),
    Owners(Vec<Owner>),
    Pet(Pet),
    PetTypes(Vec<PetType>),
    Visit(Visit),
    Visits(Vec<Visit>),
}

impl From<Owner> for ModelValue {
    fn from(owner: Owner) -> Self {
        ModelValue::Owner(owner)
    }
}

impl From<Vec<Owner>> for ModelValue {
    fn from(owners: Vec<Owner>) -> Self {
        ModelValue::Owners(owners)
    }
}

impl From<Pet> for ModelValue {
    fn from(pet: Pet) -> Self {
        ModelValue::Pet(pet)
    }
}

impl From<Vec<PetType>> for ModelValue {
    fn from(types: Vec<PetType>) -> Self {
        ModelValue::PetTypes(types)
    }
}

impl From<Visit> for ModelValue {
    fn from(visit: Visit) -> Self {
        ModelValue::Visit(visit)
    }
}

impl From<Vec<Visit>> for ModelValue {
    fn from(visits: Vec<Visit>) -> Self {
        ModelValue::Visits(visits)
    }
}

/// Named values handed to the view, plus field errors keyed by attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    #[serde(flatten)]
    attributes: BTreeMap<&'static str, ModelValue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<&'static str, Errors>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<ModelValue>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    /// Empty error sets are not recorded.
    pub fn with_errors(mut self, key: &'static str, errors: Errors) -> Self {
        if !errors.is_empty() {
            self.errors.insert(key, errors);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ModelValue> {
        self.attributes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn owner(&self) -> Option<&Owner> {
        match self.get(attr::OWNER) {
            Some(ModelValue::Owner(owner)) => Some(owner),
            _ => None,
        }
    }

    pub fn selections(&self) -> Option<&[Owner]> {
        match self.get(attr::SELECTIONS) {
            Some(ModelValue::Owners(owners)) => Some(owners),
            _ => None,
        }
    }

    pub fn pet(&self) -> Option<&Pet> {
        match self.get(attr::PET) {
            Some(ModelValue::Pet(pet)) => Some(pet),
            _ => None,
        }
    }

    pub fn visit(&self) -> Option<&Visit> {
        match self.get(attr::VISIT) {
            Some(ModelValue::Visit(visit)) => Some(visit),
            _ => None,
        }
    }

    pub fn visits(&self) -> Option<&[Visit]> {
        match self.get(attr::VISITS) {
            Some(ModelValue::Visits(visits)) => Some(visits),
            _ => None,
        }
    }

    pub fn errors(&self, key: &str) -> Option<&Errors> {
        self.errors.get(key)
    }

    pub fn has_errors(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn has_field_error(&self, key: &str, field: &str) -> bool {
        self.errors(key).map_or(false, |errors| errors.has_field(field))
    }
}

/// What a controller asks the web layer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    Redirect(String),
    Render(View, Model),
}

impl ViewOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        ViewOutcome::Redirect(path.into())
    }

    pub fn render(view: View, model: Model) -> Self {
        ViewOutcome::Render(view, model)
    }
}

/// Turns a logical view and its model into a response body.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View, model: &Model) -> HttpResponse;
}

#[derive(Serialize)]
struct RenderedView<'a> {
    view: &'static str,
    model: &'a Model,
}

/// Emits `{"view": ..., "model": {...}}` for an external template engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: View, model: &Model) -> HttpResponse {
        HttpResponse::Ok().json(RenderedView { view: view.name(), model })
    }
}

pub fn respond(renderer: &dyn ViewRenderer, result: Result<ViewOutcome, ApiError>) -> HttpResponse {
    match result {
        Ok(ViewOutcome::Redirect(path)) => HttpResponse::Found()
            .insert_header((header::LOCATION, path))
            .finish(),
        Ok(ViewOutcome::Render(view, model)) => renderer.render(view, &model),
        Err(e) => e.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Violation;

    #[test]
    fn test_model_skips_empty_errors() {
        let model = Model::new()
            .with(attr::OWNER, Owner::default())
            .with_errors(attr::OWNER, Errors::new());

        assert!(model.contains(attr::OWNER));
        assert!(!model.has_errors(attr::OWNER));
    }

    #[test]
    fn test_model_serializes_attributes_and_errors() {
        let mut errors = Errors::new();
        errors.push("address", Violation::Required);
        let model = Model::new()
            .with(attr::OWNER, Owner::with_last_name("Davis"))
            .with_errors(attr::OWNER, errors);

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["owner"]["lastName"], "Davis");
        assert_eq!(json["errors"]["owner"][0]["field"], "address");
    }

    #[test]
    fn test_typed_accessors() {
        let model = Model::new().with(attr::VISITS, Vec::<Visit>::new());

        assert_eq!(model.visits().map(|v| v.len()), Some(0));
        assert!(model.owner().is_none());
        assert!(model.selections().is_none());
    }

    #[actix_web::test]
    async fn test_redirect_response() {
        let response = respond(&JsonViewRenderer, Ok(ViewOutcome::redirect("/owners/1")));

        assert_eq!(response.status(), 302);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/owners/1");
    }

    #[actix_web::test]
    async fn test_error_response() {
        let response = respond(&JsonViewRenderer, Err(ApiError::owner_not_found(5)));
        assert_eq!(response.status(), 404);
    }

    #[actix_web::test]
    async fn test_render_response() {
        let response = respond(&JsonViewRenderer, Ok(ViewOutcome::render(View::Welcome, Model::new())));
        assert_eq!(response.status(), 200);

        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["view"], "welcome");
    }
}
