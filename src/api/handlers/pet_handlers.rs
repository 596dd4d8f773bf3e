use actix_web::{web, Responder};

use crate::api::controllers::PetController;
use crate::api::forms::PetForm;
use crate::api::state::AppState;
use crate::api::view::respond;

pub async fn init_creation_form(
    state: web::Data<AppState>,
    owner_id: web::Path<u32>
) -> impl Responder {
    let result = PetController::new(state.clinic.as_ref())
        .init_creation_form(owner_id.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn process_creation_form(
    state: web::Data<AppState>,
    owner_id: web::Path<u32>,
    form: web::Form<PetForm>
) -> impl Responder {
    let result = PetController::new(state.clinic.as_ref())
        .process_creation_form(owner_id.into_inner(), form.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn init_update_form(
    state: web::Data<AppState>,
    path: web::Path<(u32, u32)>
) -> impl Responder {
    let (owner_id, pet_id) = path.into_inner();
    let result = PetController::new(state.clinic.as_ref())
        .init_update_form(owner_id, pet_id)
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn process_update_form(
    state: web::Data<AppState>,
    path: web::Path<(u32, u32)>,
    form: web::Form<PetForm>
) -> impl Responder {
    let (owner_id, pet_id) = path.into_inner();
    let result = PetController::new(state.clinic.as_ref())
        .process_update_form(owner_id, pet_id, form.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::header, test, App};
    use serde_json::Value;

    use crate::api::handlers::test_support::state;
    use crate::domain::clinic::service::ClinicService;
    use crate::infrastructure::memory::clinic_store::InMemoryClinicService;
    use crate::routes::clinic_routes;

    async fn sample_clinic() -> Arc<InMemoryClinicService> {
        Arc::new(InMemoryClinicService::with_sample_data().await.unwrap())
    }

    #[actix_web::test]
    async fn test_init_creation_form() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/owners/1/pets/new").to_request()).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "pets/createOrUpdatePetForm");
        assert_eq!(body["model"]["owner"]["id"], 1);
        assert_eq!(body["model"]["types"].as_array().map(|types| types.len()), Some(6));
    }

    #[actix_web::test]
    async fn test_process_creation_form_success() {
        let clinic = sample_clinic().await;
        let app = test::init_service(App::new().app_data(state(clinic.clone())).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/1/pets/new")
            .set_form([("name", "Betty"), ("type", "hamster"), ("birthDate", "2015-02-12")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/owners/1");

        let owner = clinic.find_owner_by_id(1).await.unwrap().unwrap();
        assert!(owner.pet_named("Betty").is_some());
    }

    #[actix_web::test]
    async fn test_process_creation_form_has_errors() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/1/pets/new")
            .set_form([("name", "Betty"), ("birthDate", "2015-02-12")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "pets/createOrUpdatePetForm");
        assert_eq!(body["model"]["errors"]["pet"][0]["field"], "type");
        assert_eq!(body["model"]["errors"]["pet"][0]["code"], "required");
    }

    #[actix_web::test]
    async fn test_init_update_form() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/owners/1/pets/1/edit").to_request()).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "pets/createOrUpdatePetForm");
        assert_eq!(body["model"]["pet"]["name"], "Leo");
    }

    #[actix_web::test]
    async fn test_process_update_form_success() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/1/pets/1/edit")
            .set_form([("name", "Betty"), ("type", "hamster"), ("birthDate", "2015-02-12")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/owners/1");
    }

    #[actix_web::test]
    async fn test_process_update_form_has_errors() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/1/pets/1/edit")
            .set_form([("name", "Betty"), ("birthDate", "2015/02/12")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["model"]["errors"]["pet"][0]["field"], "birthDate");
        assert_eq!(body["model"]["errors"]["pet"][0]["code"], "typeMismatch");
    }

    #[actix_web::test]
    async fn test_unknown_owner() {
        let app = test::init_service(App::new().app_data(state(sample_clinic().await)).configure(clinic_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/owners/99/pets/new").to_request()).await;
        assert_eq!(resp.status(), 404);
    }
}
