use actix_web::{web, Responder};

use crate::api::controllers::VisitController;
use crate::api::forms::VisitForm;
use crate::api::state::AppState;
use crate::api::view::respond;

/// Path segments are `(owner, pet_id)`; the owner segment may be anything, `*` included.
type PetPath = web::Path<(String, u32)>;

pub async fn init_new_visit_form(
    state: web::Data<AppState>,
    path: PetPath
) -> impl Responder {
    let (_, pet_id) = path.into_inner();
    let result = VisitController::new(state.clinic.as_ref())
        .init_new_visit_form(pet_id)
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn process_new_visit_form(
    state: web::Data<AppState>,
    path: PetPath,
    form: web::Form<VisitForm>
) -> impl Responder {
    let (_, pet_id) = path.into_inner();
    let result = VisitController::new(state.clinic.as_ref())
        .process_new_visit_form(pet_id, form.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn show_visits(
    state: web::Data<AppState>,
    path: PetPath
) -> impl Responder {
    let (_, pet_id) = path.into_inner();
    let result = VisitController::new(state.clinic.as_ref())
        .show_visits(pet_id)
        .await;
    respond(state.renderer.as_ref(), result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::header, test, App};
    use serde_json::Value;

    use crate::api::handlers::test_support::{rajesh, state};
    use crate::domain::clinic::service::ClinicService;
    use crate::domain::pet::model::Pet;
    use crate::infrastructure::memory::clinic_store::InMemoryClinicService;
    use crate::routes::clinic_routes;

    const PET_ID: u32 = 1;

    async fn clinic_with_pet() -> Arc<InMemoryClinicService> {
        let clinic = Arc::new(InMemoryClinicService::new());
        clinic.save_owner(rajesh()).await.unwrap();
        clinic.save_pet(Pet { name: "Tommy".to_string(), ..Pet::new(rajesh().id.unwrap()) }).await.unwrap();
        clinic
    }

    #[actix_web::test]
    async fn test_init_new_visit_form() {
        let app = test::init_service(App::new().app_data(state(clinic_with_pet().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::get().uri("/owners/*/pets/1/visits/new").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "pets/createOrUpdateVisitForm");
        assert_eq!(body["model"]["visit"]["petId"], PET_ID);
    }

    #[actix_web::test]
    async fn test_process_new_visit_form_success() {
        let clinic = clinic_with_pet().await;
        let app = test::init_service(App::new().app_data(state(clinic.clone())).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/*/pets/1/visits/new")
            .set_form([("name", "rajesh"), ("description", "general checkup")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/owners/2373810");
        assert_eq!(clinic.find_visits_by_pet_id(PET_ID).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_process_new_visit_form_has_errors() {
        let app = test::init_service(App::new().app_data(state(clinic_with_pet().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/*/pets/1/visits/new")
            .set_form([("name", "rajesh")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "pets/createOrUpdateVisitForm");
        assert_eq!(body["model"]["errors"]["visit"][0]["field"], "description");
    }

    #[actix_web::test]
    async fn test_process_new_visit_form_bad_date() {
        let app = test::init_service(App::new().app_data(state(clinic_with_pet().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::post()
            .uri("/owners/2373810/pets/1/visits/new")
            .set_form([("date", "yesterday"), ("description", "general checkup")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["model"]["errors"]["visit"][0]["field"], "date");
        assert_eq!(body["model"]["errors"]["visit"][0]["code"], "typeMismatch");
        assert_eq!(body["model"]["errors"]["visit"][0]["rejectedValue"], "yesterday");
    }

    #[actix_web::test]
    async fn test_show_visits() {
        let app = test::init_service(App::new().app_data(state(clinic_with_pet().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::get().uri("/owners/*/pets/1/visits").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "visitList");
        assert!(body["model"]["visits"].is_array());
    }

    #[actix_web::test]
    async fn test_unknown_pet() {
        let app = test::init_service(App::new().app_data(state(clinic_with_pet().await)).configure(clinic_routes)).await;

        let req = test::TestRequest::get().uri("/owners/*/pets/99/visits/new").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
