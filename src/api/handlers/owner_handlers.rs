use actix_web::{web, Responder};

use crate::api::controllers::OwnerController;
use crate::api::forms::{FindOwnersQuery, OwnerForm};
use crate::api::state::AppState;
use crate::api::view::{respond, Model, View, ViewOutcome};

pub async fn welcome(
    state: web::Data<AppState>
) -> impl Responder {
    respond(state.renderer.as_ref(), Ok(ViewOutcome::render(View::Welcome, Model::new())))
}

pub async fn init_creation_form(
    state: web::Data<AppState>
) -> impl Responder {
    let outcome = OwnerController::new(state.clinic.as_ref()).init_creation_form();
    respond(state.renderer.as_ref(), Ok(outcome))
}

pub async fn process_creation_form(
    state: web::Data<AppState>,
    form: web::Form<OwnerForm>
) -> impl Responder {
    let result = OwnerController::new(state.clinic.as_ref())
        .process_creation_form(form.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn init_find_form(
    state: web::Data<AppState>
) -> impl Responder {
    let outcome = OwnerController::new(state.clinic.as_ref()).init_find_form();
    respond(state.renderer.as_ref(), Ok(outcome))
}

pub async fn process_find_form(
    state: web::Data<AppState>,
    query: web::Query<FindOwnersQuery>
) -> impl Responder {
    let result = OwnerController::new(state.clinic.as_ref())
        .process_find_form(query.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn show_owner(
    state: web::Data<AppState>,
    owner_id: web::Path<u32>
) -> impl Responder {
    let result = OwnerController::new(state.clinic.as_ref())
        .show_owner(owner_id.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn init_update_form(
    state: web::Data<AppState>,
    owner_id: web::Path<u32>
) -> impl Responder {
    let result = OwnerController::new(state.clinic.as_ref())
        .init_update_form(owner_id.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}

pub async fn process_update_form(
    state: web::Data<AppState>,
    owner_id: web::Path<u32>,
    form: web::Form<OwnerForm>
) -> impl Responder {
    let result = OwnerController::new(state.clinic.as_ref())
        .process_update_form(owner_id.into_inner(), form.into_inner())
        .await;
    respond(state.renderer.as_ref(), result)
}
