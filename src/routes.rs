use actix_web::web;

use crate::api::handlers::{owner_handlers, pet_handlers, visit_handlers};

/// Registers every clinic route. Literal owner paths come before `/owners/{owner_id}`.
pub fn clinic_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(owner_handlers::welcome))
    );

    cfg.service(
        web::resource("/owners/new")
            .route(web::get().to(owner_handlers::init_creation_form))
            .route(web::post().to(owner_handlers::process_creation_form))
    );

    cfg.service(
        web::resource("/owners/find")
            .route(web::get().to(owner_handlers::init_find_form))
    );

    cfg.service(
        web::resource("/owners")
            .route(web::get().to(owner_handlers::process_find_form))
    );

    cfg.service(
        web::resource("/owners/{owner_id}")
            .route(web::get().to(owner_handlers::show_owner))
    );

    cfg.service(
        web::resource("/owners/{owner_id}/edit")
            .route(web::get().to(owner_handlers::init_update_form))
            .route(web::post().to(owner_handlers::process_update_form))
    );

    cfg.service(
        web::resource("/owners/{owner_id}/pets/new")
            .route(web::get().to(pet_handlers::init_creation_form))
            .route(web::post().to(pet_handlers::process_creation_form))
    );

    cfg.service(
        web::resource("/owners/{owner_id}/pets/{pet_id}/edit")
            .route(web::get().to(pet_handlers::init_update_form))
            .route(web::post().to(pet_handlers::process_update_form))
    );

    cfg.service(
        web::resource("/owners/{owner}/pets/{pet_id}/visits/new")
            .route(web::get().to(visit_handlers::init_new_visit_form))
            .route(web::post().to(visit_handlers::process_new_visit_form))
    );

    cfg.service(
        web::resource("/owners/{owner}/pets/{pet_id}/visits")
            .route(web::get().to(visit_handlers::show_visits))
    );
}
