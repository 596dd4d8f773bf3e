use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use petclinic::{
    api::state::AppState,
    domain::clinic::service::ClinicService,
    infrastructure::{clinic_repository::MongoClinicService, clinic_store::InMemoryClinicService, mongo_context::MongoContext},
    routes::clinic_routes,
    utils::{init_logging, AppConfig},
};

async fn open_clinic(config: &AppConfig) -> Arc<dyn ClinicService> {
    match &config.database_url {
        Some(url) => {
            let mongo_context = match MongoContext::init(url, &config.database_name).await {
                Ok(context) => context,
                Err(e) => {
                    log::error!("Failed to connect to MongoDB: {}", e);
                    std::process::exit(1);
                }
            };

            let clinic = MongoClinicService::new(&mongo_context);
            if let Err(e) = clinic.ensure_pet_types().await {
                log::error!("Failed to seed pet types: {}", e);
                std::process::exit(1);
            }
            Arc::new(clinic)
        },
        None if config.sample_data => match InMemoryClinicService::with_sample_data().await {
            Ok(clinic) => {
                log::info!("Using the in-memory store with sample data");
                Arc::new(clinic)
            },
            Err(e) => {
                log::error!("Failed to load sample data: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("Using an empty in-memory store");
            Arc::new(InMemoryClinicService::new())
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {

    let config = AppConfig::global();

    if let Err(e) = init_logging(&config.log_filter) {
        eprintln!("{}", e);
    }

    let app_state = AppState::new(open_clinic(config).await);

    log::info!("PetClinic listening on http://{}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(clinic_routes)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
