pub mod owner_handlers;
pub mod pet_handlers;
pub mod visit_handlers;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;

    use crate::api::state::AppState;
    use crate::domain::clinic::service::ClinicService;
    use crate::domain::owner::model::Owner;

    pub const OWNER_ID: u32 = 2373810;

    pub fn rajesh() -> Owner {
        Owner {
            id: Some(OWNER_ID),
            first_name: "rajesh babu".to_string(),
            last_name: "Mekathoti".to_string(),
            address: "193,miyapur".to_string(),
            city: "Hyderabad".to_string(),
            telephone: "8919325812".to_string(),
            pets: Vec::new(),
        }
    }

    pub fn state(clinic: Arc<dyn ClinicService>) -> web::Data<AppState> {
        web::Data::new(AppState::new(clinic))
    }
}
