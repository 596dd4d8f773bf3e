use std::sync::Arc;

use crate::api::view::{JsonViewRenderer, ViewRenderer};
use crate::domain::clinic::service::ClinicService;

#[derive(Clone)]
pub struct AppState {
    pub clinic: Arc<dyn ClinicService>,
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self {
        AppState { clinic, renderer: Arc::new(JsonViewRenderer) }
    }
}
