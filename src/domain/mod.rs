pub mod clinic;
pub mod owner;
pub mod pet;
pub mod validation;
pub mod visit;

pub use clinic::service::ClinicService;
pub use owner::model::Owner;
pub use pet::model::{Pet, PetType};
pub use validation::{Errors, FieldError, Validate, Violation};
pub use visit::model::Visit;
