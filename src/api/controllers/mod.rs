pub mod owner_controller;
pub mod pet_controller;
pub mod visit_controller;

pub use owner_controller::OwnerController;
pub use pet_controller::PetController;
pub use visit_controller::VisitController;
