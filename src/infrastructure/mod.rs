pub mod database;
pub mod memory;
pub mod mongodb;

pub use self::database::mongo_context;
pub use self::memory::clinic_store;
pub use self::mongodb::clinic_repository;
