pub mod clinic_store;
