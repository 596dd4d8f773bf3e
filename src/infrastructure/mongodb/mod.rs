pub mod clinic_repository;
