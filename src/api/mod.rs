pub mod controllers;
pub mod forms;
pub mod handlers;
pub mod state;
pub mod view;
