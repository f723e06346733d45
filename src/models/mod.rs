// Module exports for models

pub mod event;
pub mod segment;
pub mod settings;
