// Service module exports

pub mod countdown;
pub mod database;
pub mod date_field;
pub mod persistence;
pub mod settings;
pub mod text_fit;
