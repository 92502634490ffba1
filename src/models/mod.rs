// Database models for the PrepDeck backend

pub mod auth;
pub mod forms;
pub mod payment;
pub mod plan;
pub mod user;
