//! Request handlers

pub mod health;
pub mod models;
pub mod scoring;
