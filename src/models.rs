// src/models.rs

pub mod auth;
pub mod authz;
pub mod magazzino;
pub mod ui;
