// src/handlers.rs

pub mod auth;
pub mod magazzino;
pub mod pages;
pub mod ui;
