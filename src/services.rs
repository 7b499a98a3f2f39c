// src/services.rs

pub mod auth;
pub use auth::AuthService;
pub mod magazzino;
pub use magazzino::MagazzinoService;
