// src/db.rs

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod magazzino_repo;
pub use magazzino_repo::MagazzinoRepository;
