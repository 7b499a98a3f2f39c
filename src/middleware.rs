// src/middleware.rs

pub mod auth;
pub mod edge_gate;
pub mod ui_state;
