pub mod api;
pub mod community;
pub mod db;
pub mod error;
pub mod models;
pub mod presentation;
pub mod services;
pub mod state;
