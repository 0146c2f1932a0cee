pub mod api;
pub mod config;
pub mod context;
pub mod entities;
pub mod error;
pub mod repository;
