//! Módulo de base de datos
//!
//! Maneja la conexión y operaciones con PostgreSQL

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;
