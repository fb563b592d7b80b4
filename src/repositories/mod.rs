//! Acceso a datos
//!
//! Este módulo contiene los repositorios que encapsulan todas las
//! consultas SQL del sistema.

pub mod group_repository;
pub mod ride_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use group_repository::*;
pub use ride_repository::*;
pub use user_repository::*;
pub use vehicle_repository::*;
