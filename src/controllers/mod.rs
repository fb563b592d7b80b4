//! Lógica de negocio
//!
//! Este módulo contiene los controladores que implementan las
//! operaciones del sistema por encima de los repositorios.

pub mod auth_controller;
pub mod ride_controller;
pub mod vehicle_controller;

pub use auth_controller::*;
pub use ride_controller::*;
pub use vehicle_controller::*;
