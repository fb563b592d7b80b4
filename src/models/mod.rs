//! Modelos de datos del sistema
//!
//! Structs que mapean a las tablas de la base de datos junto con los
//! requests y responses de la API.

pub mod group;
pub mod response;
pub mod ride;
pub mod user;
pub mod vehicle;

pub use group::*;
pub use response::*;
pub use ride::*;
pub use user::*;
pub use vehicle::*;
