pub mod auth_routes;
pub mod ride_routes;
pub mod vehicle_routes;
