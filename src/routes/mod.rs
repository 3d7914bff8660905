pub mod health;
pub mod quiz_routes;
