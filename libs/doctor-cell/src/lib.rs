pub mod handlers;
pub mod models;
pub mod registry;
pub mod router;
pub mod seed;
pub mod services;

pub use models::*;
pub use registry::ScheduleRegistry;
pub use router::doctor_routes;
