pub mod doctor;
pub mod leave;
pub mod schedule;
