pub mod aggregate;
pub mod hit_model;
pub mod pmf;
