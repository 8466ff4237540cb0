pub mod forward_curve;
pub mod statistics;
