pub mod log_euler;
