pub mod aggregator;
pub mod cancel;
pub mod mc_engine;
