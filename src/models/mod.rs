pub mod lmm;
pub mod model;
