pub mod engine;
pub mod orbit;
