// logslice - app/mod.rs
//
// Application layer: filesystem access and run orchestration on top of
// the pure core.

pub mod config;
pub mod run;
