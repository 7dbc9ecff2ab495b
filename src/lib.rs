// logslice - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and potential future programmatic use.
//
// The binary-specific CLI surface lives in `main.rs` and is not part of
// the library surface.

pub mod app;
pub mod core;
pub mod util;
