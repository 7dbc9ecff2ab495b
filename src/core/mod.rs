// logslice - core/mod.rs
//
// Core layer: pure extraction logic. Operates on Read/Write trait
// objects, never touches the filesystem directly.

pub mod extract;
pub mod timestamp;
