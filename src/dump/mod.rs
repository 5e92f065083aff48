// ABOUTME: Dump generation: escaping, document assembly, chunked INSERT emission
// ABOUTME: Exports the generator entry points and the finished document type

pub mod escape;
pub mod generator;

pub use generator::{generate_dump, generate_dump_with_progress, DumpDocument};
