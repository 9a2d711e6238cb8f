// Extraction rules - the core of the crate
// - compiler.rs: ExtractionSpec -> single-group pattern string
// - evaluator.rs: pattern + input -> captured value or diagnostic
// - engine.rs: ExtractionEngine, independent evaluation of a field set

pub mod compiler;
pub mod engine;
pub mod evaluator;

pub use compiler::{compile, compile_mode};
pub use engine::ExtractionEngine;
pub use evaluator::{evaluate, evaluate_spec, try_evaluate, validate};
