//! Output formats for benchmark results

pub mod json_export;
pub mod summary;

pub use json_export::JsonExporter;
pub use summary::render_summary;
