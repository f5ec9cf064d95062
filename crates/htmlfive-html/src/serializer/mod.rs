//! Document serializers.
//!
//! [`HTMLExporter`] writes plain HTML that parses back to the same tree;
//! [`HTMLFormatter`] writes escaped, colored HTML for showing markup inside
//! a page.

/// Plain HTML output.
pub mod exporter;
/// Escaped and syntax-colored output.
pub mod formatter;

pub use exporter::HTMLExporter;
pub use formatter::{FormatterOptions, HTMLFormatter};
