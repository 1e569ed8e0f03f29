//! # keanu-gen-driver
//!
//! Leaf-template detection and the render driver.
//!
//! Call [`generate`] with any [`TemplateEngine`](keanu_gen_core::TemplateEngine)
//! to render every leaf template into an output directory, or
//! [`pipeline::run`] to do the same from a resolved configuration with the Tera
//! engine and the built-in type catalogue.

pub mod driver;
pub mod error;
pub mod leaf;
pub mod pipeline;
pub mod writer;

pub use driver::{generate, GenerateOptions, GenerateReport, Stage, TemplateOutcome};
pub use error::GenerateError;
pub use leaf::{classify, is_leaf, Classification};
pub use writer::{write_output, WriteResult};
