//! The narrow interface the generator needs from a templating engine.
//!
//! Discovery, loading, single-block evaluation and full rendering are all the
//! leaf detector and the render driver ever ask of an engine. Keeping them
//! behind [`TemplateEngine`] lets the driver run against a stub in tests.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// TemplateId
// ---------------------------------------------------------------------------

/// Identity of a discovered template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    /// Name relative to its search directory, `/`-separated.
    pub name: String,
    /// Path of the template source on disk.
    pub filename: PathBuf,
}

impl TemplateId {
    pub fn new(name: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), filename: filename.into() }
    }

    /// Output file name: the base file name with its last suffix removed.
    ///
    /// `tests/ArithmeticTests.swift.tpl` becomes `ArithmeticTests.swift`.
    pub fn output_file_name(&self) -> Option<&std::ffi::OsStr> {
        Path::new(&self.filename).file_stem()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Immutable variable bindings shared by every template in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    vars: BTreeMap<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the serialized form of `value`.
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        self.vars.insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// ---------------------------------------------------------------------------
// BlockOutcome
// ---------------------------------------------------------------------------

/// Result of evaluating one named block against a context.
#[derive(Debug)]
pub enum BlockOutcome<E> {
    /// The block rendered; the text is untrimmed.
    Text(String),
    /// The block referenced a variable the context does not bind.
    Undefined,
    /// Any other engine failure.
    Fault(E),
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Capabilities the generator requires from a templating engine.
pub trait TemplateEngine {
    /// A loaded, ready-to-evaluate template.
    type Template;
    /// Engine failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Enumerate every template under the search path, optionally keeping only
    /// names ending in `.extension` (leading dot on the argument optional).
    fn list_templates(&self, extension: Option<&str>) -> Result<Vec<TemplateId>, Self::Error>;

    /// Load a template by identity.
    fn load(&self, id: &TemplateId) -> Result<Self::Template, Self::Error>;

    /// Names of the blocks the template defines.
    fn block_names(&self, template: &Self::Template) -> Vec<String>;

    /// Evaluate a single block.
    fn evaluate_block(
        &self,
        template: &Self::Template,
        block: &str,
        ctx: &RenderContext,
    ) -> BlockOutcome<Self::Error>;

    /// Render the whole template.
    fn render(&self, template: &Self::Template, ctx: &RenderContext) -> Result<String, Self::Error>;
}
