//! Leaf-template detection.
//!
//! A template is a *leaf* when every block it defines renders non-empty text
//! against the run's context. Base templates meant to be extended leave their
//! blocks empty and are therefore never emitted on their own.
//!
//! A block that references a variable the context does not bind is neither a
//! pass nor a fail: it is skipped and the remaining blocks decide.

use keanu_gen_core::{BlockOutcome, RenderContext, TemplateEngine};

/// Result of classifying one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Leaf,
    /// `block` rendered to nothing but whitespace.
    NotLeaf { block: String },
}

impl Classification {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Classification::Leaf)
    }
}

/// Classify `template` by evaluating each of its blocks against `ctx`.
///
/// Stops at the first empty block. A template without blocks is a leaf.
/// Engine faults other than undefined variables are returned to the caller.
pub fn classify<E: TemplateEngine>(
    engine: &E,
    template: &E::Template,
    name: &str,
    ctx: &RenderContext,
) -> Result<Classification, E::Error> {
    for block in engine.block_names(template) {
        match engine.evaluate_block(template, &block, ctx) {
            BlockOutcome::Text(text) => {
                let rendered = text.trim();
                tracing::debug!("rendered {name}.{block}: \"{rendered}\"");
                if rendered.is_empty() {
                    return Ok(Classification::NotLeaf { block });
                }
            }
            BlockOutcome::Undefined => {
                tracing::debug!("{name}.{block} references an undefined value; ignoring");
            }
            BlockOutcome::Fault(e) => return Err(e),
        }
    }
    Ok(Classification::Leaf)
}

/// Shorthand for `classify(..).map(|c| c.is_leaf())`.
pub fn is_leaf<E: TemplateEngine>(
    engine: &E,
    template: &E::Template,
    name: &str,
    ctx: &RenderContext,
) -> Result<bool, E::Error> {
    classify(engine, template, name, ctx).map(|c| c.is_leaf())
}
