//! Serializable rendering payload built from a [`TypeCatalogue`].
//!
//! Templates cannot call methods, so every descriptor is flattened into an
//! object carrying its name, whether it is conditional, and its guard:
//!
//! ```text
//! {% for type in ScalarTypes %}
//! {% if type.is_conditional %}#if {{ type.condition }}{% endif %}
//! func test{{ type.name }}() { … }
//! {% endfor %}
//! ```

use serde::{Deserialize, Serialize};

use keanu_gen_core::{MatrixType, RenderContext, TypeCatalogue, TypeDescriptor};

use crate::error::RenderError;

/// Context variable holding the scalar types.
pub const SCALAR_TYPES: &str = "ScalarTypes";
/// Context variable holding the matrix types.
pub const MATRIX_TYPES: &str = "MatrixTypes";

/// Rendering payload shared by every template of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    #[serde(rename = "ScalarTypes")]
    pub scalar_types: Vec<TypeCtx>,
    #[serde(rename = "MatrixTypes")]
    pub matrix_types: Vec<MatrixCtx>,
}

/// A scalar type as templates see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCtx {
    pub name: String,
    pub is_conditional: bool,
    /// Guard expression; `"true"` for unconditional types.
    pub condition: String,
}

/// A matrix type as templates see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCtx {
    pub name: String,
    pub is_conditional: bool,
    pub condition: String,
    pub contiguous: bool,
}

impl From<&TypeDescriptor> for TypeCtx {
    fn from(ty: &TypeDescriptor) -> Self {
        TypeCtx {
            name: ty.name.0.clone(),
            is_conditional: ty.is_conditional(),
            condition: ty.guard_expression(),
        }
    }
}

impl From<&MatrixType> for MatrixCtx {
    fn from(ty: &MatrixType) -> Self {
        MatrixCtx {
            name: ty.descriptor.name.0.clone(),
            is_conditional: ty.descriptor.is_conditional(),
            condition: ty.descriptor.guard_expression(),
            contiguous: ty.contiguous,
        }
    }
}

impl TemplateContext {
    /// Build a [`TemplateContext`] from a [`TypeCatalogue`].
    pub fn from_catalogue(catalogue: &TypeCatalogue) -> Self {
        TemplateContext {
            scalar_types: catalogue.scalar_types.iter().map(TypeCtx::from).collect(),
            matrix_types: catalogue.matrix_types.iter().map(MatrixCtx::from).collect(),
        }
    }

    /// Convert to the engine-neutral [`RenderContext`].
    pub fn to_render_context(&self) -> Result<RenderContext, RenderError> {
        let mut ctx = RenderContext::new();
        ctx.insert(SCALAR_TYPES, &self.scalar_types)?;
        ctx.insert(MATRIX_TYPES, &self.matrix_types)?;
        Ok(ctx)
    }
}

/// Convert a [`RenderContext`] into a [`tera::Context`].
pub fn to_tera_context(ctx: &RenderContext) -> tera::Context {
    let mut tera_ctx = tera::Context::new();
    for (name, value) in ctx.iter() {
        tera_ctx.insert(name.as_str(), value);
    }
    tera_ctx
}
