//! # keanu-gen-renderer
//!
//! Tera-backed [`TemplateEngine`](keanu_gen_core::TemplateEngine) and the
//! render context built from the type catalogue.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keanu_gen_core::{TemplateEngine, TypeCatalogue};
//! use keanu_gen_renderer::{TemplateContext, TeraEngine};
//!
//! fn render_all(dir: std::path::PathBuf) -> Result<(), keanu_gen_renderer::RenderError> {
//!     let engine = TeraEngine::new([dir]);
//!     let ctx = TemplateContext::from_catalogue(&TypeCatalogue::standard()).to_render_context()?;
//!     for id in engine.list_templates(Some("tpl"))? {
//!         let template = engine.load(&id)?;
//!         println!("{}: {} bytes", id, engine.render(&template, &ctx)?.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod blocks;
pub mod context;
pub mod engine;
pub mod error;

pub use context::{MatrixCtx, TemplateContext, TypeCtx};
pub use engine::{LoadedTemplate, TeraEngine};
pub use error::RenderError;
