//! Shared generation entrypoint used by the CLI.

use keanu_gen_core::{GeneratorConfig, TypeCatalogue};
use keanu_gen_renderer::{TemplateContext, TeraEngine};

use crate::driver::{generate, GenerateOptions, GenerateReport};
use crate::error::GenerateError;

/// Run a full generation pass for a resolved configuration.
///
/// Builds the Tera engine over `config.template_dirs` and the render context
/// from the built-in [`TypeCatalogue`], then hands both to [`generate`].
pub fn run(config: &GeneratorConfig, dry_run: bool) -> Result<GenerateReport, GenerateError> {
    let engine = TeraEngine::new(config.template_dirs.iter().cloned());
    let ctx = TemplateContext::from_catalogue(&TypeCatalogue::standard()).to_render_context()?;
    let opts = GenerateOptions {
        output_dir: config.output.clone(),
        extension: config.extension.clone(),
        dry_run,
    };
    generate(&engine, &ctx, &opts)
}
