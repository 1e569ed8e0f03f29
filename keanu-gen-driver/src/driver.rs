//! Render driver: discover → load → classify → render → write.
//!
//! Every step after discovery is isolated per template. A template that fails
//! to load, classify, render or write is logged at `error`, recorded in the
//! [`GenerateReport`] and skipped; the scan continues. Only an unusable output
//! directory or a failed enumeration aborts the run.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use keanu_gen_core::{RenderContext, TemplateEngine, TemplateId};

use crate::error::GenerateError;
use crate::leaf::{classify, Classification};
use crate::writer::{write_output, WriteResult};

// ---------------------------------------------------------------------------
// Options and outcomes
// ---------------------------------------------------------------------------

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Existing directory rendered files are written into.
    pub output_dir: PathBuf,
    /// Only templates whose name ends in `.<extension>` are considered.
    pub extension: Option<String>,
    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
}

/// Step at which a template failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Detect,
    Render,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Detect => write!(f, "detect"),
            Stage::Render => write!(f, "render"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// What happened to one discovered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutcome {
    Written { template: String, path: PathBuf },
    WouldWrite { template: String, path: PathBuf },
    /// Skipped: `block` rendered empty.
    NotLeaf { template: String, block: String },
    /// Skipped: the full render was empty.
    Empty { template: String },
    Failed { template: String, stage: Stage, message: String },
}

impl TemplateOutcome {
    pub fn template(&self) -> &str {
        match self {
            TemplateOutcome::Written { template, .. }
            | TemplateOutcome::WouldWrite { template, .. }
            | TemplateOutcome::NotLeaf { template, .. }
            | TemplateOutcome::Empty { template }
            | TemplateOutcome::Failed { template, .. } => template,
        }
    }
}

/// Outcome of a generation run, one entry per discovered template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub outcomes: Vec<TemplateOutcome>,
}

impl GenerateReport {
    /// Files written, or that would have been in dry-run mode.
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TemplateOutcome::Written { path, .. }
                | TemplateOutcome::WouldWrite { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Templates skipped as non-leaf or empty.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(o, TemplateOutcome::NotLeaf { .. } | TemplateOutcome::Empty { .. })
            })
            .count()
    }

    pub fn failures(&self) -> Vec<&TemplateOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TemplateOutcome::Failed { .. }))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Verify the output directory is usable.
pub fn check_output_dir(path: &Path) -> Result<(), GenerateError> {
    let meta = std::fs::metadata(path).map_err(|source| GenerateError::OutputDir {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(GenerateError::OutputNotDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Output path for a template: `<output_dir>/<file name minus last suffix>`.
pub fn output_path(output_dir: &Path, id: &TemplateId) -> PathBuf {
    match id.output_file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(&id.name),
    }
}

/// Render every leaf template found by `engine` into `opts.output_dir`.
pub fn generate<E: TemplateEngine>(
    engine: &E,
    ctx: &RenderContext,
    opts: &GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    check_output_dir(&opts.output_dir)?;

    let ids = engine
        .list_templates(opts.extension.as_deref())
        .map_err(|e| GenerateError::Discovery(Box::new(e)))?;
    tracing::debug!("discovered {} template(s)", ids.len());

    let mut report = GenerateReport::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    for id in &ids {
        let outcome = process(engine, ctx, opts, id, &mut claimed);
        report.outcomes.push(outcome);
    }
    Ok(report)
}

/// `err` followed by each of its sources, skipping text a wrapper already shows.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn failed(id: &TemplateId, stage: Stage, err: &dyn std::error::Error) -> TemplateOutcome {
    let message = error_chain(err);
    tracing::error!("error during {stage} of template {}: {message}", id.name);
    TemplateOutcome::Failed {
        template: id.name.clone(),
        stage,
        message,
    }
}

fn process<E: TemplateEngine>(
    engine: &E,
    ctx: &RenderContext,
    opts: &GenerateOptions,
    id: &TemplateId,
    claimed: &mut HashSet<PathBuf>,
) -> TemplateOutcome {
    let template = match engine.load(id) {
        Ok(t) => t,
        Err(e) => return failed(id, Stage::Load, &e),
    };

    match classify(engine, &template, &id.name, ctx) {
        Ok(Classification::Leaf) => {}
        Ok(Classification::NotLeaf { block }) => {
            tracing::debug!("skipping template {} as it is not a leaf template", id.name);
            return TemplateOutcome::NotLeaf {
                template: id.name.clone(),
                block,
            };
        }
        Err(e) => return failed(id, Stage::Detect, &e),
    }

    let dest = output_path(&opts.output_dir, id);
    tracing::debug!("writing render from {} to {}", id.filename.display(), dest.display());

    let rendered = match engine.render(&template, ctx) {
        Ok(r) => r,
        Err(e) => return failed(id, Stage::Render, &e),
    };
    if rendered.is_empty() {
        tracing::info!("skipping {}, empty output", dest.display());
        return TemplateOutcome::Empty {
            template: id.name.clone(),
        };
    }

    if !claimed.insert(dest.clone()) {
        tracing::warn!("{} overwrites output of an earlier template", dest.display());
    }

    match write_output(&dest, &rendered, opts.dry_run) {
        Ok(WriteResult::Written { path }) => TemplateOutcome::Written {
            template: id.name.clone(),
            path,
        },
        Ok(WriteResult::WouldWrite { path }) => TemplateOutcome::WouldWrite {
            template: id.name.clone(),
            path,
        },
        Err(e) => failed(id, Stage::Write, &e),
    }
}
