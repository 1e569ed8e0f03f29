//! Tera implementation of [`TemplateEngine`].
//!
//! # Discovery
//!
//! Every configured search directory is walked recursively. Template names are
//! paths relative to their search directory with `/` separators; when the same
//! name exists in several directories the first directory wins.
//!
//! # Loading
//!
//! Each template is loaded into its own [`Tera`] instance together with the
//! templates it reaches through `extends`, `include` and `import`. A broken
//! template therefore only fails itself and the templates that depend on it.
//!
//! # Block evaluation
//!
//! Tera only renders whole templates. To render one block, the owner's
//! inheritance chain is extended with a synthetic root whose only content is
//! that block. The block then resolves through the owner's own definitions,
//! with the owner's macro imports in scope, and `{{ super() }}` reaches the
//! same ancestors as in a full render.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tera::{Template, Tera};

use keanu_gen_core::{BlockOutcome, RenderContext, TemplateEngine, TemplateId};

use crate::blocks::{self, Outline};
use crate::context::to_tera_context;
use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// Template discovery helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Recursively collect files under `dir`. Unreadable subdirectories are
/// logged and skipped; only the top-level directory is required.
fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!("error listing {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::error!("error reading {}: {e}", path.display());
                continue;
            }
        };
        if meta.is_dir() {
            if let Err(e) = collect_template_files(&path, out) {
                tracing::error!("skipping directory {}: {e}", path.display());
            }
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn matches_extension(name: &str, extension: Option<&str>) -> bool {
    match extension.map(|ext| ext.strip_prefix('.').unwrap_or(ext)) {
        None | Some("") => true,
        Some(ext) => name
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1),
    }
}

/// Name prefix of the synthetic chain roots used to render a single block.
const BLOCK_ROOT_PREFIX: &str = "__keanu_gen_block__";

/// Returns `true` when the error chain reports a variable missing from the context.
pub fn is_undefined_variable(err: &tera::Error) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if e.to_string().contains("not found in context") {
            return true;
        }
        current = e.source();
    }
    false
}

// ---------------------------------------------------------------------------
// LoadedTemplate
// ---------------------------------------------------------------------------

/// A template and its dependency closure, ready to render.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub id: TemplateId,
    tera: Tera,
    blocks: Vec<String>,
}

impl LoadedTemplate {
    /// Names of the blocks this template defines, in document order.
    pub fn block_names(&self) -> &[String] {
        &self.blocks
    }

    /// A copy of the template set in which rendering this template yields only
    /// `block`.
    fn isolate_block(&self, block: &str) -> Result<Tera, RenderError> {
        let root_name = format!("{BLOCK_ROOT_PREFIX}{block}");
        let root = Template::new(
            &root_name,
            None,
            &format!("{{% block {block} %}}{{% endblock {block} %}}"),
        )?;
        let mut owner = self.tera.get_template(&self.id.name)?.clone();
        owner.parents.push(root_name.clone());

        let mut tera = self.tera.clone();
        tera.templates.insert(root_name, root);
        tera.templates.insert(self.id.name.clone(), owner);
        Ok(tera)
    }
}

// ---------------------------------------------------------------------------
// TeraEngine
// ---------------------------------------------------------------------------

/// Filesystem-backed Tera engine over an ordered list of search directories.
#[derive(Debug, Clone)]
pub struct TeraEngine {
    search_dirs: Vec<PathBuf>,
}

impl TeraEngine {
    /// Construct a new [`TeraEngine`] searching `search_dirs` in order.
    pub fn new(search_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        TeraEngine {
            search_dirs: search_dirs.into_iter().collect(),
        }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First search directory that holds `name`.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    }

    fn read_and_outline(&self, name: &str, path: &Path) -> Result<(String, Outline), RenderError> {
        let source = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let parsed = Template::new(name, Some(path.display().to_string()), &source).map_err(
            |source| RenderError::Parse {
                name: name.to_string(),
                source,
            },
        )?;
        Ok((source, blocks::outline(&parsed)))
    }
}

impl TemplateEngine for TeraEngine {
    type Template = LoadedTemplate;
    type Error = RenderError;

    fn list_templates(&self, extension: Option<&str>) -> Result<Vec<TemplateId>, RenderError> {
        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
        for dir in &self.search_dirs {
            if !dir.is_dir() {
                return Err(RenderError::SearchDir { path: dir.clone() });
            }
            let mut files = Vec::new();
            collect_template_files(dir, &mut files)?;
            for path in files {
                let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
                let name = normalize_template_name(rel);
                if matches_extension(&name, extension) {
                    found.entry(name).or_insert(path);
                }
            }
        }
        Ok(found
            .into_iter()
            .map(|(name, filename)| TemplateId::new(name, filename))
            .collect())
    }

    fn load(&self, id: &TemplateId) -> Result<LoadedTemplate, RenderError> {
        let (root_source, root) = self.read_and_outline(&id.name, &id.filename)?;

        let mut sources: BTreeMap<String, String> = BTreeMap::new();
        let mut queue: Vec<(String, String, bool)> = root
            .dependencies
            .iter()
            .map(|d| (d.name.clone(), id.name.clone(), d.optional))
            .collect();
        sources.insert(id.name.clone(), root_source);

        while let Some((name, referenced_by, optional)) = queue.pop() {
            if sources.contains_key(&name) {
                continue;
            }
            let Some(path) = self.locate(&name) else {
                if optional {
                    continue;
                }
                return Err(RenderError::TemplateNotFound { name, referenced_by });
            };
            let (source, outline) = self.read_and_outline(&name, &path)?;
            queue.extend(
                outline
                    .dependencies
                    .into_iter()
                    .map(|d| (d.name, name.clone(), d.optional)),
            );
            sources.insert(name, source);
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(sources.into_iter().collect::<Vec<_>>())?;

        Ok(LoadedTemplate {
            id: id.clone(),
            tera,
            blocks: root.blocks,
        })
    }

    fn block_names(&self, template: &LoadedTemplate) -> Vec<String> {
        template.block_names().to_vec()
    }

    fn evaluate_block(
        &self,
        template: &LoadedTemplate,
        block: &str,
        ctx: &RenderContext,
    ) -> BlockOutcome<RenderError> {
        if !template.blocks.iter().any(|name| name == block) {
            return BlockOutcome::Fault(RenderError::UnknownBlock {
                template: template.id.name.clone(),
                block: block.to_string(),
            });
        }
        let tera = match template.isolate_block(block) {
            Ok(tera) => tera,
            Err(e) => return BlockOutcome::Fault(e),
        };
        match tera.render(&template.id.name, &to_tera_context(ctx)) {
            Ok(text) => BlockOutcome::Text(text),
            Err(e) if is_undefined_variable(&e) => BlockOutcome::Undefined,
            Err(e) => BlockOutcome::Fault(e.into()),
        }
    }

    fn render(
        &self,
        template: &LoadedTemplate,
        ctx: &RenderContext,
    ) -> Result<String, RenderError> {
        Ok(template
            .tera
            .render(&template.id.name, &to_tera_context(ctx))?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
