//! In-memory [`TemplateEngine`] for driver and detector tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use keanu_gen_core::{BlockOutcome, RenderContext, TemplateEngine, TemplateId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("stub failure: {0}")]
pub struct StubError(pub String);

/// Scripted result of evaluating one block.
#[derive(Debug, Clone)]
pub enum StubBlock {
    Text(&'static str),
    Undefined,
    Fault(&'static str),
}

#[derive(Debug, Clone)]
pub struct StubTemplate {
    pub name: String,
    pub blocks: Vec<(String, StubBlock)>,
    pub render: Result<String, String>,
    pub load_error: Option<String>,
}

impl StubTemplate {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            blocks: Vec::new(),
            render: Ok(String::new()),
            load_error: None,
        }
    }

    pub fn block(mut self, name: &str, block: StubBlock) -> Self {
        self.blocks.push((name.to_string(), block));
        self
    }

    pub fn renders(mut self, text: &str) -> Self {
        self.render = Ok(text.to_string());
        self
    }

    pub fn render_fails(mut self, message: &str) -> Self {
        self.render = Err(message.to_string());
        self
    }

    pub fn load_fails(mut self, message: &str) -> Self {
        self.load_error = Some(message.to_string());
        self
    }
}

/// Engine over a fixed set of scripted templates. Records evaluated blocks.
#[derive(Debug, Default)]
pub struct StubEngine {
    pub templates: BTreeMap<String, StubTemplate>,
    pub list_error: Option<String>,
    pub evaluated: RefCell<Vec<String>>,
}

impl StubEngine {
    pub fn new(templates: impl IntoIterator<Item = StubTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.name.clone(), t)).collect(),
            ..Self::default()
        }
    }

    pub fn evaluated(&self) -> Vec<String> {
        self.evaluated.borrow().clone()
    }
}

impl TemplateEngine for StubEngine {
    type Template = StubTemplate;
    type Error = StubError;

    fn list_templates(&self, extension: Option<&str>) -> Result<Vec<TemplateId>, StubError> {
        if let Some(e) = &self.list_error {
            return Err(StubError(e.clone()));
        }
        Ok(self
            .templates
            .keys()
            .filter(|name| extension.map_or(true, |ext| name.ends_with(&format!(".{ext}"))))
            .map(|name| TemplateId::new(name.clone(), format!("/templates/{name}")))
            .collect())
    }

    fn load(&self, id: &TemplateId) -> Result<StubTemplate, StubError> {
        let template = self
            .templates
            .get(&id.name)
            .ok_or_else(|| StubError(format!("no template {}", id.name)))?;
        match &template.load_error {
            Some(e) => Err(StubError(e.clone())),
            None => Ok(template.clone()),
        }
    }

    fn block_names(&self, template: &StubTemplate) -> Vec<String> {
        template.blocks.iter().map(|(name, _)| name.clone()).collect()
    }

    fn evaluate_block(
        &self,
        template: &StubTemplate,
        block: &str,
        _ctx: &RenderContext,
    ) -> BlockOutcome<StubError> {
        self.evaluated
            .borrow_mut()
            .push(format!("{}.{block}", template.name));
        match template.blocks.iter().find(|(name, _)| name == block) {
            Some((_, StubBlock::Text(t))) => BlockOutcome::Text((*t).to_string()),
            Some((_, StubBlock::Undefined)) => BlockOutcome::Undefined,
            Some((_, StubBlock::Fault(e))) => BlockOutcome::Fault(StubError((*e).to_string())),
            None => BlockOutcome::Fault(StubError(format!("no block {block}"))),
        }
    }

    fn render(&self, template: &StubTemplate, _ctx: &RenderContext) -> Result<String, StubError> {
        template.render.clone().map_err(StubError)
    }
}
