//! Template structure read from Tera's parse tree.
//!
//! [`outline`] lists the blocks a template defines (nested ones included) and
//! the templates it needs at render time through `extends`, `import` and
//! `include`. Loading uses the dependencies to assemble an isolated
//! [`Tera`](tera::Tera); leaf detection uses the block names.

use tera::ast::Node;
use tera::Template;

/// A template referenced by another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    /// `include … ignore missing`, or one candidate of an include list.
    pub optional: bool,
}

/// Blocks and dependencies of one parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// Block names in document order, each block before the ones nested in it.
    pub blocks: Vec<String>,
    pub dependencies: Vec<Dependency>,
}

/// Outline a template parsed with [`Template::new`].
pub fn outline(template: &Template) -> Outline {
    let mut out = Outline::default();
    if let Some(parent) = &template.parent {
        out.dependencies.push(Dependency { name: parent.clone(), optional: false });
    }
    for (file, _namespace) in &template.imported_macro_files {
        out.dependencies.push(Dependency { name: file.clone(), optional: false });
    }
    walk(&template.ast, &mut out);
    out
}

fn walk(nodes: &[Node], out: &mut Outline) {
    for node in nodes {
        match node {
            Node::Block(_, block, _) => {
                out.blocks.push(block.name.clone());
                walk(&block.body, out);
            }
            Node::Include(_, names, ignore_missing) => {
                // Tera renders the first candidate that exists.
                let optional = *ignore_missing || names.len() > 1;
                for name in names {
                    out.dependencies.push(Dependency { name: name.clone(), optional });
                }
            }
            Node::Forloop(_, for_loop, _) => {
                walk(&for_loop.body, out);
                if let Some(empty) = &for_loop.empty_body {
                    walk(empty, out);
                }
            }
            Node::If(cond, _) => {
                for (_, _, body) in &cond.conditions {
                    walk(body, out);
                }
                if let Some((_, body)) = &cond.otherwise {
                    walk(body, out);
                }
            }
            Node::FilterSection(_, section, _) => walk(&section.body, out),
            Node::MacroDefinition(_, definition, _) => walk(&definition.body, out),
            _ => {}
        }
    }
}
