//! Render driver behaviour against a scripted engine.

mod support;

use std::fs;

use keanu_gen_core::RenderContext;
use keanu_gen_driver::{generate, GenerateError, GenerateOptions, Stage, TemplateOutcome};
use support::{StubBlock, StubEngine, StubTemplate};
use tempfile::TempDir;

fn opts(output: &TempDir) -> GenerateOptions {
    GenerateOptions {
        output_dir: output.path().to_path_buf(),
        extension: Some("tpl".to_string()),
        dry_run: false,
    }
}

fn file_names(output: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn leaf_is_written_and_non_leaf_is_skipped() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([
        StubTemplate::new("Leaf.swift.tpl")
            .block("tests", StubBlock::Text("x"))
            .renders("hello"),
        StubTemplate::new("Base.swift.tpl")
            .block("tests", StubBlock::Text(""))
            .renders("should never be written"),
    ]);

    let report = generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();

    assert_eq!(file_names(&output), ["Leaf.swift"]);
    assert_eq!(fs::read_to_string(output.path().join("Leaf.swift")).unwrap(), "hello");
    assert!(report.outcomes.contains(&TemplateOutcome::NotLeaf {
        template: "Base.swift.tpl".into(),
        block: "tests".into(),
    }));
    assert_eq!(report.written().len(), 1);
}

#[test]
fn empty_render_writes_nothing_and_is_not_a_failure() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([StubTemplate::new("Vacuous.swift.tpl").renders("")]);

    let report = generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();

    assert!(file_names(&output).is_empty());
    assert_eq!(
        report.outcomes,
        [TemplateOutcome::Empty { template: "Vacuous.swift.tpl".into() }]
    );
    assert!(report.failures().is_empty());
}

#[test]
fn per_template_failures_are_isolated() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([
        StubTemplate::new("A.swift.tpl").load_fails("syntax error"),
        StubTemplate::new("B.swift.tpl")
            .block("tests", StubBlock::Fault("bad filter"))
            .renders("unused"),
        StubTemplate::new("C.swift.tpl").render_fails("division by zero"),
        StubTemplate::new("D.swift.tpl").renders("ok"),
    ]);

    let report = generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();

    let stages: Vec<(String, Stage)> = report
        .failures()
        .into_iter()
        .filter_map(|o| match o {
            TemplateOutcome::Failed { template, stage, .. } => Some((template.clone(), *stage)),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        [
            ("A.swift.tpl".to_string(), Stage::Load),
            ("B.swift.tpl".to_string(), Stage::Detect),
            ("C.swift.tpl".to_string(), Stage::Render),
        ]
    );
    assert_eq!(file_names(&output), ["D.swift"]);
}

#[test]
fn undefined_block_still_allows_render() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([StubTemplate::new("U.swift.tpl")
        .block("params", StubBlock::Undefined)
        .block("tests", StubBlock::Text("t"))
        .renders("rendered")]);

    generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();
    assert_eq!(fs::read_to_string(output.path().join("U.swift")).unwrap(), "rendered");
}

#[test]
fn extension_filter_is_passed_to_discovery() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([
        StubTemplate::new("Kept.swift.tpl").renders("kept"),
        StubTemplate::new("partial.tera").renders("partial"),
    ]);

    let report = generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(file_names(&output), ["Kept.swift"]);
}

#[test]
fn existing_output_is_overwritten_and_rerun_is_identical() {
    let output = TempDir::new().unwrap();
    fs::write(output.path().join("Leaf.swift"), "stale").unwrap();
    let engine = StubEngine::new([StubTemplate::new("Leaf.swift.tpl").renders("fresh\n")]);

    generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();
    let first = fs::read(output.path().join("Leaf.swift")).unwrap();
    generate(&engine, &RenderContext::new(), &opts(&output)).unwrap();
    let second = fs::read(output.path().join("Leaf.swift")).unwrap();

    assert_eq!(first, b"fresh\n");
    assert_eq!(first, second);
}

#[test]
fn dry_run_writes_nothing() {
    let output = TempDir::new().unwrap();
    let engine = StubEngine::new([StubTemplate::new("Leaf.swift.tpl").renders("hello")]);
    let mut options = opts(&output);
    options.dry_run = true;

    let report = generate(&engine, &RenderContext::new(), &options).unwrap();
    assert!(matches!(report.outcomes[0], TemplateOutcome::WouldWrite { .. }));
    assert!(file_names(&output).is_empty());
}

#[test]
fn missing_output_dir_aborts_before_discovery() {
    let root = TempDir::new().unwrap();
    let engine = StubEngine::new([StubTemplate::new("Leaf.swift.tpl").renders("hello")]);
    let options = GenerateOptions {
        output_dir: root.path().join("absent"),
        extension: None,
        dry_run: false,
    };

    let err = generate(&engine, &RenderContext::new(), &options).unwrap_err();
    assert!(matches!(err, GenerateError::OutputDir { .. }), "got: {err}");
    assert!(engine.evaluated().is_empty());
}

#[test]
fn discovery_failure_is_fatal() {
    let output = TempDir::new().unwrap();
    let mut engine = StubEngine::new([]);
    engine.list_error = Some("permission denied".into());

    let err = generate(&engine, &RenderContext::new(), &opts(&output)).unwrap_err();
    assert!(matches!(err, GenerateError::Discovery(_)), "got: {err}");
}
