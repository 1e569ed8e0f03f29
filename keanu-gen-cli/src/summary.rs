//! Human-readable run summary on stdout.

use colored::Colorize;

use keanu_gen_driver::{GenerateReport, TemplateOutcome};

pub fn print(report: &GenerateReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = report.written().len();
    let failed = report.failures().len();

    let line = format!(
        "{prefix}{written} written, {} skipped, {failed} failed",
        report.skipped()
    );
    if failed == 0 {
        println!("{} {line}", "✓".green());
    } else {
        println!("{} {line}", "✗".red());
    }

    for outcome in &report.outcomes {
        match outcome {
            TemplateOutcome::Written { path, .. } => println!("  ✎  {}", path.display()),
            TemplateOutcome::WouldWrite { path, .. } => println!("  ~  {}", path.display()),
            TemplateOutcome::Failed { template, stage, message } => {
                println!("  {}  {template} ({stage}): {message}", "!".red())
            }
            TemplateOutcome::NotLeaf { .. } | TemplateOutcome::Empty { .. } => {}
        }
    }
}
