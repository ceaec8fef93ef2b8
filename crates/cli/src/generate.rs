//! The generation run with progress output.

use std::time::Instant;

use apigen_core::openapi::DocumentSummary;
use apigen_core::{GenerationReport, GeneratorConfig, SpecSource, WriteOutcome, generate};
use console::style;
use tracing::debug;

use crate::common::{format_elapsed_ms, spinner};

pub async fn run(config: &GeneratorConfig) -> i32 {
    let start = Instant::now();
    let progress = spinner(&loading_message(&config.source));
    let result = generate(config).await;
    progress.finish_and_clear();

    match result {
        Ok(report) => {
            print_report(&report);
            println!(
                "{} {} endpoints into {} ({})",
                style("Generated").green().bold(),
                report.endpoint_count,
                config.output_dir.display(),
                format_elapsed_ms(start)
            );
            0
        }
        Err(err) => {
            debug!(error = ?err, "generation failed");
            eprintln!("{} {err}", style("error:").red().bold());
            1
        }
    }
}

fn loading_message(source: &SpecSource) -> String {
    match source {
        SpecSource::File(path) => format!("Reading {}", path.display()),
        SpecSource::Urls(urls) if urls.len() == 1 => format!("Fetching {}", urls[0]),
        SpecSource::Urls(urls) => format!("Fetching {} specifications", urls.len()),
    }
}

fn document_line(document: &DocumentSummary) -> String {
    let prefix = if document.prefix.is_empty() {
        String::new()
    } else {
        format!(" [{}]", document.prefix)
    };
    format!(
        "{} v{}{prefix}: {} endpoints ({})",
        document.title, document.version, document.endpoint_count, document.origin
    )
}

fn print_report(report: &GenerationReport) {
    for document in &report.documents {
        println!("  {} {}", style("loaded").cyan(), document_line(document));
    }
    for file in &report.files {
        let label = match file.outcome {
            WriteOutcome::Written => style(file.outcome.as_str()).green(),
            WriteOutcome::Created => style(file.outcome.as_str()).green().bold(),
            WriteOutcome::Skipped => style(file.outcome.as_str()).yellow(),
        };
        println!("  {label} {}", file.path.display());
    }
    if report.shared_type_count > 0 {
        println!("  {} recursive types hoisted", report.shared_type_count);
    }
}
