//! Publication build command implementation.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use pubmd_config::{CliSettings, Config};
use pubmd_publish::{BuildConfig, BuildReport, PublicationBuilder, Variant};
use pubmd_renderer::DocumentStats;

use crate::error::CliError;
use crate::output::Output;

/// Format of the "Generated on" footer line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Arguments for building publication outputs.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source file (default: FINAL_PUBLICATION.md or `[paths] source`).
    source: Option<PathBuf>,

    /// Output directory for the generated HTML files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Omit the publication footer.
    #[arg(long)]
    no_footer: bool,

    /// Path to configuration file (default: auto-discover pubmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source: self.source,
            output_dir: self.output_dir,
            title: self.title,
            footer_enabled: self.no_footer.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source = &config.paths_resolved.source;
        let output_dir = &config.paths_resolved.output_dir;

        output.separator();
        output.highlight("Generating publication outputs");
        output.separator();
        output.info(&format!("Source: {}", source.display()));
        output.info(&format!("Output: {}", output_dir.display()));
        output.info("");

        let builder = PublicationBuilder::new(build_config(&config, Local::now().naive_local()));
        let report = builder.build(source, output_dir)?;

        for written in &report.outputs {
            output.success(&format!("✓ Created {}", written.path.display()));
        }
        if report.stats.words == 0 {
            output.warning(&format!("Warning: {} has no content", source.display()));
        }

        print_statistics(&output, &report.stats);
        print_summary(&output, &report);

        output.info("");
        output.success("✓ Publication outputs generated successfully!");
        Ok(())
    }
}

/// Translate the loaded configuration into a builder configuration.
fn build_config(config: &Config, generated_at: NaiveDateTime) -> BuildConfig {
    let title = &config.document.title;
    BuildConfig {
        author: config.document.author.clone(),
        description: config.document.description.clone(),
        footer: footer_lines(config, generated_at),
        variants: config
            .outputs
            .iter()
            .map(|out| Variant {
                file: out.file.clone(),
                title: out.resolved_title(title),
                pdf_ready: out.pdf_ready,
                description: out.description.clone(),
            })
            .collect(),
    }
}

/// Compose footer lines: timestamp, document title, then configured lines.
fn footer_lines(config: &Config, generated_at: NaiveDateTime) -> Vec<String> {
    let footer = &config.footer;
    if !footer.enabled {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(footer.lines.len() + 2);
    if footer.timestamp {
        lines.push(format!(
            "Generated on {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ));
    }
    lines.push(config.document.title.clone());
    lines.extend(footer.lines.iter().cloned());
    lines
}

fn print_statistics(output: &Output, stats: &DocumentStats) {
    output.info("");
    output.highlight("Document statistics:");
    output.info(&format!("  Lines:       {}", stats.lines));
    output.info(&format!("  Words:       {}", stats.words));
    output.info(&format!("  Characters:  {}", stats.characters));
    output.info(&format!("  Headers:     {}", stats.headers));
    output.info(&format!("  Code blocks: {}", stats.code_blocks));
    output.info(&format!("  Tables:      {}", stats.tables));
}

fn print_summary(output: &Output, report: &BuildReport) {
    output.info("");
    output.highlight("Generated outputs:");
    for written in &report.outputs {
        let name = &written.variant.file;
        match &written.variant.description {
            Some(description) => output.info(&format!("  - {name}: {description}")),
            None => output.info(&format!("  - {name}")),
        }
    }

    let pdf_ready: Vec<&str> = report
        .outputs
        .iter()
        .filter(|written| written.variant.pdf_ready)
        .map(|written| written.variant.file.as_str())
        .collect();
    if let Some(first) = pdf_ready.first() {
        output.info("");
        output.highlight("To create a PDF:");
        output.info(&format!("  1. Open {first} in a web browser"));
        output.info("  2. Print (Ctrl+P / Cmd+P) and choose \"Save as PDF\"");
        output.info("  3. Enable background graphics for colored headers");
    }
}
