//! Show command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::GraphFormat;
use crate::config::ShowConfig;
use crate::executors::{CommandExecutor, load_store};
use crate::graph::RagRenderer;

pub struct ShowExecutor;

impl CommandExecutor for ShowExecutor {
    type Config = ShowConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Rendering {} resource allocation graph...",
            style("📊").cyan(),
            format!("{:?}", config.format).to_lowercase()
        );

        let store = load_store(&config.scenario, config.limits)?;

        // Detection only matters when its result is drawn
        let check = config
            .highlight_cycle
            .then(|| store.run_deadlock_check());
        let cycle = check.as_ref().and_then(|check| check.cycle());

        let renderer = RagRenderer::new(config.highlight_cycle);
        let snapshot = store.snapshot();

        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        match config.format {
            GraphFormat::Ascii => renderer
                .render_ascii(&snapshot, cycle, output_writer.as_mut())
                .wrap_err("Failed to render ASCII graph")?,
            GraphFormat::Dot => renderer
                .render_dot(&snapshot, cycle, output_writer.as_mut())
                .wrap_err("Failed to render DOT graph")?,
            GraphFormat::Mermaid => renderer
                .render_mermaid(&snapshot, cycle, output_writer.as_mut())
                .wrap_err("Failed to render Mermaid graph")?,
        }

        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to flush graph output")?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
