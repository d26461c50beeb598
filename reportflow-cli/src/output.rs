use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};

use reportflow::io::{DocumentFormat, OutputDestination, OutputOptions};

use crate::cli::OutputArgs;

/// Resolves `-o`/`--format` into output options. Without destinations the
/// value goes to stdout when `stdout_fallback` is set, and nowhere otherwise.
pub fn build_output_options(
    args: &OutputArgs,
    stdout_fallback: bool,
) -> Result<Option<OutputOptions>> {
    let mut diagnostics = DiagnosticCollector::default();
    let mut destinations = Vec::new();
    for raw in &args.outputs {
        if raw.trim().is_empty() {
            diagnostics.push("output destination cannot be empty");
        } else if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }
    if destinations.is_empty() {
        if !stdout_fallback {
            diagnostics.into_result()?;
            return Ok(None);
        }
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect::<Vec<_>>();
    let format = match args.format {
        Some(format) => format,
        None => infer_format_from_files(&file_paths, &mut diagnostics).unwrap_or_default(),
    };
    if !args.force {
        ensure_output_paths_available(&file_paths, &mut diagnostics);
    }
    diagnostics.into_result()?;

    Ok(Some(OutputOptions {
        format,
        pretty: !args.no_pretty,
        destinations,
    }))
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match DocumentFormat::from_path(path) {
            Some(format) => match detected {
                Some(existing) if existing != format => diagnostics.push(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            None => diagnostics.push(format!(
                "cannot infer format from output file {}; use one of {} or pass --format",
                path.display(),
                format_list()
            )),
        }
    }
    detected
}

fn ensure_output_paths_available(paths: &[PathBuf], diagnostics: &mut DiagnosticCollector) {
    for path in paths {
        if path.exists() {
            diagnostics.push(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}

fn format_list() -> String {
    DocumentFormat::available()
        .into_iter()
        .map(|format| format!(".{format}"))
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
