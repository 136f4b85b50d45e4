//! Batch conversion of parameter files
//!
//! Converts every model file in a directory into `<language>.json` in an
//! output directory, the layout sentence segmenters use to look up
//! tokenizer data by language name.

use super::output::write_document;
use super::summary::{BatchSummary, FileFailure};
use super::{export, ExportOptions};
use crate::adapters::source::{load_parameters, SourceFormat};
use crate::domain::{ExportDocument, PunktError, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Configuration for batch conversion
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Input format; detected per file when `None`
    pub format: Option<SourceFormat>,
    /// Options applied to every export
    pub export: ExportOptions,
    /// Stop at the first failing file
    pub fail_fast: bool,
    /// Terminate each document with a newline
    pub trailing_newline: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            format: None,
            export: ExportOptions::default(),
            fail_fast: false,
            trailing_newline: true,
        }
    }
}

/// Output path for an input file: `<output_dir>/<stem>.json`
pub fn output_path_for(input: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".json");
    Some(output_dir.join(name))
}

/// Convert every parameter file in `input_dir`
///
/// Files are processed one at a time in name order. Without an explicit
/// format only files with a recognized extension are converted; others are
/// skipped. A failing file is recorded in the summary and the remaining
/// files continue, unless `fail_fast` is set.
///
/// Two inputs with the same stem map to the same output. The first one
/// converted keeps it and the later one is recorded as a failure. An output
/// never replaces an input of the same batch. When `output_dir` is
/// `input_dir`, documents exported by an earlier run are skipped instead of
/// being read as parameter files.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or created, or on the
/// first failing file when `fail_fast` is set.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let start = Instant::now();
    let mut summary = BatchSummary::new();

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)
        .map_err(|e| {
            PunktError::Io(format!(
                "Failed to read directory {}: {}",
                input_dir.display(),
                e
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    inputs.sort();

    fs::create_dir_all(output_dir).map_err(|e| {
        PunktError::Io(format!(
            "Failed to create directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    // Outputs are named through the input directory when both are the same
    let in_place = same_directory(input_dir, output_dir);
    let target_dir = if in_place { input_dir } else { output_dir };

    tracing::info!(
        input_dir = %input_dir.display(),
        output_dir = %output_dir.display(),
        files = inputs.len(),
        "Starting batch conversion"
    );

    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        let format = match options.format {
            Some(format) => format,
            None => match SourceFormat::from_extension(&input) {
                Some(format) => format,
                None => {
                    tracing::debug!(path = %input.display(), "Skipping file with unknown format");
                    summary.add_skipped();
                    continue;
                }
            },
        };

        if in_place && is_exported_document(&input) {
            tracing::debug!(path = %input.display(), "Skipping previously exported document");
            summary.add_skipped();
            continue;
        }

        sources.push((input, format));
    }

    let source_paths: HashSet<PathBuf> = sources.iter().map(|(path, _)| path.clone()).collect();
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

    for (input, format) in sources {
        let result = claim_output(&input, target_dir, &source_paths, &written).and_then(
            |output| {
                convert_file(&input, &output, format, options).map(|entries| (output, entries))
            },
        );

        match result {
            Ok((output, entries)) => {
                tracing::info!(
                    input = %input.display(),
                    output = %output.display(),
                    entries,
                    "Converted"
                );
                written.insert(output.clone(), input.clone());
                summary.add_converted(input, output, entries);
            }
            Err(e) => {
                crate::log_error_with_context!(&e, input.display().to_string());
                if options.fail_fast {
                    return Err(e);
                }
                summary.add_failure(FileFailure::new(input, e.to_string()));
            }
        }
    }

    let summary = summary.with_duration(start.elapsed());
    summary.log_summary();
    Ok(summary)
}

/// Output path for `input`, unless it is an input or already written
fn claim_output(
    input: &Path,
    target_dir: &Path,
    source_paths: &HashSet<PathBuf>,
    written: &HashMap<PathBuf, PathBuf>,
) -> Result<PathBuf> {
    let output = output_path_for(input, target_dir).ok_or_else(|| {
        PunktError::Validation(format!("Cannot derive output name for {}", input.display()))
    })?;

    if source_paths.contains(&output) {
        return Err(PunktError::Validation(format!(
            "Output would overwrite input {}",
            output.display()
        )));
    }

    if let Some(earlier) = written.get(&output) {
        return Err(PunktError::Validation(format!(
            "Output {} was already written from {}",
            output.display(),
            earlier.display()
        )));
    }

    Ok(output)
}

fn convert_file(
    input: &Path,
    output: &Path,
    format: SourceFormat,
    options: &BatchOptions,
) -> Result<usize> {
    let params = load_parameters(input, Some(format))?;
    let text = export(&params, &options.export)?;
    write_document(output, &text, options.trailing_newline)?;

    Ok(params.len())
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Whether `path` holds a document this tool exported
fn is_exported_document(path: &Path) -> bool {
    if SourceFormat::from_extension(path) != Some(SourceFormat::Json) {
        return false;
    }
    fs::read(path)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ExportDocument>(&bytes).ok())
        .is_some()
}
