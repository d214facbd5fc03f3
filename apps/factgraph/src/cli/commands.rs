//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command writes its result to the supplied writer; logs go through
//! `tracing` to stderr.

use super::Settings;
use crate::error::AppError;
use factgraph_core::{
    FactError, FactStore, ImportReport, Importer, LineDiagnostic, QueryEngine, StoreMetrics,
    export_to_file, statement,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Label used for diagnostics from standard input.
const STDIN_SOURCE: &str = "<stdin>";

/// Render a value as pretty JSON.
fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn log_summary(report: &ImportReport) {
    tracing::info!(
        source = %report.source,
        accepted = report.accepted,
        inserted = report.inserted,
        rejected = report.diagnostics.len(),
        "Imported {}",
        report.source
    );
}

// =============================================================================
// PRELOAD
// =============================================================================

/// Import the configured data files before a command runs.
///
/// Malformed lines are logged as warnings; an unreadable file aborts.
pub fn preload(store: &mut FactStore, settings: &Settings) -> Result<(), AppError> {
    for path in &settings.data {
        let report = Importer::import_triple_file(store, path)?;
        for diag in &report.diagnostics {
            tracing::warn!(event = "malformed_line", "{}", diag);
        }
        log_summary(&report);
    }
    Ok(())
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Import `.nt` files and print a per-file summary.
pub fn cmd_import(
    store: &mut FactStore,
    files: &[PathBuf],
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        tracing::info!("Importing from {:?}", file);
        let report = Importer::import_triple_file(store, file)?;
        log_summary(&report);
        reports.push(report);
    }

    if settings.json_mode {
        let output = serde_json::json!({
            "reports": reports,
            "triple_count": store.triple_count(),
        });
        writeln!(out, "{}", to_json(&output))?;
        return Ok(());
    }

    for report in &reports {
        for diag in &report.diagnostics {
            writeln!(out, "{}", diag)?;
        }
        if !settings.quiet {
            writeln!(
                out,
                "{}: {} accepted ({} new, {} duplicate), {} rejected",
                report.source,
                report.accepted,
                report.inserted,
                report.duplicates(),
                report.diagnostics.len()
            )?;
        }
    }

    if !settings.quiet {
        writeln!(
            out,
            "Store now has {} triples, {} nodes, {} predicates",
            store.triple_count(),
            store.node_count(),
            store.predicate_count()
        )?;
    }

    Ok(())
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Run one query line.
pub fn cmd_query(
    store: &mut FactStore,
    line: &str,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    tracing::debug!(query = line, "Executing query");
    let output = QueryEngine::execute_query(store, line)?;

    if settings.json_mode {
        writeln!(out, "{}", to_json(&output))?;
    } else {
        writeln!(out, "{}", output)?;
    }
    Ok(())
}

/// Run a `.nt` query file.
pub fn cmd_query_file(
    store: &mut FactStore,
    file: &Path,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    tracing::info!("Running queries from {:?}", file);
    let report = QueryEngine::execute_query_file(store, file)?;

    let rejected = report.diagnostics().count();
    if rejected > 0 {
        tracing::warn!(source = %report.source, rejected, "Skipped malformed query lines");
    }

    if settings.json_mode {
        writeln!(out, "{}", to_json(&report))?;
    } else {
        write!(out, "{}", report.render())?;
    }
    Ok(())
}

/// Run query lines from `input` until EOF, answering each as it arrives.
///
/// Malformed lines print a diagnostic and the loop continues. In JSON mode
/// every line of output, answer or diagnostic, is one JSON object.
pub fn cmd_shell<R: BufRead>(
    store: &mut FactStore,
    input: R,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    for (index, line) in statement::lines(input).enumerate() {
        let line = line.map_err(|e| FactError::io(STDIN_SOURCE, &e))?;
        if line.trim().is_empty() {
            continue;
        }

        match QueryEngine::execute_query(store, &line) {
            Ok(output) if settings.json_mode => {
                let json = serde_json::to_string(&output).unwrap_or_default();
                writeln!(out, "{}", json)?;
            }
            Ok(output) => writeln!(out, "{}\n", output)?,
            Err(err) if err.is_line_scoped() => {
                let diag = LineDiagnostic::new(STDIN_SOURCE, index + 1, &err);
                if settings.json_mode {
                    let json = serde_json::to_string(&diag).unwrap_or_default();
                    writeln!(out, "{}", json)?;
                } else {
                    writeln!(out, "{}", diag)?;
                }
            }
            Err(err) => return Err(err.into()),
        }
        out.flush()?;
    }
    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write the store to a `.nt` file.
pub fn cmd_export(
    store: &FactStore,
    output: &Path,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let count = export_to_file(store, output)?;
    tracing::info!(triples = count, "Exported to {:?}", output);

    if settings.json_mode {
        let json = serde_json::json!({
            "output": output.to_string_lossy(),
            "triples": count,
        });
        writeln!(out, "{}", to_json(&json))?;
    } else if !settings.quiet {
        writeln!(out, "Exported {} triples to {}", count, output.display())?;
    }
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store metrics.
pub fn cmd_status(
    store: &FactStore,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let metrics = StoreMetrics::from_store(store);

    if settings.json_mode {
        writeln!(out, "{}", to_json(&metrics))?;
        return Ok(());
    }

    writeln!(out, "factgraph Store Status")?;
    writeln!(out, "======================")?;
    writeln!(out, "Triples:    {}", metrics.triple_count)?;
    writeln!(out, "Nodes:      {}", metrics.node_count)?;
    writeln!(out, "Predicates: {}", metrics.predicate_count)?;
    writeln!(out)?;
    writeln!(out, "Index entries: {}", metrics.index_entries())?;
    writeln!(out, "Index keys:")?;
    for index in &metrics.indices {
        writeln!(out, "  {}  {}", index.shape, index.keys)?;
    }

    Ok(())
}
