//! Integration tests for the factgraph CLI commands.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use factgraph::cli::{Cli, Commands, Settings, cmd_shell, run};
use factgraph::config::Config;
use factgraph::error::AppError;
use factgraph_core::{FactError, FactStore};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HARVARD: &str = "Harvard locatedIn Cambridge.\nCambridge locatedIn Massachusetts.\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn run_args(args: &[&str]) -> Result<String, AppError> {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run(cli, &Config::default(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn test_parse_query_tokens_are_joined() {
    let cli = Cli::try_parse_from(["factgraph", "query", "Harvard", "locatedIn", "?."]).unwrap();
    match cli.command {
        Some(Commands::Query { query }) => assert_eq!(query.join(" "), "Harvard locatedIn ?."),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["factgraph", "status", "--json-mode", "-d", "a.nt", "-d", "b.nt"])
        .unwrap();
    assert!(cli.json_mode);
    assert_eq!(cli.data, vec![PathBuf::from("a.nt"), PathBuf::from("b.nt")]);
}

#[test]
fn test_settings_merge_config_then_flags() {
    let cli = Cli::try_parse_from(["factgraph", "-d", "cli.nt", "status"]).unwrap();
    let config = Config {
        json_mode: true,
        data: vec![PathBuf::from("config.nt")],
        ..Config::default()
    };

    let settings = Settings::merge(&cli, &config);

    assert!(settings.json_mode);
    assert_eq!(
        settings.data,
        vec![PathBuf::from("config.nt"), PathBuf::from("cli.nt")]
    );
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn test_query_scenario() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", HARVARD);
    let data = data.to_str().unwrap();

    let out = run_args(&["factgraph", "-d", data, "query", "Harvard locatedIn ?."]).unwrap();
    assert_eq!(out, "Harvard locatedIn ?.\nHarvard locatedIn Cambridge.\n");

    let out = run_args(&["factgraph", "-d", data, "query", "Harvard ownedBy ?."]).unwrap();
    assert_eq!(out, "Harvard ownedBy ?.\n<null>\n");
}

#[test]
fn test_malformed_single_query_is_an_error() {
    let result = run_args(&["factgraph", "query", "Harvard locatedIn"]);
    assert!(matches!(
        result,
        Err(AppError::Fact(FactError::MalformedQuery(_)))
    ));
}

#[test]
fn test_query_file_output() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", HARVARD);
    let queries = write_file(
        dir.path(),
        "queries.nt",
        "? locatedIn Massachusetts.\nbad line here too\n",
    );

    let out = run_args(&[
        "factgraph",
        "-d",
        data.to_str().unwrap(),
        "query-file",
        "-f",
        queries.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        out,
        "? locatedIn Massachusetts.\nCambridge locatedIn Massachusetts.\n\n\
         queries.nt line number 2: Malformed query: expected 3 tokens, found 4\n"
    );
}

#[test]
fn test_import_reports_diagnostics() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", "A P B.\nA P C.\nA P\nD P B.\nD P C.\n");

    let out = run_args(&["factgraph", "import", "-f", data.to_str().unwrap()]).unwrap();

    assert!(out.contains("data.nt line number 3: Malformed triple: expected 3 tokens, found 2"));
    assert!(out.contains("data.nt: 4 accepted (4 new, 0 duplicate), 1 rejected"));
    assert!(out.contains("Store now has 4 triples"));
}

#[test]
fn test_import_rejects_wrong_extension() {
    let result = run_args(&["factgraph", "import", "-f", "data.txt"]);
    assert!(matches!(
        result,
        Err(AppError::Fact(FactError::InvalidImportTarget { .. }))
    ));
}

#[test]
fn test_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", HARVARD);
    let output = dir.path().join("out.nt");

    run_args(&[
        "factgraph",
        "-q",
        "-d",
        data.to_str().unwrap(),
        "export",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let exported = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        exported,
        "Cambridge locatedIn Massachusetts.\nHarvard locatedIn Cambridge.\n"
    );
}

#[test]
fn test_status_json() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", HARVARD);

    let out = run_args(&["factgraph", "--json-mode", "-d", data.to_str().unwrap(), "status"])
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["triple_count"], 2);
    assert_eq!(json["node_count"], 3);
    assert_eq!(json["predicate_count"], 1);
    assert_eq!(json["indices"].as_array().unwrap().len(), 7);
}

#[test]
fn test_status_text_reports_index_entries() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "data.nt", HARVARD);

    let out = run_args(&["factgraph", "-d", data.to_str().unwrap(), "status"]).unwrap();

    assert!(out.contains("Triples:    2"));
    assert!(out.contains("Index entries: 14"));
    assert!(out.contains("  SPO  2"));
}

#[test]
fn test_default_command_is_status() {
    let out = run_args(&["factgraph"]).unwrap();
    assert!(out.starts_with("factgraph Store Status"));
    assert!(out.contains("Triples:    0"));
}

#[test]
fn test_shell_answers_each_line() {
    let mut store = FactStore::new();
    store.import_triple("Harvard", "locatedIn", "Cambridge");
    let input = Cursor::new("Harvard locatedIn ?.\nnope\n\n? ? Cambridge.\n");
    let mut out = Vec::new();

    cmd_shell(&mut store, input, &Settings::default(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Harvard locatedIn ?.\nHarvard locatedIn Cambridge.\n\n\
         <stdin> line number 2: Malformed query: expected 3 tokens, found 1\n\
         ? ? Cambridge.\nHarvard locatedIn Cambridge.\n\n"
    );
}

#[test]
fn test_shell_json_mode_is_all_json() {
    let mut store = FactStore::new();
    store.import_triple("Harvard", "locatedIn", "Cambridge");
    let input = Cursor::new("Harvard locatedIn ?.\nnope\n");
    let settings = Settings {
        json_mode: true,
        ..Settings::default()
    };
    let mut out = Vec::new();

    cmd_shell(&mut store, input, &settings, &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["query"], "Harvard locatedIn ?.");
    assert_eq!(lines[1]["source"], "<stdin>");
    assert_eq!(lines[1]["line"], 2);
    assert_eq!(
        lines[1]["message"],
        "Malformed query: expected 3 tokens, found 1"
    );
}

#[test]
fn test_shell_continues_past_invalid_utf8() {
    let mut store = FactStore::new();
    store.import_triple("Harvard", "locatedIn", "Cambridge");
    let input: &[u8] = b"Caf\xE9 locatedIn ?.\nHarvard locatedIn ?.\n";
    let mut out = Vec::new();

    cmd_shell(&mut store, input, &Settings::default(), &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("<stdin> line number 1: Malformed query: invalid subject"));
    assert!(out.ends_with("Harvard locatedIn ?.\nHarvard locatedIn Cambridge.\n\n"));
}

// =============================================================================
// CONFIG FILES
// =============================================================================

#[test]
fn test_config_data_paths_resolve_against_config_dir() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "data.nt", HARVARD);
    let config_path = write_file(dir.path(), "factgraph.toml", "data = [\"data.nt\"]\n");

    let config = Config::load(&config_path).unwrap();
    let cli = Cli::try_parse_from(["factgraph", "query", "? locatedIn ?."]).unwrap();
    let mut out = Vec::new();
    run(cli, &config, &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("? locatedIn ?.\n"));
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_missing_config_is_config_error() {
    let result = Config::load(Path::new("/definitely/not/here/factgraph.toml"));
    assert!(matches!(result, Err(AppError::Config { .. })));
}
