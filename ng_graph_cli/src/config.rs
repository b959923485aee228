//! CLI configuration (spec.md §6 external interfaces, generalized per
//! `SPEC_FULL.md` §2): parsed from the `<projectRoot> <tsConfigPath>
//! [outputDir] [--debug]` positional/flag surface via `clap::Parser`, the
//! same derive style as `packages/compiler-cli/src/bin/ngc.rs`'s
//! `Command::new(...).arg(...)` — just derive-based rather than builder-
//! based, since this crate has no subcommands to share a builder across.
//!
//! `componentPrefix`, the bounded-length constants, and `logLevel` sit
//! outside the distilled CLI surface; they're read from an optional
//! `ng-graph.config.json` next to the tsconfig, falling back to defaults
//! when absent or partially specified — the same "project-relative
//! config file" idiom the teacher uses for `tsconfig.json` itself.

use std::path::{Path, PathBuf};

use clap::Parser;
use ng_graph_core::logging::LogLevel;
use serde::Deserialize;

const DEFAULT_COMPONENT_PREFIX: &str = "app-";
const DEFAULT_MAX_STRING_LEN: usize = 200;
const DEFAULT_MAX_CALL_CONTEXTS: usize = 20;
const DEFAULT_MAX_CALL_ARGS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "ng_graph", version, about = "Angular project graph extractor")]
struct Cli {
    /// Root directory of the Angular project to scan.
    project_root: PathBuf,
    /// Path to the project's tsconfig.json.
    ts_config_path: PathBuf,
    /// Output directory for the serialized bundle; defaults to
    /// `output/<basename(projectRoot)>`.
    output_dir: Option<PathBuf>,
    /// Emit the split-JSON debug directory alongside the bundle.
    #[arg(long)]
    debug: bool,
}

/// Project-relative overrides for the fields the distilled CLI surface
/// doesn't expose, read from `ng-graph.config.json` next to the tsconfig.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    component_prefix: Option<String>,
    max_string_len: Option<usize>,
    max_call_contexts: Option<usize>,
    max_call_args: Option<usize>,
    log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub project_root: PathBuf,
    pub ts_config_path: PathBuf,
    pub output_dir: PathBuf,
    pub debug: bool,
    pub component_prefix: String,
    pub max_string_len: usize,
    pub max_call_contexts: usize,
    pub max_call_args: usize,
    pub log_level: LogLevel,
}

impl Config {
    /// Parses `std::env::args()` and layers an optional
    /// `ng-graph.config.json` over the defaults.
    pub fn from_args() -> Self {
        let cli = Cli::parse();
        Self::from_cli(cli)
    }

    fn from_cli(cli: Cli) -> Self {
        let output_dir = cli.output_dir.unwrap_or_else(|| default_output_dir(&cli.project_root));
        let overrides = load_config_file(&cli.ts_config_path);

        Config {
            project_root: cli.project_root,
            ts_config_path: cli.ts_config_path,
            output_dir,
            debug: cli.debug,
            component_prefix: overrides
                .component_prefix
                .unwrap_or_else(|| DEFAULT_COMPONENT_PREFIX.to_string()),
            max_string_len: overrides.max_string_len.unwrap_or(DEFAULT_MAX_STRING_LEN),
            max_call_contexts: overrides.max_call_contexts.unwrap_or(DEFAULT_MAX_CALL_CONTEXTS),
            max_call_args: overrides.max_call_args.unwrap_or(DEFAULT_MAX_CALL_ARGS),
            log_level: overrides
                .log_level
                .as_deref()
                .and_then(parse_log_level)
                .unwrap_or(LogLevel::Info),
        }
    }
}

fn default_output_dir(project_root: &Path) -> PathBuf {
    let basename = project_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());
    PathBuf::from("output").join(basename)
}

fn load_config_file(ts_config_path: &Path) -> ConfigFile {
    let Some(dir) = ts_config_path.parent() else {
        return ConfigFile::default();
    };
    let candidate = dir.join("ng-graph.config.json");
    let Ok(text) = std::fs::read_to_string(&candidate) else {
        return ConfigFile::default();
    };
    serde_json::from_str(&text).unwrap_or_default()
}

fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_dir_uses_project_basename() {
        let dir = default_output_dir(Path::new("/workspace/my-angular-app"));
        assert_eq!(dir, PathBuf::from("output/my-angular-app"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let overrides = load_config_file(Path::new("/nonexistent/tsconfig.json"));
        assert!(overrides.component_prefix.is_none());
    }
}
