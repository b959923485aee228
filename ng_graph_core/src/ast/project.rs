//! Project loading: deterministic, sorted iteration of source files and
//! cached parses.
//!
//! Grounded on the teacher's per-call parsing idiom in
//! `ngtsc::metadata::src::reader::ModuleMetadataReader` (`Allocator`,
//! `SourceType::from_path`, `Parser::new(...).parse()`), generalized
//! into a project-wide cache so every extractor stage parses each file
//! at most once. oxc's `Program<'a>` borrows from its `Allocator`; since
//! this is a short-lived, single-pass CLI process (spec.md §5: no
//! suspension points, single-threaded core), each file's allocator is
//! leaked for the remainder of the process rather than threading
//! lifetimes through every extractor — the same trade-off compiler CLIs
//! built on arena allocators typically make for a process that exits
//! after one run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{CoreError, CoreResult};

pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    program: &'static Program<'static>,
}

impl SourceFile {
    pub fn program(&self) -> &'static Program<'static> {
        self.program
    }
}

/// A loaded project: every `.ts`/`.tsx` file under `project_root`,
/// discovered via `Project::discover`, parsed and sorted by path.
pub struct Project {
    pub root: PathBuf,
    files: BTreeMap<String, SourceFile>,
}

impl Project {
    pub fn load(project_root: &Path, ts_config_path: &Path) -> CoreResult<Self> {
        if !project_root.is_dir() {
            return Err(CoreError::InvalidProjectRoot(project_root.to_path_buf()));
        }
        if !ts_config_path.is_file() {
            return Err(CoreError::InvalidTsConfig(ts_config_path.to_path_buf()));
        }

        let mut paths = Vec::new();
        collect_ts_files(project_root, &mut paths);
        paths.sort();

        let mut files = BTreeMap::new();
        for path in paths {
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(_) => continue,
            };
            let program = parse_leaked(&path, &text);
            let key = path.to_string_lossy().to_string();
            files.insert(
                key,
                SourceFile {
                    path,
                    text,
                    program,
                },
            );
        }

        Ok(Project {
            root: project_root.to_path_buf(),
            files,
        })
    }

    /// Sorted iteration of every source file (§6 AST oracle: "sorted
    /// iteration of source files").
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn get(&self, path: &str) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Find the project source file whose path contains `specifier`
    /// after stripping a leading `./`, used by lazy route recursion
    /// (§4.3) when static resolution is unavailable.
    pub fn find_by_specifier_substring(&self, specifier: &str) -> Option<&SourceFile> {
        let needle = specifier.strip_prefix("./").unwrap_or(specifier);
        self.files
            .values()
            .find(|f| f.path.to_string_lossy().contains(needle))
    }
}

fn parse_leaked(path: &Path, text: &str) -> &'static Program<'static> {
    let allocator: &'static Allocator = Box::leak(Box::new(Allocator::default()));
    let source_type = SourceType::from_path(path).unwrap_or_default();
    // SAFETY: `allocator` is leaked for the lifetime of the process, so
    // extending the parsed `Program`'s borrow to `'static` is sound: the
    // arena it points into is never freed or reused.
    let text_static: &'static str = Box::leak(text.to_string().into_boxed_str());
    let ret = Parser::new(allocator, text_static, source_type).parse();
    let program: Program<'static> = ret.program;
    Box::leak(Box::new(program))
}

fn collect_ts_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if path.is_dir() {
            if file_name == "node_modules" || file_name == "dist" || file_name.starts_with('.') {
                continue;
            }
            collect_ts_files(&path, out);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if ext == "ts" || ext == "tsx" {
                if path.to_string_lossy().ends_with(".spec.ts")
                    || path.to_string_lossy().ends_with(".test.ts")
                {
                    continue;
                }
                out.push(path);
            }
        }
    }
}
