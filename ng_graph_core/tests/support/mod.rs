//! Shared fixture-project builder for the integration suite, grounded on
//! the hand-rolled `TempDir` idiom in
//! `ngtsc::file_system::test::node_js_file_system_spec` (no `tempfile`
//! dependency in this workspace — the same call this crate's own
//! `validate`/`serialize` unit tests don't need to make, since they
//! don't touch the filesystem).

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A throwaway Angular project written to a uniquely named directory
/// under the OS temp dir, removed on drop.
pub struct FixtureProject {
    root: PathBuf,
}

impl FixtureProject {
    pub fn new(name: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
        let mut root = std::env::temp_dir();
        root.push(format!("ng_graph_fixture_{name}_{nanos}_{seq}"));
        fs::create_dir_all(&root).expect("create fixture project dir");
        fs::write(root.join("tsconfig.json"), "{}\n").expect("write tsconfig.json");
        FixtureProject { root }
    }

    /// Writes `contents` to `relative` under the project root, creating
    /// any parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tsconfig_path(&self) -> PathBuf {
        self.root.join("tsconfig.json")
    }
}

impl Drop for FixtureProject {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
