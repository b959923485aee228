//! Serializer (spec.md §4.10): writes the frozen `phase1-bundle.json`
//! and, when `--debug` is set, a split-JSON debug directory. Every file
//! is UTF-8 with no BOM, 2-space indented, and every JSON object's keys
//! are sorted recursively so two runs over the same project byte-diff
//! identically (spec.md §5 determinism discipline).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::model::{Component, Module, Multigraph, Route, Service, Stats, Widget, WidgetEvent};

pub struct Bundle<'a> {
    pub graph: &'a Multigraph,
    pub stats: &'a Stats,
    pub modules: &'a BTreeMap<String, Module>,
    pub routes: &'a BTreeMap<String, Route>,
    pub components: &'a BTreeMap<String, Component>,
    pub widgets: &'a BTreeMap<String, Widget>,
    pub services: &'a BTreeMap<String, Service>,
    pub widget_events: &'a [WidgetEvent],
}

/// Writes `<output_dir>/phase1-bundle.json`; when `debug` is set, also
/// writes `<output_dir>/debug/*.json`, one file per extracted entity
/// collection (spec.md §4.10 "bundle + debug split directory").
pub fn write_output(output_dir: &Path, bundle: &Bundle, debug: bool) -> CoreResult<()> {
    fs::create_dir_all(output_dir).map_err(|source| CoreError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let phase1 = serde_json::json!({
        "nodes": bundle.graph.nodes,
        "edges": bundle.graph.edges,
        "stats": bundle.stats,
    });
    write_json_file(&output_dir.join("phase1-bundle.json"), &phase1)?;

    if debug {
        let debug_dir = output_dir.join("debug");
        fs::create_dir_all(&debug_dir).map_err(|source| CoreError::Io {
            path: debug_dir.clone(),
            source,
        })?;
        write_json_file(&debug_dir.join("modules.json"), &bundle.modules)?;
        write_json_file(&debug_dir.join("routes.json"), &bundle.routes)?;
        write_json_file(&debug_dir.join("components.json"), &bundle.components)?;
        write_json_file(&debug_dir.join("widgets.json"), &bundle.widgets)?;
        write_json_file(&debug_dir.join("services.json"), &bundle.services)?;
        write_json_file(&debug_dir.join("widget-events.json"), &bundle.widget_events)?;
        write_json_file(&debug_dir.join("graph.json"), &bundle.graph)?;
        write_json_file(&debug_dir.join("stats.json"), &bundle.stats)?;
    }

    Ok(())
}

fn write_json_file<T: Serialize>(path: &PathBuf, value: &T) -> CoreResult<()> {
    let raw = serde_json::to_value(value).expect("in-memory model always serializes");
    let sorted = sort_keys(raw);
    let mut text = serde_json::to_string_pretty(&sorted).expect("sorted value always serializes");
    text.push('\n');
    fs::write(path, text.as_bytes()).map_err(|source| CoreError::Io {
        path: path.clone(),
        source,
    })
}

/// Recursively rebuilds every object with its keys inserted in sorted
/// order. `serde_json`'s `preserve_order` feature means a freshly
/// serialized `Value` otherwise keeps struct field-declaration order,
/// not a deterministic sort — this pass is what actually gives every
/// emitted file its canonical, diff-stable key order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<String> = map.keys().cloned().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                let v = map.get(&key).cloned().unwrap_or(Value::Null);
                sorted.insert(key, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_orders_nested_objects() {
        let v = serde_json::json!({"b": 1, "a": {"z": 1, "y": 2}});
        let sorted = sort_keys(v);
        let keys: Vec<&String> = sorted.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        let inner = sorted.as_object().unwrap().get("a").unwrap().as_object().unwrap();
        let inner_keys: Vec<&String> = inner.keys().collect();
        assert_eq!(inner_keys, vec!["y", "z"]);
    }
}
