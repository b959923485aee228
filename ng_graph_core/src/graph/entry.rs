//! Entry-route computation (spec.md GLOSSARY "entry route"): the fixed
//! point of top-level non-wildcard routes, plus routes whose `fullPath`
//! is the root `"/"`, closed under the `RedirectRoute` -> target
//! transition until stable.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::Route;

pub fn compute_entry_route_ids(routes: &BTreeMap<String, Route>) -> BTreeSet<String> {
    let mut entry: BTreeSet<String> = BTreeSet::new();
    for r in routes.values() {
        if (r.common().parent_id.is_none() && !r.is_wildcard()) || r.full_path() == "/" {
            entry.insert(r.id().to_string());
        }
    }

    let by_full_path: BTreeMap<&str, &str> = routes.values().map(|r| (r.full_path(), r.id())).collect();

    loop {
        let mut changed = false;
        for r in routes.values() {
            if let Route::RedirectRoute {
                common,
                redirect_to_full_path,
                ..
            } = r
            {
                if entry.contains(&common.id) {
                    if let Some(target_id) = by_full_path.get(redirect_to_full_path.as_str()) {
                        if entry.insert((*target_id).to_string()) {
                            changed = true;
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    entry
}
