//! Resolves a route object's `component`/`loadComponent` identifier to a
//! concrete `Component.id`, grounded on the import-specifier matching in
//! `ngtsc::reflection::src::typescript` (`get_variable_value` and friends
//! walk the same `ImportDeclaration`/`ImportDeclarationSpecifier` shapes).

use std::collections::HashMap;

use crate::ast::{access, Project, SourceFile};
use crate::model::Component;

pub struct ComponentIndex<'a> {
    by_file_and_name: HashMap<(String, String), &'a Component>,
    by_name: HashMap<String, Vec<&'a Component>>,
}

impl<'a> ComponentIndex<'a> {
    pub fn build(components: &'a [Component]) -> Self {
        let mut by_file_and_name = HashMap::new();
        let mut by_name: HashMap<String, Vec<&'a Component>> = HashMap::new();
        for c in components {
            by_file_and_name.insert((c.file.clone(), c.name.clone()), c);
            by_name.entry(c.name.clone()).or_default().push(c);
        }
        ComponentIndex {
            by_file_and_name,
            by_name,
        }
    }

    /// Resolves `class_name` as referenced from `importing_file`: follows
    /// its import specifier to a project file first, falling back to a
    /// name-only match when the identifier is unresolvable (e.g.
    /// declared in the same file, or the import couldn't be traced).
    pub fn resolve(
        &self,
        project: &Project,
        importing_file: &SourceFile,
        class_name: &str,
    ) -> Option<String> {
        if let Some((target_file, _)) = self
            .by_file_and_name
            .keys()
            .find(|(f, n)| f == &importing_file.path.to_string_lossy().to_string() && n == class_name)
        {
            return self
                .by_file_and_name
                .get(&(target_file.clone(), class_name.to_string()))
                .map(|c| c.id.clone());
        }

        if let Some(specifier) = access::find_import_specifier(importing_file, class_name) {
            if let Some(target) = access::resolve_import_target(
                project,
                &importing_file.path.to_string_lossy(),
                &specifier,
            ) {
                if let Some(c) = self
                    .by_file_and_name
                    .get(&(target, class_name.to_string()))
                {
                    return Some(c.id.clone());
                }
            }
        }

        match self.by_name.get(class_name) {
            Some(matches) if matches.len() == 1 => Some(matches[0].id.clone()),
            _ => None,
        }
    }
}
