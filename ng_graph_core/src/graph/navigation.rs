//! Navigation target resolution (spec.md §4.8 "Navigation resolution"):
//! maps a `routerLink`/array-navigation/interpolated-link raw text (or a
//! `router.navigate(...)` call argument) onto a route, trying direct
//! match, then array syntax, then string interpolation, in that order.

use crate::model::Route;

#[derive(Debug, Clone, Copy)]
enum Seg<'a> {
    Static(&'a str),
    Dynamic,
}

pub struct NavIndex<'a> {
    entries: Vec<(&'a str, &'a str, bool)>,
}

impl<'a> NavIndex<'a> {
    pub fn build<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = &'a Route>,
    {
        let entries = routes
            .into_iter()
            .map(|r| (r.full_path(), r.id(), r.is_wildcard()))
            .collect();
        NavIndex { entries }
    }

    fn direct(&self, path: &str) -> Option<&'a str> {
        self.entries.iter().find(|(fp, _, _)| *fp == path).map(|(_, id, _)| *id)
    }

    /// Tries direct, then array-syntax, then interpolation resolution in
    /// that order; returns the first match.
    pub fn resolve(&self, raw: &str) -> Option<&'a str> {
        let trimmed = raw.trim();
        let candidate = strip_outer_quotes(trimmed);

        if !(candidate.starts_with("./") || candidate.starts_with("../")) {
            let path = ensure_leading_slash(candidate);
            if let Some(id) = self.direct(&path) {
                return Some(id);
            }
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            if let Some(id) = self.resolve_array(trimmed) {
                return Some(id);
            }
        }

        if candidate.starts_with('/') && candidate.contains("{{") {
            if let Some(id) = self.resolve_interpolation(candidate) {
                return Some(id);
            }
        }

        None
    }

    fn resolve_array(&self, bracketed: &str) -> Option<&'a str> {
        let inner = &bracketed[1..bracketed.len() - 1];
        let mut segs: Vec<Seg> = Vec::new();
        for part in split_top_level_commas(inner) {
            let p = part.trim();
            if p.is_empty() {
                continue;
            }
            if let Some(stripped) = strip_quotes(p) {
                for s in stripped.split('/').filter(|s| !s.is_empty()) {
                    segs.push(Seg::Static(s));
                }
            } else {
                segs.push(Seg::Dynamic);
            }
        }
        self.best_match(&segs)
    }

    fn resolve_interpolation(&self, path: &str) -> Option<&'a str> {
        let cut = path
            .find(|c| c == '?' || c == '#')
            .map(|idx| &path[..idx])
            .unwrap_or(path);
        let segs: Vec<Seg> = cut
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| if s.contains("{{") { Seg::Dynamic } else { Seg::Static(s) })
            .collect();
        self.best_match(&segs)
    }

    fn best_match(&self, nav_segs: &[Seg]) -> Option<&'a str> {
        if nav_segs.is_empty() {
            return None;
        }
        let mut best: Option<(usize, &'a str, &'a str)> = None;
        for (full_path, id, is_wildcard) in &self.entries {
            if *is_wildcard || *full_path == "/" {
                continue;
            }
            let route_segs: Vec<&str> = full_path.split('/').filter(|s| !s.is_empty()).collect();
            if route_segs.len() != nav_segs.len() {
                continue;
            }
            let mut ok = true;
            let mut param_count = 0;
            for (route_seg, nav_seg) in route_segs.iter().zip(nav_segs.iter()) {
                let is_param = route_seg.starts_with(':');
                if is_param {
                    param_count += 1;
                    continue;
                }
                match nav_seg {
                    Seg::Dynamic => {
                        ok = false;
                        break;
                    }
                    Seg::Static(s) => {
                        if s != route_seg {
                            ok = false;
                            break;
                        }
                    }
                }
            }
            if !ok {
                continue;
            }
            let candidate = (param_count, *full_path, *id);
            best = Some(match best {
                None => candidate,
                Some(current) => {
                    if candidate.0 < current.0 || (candidate.0 == current.0 && candidate.1 < current.1) {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }
        best.map(|(_, _, id)| id)
    }
}

fn strip_outer_quotes(s: &str) -> &str {
    strip_quotes(s).unwrap_or(s)
}

fn strip_quotes(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if s.len() >= 2 {
        let first = bytes[0];
        let last = bytes[s.len() - 1];
        if (first == b'\'' || first == b'"' || first == b'`') && first == last {
            return Some(&s[1..s.len() - 1]);
        }
    }
    None
}

fn ensure_leading_slash(s: &str) -> String {
    if s.starts_with('/') {
        s.to_string()
    } else {
        format!("/{s}")
    }
}

fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (idx, ch) in s.char_indices() {
        match ch {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth -= 1,
            ',' if depth == 0 => {
                out.push(&s[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

/// Determines whether an `href`-style value is an absolute external URL
/// (spec.md §4.8 "a `href` whose value is an absolute URL").
pub fn is_absolute_external_url(value: &str) -> bool {
    let v = strip_outer_quotes(value.trim());
    v.starts_with("http://") || v.starts_with("https://") || v.starts_with("//")
}
