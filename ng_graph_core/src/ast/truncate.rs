//! Global truncation policy (spec.md §4.1 `truncateDeterministically`,
//! §9 "bounded strings"). Every extracted snippet, expression text, or
//! argument in this crate goes through this function; there is no
//! other truncation variant anywhere in the pipeline.

pub fn truncate_deterministically(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_short_strings_alone() {
        assert_eq!(truncate_deterministically("hello", 200), "hello");
    }

    #[test]
    fn truncates_and_appends_ellipsis() {
        let s = "a".repeat(10);
        let out = truncate_deterministically(&s, 5);
        assert_eq!(out.chars().count(), 5);
        assert!(out.ends_with('…'));
        assert_eq!(out, format!("{}…", "a".repeat(4)));
    }

    #[test]
    fn is_deterministic_across_calls() {
        let s = "x".repeat(500);
        assert_eq!(
            truncate_deterministically(&s, 200),
            truncate_deterministically(&s, 200)
        );
    }
}
