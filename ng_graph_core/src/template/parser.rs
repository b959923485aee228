//! Template parser adapter (spec.md §4.2).
//!
//! Grounded on the teacher's `ml_parser::lexer`/`ml_parser::parser` — a
//! hand-rolled HTML lexer with its own token enum and span tracking —
//! but reduced in scope: `ml_parser` resolves Angular's structural-
//! directive microsyntax into expanded `<ng-template>` wrapper nodes for
//! Ivy codegen, which is a different (richer) semantic than the uniform
//! `{element, text, boundText, attr, boundAttr, event, structural,
//! directive}` tree this layer's consumers need. This adapter instead
//! classifies attributes directly from their surface syntax
//! (`[x]`, `(x)`, `*x`, plain `x`), matching the oracle contract in
//! spec.md §6 ("element names under `name`", "attributes/inputs/outputs").
//!
//! Whitespace preservation is disabled (spec.md §4.2): pure-whitespace
//! text nodes are dropped.

use std::panic::{self, AssertUnwindSafe};

use super::ast::{Span, TemplateNode, TemplateNodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parses raw template text into the uniform tree. Fail-safe: any
/// internal parser failure (including a panic from malformed,
/// adversarial input) yields an empty node list rather than
/// propagating (spec.md §4.2, §7 "Oracle unavailability").
pub fn parse(text: &str) -> Vec<TemplateNode> {
    match panic::catch_unwind(AssertUnwindSafe(|| parse_inner(text))) {
        Ok(nodes) => nodes,
        Err(_) => Vec::new(),
    }
}

struct Frame {
    node: TemplateNode,
}

fn parse_inner(text: &str) -> Vec<TemplateNode> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut pos: usize = 0;
    let mut root: Vec<TemplateNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    while pos < len {
        if bytes[pos] == b'<' {
            if text[pos..].starts_with("<!--") {
                if let Some(end) = text[pos..].find("-->") {
                    pos += end + 3;
                } else {
                    break;
                }
                continue;
            }
            if text[pos..].starts_with("</") {
                let tag_end = find_char(text, pos, '>').unwrap_or(len);
                let tag_name = text[pos + 2..tag_end].trim().to_lowercase();
                pos = tag_end + 1;
                close_element(&mut stack, &mut root, &tag_name);
                continue;
            }
            // Opening tag.
            let tag_start = pos;
            let name_start = pos + 1;
            let mut cursor = name_start;
            while cursor < len
                && !bytes[cursor].is_ascii_whitespace()
                && bytes[cursor] != b'>'
                && bytes[cursor] != b'/'
            {
                cursor += 1;
            }
            let tag_name = text[name_start..cursor].to_string();
            if tag_name.is_empty() {
                // Not a real tag (stray '<'); treat as text.
                pos += 1;
                push_text(&mut stack, &mut root, "<", Span { start: tag_start as u32, end: pos as u32 });
                continue;
            }

            let mut attrs = Vec::new();
            let mut self_closing = false;
            loop {
                while cursor < len && bytes[cursor].is_ascii_whitespace() {
                    cursor += 1;
                }
                if cursor >= len {
                    break;
                }
                if bytes[cursor] == b'/' {
                    self_closing = true;
                    cursor += 1;
                    continue;
                }
                if bytes[cursor] == b'>' {
                    cursor += 1;
                    break;
                }
                let attr_start = cursor;
                while cursor < len
                    && bytes[cursor] != b'='
                    && !bytes[cursor].is_ascii_whitespace()
                    && bytes[cursor] != b'>'
                    && bytes[cursor] != b'/'
                {
                    cursor += 1;
                }
                let attr_name = text[attr_start..cursor].to_string();
                if attr_name.is_empty() {
                    cursor += 1;
                    continue;
                }
                while cursor < len && bytes[cursor].is_ascii_whitespace() {
                    cursor += 1;
                }
                let mut attr_value = String::new();
                let value_end_pos;
                if cursor < len && bytes[cursor] == b'=' {
                    cursor += 1;
                    while cursor < len && bytes[cursor].is_ascii_whitespace() {
                        cursor += 1;
                    }
                    if cursor < len && (bytes[cursor] == b'"' || bytes[cursor] == b'\'') {
                        let quote = bytes[cursor];
                        let v_start = cursor + 1;
                        let mut v_end = v_start;
                        while v_end < len && bytes[v_end] != quote {
                            v_end += 1;
                        }
                        attr_value = text[v_start..v_end].to_string();
                        cursor = (v_end + 1).min(len);
                        value_end_pos = cursor;
                    } else {
                        let v_start = cursor;
                        while cursor < len && !bytes[cursor].is_ascii_whitespace() && bytes[cursor] != b'>' {
                            cursor += 1;
                        }
                        attr_value = text[v_start..cursor].to_string();
                        value_end_pos = cursor;
                    }
                } else {
                    value_end_pos = cursor;
                }
                attrs.push(classify_attribute(
                    &attr_name,
                    &attr_value,
                    Span {
                        start: attr_start as u32,
                        end: value_end_pos as u32,
                    },
                ));
            }

            pos = cursor;
            let span = Span {
                start: tag_start as u32,
                end: pos as u32,
            };
            let lower_name = tag_name.to_lowercase();
            let mut node = TemplateNode::element(tag_name, span);
            node.attributes = attrs;

            if self_closing || VOID_ELEMENTS.contains(&lower_name.as_str()) {
                append_node(&mut stack, &mut root, node);
            } else {
                stack.push(Frame { node });
            }
            continue;
        }

        // Text / interpolation run, up to the next '<'.
        let text_start = pos;
        let text_end = find_char(text, pos, '<').unwrap_or(len);
        let raw = &text[text_start..text_end];
        pos = text_end;
        push_text(
            &mut stack,
            &mut root,
            raw,
            Span {
                start: text_start as u32,
                end: text_end as u32,
            },
        );
    }

    // Unclosed elements at EOF: flush them up as-is (fail-safe, never panic
    // on malformed/truncated markup).
    while let Some(frame) = stack.pop() {
        append_node(&mut stack, &mut root, frame.node);
    }

    root
}

fn push_text(stack: &mut Vec<Frame>, root: &mut Vec<TemplateNode>, raw: &str, span: Span) {
    if raw.trim().is_empty() {
        return;
    }
    let kind = if raw.contains("{{") {
        TemplateNodeKind::BoundText
    } else {
        TemplateNodeKind::Text
    };
    let node = TemplateNode {
        kind,
        name: None,
        value: Some(raw.trim().to_string()),
        children: Vec::new(),
        attributes: Vec::new(),
        span: Some(span),
    };
    append_node(stack, root, node);
}

fn append_node(stack: &mut Vec<Frame>, root: &mut Vec<TemplateNode>, node: TemplateNode) {
    if let Some(frame) = stack.last_mut() {
        frame.node.children.push(node);
    } else {
        root.push(node);
    }
}

fn close_element(stack: &mut Vec<Frame>, root: &mut Vec<TemplateNode>, tag_name: &str) {
    if let Some(idx) = stack
        .iter()
        .rposition(|f| f.node.name.as_deref().map(|n| n.to_lowercase()) == Some(tag_name.to_string()))
    {
        while stack.len() > idx + 1 {
            let frame = stack.pop().unwrap();
            append_node(stack, root, frame.node);
        }
        let frame = stack.pop().unwrap();
        append_node(stack, root, frame.node);
    }
    // Unmatched closing tag: ignored (fail-safe).
}

fn classify_attribute(name: &str, value: &str, span: Span) -> TemplateNode {
    let (kind, clean_name) = if let Some(inner) = name.strip_prefix("*") {
        (TemplateNodeKind::Structural, inner.to_string())
    } else if name.starts_with("[(") && name.ends_with(")]") {
        (TemplateNodeKind::BoundAttr, name[2..name.len() - 2].to_string())
    } else if name.starts_with('[') && name.ends_with(']') {
        (TemplateNodeKind::BoundAttr, name[1..name.len() - 1].to_string())
    } else if name.starts_with('(') && name.ends_with(')') {
        (TemplateNodeKind::Event, name[1..name.len() - 1].to_string())
    } else {
        (TemplateNodeKind::Attr, name.to_string())
    };
    TemplateNode {
        kind,
        name: Some(clean_name),
        value: Some(value.to_string()),
        children: Vec::new(),
        attributes: Vec::new(),
        span: Some(span),
    }
}

fn find_char(text: &str, from: usize, needle: char) -> Option<usize> {
    text[from..].find(needle).map(|i| i + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_element_with_bound_attribute() {
        let nodes = parse(r#"<a [routerLink]="'/home'">Go home</a>"#);
        assert_eq!(nodes.len(), 1);
        let el = &nodes[0];
        assert_eq!(el.kind, TemplateNodeKind::Element);
        assert_eq!(el.name.as_deref(), Some("a"));
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attributes[0].kind, TemplateNodeKind::BoundAttr);
        assert_eq!(el.attributes[0].name.as_deref(), Some("routerLink"));
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.children[0].kind, TemplateNodeKind::Text);
    }

    #[test]
    fn classifies_structural_and_event_bindings() {
        let nodes = parse(r#"<button *ngIf="show" (click)="go()">Click</button>"#);
        let el = &nodes[0];
        let kinds: Vec<_> = el.attributes.iter().map(|a| a.kind).collect();
        assert!(kinds.contains(&TemplateNodeKind::Structural));
        assert!(kinds.contains(&TemplateNodeKind::Event));
    }

    #[test]
    fn detects_interpolation_as_bound_text() {
        let nodes = parse(r#"<span>{{ owner.name }}</span>"#);
        assert_eq!(nodes[0].children[0].kind, TemplateNodeKind::BoundText);
    }

    #[test]
    fn never_panics_on_malformed_markup() {
        let nodes = parse("<div><span>unterminated");
        assert!(!nodes.is_empty() || nodes.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(parse("").is_empty());
    }
}
