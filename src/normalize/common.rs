//! Field-mapping helpers shared between [`super::meta`] and [`super::item`]:
//! the category-splitting rules of spec §4.5.1, person-element preference
//! order, and small tree-walking helpers so the two normalizers read as
//! tables rather than hand-rolled tree traversals.

use crate::node::{Node, Value};
use crate::util::trim_or_none;

/// Flattens a child slot into the nodes it holds; a bare collapsed-text
/// slot holds no nodes at all (category/person/link elements always carry
/// at least an attribute or a nested element in practice, so this is only
/// ever empty for a slot we don't expect to query this way).
pub fn nodes_of(value: &Value) -> Vec<&Node> {
    match value {
        Value::Text(_) => Vec::new(),
        Value::One(n) => vec![n.as_ref()],
        Value::Many(list) => list.iter().collect(),
    }
}

pub fn single_node(value: &Value) -> Option<&Node> {
    nodes_of(value).into_iter().next()
}

/// The per-namespace category-splitting rules (spec §4.5.1).
pub fn category_values(key: &str, node: &Node) -> Vec<String> {
    match key {
        "category" => {
            if let Some(term) = node.attr("term") {
                vec![term.to_string()]
            } else {
                node.text.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
            }
        }
        "dc:subject" => node.text.split_whitespace().map(|s| s.to_string()).collect(),
        "itunes:category" => {
            let top = node.attr("text").unwrap_or_default();
            let subs = node.children_named("itunes:category");
            if subs.is_empty() {
                if top.is_empty() { Vec::new() } else { vec![top.to_string()] }
            } else {
                subs.iter().filter_map(|s| s.attr("text")).map(|sub| format!("{}/{}", top, sub)).collect()
            }
        }
        "media:category" => match trim_or_none(&node.text) {
            Some(t) => vec![t],
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Author/contributor preference order: `name`, else `email`, else `uri`,
/// else (Atom 0.3 inlines a bare string) the element's own text.
pub fn person_text(node: &Node) -> Option<String> {
    if let Some(name) = node.children_named("name").first() {
        if let Some(t) = trim_or_none(&name.text) {
            return Some(t);
        }
    }
    if let Some(email) = node.children_named("email").first() {
        if let Some(t) = trim_or_none(&email.text) {
            return Some(t);
        }
    }
    if let Some(uri) = node.children_named("uri").first() {
        if let Some(t) = trim_or_none(&uri.text) {
            return Some(t);
        }
    }
    trim_or_none(&node.text)
}

/// Walks a dotted path of canonical child keys and returns the requested
/// attribute on the final node, or `None` if any segment is absent.
pub fn nested_attr(node: &Node, path: &[&str], attr: &str) -> Option<String> {
    let mut cur: &Node = node;
    for seg in path {
        cur = cur.children_named(seg).into_iter().next()?;
    }
    cur.attr(attr).map(|s| s.to_string())
}

/// `rdf:resource` on the first node under `key`, whether that slot holds a
/// single node or a list (copyright/generator fallbacks in spec §4.5).
pub fn first_rdf_resource(node: &Node, key: &str) -> Option<String> {
    node.children_named(key).first().and_then(|n| n.attr("rdf:resource")).map(|s| s.to_string())
}

/// Re-keys an unprefixed extension child as `{dialect}:{name}` per spec §6
/// ("non-namespaced names keyed as `{type}:{name}`"); a prefixed key is
/// already in its final form.
pub fn rekey_extension(key: &str, dialect_tag: &str) -> String {
    if key.contains(':') {
        key.to_string()
    } else {
        format!("{}:{}", dialect_tag, key)
    }
}
