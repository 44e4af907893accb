//! URL reference resolution against an `xml:base` in effect, plus the
//! retroactive tree walk used when a feed's canonical URL is only
//! discovered mid-parse (an Atom `link rel="self"` seen after relative
//! entry links).

use url::Url;

use crate::node::{Node, Value};

/// Resolve `reference` against `base`. An already-absolute reference is
/// returned unchanged; an empty base leaves the reference untouched.
pub fn resolve(base: &str, reference: &str) -> String {
    if base.is_empty() || reference.is_empty() {
        return reference.to_string();
    }
    match Url::parse(reference) {
        Ok(_) => reference.to_string(),
        Err(_) => match Url::parse(base) {
            Ok(base_url) => match base_url.join(reference) {
                Ok(joined) => joined.to_string(),
                Err(_) => reference.to_string(),
            },
            Err(_) => reference.to_string(),
        },
    }
}

const URL_ATTRS: &[&str] = &["href", "src", "uri"];

/// Walk `node` and everything beneath it, resolving every `href`/`src`/`uri`
/// attribute and the text of any Atom `logo`/`icon` descendant against
/// `base`. Used retroactively once a feed's `xml:base` is discovered after
/// some of its subtree has already been built.
pub fn reresolve(node: &mut Node, base: &str) {
    if base.is_empty() {
        return;
    }
    for (key, value) in node.attrs.iter_mut() {
        if URL_ATTRS.contains(&key.as_str()) {
            *value = resolve(base, value);
        }
    }
    if node.local == "logo" || node.local == "icon" {
        if !node.text.is_empty() {
            node.text = resolve(base, &node.text);
        }
    }
    for (_, value) in node.children.iter_mut() {
        match value {
            Value::Text(_) => {}
            Value::One(child) => reresolve(child, base),
            Value::Many(children) => {
                for child in children.iter_mut() {
                    reresolve(child, base);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_reference_is_untouched() {
        assert_eq!(resolve("http://example.com/", "http://other.com/a"), "http://other.com/a");
    }

    #[test]
    fn relative_reference_joins_base() {
        assert_eq!(resolve("http://example.com/feed/", "a"), "http://example.com/feed/a");
    }

    #[test]
    fn empty_base_leaves_reference_as_is() {
        assert_eq!(resolve("", "a"), "a");
    }

    #[test]
    fn reresolve_walks_attrs_and_logo_text() {
        let mut node = Node::new("entry", None, "entry", None);
        node.attrs.push(("href".to_string(), "a".to_string()));
        let mut logo = Node::new("logo", None, "logo", None);
        logo.text = "icon.png".to_string();
        node.insert_child("logo".to_string(), logo);
        reresolve(&mut node, "http://x/");
        assert_eq!(node.attrs[0].1, "http://x/a");
        match node.children.iter().find(|(k, _)| k == "logo").unwrap().1 {
            Value::One(ref n) => assert_eq!(n.text, "http://x/icon.png"),
            _ => panic!("expected One"),
        }
    }
}
