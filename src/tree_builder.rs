//! SAX-driven tree builder (spec §4.3): maintains the element stack, the
//! `xml:base` stack and the XHTML capture buffer, and reconstructs a
//! per-article subtree incrementally while discarding everything outside
//! the current article.

use log::debug;

use crate::dialect::DialectDetector;
use crate::event::RawAttribute;
use crate::namespace::NamespaceRegistry;
use crate::node::{CanonicalName, Dialect, Node};
use crate::url_resolver;
use crate::util::trim_or_none;

struct XhtmlCapture {
    container_name: String,
    buffer: String,
    /// How many open-but-unclosed descendants have been appended to the
    /// buffer since capture began; 0 means the next close-tag is the
    /// container's own.
    depth: usize,
}

/// What a closed element resolved to, for [`crate::context::ParseContext`]
/// to act on.
pub enum Closed {
    /// A `channel`/`feed` element closed.
    Channel(Node),
    /// An `item`/`entry` element closed. The channel/feed is still open and
    /// reachable via [`TreeBuilder::open_root`].
    Item(Node),
}

pub struct TreeBuilder {
    stack: Vec<Node>,
    xmlbase_stack: Vec<(String, String)>,
    xhtml: Option<XhtmlCapture>,
    pub root_dialect: Option<Dialect>,
    pub root_version: Option<String>,
    pub root_attrs: Vec<(String, String)>,
    pub namespaces: Vec<(String, String)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            stack: Vec::new(),
            xmlbase_stack: Vec::new(),
            xhtml: None,
            root_dialect: None,
            root_version: None,
            root_attrs: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Seeds a permanent base frame from `ParseOptions::feedurl`, active
    /// before any `xml:base` attribute or Atom `self` link is seen.
    pub fn seed_base(&mut self, url: String) {
        self.xmlbase_stack.insert(0, (String::new(), url));
    }

    pub fn active_base(&self) -> &str {
        self.xmlbase_stack.last().map(|(_, u)| u.as_str()).unwrap_or("")
    }

    /// Pushes `url` as the active base iff no base is currently active.
    /// Returns whether it did. Used by the Atom `link rel="self"` rule.
    pub fn push_base_if_absent(&mut self, url: &str) -> bool {
        if self.active_base().is_empty() {
            self.xmlbase_stack.push((String::new(), url.to_string()));
            true
        } else {
            false
        }
    }

    /// The currently-open channel/feed element, read-only: used to
    /// normalize Meta from an element that has not closed yet, when the
    /// first item/entry closes first. This is the top of the stack (spec
    /// §3 "the active base is index 0"; for RSS the stack is `[rss,
    /// channel]` at that point, so the channel — not the outer `<rss>`
    /// wrapper — is what must be normalized.
    pub fn open_root(&self) -> Option<&Node> {
        self.stack.last()
    }

    pub fn is_idle(&self) -> bool {
        self.stack.is_empty() && self.xmlbase_stack.is_empty() && self.xhtml.is_none()
    }

    pub fn open(&mut self, name: String, prefix: Option<String>, local: String, uri: Option<String>, raw_attrs: Vec<RawAttribute>) {
        if let Some(cap) = &mut self.xhtml {
            cap.depth += 1;
            cap.buffer.push('<');
            cap.buffer.push_str(&name);
            for a in &raw_attrs {
                cap.buffer.push(' ');
                cap.buffer.push_str(&a.name);
                cap.buffer.push_str("=\"");
                cap.buffer.push_str(&a.value);
                cap.buffer.push('"');
            }
            cap.buffer.push('>');
            return;
        }

        let mut node = Node::new(name.clone(), prefix, local.clone(), uri.clone());
        let mut xhtml_triggered = false;
        let mut new_base_frame: Option<String> = None;

        for raw in raw_attrs {
            if raw.prefix.as_deref() == Some("xmlns") {
                self.namespaces.push((raw.local.clone(), raw.value.clone()));
                continue;
            }
            if raw.local == "xmlns" && raw.prefix.is_none() {
                self.namespaces.push((String::new(), raw.value.clone()));
                continue;
            }

            let mut value = raw.value.clone();
            let is_xml_base_attr = raw.local == "base" && raw.uri.as_deref().map(|u| NamespaceRegistry::belongs_to(u, "xml")).unwrap_or(false);

            let key = match (&raw.uri, &raw.prefix) {
                (Some(attr_uri), Some(pfx)) if !NamespaceRegistry::belongs_to(attr_uri, pfx) || NamespaceRegistry::belongs_to(attr_uri, "xml") => {
                    format!("{}:{}", NamespaceRegistry::canonical_prefix(attr_uri).unwrap_or(pfx.as_str()), raw.local)
                }
                _ => raw.local.clone(),
            };

            if !self.active_base().is_empty() && matches!(raw.local.as_str(), "href" | "src" | "uri") {
                value = url_resolver::resolve(self.active_base(), &value);
            }

            if is_xml_base_attr {
                value = url_resolver::resolve(self.active_base(), &value);
                new_base_frame = Some(value.clone());
            }

            if raw.local == "type" && value == "xhtml" {
                xhtml_triggered = true;
            }

            node.attrs.push((key, value.trim().to_string()));
        }

        if let Some(base) = new_base_frame {
            debug!("xml:base pushed on <{}>: {}", name, base);
            self.xmlbase_stack.push((name.clone(), base));
        }

        if self.stack.is_empty() {
            if let Some(dialect) = DialectDetector::detect(&local, uri.as_deref()) {
                let version = node.attr("version").map(|s| s.to_string()).unwrap_or_else(|| "1.0".to_string());
                debug!("detected dialect {:?} version {}", dialect, version);
                self.root_dialect = Some(dialect);
                self.root_version = Some(version);
                self.root_attrs = node.attrs.iter().filter(|(k, _)| k != "version").cloned().collect();
            }
        }

        if xhtml_triggered {
            debug!("xhtml capture begins on <{}>", name);
            self.xhtml = Some(XhtmlCapture { container_name: name, buffer: String::new(), depth: 0 });
        }

        self.stack.push(node);
    }

    pub fn text(&mut self, s: &str) {
        if let Some(cap) = &mut self.xhtml {
            cap.buffer.push_str(s);
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.text.push_str(s);
        }
    }

    pub fn cdata(&mut self, s: &str) {
        self.text(s);
    }

    pub fn close(&mut self, name: String, _prefix: Option<String>, _local: String, _uri: Option<String>) -> Option<Closed> {
        if let Some(cap) = &mut self.xhtml {
            if cap.depth > 0 {
                cap.buffer.push_str("</");
                cap.buffer.push_str(&name);
                cap.buffer.push('>');
                cap.depth -= 1;
                return None;
            }
        }

        let mut n = self.stack.pop()?;

        let kind = classify_kind(&n, self.root_dialect);
        n.kind = Some(kind.clone());

        if self.xmlbase_stack.last().map(|(k, _)| k == &name).unwrap_or(false) {
            self.xmlbase_stack.pop();
        }

        if (n.local == "logo" || n.local == "icon") && !self.active_base().is_empty() && !n.text.is_empty() {
            n.text = url_resolver::resolve(self.active_base(), &n.text);
        }

        if let Some(cap) = self.xhtml.take() {
            if cap.container_name == name {
                debug!("xhtml capture ends on <{}>, {} bytes", name, cap.buffer.len());
                n.text = cap.buffer;
                n.children.clear();
            } else {
                self.xhtml = Some(cap);
            }
        }

        n.text = trim_or_none(&n.text).unwrap_or_default();

        let is_item = matches!(self.root_dialect, Some(Dialect::Rss) | Some(Dialect::Rdf)) && n.local.eq_ignore_ascii_case("item")
            || matches!(self.root_dialect, Some(Dialect::Atom)) && n.local.eq_ignore_ascii_case("entry");
        let is_channel = matches!(self.root_dialect, Some(Dialect::Rss) | Some(Dialect::Rdf)) && n.local.eq_ignore_ascii_case("channel")
            || matches!(self.root_dialect, Some(Dialect::Atom)) && n.local.eq_ignore_ascii_case("feed");

        if is_item {
            return Some(Closed::Item(n));
        }
        if is_channel {
            return Some(Closed::Channel(n));
        }

        let key = attach_key(&n);
        if let Some(parent) = self.stack.last_mut() {
            parent.insert_child(key, n);
        }
        None
    }
}

fn classify_kind(n: &Node, dialect: Option<Dialect>) -> String {
    if let Some(prefix) = &n.prefix {
        if let Some(uri) = &n.uri {
            return NamespaceRegistry::canonical_prefix(uri).unwrap_or(prefix.as_str()).to_string();
        }
        return prefix.clone();
    }
    if let Some(uri) = &n.uri {
        if let Some(p) = NamespaceRegistry::canonical_prefix(uri) {
            return p.to_string();
        }
    }
    dialect.map(|d| d.as_str().to_string()).unwrap_or_else(|| "rss".to_string())
}

/// A closed element's name after namespace resolution (spec §9): `Core`
/// for an unprefixed element or one in a core dialect namespace, else
/// `Extension` keyed by its canonical/raw prefix.
fn canonical_name(n: &Node) -> CanonicalName {
    match &n.prefix {
        Some(p) => {
            let is_known_dialect = matches!(n.kind.as_deref(), Some("rss") | Some("rdf") | Some("atom"));
            if is_known_dialect {
                CanonicalName::Core(n.local.clone())
            } else {
                CanonicalName::Extension(p.clone(), n.local.clone())
            }
        }
        None => CanonicalName::Core(n.local.clone()),
    }
}

/// Canonical key under which a closed element attaches to its parent.
fn attach_key(n: &Node) -> String {
    canonical_name(n).key()
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawAttribute;

    fn attr(name: &str, value: &str) -> RawAttribute {
        RawAttribute { name: name.to_string(), prefix: None, local: name.to_string(), uri: None, value: value.to_string() }
    }

    #[test]
    fn detects_root_dialect_and_version() {
        let mut b = TreeBuilder::new();
        b.open("rss".into(), None, "rss".into(), None, vec![attr("version", "2.0")]);
        assert_eq!(b.root_dialect, Some(Dialect::Rss));
        assert_eq!(b.root_version.as_deref(), Some("2.0"));
    }

    #[test]
    fn xml_base_resolves_href_and_pops_on_close() {
        let mut b = TreeBuilder::new();
        b.open("feed".into(), None, "feed".into(), Some("http://www.w3.org/2005/Atom".into()), vec![RawAttribute {
            name: "xml:base".into(),
            prefix: Some("xml".into()),
            local: "base".into(),
            uri: Some("http://www.w3.org/XML/1998/namespace".into()),
            value: "http://x/".into(),
        }]);
        assert_eq!(b.active_base(), "http://x/");
        b.open("entry".into(), None, "entry".into(), None, vec![]);
        b.open("link".into(), None, "link".into(), None, vec![attr("href", "a")]);
        let closed = b.close("link".into(), None, "link".into(), None);
        assert!(closed.is_none());
        let entry = b.close("entry".into(), None, "entry".into(), None);
        match entry {
            Some(Closed::Item(n)) => {
                let link = n.children_named("link");
                assert_eq!(link[0].attr("href"), Some("http://x/a"));
            }
            _ => panic!("expected item"),
        }
        b.close("feed".into(), None, "feed".into(), None);
        assert!(b.is_idle());
    }

    #[test]
    fn xhtml_capture_serializes_descendants() {
        let mut b = TreeBuilder::new();
        b.open("entry".into(), None, "entry".into(), None, vec![]);
        b.open("content".into(), None, "content".into(), None, vec![attr("type", "xhtml")]);
        b.open("div".into(), None, "div".into(), None, vec![]);
        b.open("p".into(), None, "p".into(), None, vec![]);
        b.text("hi ");
        b.open("b".into(), None, "b".into(), None, vec![]);
        b.text("there");
        b.close("b".into(), None, "b".into(), None);
        b.close("p".into(), None, "p".into(), None);
        b.close("div".into(), None, "div".into(), None);
        b.close("content".into(), None, "content".into(), None);
        let entry = b.close("entry".into(), None, "entry".into(), None);
        match entry {
            Some(Closed::Item(n)) => {
                let content = n.children_named("content");
                assert!(content[0].text.starts_with("<div"));
                assert!(content[0].text.contains("<p>hi <b>there</b></p>"));
            }
            _ => panic!("expected item"),
        }
    }
}
