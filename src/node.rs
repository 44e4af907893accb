//! The tree-builder's unit of work: [`Node`], the heterogeneous child slot
//! [`Value`], and the small sum types the design notes ask for so dialect
//! and name classification stop being done by string comparison scattered
//! across call sites.

/// A value held in a [`Node`]'s child map: either collapsed text, a single
/// child element, or (once a second sibling with the same key arrives) a
/// list. Promotion from `One` to `Many` happens on duplicate insert and is
/// the only transition `Value` ever makes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Value {
    Text(String),
    One(Box<Node>),
    Many(Vec<Node>),
}

/// One XML element accumulated while it is live on the [`crate::tree_builder::TreeBuilder`]
/// stack, or owned by a parent's `children` map once closed.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Node {
    /// Qualified name as received (`prefix:local` or `local`).
    pub name: String,
    pub prefix: Option<String>,
    pub local: String,
    pub uri: Option<String>,
    /// Canonicalized attribute name -> trimmed value, insertion order.
    pub attrs: Vec<(String, String)>,
    /// Accumulated character data; trimmed and whitespace-collapsed on close.
    pub text: String,
    /// Canonical child name -> Value, insertion order. A second sibling
    /// under the same key promotes the slot from `One` to `Many`.
    pub children: Vec<(String, Value)>,
    /// Canonical dialect tag attached to the element after close: one of
    /// `rss` / `rdf` / `atom` / some other registered or raw prefix.
    pub kind: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, prefix: Option<String>, local: impl Into<String>, uri: Option<String>) -> Self {
        Node {
            name: name.into(),
            prefix,
            local: local.into(),
            uri,
            attrs: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            kind: None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn child(&self, key: &str) -> Option<&Value> {
        self.children.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// `true` if this node, once closed, has nothing but text: the caller
    /// collapses it to a bare `Value::Text` rather than attaching a `Node`.
    pub fn is_text_only(&self) -> bool {
        self.attrs.is_empty() && self.children.is_empty()
    }

    /// Insert (or promote) a child under `key`, preserving document order
    /// and folding duplicate keys into a `Many` list.
    pub fn insert_child(&mut self, key: String, child: Node) {
        let value = if child.is_text_only() { Value::Text(child.text) } else { Value::One(Box::new(child)) };
        self.insert_value(key, value);
    }

    pub fn insert_value(&mut self, key: String, value: Value) {
        if let Some(slot) = self.children.iter_mut().find(|(k, _)| *k == key) {
            let existing = std::mem::replace(&mut slot.1, Value::Text(String::new()));
            slot.1 = match existing {
                Value::Many(mut list) => {
                    list.push(value_to_node(value));
                    Value::Many(list)
                }
                other => Value::Many(vec![value_to_node(other), value_to_node(value)]),
            };
        } else {
            self.children.push((key, value));
        }
    }

    /// All children under `key` as a flat slice-like Vec, regardless of
    /// whether the slot held zero, one, or many.
    pub fn children_named(&self, key: &str) -> Vec<&Node> {
        match self.child(key) {
            None => Vec::new(),
            Some(Value::Text(_)) => Vec::new(),
            Some(Value::One(n)) => vec![n.as_ref()],
            Some(Value::Many(list)) => list.iter().collect(),
        }
    }
}

/// Flattens a text-bearing `Value`/`Node`/`&str` into its text content: the
/// shared `text()` helper the design notes call for, so normalizers never
/// have to match on `Value` themselves.
pub trait AsText {
    fn text(&self) -> String;
}

impl AsText for Value {
    fn text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::One(n) => n.text.clone(),
            Value::Many(list) => list.first().map(|n| n.text.clone()).unwrap_or_default(),
        }
    }
}

impl AsText for Node {
    fn text(&self) -> String {
        self.text.clone()
    }
}

impl AsText for Option<&Value> {
    fn text(&self) -> String {
        match self {
            Some(v) => v.text(),
            None => String::new(),
        }
    }
}

/// Converts a `Value` that is known to be a single node into an owned
/// `Node`, synthesizing a text-only node for a bare `Value::Text` (used
/// only by the duplicate-key promotion path, where a previously-collapsed
/// text value must rejoin a `Many` list of real nodes).
fn value_to_node(value: Value) -> Node {
    match value {
        Value::Text(s) => {
            let mut n = Node::new(String::new(), None, String::new(), None);
            n.text = s;
            n
        }
        Value::One(n) => *n,
        Value::Many(mut list) => list.pop().unwrap_or_else(|| Node::new(String::new(), None, String::new(), None)),
    }
}

/// The three syndication dialects this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Rss,
    Rdf,
    Atom,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Rss => "rss",
            Dialect::Rdf => "rdf",
            Dialect::Atom => "atom",
        }
    }
}

/// An element's name after namespace resolution: either one of the core
/// names a dialect defines, or an extension element kept under its
/// namespace's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalName {
    Core(String),
    Extension(String, String),
}

impl CanonicalName {
    pub fn key(&self) -> String {
        match self {
            CanonicalName::Core(local) => local.clone(),
            CanonicalName::Extension(prefix, local) => format!("{}:{}", prefix, local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_child_collapses_to_text_value() {
        let mut parent = Node::new("channel", None, "channel", None);
        let mut title = Node::new("title", None, "title", None);
        title.text = "A".to_string();
        parent.insert_child("title".to_string(), title);
        assert_eq!(parent.child("title").text(), "A");
    }

    #[test]
    fn duplicate_key_promotes_to_many() {
        let mut parent = Node::new("channel", None, "channel", None);
        for t in ["news", "tech"] {
            let mut cat = Node::new("category", None, "category", None);
            cat.text = t.to_string();
            parent.insert_child("category".to_string(), cat);
        }
        match parent.child("category") {
            Some(Value::Many(list)) => assert_eq!(list.len(), 2),
            other => panic!("expected Many, got {:?}", other),
        }
    }

    #[test]
    fn node_with_attrs_does_not_collapse() {
        let mut parent = Node::new("entry", None, "entry", None);
        let mut link = Node::new("link", None, "link", None);
        link.attrs.push(("href".to_string(), "http://x/".to_string()));
        parent.insert_child("link".to_string(), link);
        match parent.child("link") {
            Some(Value::One(n)) => assert_eq!(n.attr("href"), Some("http://x/")),
            other => panic!("expected One, got {:?}", other),
        }
    }
}
