//! Known XML namespace URIs mapped onto the canonical prefixes the rest of
//! the crate keys its output by, independent of whatever prefix a document
//! actually declares.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// `(canonical prefix, URIs that are known to denote it)`.
const KNOWN: &[(&str, &[&str])] = &[
    (
        "atom",
        &[
            "http://www.w3.org/2005/Atom",
            "http://purl.org/atom/ns#",
            "http://www.w3.org/2005/Atom/",
        ],
    ),
    ("rdf", &["http://www.w3.org/1999/02/22-rdf-syntax-ns#"]),
    ("rss", &["http://purl.org/rss/1.0/"]),
    ("dc", &["http://purl.org/dc/elements/1.1/"]),
    ("itunes", &["http://www.itunes.com/dtds/podcast-1.0.dtd"]),
    ("media", &["http://search.yahoo.com/mrss/"]),
    ("cc", &["http://web.resource.org/cc/"]),
    ("creativecommons", &["http://backend.userland.com/creativeCommonsRssModule"]),
    ("admin", &["http://webns.net/mvcb/"]),
    ("feedburner", &["http://rssnamespace.org/feedburner/ext/1.0"]),
    ("pheedo", &["http://www.pheedo.com/namespace/pheedo"]),
    ("xml", &["http://www.w3.org/XML/1998/namespace"]),
];

lazy_static! {
    static ref URI_TO_PREFIX: HashMap<String, &'static str> = {
        let mut m = HashMap::new();
        for (prefix, uris) in KNOWN {
            for uri in *uris {
                m.insert(normalize(uri), *prefix);
            }
        }
        m
    };
}

fn normalize(uri: &str) -> String {
    uri.trim_end_matches('/').to_ascii_lowercase()
}

/// Central registry of namespace identity. This is the single point that
/// decides dialect identity: a feed binding `a:` to the Atom URI is
/// recognized exactly as one using the default namespace.
pub struct NamespaceRegistry;

impl NamespaceRegistry {
    /// Returns the canonical prefix for `uri`, if registered. Comparison is
    /// case-insensitive and tolerant of a trailing slash.
    pub fn canonical_prefix(uri: &str) -> Option<&'static str> {
        URI_TO_PREFIX.get(&normalize(uri)).copied()
    }

    /// True iff `uri` is one of the registered URIs for `prefix`.
    pub fn belongs_to(uri: &str, prefix: &str) -> bool {
        Self::canonical_prefix(uri) == Some(prefix)
            || KNOWN
                .iter()
                .any(|(p, uris)| *p == prefix && uris.iter().any(|u| normalize(u) == normalize(uri)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_atom_regardless_of_case_or_trailing_slash() {
        assert_eq!(NamespaceRegistry::canonical_prefix("HTTP://WWW.W3.ORG/2005/ATOM/"), Some("atom"));
        assert!(NamespaceRegistry::belongs_to("http://www.w3.org/2005/Atom", "atom"));
    }

    #[test]
    fn unknown_uri_is_none() {
        assert_eq!(NamespaceRegistry::canonical_prefix("http://example.com/ns"), None);
        assert!(!NamespaceRegistry::belongs_to("http://example.com/ns", "atom"));
    }

    #[test]
    fn rdf_and_rss_are_distinct() {
        assert_eq!(NamespaceRegistry::canonical_prefix("http://www.w3.org/1999/02/22-rdf-syntax-ns#"), Some("rdf"));
        assert_eq!(NamespaceRegistry::canonical_prefix("http://purl.org/rss/1.0/"), Some("rss"));
    }
}
