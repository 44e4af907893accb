//! Identifies the dialect of a syndication document from its root element
//! (spec §4.4). Run once, at the first root open-tag.

use crate::namespace::NamespaceRegistry;
use crate::node::Dialect;

pub struct DialectDetector;

impl DialectDetector {
    /// `rdf` requires local name `RDF` *and* a URI belonging to RDF.
    /// `atom` requires local name `feed` *and* a URI belonging to Atom.
    /// `rss` accepts the name regardless of namespace.
    pub fn detect(local: &str, uri: Option<&str>) -> Option<Dialect> {
        let lower = local.to_ascii_lowercase();
        if lower == "rdf" && uri.map(|u| NamespaceRegistry::belongs_to(u, "rdf")).unwrap_or(false) {
            return Some(Dialect::Rdf);
        }
        if lower == "feed" && uri.map(|u| NamespaceRegistry::belongs_to(u, "atom")).unwrap_or(false) {
            return Some(Dialect::Atom);
        }
        if lower == "rss" {
            return Some(Dialect::Rss);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rss_without_namespace() {
        assert_eq!(DialectDetector::detect("rss", None), Some(Dialect::Rss));
    }

    #[test]
    fn detects_atom_feed_only_with_atom_uri() {
        assert_eq!(DialectDetector::detect("feed", Some("http://www.w3.org/2005/Atom")), Some(Dialect::Atom));
        assert_eq!(DialectDetector::detect("feed", None), None);
    }

    #[test]
    fn detects_rdf_only_with_rdf_uri() {
        assert_eq!(DialectDetector::detect("RDF", Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#")), Some(Dialect::Rdf));
        assert_eq!(DialectDetector::detect("RDF", Some("http://example.com/")), None);
    }
}
