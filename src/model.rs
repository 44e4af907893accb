//! The canonical, dialect-agnostic output schema (spec §3). Every field
//! besides the arrays is optional: a document that never mentions, say,
//! `copyright` simply leaves it `None` rather than forcing a normalizer to
//! invent one.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `image`/`logo` at feed level: just enough to link to and caption an
/// image, not a full RSS 2.0 `<image>` block (width/height have no
/// canonical-schema home per spec §3).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Image {
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Atom/RSS `source` on an article: the feed an entry was copied from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Source {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// A `enclosure`/`media:content` attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enclosure {
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub length: Option<String>,
}

/// Feed-level metadata, normalized from whichever dialect produced it.
/// `extensions` retains every non-core namespaced child verbatim, keyed as
/// described in spec §6, so a downstream consumer that cares about
/// `itunes:explicit` or `feedburner:info` still gets at it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedMeta {
    pub namespaces: Vec<(String, String)>,
    pub root_attrs: Vec<(String, String)>,
    pub feed_type: Option<String>,
    pub version: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub pubdate: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub xmlurl: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub image: Option<Image>,
    pub favicon: Option<String>,
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub categories: Vec<String>,
    pub extensions: Vec<(String, crate::node::Value)>,
}

/// Per-article metadata, normalized from an `item`/`entry` subtree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub pubdate: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub origlink: Option<String>,
    pub author: Option<String>,
    pub guid: Option<String>,
    pub comments: Option<String>,
    pub image: Option<Image>,
    pub source: Option<Source>,
    pub categories: Vec<String>,
    pub enclosures: Vec<Enclosure>,
    /// Back-reference to the feed meta, attached iff `ParseOptions::addmeta`.
    pub meta: Option<Box<FeedMeta>>,
    pub extensions: Vec<(String, crate::node::Value)>,
}
