//! A streaming, dialect-agnostic syndication feed parser: RSS 0.9x/2.0,
//! RDF Site Summary (RSS 1.0) and Atom 0.3/1.0, normalized onto one
//! canonical [`FeedMeta`]/[`Article`] schema while every non-core
//! namespaced element (Dublin Core, iTunes, Media RSS, Creative Commons,
//! Feedburner, Pheedo, Admin) is preserved verbatim for downstream
//! consumers.
//!
//! The engine itself consumes a SAX-like [`event::SaxEvent`] stream rather
//! than bytes directly, so it has no opinion on how that stream is
//! produced. [`xml_source`] is the bundled tokenizer, built on `quick-xml`;
//! anything else that can emit the same event shape can drive a
//! [`context::ParseContext`] without going through bytes at all.
//!
//! ```no_run
//! use feedstream::{parse_str, sink::Completion};
//!
//! let xml = r#"<rss version="2.0"><channel><title>A</title>
//!     <item><title>T</title></item></channel></rss>"#;
//! match parse_str(xml) {
//!     Completion::Ok(meta, articles) => {
//!         println!("{} ({} articles)", meta.title.unwrap_or_default(), articles.len());
//!     }
//!     Completion::Err(e) => eprintln!("parse failed: {}", e),
//! }
//! ```

pub mod context;
pub mod dialect;
pub mod error;
pub mod event;
pub mod model;
pub mod namespace;
pub mod node;
pub mod normalize;
pub mod options;
pub mod sink;
pub mod tree_builder;
pub mod url_resolver;
pub mod util;
pub mod xml_source;

pub use error::{Error, ErrorKind, Result};
pub use model::{Article, Enclosure, FeedMeta, Image, Source};
pub use node::{CanonicalName, Dialect, Node, Value};
pub use options::ParseOptions;
pub use sink::{Completion, NullSink, Sink};

use std::io::BufRead;

use context::ParseContext;

/// Parses `reader` with `options`, driving `sink` for every observable
/// event in document order (spec §4.7, §6), and returns the
/// completion-callback shape once parsing ends.
pub fn parse<R: BufRead, S: Sink>(reader: R, options: ParseOptions, sink: S) -> Completion {
    let mut ctx = ParseContext::new(options, sink);
    xml_source::feed_reader(reader, &mut ctx);
    ctx.into_completion()
}

/// Convenience wrapper over [`parse`] for an in-memory UTF-8 document,
/// default [`ParseOptions`] and no observable sink.
pub fn parse_str(xml: &str) -> Completion {
    parse(xml.as_bytes(), ParseOptions::default(), NullSink)
}

/// As [`parse_str`] but with caller-supplied options (e.g. a pre-seeded
/// `feedurl`, or `normalize: false` to get raw trees back via `extensions`).
pub fn parse_str_with(xml: &str, options: ParseOptions) -> Completion {
    parse(xml.as_bytes(), options, NullSink)
}
