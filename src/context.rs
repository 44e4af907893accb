//! Emitter/Driver (spec §4.7) and the per-session state owner (spec §5):
//! a `ParseContext` is fed [`SaxEvent`]s one at a time and guarantees
//! `meta` fires exactly once, strictly before any `article`, and `end`
//! fires exactly once, last.

use log::warn;

use crate::event::SaxEvent;
use crate::node::Dialect;
use crate::normalize::{ItemNormalizer, MetaNormalizer};
use crate::options::ParseOptions;
use crate::sink::Sink;
use crate::tree_builder::{Closed, TreeBuilder};
use crate::url_resolver;

/// Owns every piece of mutable state for one parse session (spec §5): the
/// element stack and `xml:base` stack and XHTML buffer (via [`TreeBuilder`]),
/// the accumulated meta, articles and errors, and the emitted-meta flag.
/// Two concurrent parses require two `ParseContext`s; there is no shared
/// mutable state between them.
pub struct ParseContext<S: Sink> {
    options: ParseOptions,
    builder: TreeBuilder,
    sink: S,
    meta: Option<crate::model::FeedMeta>,
    articles: Vec<crate::model::Article>,
    errors: Vec<crate::error::Error>,
    ended: bool,
}

impl<S: Sink> ParseContext<S> {
    pub fn new(options: ParseOptions, sink: S) -> Self {
        let mut builder = TreeBuilder::new();
        if let Some(url) = options.feedurl.clone() {
            builder.seed_base(url);
        }
        ParseContext { options, builder, sink, meta: None, articles: Vec::new(), errors: Vec::new(), ended: false }
    }

    /// Feeds one tokenizer event. The caller (an adapter like
    /// [`crate::xml_source`]) is responsible for producing events in
    /// document order; this call does not block or buffer beyond the
    /// current element subtree.
    pub fn feed(&mut self, event: SaxEvent) {
        if self.ended {
            return;
        }
        match event {
            SaxEvent::OpenTag { name, prefix, local, uri, attrs } => {
                self.builder.open(name, prefix, local, uri, attrs);
            }
            SaxEvent::CloseTag { name, prefix, local, uri } => {
                if let Some(closed) = self.builder.close(name, prefix, local, uri) {
                    self.handle_closed(closed);
                }
            }
            SaxEvent::Text(t) => self.builder.text(&t),
            SaxEvent::CData(t) => self.builder.cdata(&t),
            SaxEvent::Warning(e) => {
                self.sink.warning(&e);
                self.errors.push(e);
            }
            SaxEvent::TokenizerError(e) => {
                warn!("recoverable tokenizer error, resuming: {}", e);
                self.sink.error(&e);
                self.errors.push(e);
            }
            SaxEvent::IoError(e) => {
                self.errors.push(e);
                self.finish();
            }
            SaxEvent::End => self.finish(),
        }
    }

    fn handle_closed(&mut self, closed: Closed) {
        match closed {
            Closed::Channel(n) => {
                if self.meta.is_none() {
                    self.emit_meta(&n);
                }
            }
            Closed::Item(mut n) => {
                let mut discovered_base = None;
                if self.meta.is_none() {
                    if let Some(root) = self.builder.open_root().cloned() {
                        discovered_base = self.emit_meta(&root);
                    }
                }
                if let Some(base) = &discovered_base {
                    url_resolver::reresolve(&mut n, base);
                }

                let dialect = self.builder.root_dialect.unwrap_or(Dialect::Rss);
                let mut article = ItemNormalizer::normalize(&n, dialect, &self.options);
                if let Some(meta) = &self.meta {
                    if self.options.addmeta {
                        article.meta = Some(Box::new(meta.clone()));
                    }
                    if article.author.is_none() {
                        article.author = meta.author.clone();
                    }
                }
                self.sink.article(&article);
                self.articles.push(article);
            }
        }
    }

    /// Runs `MetaNormalizer` on `node`, emits `meta`, and returns the
    /// self-link URL if one was just seeded as the active `xml:base`
    /// (spec §4.5 `link rel="self"` rule) so the caller can retroactively
    /// `reresolve` whatever triggered this normalization.
    fn emit_meta(&mut self, node: &crate::node::Node) -> Option<String> {
        let dialect = self.builder.root_dialect.unwrap_or(Dialect::Rss);
        let version = self.builder.root_version.clone().unwrap_or_else(|| "1.0".to_string());
        let (meta, self_link) = MetaNormalizer::normalize(node, dialect, &version, &self.builder.root_attrs, &self.builder.namespaces, &self.options);

        let mut discovered = None;
        if let Some(url) = &self_link {
            if self.builder.push_base_if_absent(url) {
                discovered = Some(url.clone());
            }
        }

        self.sink.meta(&meta);
        self.meta = Some(meta);
        discovered
    }

    fn finish(&mut self) {
        if self.ended {
            return;
        }
        if self.meta.is_none() {
            if let Some(root) = self.builder.open_root().cloned() {
                self.emit_meta(&root);
            }
        }
        self.sink.end(&self.articles);
        self.ended = true;
    }

    /// Consumes the context, returning the completion-callback shape: the
    /// most recent error (with prior errors attached as a sibling list),
    /// or the finished `(meta, articles)` pair.
    pub fn into_completion(self) -> crate::sink::Completion {
        if let Some(last) = self.errors.last().cloned() {
            if self.meta.is_none() {
                let prior: Vec<_> = self.errors[..self.errors.len() - 1].to_vec();
                return crate::sink::Completion::Err(last.with_others(prior));
            }
        }
        match self.meta {
            Some(meta) => crate::sink::Completion::Ok(meta, self.articles),
            None => crate::sink::Completion::Err(
                crate::error::Error::tokenizer("no channel or feed element was found").with_others(self.errors),
            ),
        }
    }
}
