//! The observable-style output contract (spec §4.7, §6) plus a thin
//! completion-callback shim over it, per the design notes' "callback-and-
//! event dual API".

use crate::error::Error;
use crate::model::{Article, FeedMeta};

/// Receives parse events in document order: exactly one `meta` before any
/// `article`, `article`s in feed order, `warning`/`error` as they are
/// accumulated, and exactly one `end` last.
pub trait Sink {
    fn meta(&mut self, meta: &FeedMeta) {
        let _ = meta;
    }
    fn article(&mut self, article: &Article) {
        let _ = article;
    }
    fn warning(&mut self, err: &Error) {
        let _ = err;
    }
    fn error(&mut self, err: &Error) {
        let _ = err;
    }
    fn end(&mut self, articles: &[Article]) {
        let _ = articles;
    }
}

/// A no-op sink for callers that only want the completion-style result.
#[derive(Default)]
pub struct NullSink;

impl Sink for NullSink {}

/// The result handed to a completion callback: either the terminal error
/// (with any prior errors attached as a sibling list) or the finished
/// `(meta, articles)` pair (spec §4.3 `End`, §7).
pub enum Completion {
    Err(Error),
    Ok(FeedMeta, Vec<Article>),
}
