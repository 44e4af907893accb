//! Parse-time configuration (spec §6). A plain owned struct, in keeping
//! with the teacher crate's preference for small builder-style option
//! structs over an external config-file layer — this crate has no file or
//! CLI surface to configure.

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// If true, the tokenizer should reject malformed XML. The engine
    /// itself does not enforce this; it is advisory for the tokenizer
    /// adapter (e.g. [`crate::xml_source`]) driving a [`crate::context::ParseContext`].
    pub strict: bool,
    /// If true (default), `MetaNormalizer`/`ItemNormalizer` produce the
    /// canonical schema; if false, raw trees are returned via `extensions`.
    pub normalize: bool,
    /// If true (default), each emitted article carries a back-reference to
    /// the feed meta.
    pub addmeta: bool,
    /// A pre-seeded `xml:base`, used before any `xml:base` attribute or
    /// Atom `self` link is seen.
    pub feedurl: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { strict: false, normalize: true, addmeta: true, feedurl: None }
    }
}
