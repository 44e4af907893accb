//! A concrete "external tokenizer" (spec §1, §6): turns a byte stream into
//! the [`SaxEvent`] contract the engine consumes, using `quick-xml`'s
//! namespace-aware reader. Anything else producing this event shape can
//! drive a [`ParseContext`] directly without going through bytes at all.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::context::ParseContext;
use crate::error::Error;
use crate::event::{RawAttribute, SaxEvent};
use crate::sink::Sink;

/// Reads `reader` to completion, feeding `ctx` one [`SaxEvent`] per
/// tokenizer event. A byte-level read failure is fatal (quick-xml offers
/// no resynchronization past a malformed byte), surfaced as
/// [`SaxEvent::IoError`] followed by the terminal `End`.
pub fn feed_reader<R: BufRead, S: Sink>(reader: R, ctx: &mut ParseContext<S>) {
    let mut xml = NsReader::from_reader(reader);
    // Leave text untrimmed at the tokenizer: an Atom `type="xhtml"` capture
    // needs every byte of inter-element whitespace verbatim (spec §4.3).
    // Ordinary element text is trimmed once, on close, by the TreeBuilder
    // itself (`trim_or_none`), so nothing here needs trimming twice.
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (resolve, event) = match xml.read_resolved_event_into(&mut buf) {
            Ok(pair) => pair,
            Err(e) => {
                ctx.feed(SaxEvent::IoError(Error::from(e)));
                ctx.feed(SaxEvent::End);
                return;
            }
        };

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let local = lower(&e.local_name().as_ref().to_vec());
                let prefix = e.name().prefix().map(|p| lower(&p.as_ref().to_vec()));
                let uri = resolve_uri(resolve);
                let name = qualify(&prefix, &local);

                let mut attrs = Vec::new();
                for raw_attr in e.attributes() {
                    let raw_attr = match raw_attr {
                        Ok(a) => a,
                        Err(e) => {
                            ctx.feed(SaxEvent::Warning(Error::tokenizer(e.to_string())));
                            continue;
                        }
                    };
                    let key = raw_attr.key;
                    let attr_local = lower(&key.local_name().as_ref().to_vec());
                    let attr_prefix = key.prefix().map(|p| lower(&p.as_ref().to_vec()));
                    let value = raw_attr.unescape_value().map(|c| c.into_owned()).unwrap_or_default();

                    if attr_prefix.as_deref() == Some("xmlns") || (attr_local == "xmlns" && attr_prefix.is_none()) {
                        attrs.push(RawAttribute {
                            name: qualify(&Some("xmlns".to_string()), &attr_local),
                            prefix: Some("xmlns".to_string()),
                            local: attr_local,
                            uri: None,
                            value,
                        });
                        continue;
                    }

                    let (attr_resolve, _) = xml.resolve_attribute(key);
                    let attr_uri = resolve_uri(attr_resolve);
                    attrs.push(RawAttribute { name: qualify(&attr_prefix, &attr_local), prefix: attr_prefix, local: attr_local, uri: attr_uri, value });
                }

                ctx.feed(SaxEvent::OpenTag { name: name.clone(), prefix: prefix.clone(), local: local.clone(), uri: uri.clone(), attrs });
                if is_empty {
                    ctx.feed(SaxEvent::CloseTag { name, prefix, local, uri });
                }
            }
            Event::End(ref e) => {
                let local = lower(&e.local_name().as_ref().to_vec());
                let prefix = e.name().prefix().map(|p| lower(&p.as_ref().to_vec()));
                let uri = resolve_uri(resolve);
                let name = qualify(&prefix, &local);
                ctx.feed(SaxEvent::CloseTag { name, prefix, local, uri });
            }
            Event::Text(e) => {
                if let Ok(text) = e.unescape() {
                    ctx.feed(SaxEvent::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                ctx.feed(SaxEvent::CData(text));
            }
            Event::Eof => {
                ctx.feed(SaxEvent::End);
                return;
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn lower(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_ascii_lowercase()
}

fn qualify(prefix: &Option<String>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{}:{}", p, local),
        None => local.to_string(),
    }
}

fn resolve_uri(resolve: ResolveResult) -> Option<String> {
    match resolve {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}
