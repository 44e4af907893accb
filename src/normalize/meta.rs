//! Maps a channel/feed subtree onto [`FeedMeta`] (spec §4.5).

use crate::model::{FeedMeta, Image};
use crate::node::{AsText, Dialect, Node, Value};
use crate::options::ParseOptions;
use crate::util::{dedup_preserve_order, parse_date, trim_or_none};

use super::common::{category_values, first_rdf_resource, nested_attr, nodes_of, person_text, rekey_extension, single_node};

pub struct MetaNormalizer;

impl MetaNormalizer {
    /// Normalizes `node` (the still-open channel/feed element) into a
    /// [`FeedMeta`]. Returns the discovered Atom `self` link, if any, so the
    /// caller can decide whether to seed `xml:base` from it (it does so
    /// only "if none is active", which the normalizer itself cannot judge
    /// without owning the xml:base stack).
    pub fn normalize(
        node: &Node,
        dialect: Dialect,
        version: &str,
        root_attrs: &[(String, String)],
        namespaces: &[(String, String)],
        options: &ParseOptions,
    ) -> (FeedMeta, Option<String>) {
        let mut meta = FeedMeta::default();
        meta.namespaces = namespaces.to_vec();
        meta.root_attrs = root_attrs.to_vec();
        meta.feed_type = Some(dialect.as_str().to_string());
        meta.version = Some(version.to_string());

        if !options.normalize {
            meta.extensions = node.children.iter().map(|(k, v)| (rekey_extension(k, dialect.as_str()), v.clone())).collect();
            return (meta, None);
        }

        let mut self_link = None;
        let mut categories = Vec::new();

        for (key, value) in &node.children {
            match key.as_str() {
                "title" => meta.title = trim_or_none(&value.text()),
                "description" | "subtitle" => meta.description = trim_or_none(&value.text()),
                "pubdate" | "published" => {
                    if let Some(d) = parse_date(&value.text()) {
                        meta.pubdate = Some(d);
                        if meta.date.is_none() {
                            meta.date = Some(d);
                        }
                    }
                }
                "lastbuilddate" | "modified" | "updated" | "dc:date" => {
                    if let Some(d) = parse_date(&value.text()) {
                        meta.date = Some(d);
                        if meta.pubdate.is_none() {
                            meta.pubdate = Some(d);
                        }
                    }
                }
                "link" | "atom:link" | "atom10:link" => {
                    apply_link(value, &mut meta, &mut self_link);
                }
                "managingeditor" | "webmaster" => {
                    if meta.author.is_none() {
                        meta.author = trim_or_none(&value.text());
                    }
                }
                "author" => {
                    if let Some(n) = single_node(value) {
                        meta.author = person_text(n);
                    }
                }
                "language" => meta.language = trim_or_none(&value.text()),
                "image" | "logo" => {
                    if let Some(n) = single_node(value) {
                        let url = n.children_named("url").first().map(|u| u.text.clone()).or_else(|| trim_or_none(&n.text));
                        let title = n.children_named("title").first().map(|t| t.text.clone());
                        meta.image = Some(Image { url, title });
                    } else if let Value::Text(s) = value {
                        meta.image = Some(Image { url: trim_or_none(s), title: None });
                    }
                }
                "icon" => meta.favicon = trim_or_none(&value.text()),
                "copyright" | "rights" | "dc:rights" => meta.copyright = trim_or_none(&value.text()),
                "generator" => meta.generator = generator_text(value),
                "category" | "dc:subject" | "itunes:category" | "media:category" => {
                    for n in nodes_of(value) {
                        categories.extend(category_values(key, n));
                    }
                }
                _ => {}
            }
        }

        if meta.description.is_none() {
            meta.description = node.children_named("itunes:summary").first().and_then(|n| trim_or_none(&n.text)).or_else(|| {
                node.children_named("tagline").first().and_then(|n| trim_or_none(&n.text))
            });
        }
        if meta.author.is_none() {
            meta.author = node
                .children_named("itunes:author")
                .first()
                .and_then(|n| trim_or_none(&n.text))
                .or_else(|| nested_attr_text(node, &["itunes:owner", "itunes:name"]))
                .or_else(|| node.children_named("dc:creator").first().and_then(|n| trim_or_none(&n.text)))
                .or_else(|| node.children_named("dc:publisher").first().and_then(|n| trim_or_none(&n.text)));
        }
        if meta.language.is_none() {
            meta.language = node.attr("xml:lang").and_then(trim_or_none).or_else(|| node.children_named("dc:language").first().and_then(|n| trim_or_none(&n.text)));
        }
        if meta.image.as_ref().map(|i| i.url.is_none()).unwrap_or(true) {
            let url = nested_attr(node, &["itunes:image"], "href").or_else(|| nested_attr(node, &["media:thumbnail"], "url"));
            if let Some(url) = url {
                meta.image = Some(Image { url: Some(url), title: meta.image.and_then(|i| i.title) });
            }
        }
        if meta.copyright.is_none() {
            meta.copyright = node
                .children_named("media:copyright")
                .first()
                .and_then(|n| trim_or_none(&n.text))
                .or_else(|| node.children_named("dc:rights").first().and_then(|n| trim_or_none(&n.text)))
                .or_else(|| first_rdf_resource(node, "creativecommons:license"))
                .or_else(|| first_rdf_resource(node, "cc:license"));
        }
        if meta.generator.is_none() {
            meta.generator = first_rdf_resource(node, "admin:generatoragent");
        }

        meta.categories = dedup_preserve_order(categories);
        meta.extensions = node
            .children
            .iter()
            .filter(|(k, _)| !k.starts_with('#'))
            .map(|(k, v)| (rekey_extension(k, dialect.as_str()), v.clone()))
            .collect();

        (meta, self_link)
    }
}

fn nested_attr_text(node: &Node, path: &[&str]) -> Option<String> {
    let mut cur: &Node = node;
    for seg in path {
        cur = cur.children_named(seg).into_iter().next()?;
    }
    trim_or_none(&cur.text)
}

fn generator_text(value: &Value) -> Option<String> {
    if let Some(n) = single_node(value) {
        let mut g = n.text.clone();
        if let Some(v) = n.attr("version") {
            g.push_str(&format!(" v{}", v));
        }
        if let Some(u) = n.attr("uri") {
            g.push_str(&format!(" ({})", u));
        }
        trim_or_none(&g)
    } else {
        trim_or_none(&value.text())
    }
}

fn apply_link(value: &Value, meta: &mut FeedMeta, self_link: &mut Option<String>) {
    match value {
        Value::Text(s) => {
            if meta.link.is_none() {
                meta.link = trim_or_none(s);
            }
        }
        Value::One(n) => apply_link_node(n, meta, self_link),
        Value::Many(list) => {
            for n in list {
                apply_link_node(n, meta, self_link);
            }
        }
    }
}

fn apply_link_node(n: &Node, meta: &mut FeedMeta, self_link: &mut Option<String>) {
    if let Some(href) = n.attr("href") {
        match n.attr("rel") {
            Some("self") => {
                meta.xmlurl = Some(href.to_string());
                *self_link = Some(href.to_string());
            }
            Some("alternate") => meta.link = Some(href.to_string()),
            None => {
                if meta.link.is_none() {
                    meta.link = Some(href.to_string());
                }
            }
            Some(_) => {}
        }
    } else if meta.link.is_none() {
        meta.link = trim_or_none(&n.text);
    }
}
