//! Maps an item/entry subtree onto [`Article`] (spec §4.6).

use crate::model::{Article, Enclosure, Image, Source};
use crate::node::{AsText, Dialect, Node, Value};
use crate::options::ParseOptions;
use crate::util::{dedup_preserve_order, parse_date, trim_or_none};

use super::common::{category_values, nested_attr, nodes_of, person_text, rekey_extension, single_node};

pub struct ItemNormalizer;

impl ItemNormalizer {
    pub fn normalize(node: &Node, dialect: Dialect, options: &ParseOptions) -> Article {
        let mut article = Article::default();

        if !options.normalize {
            article.extensions = node.children.iter().map(|(k, v)| (rekey_extension(k, dialect.as_str()), v.clone())).collect();
            return article;
        }

        let mut categories = Vec::new();

        for (key, value) in &node.children {
            match key.as_str() {
                "title" => article.title = trim_or_none(&value.text()),
                "description" | "summary" => {
                    article.summary = trim_or_none(&value.text());
                    if article.description.is_none() {
                        article.description = article.summary.clone();
                    }
                }
                "content" | "content:encoded" => article.description = trim_or_none(&value.text()),
                "pubdate" | "published" | "issued" => {
                    if let Some(d) = parse_date(&value.text()) {
                        article.pubdate = Some(d);
                        if article.date.is_none() {
                            article.date = Some(d);
                        }
                    }
                }
                "modified" | "updated" | "dc:date" => {
                    if let Some(d) = parse_date(&value.text()) {
                        article.date = Some(d);
                        if article.pubdate.is_none() {
                            article.pubdate = Some(d);
                        }
                    }
                }
                "link" => apply_link(value, &mut article),
                "guid" | "id" => article.guid = trim_or_none(&value.text()),
                "author" => {
                    if let Some(n) = single_node(value) {
                        article.author = person_text(n);
                    } else {
                        article.author = trim_or_none(&value.text());
                    }
                }
                "dc:creator" => {
                    if article.author.is_none() {
                        article.author = trim_or_none(&value.text());
                    }
                }
                "comments" => article.comments = trim_or_none(&value.text()),
                "source" => article.source = single_node(value).map(|n| parse_source(n, dialect)),
                "enclosure" | "media:content" => {
                    for n in nodes_of(value) {
                        article.enclosures.push(parse_enclosure(n));
                    }
                }
                "category" | "dc:subject" | "itunes:category" | "media:category" => {
                    for n in nodes_of(value) {
                        categories.extend(category_values(key, n));
                    }
                }
                "feedburner:origlink" | "pheedo:origlink" => {
                    if article.origlink.is_none() {
                        article.origlink = trim_or_none(&value.text());
                    }
                }
                _ => {}
            }
        }

        if article.guid.is_none() {
            article.guid = article.link.clone();
        }

        if article.description.is_none() {
            article.description = node.children_named("itunes:summary").first().and_then(|n| trim_or_none(&n.text));
        }
        if article.author.is_none() {
            article.author = node
                .children_named("itunes:author")
                .first()
                .and_then(|n| trim_or_none(&n.text))
                .or_else(|| owner_name(node))
                .or_else(|| node.children_named("dc:publisher").first().and_then(|n| trim_or_none(&n.text)));
        }
        if article.image.is_none() {
            let url = nested_attr(node, &["itunes:image"], "href")
                .or_else(|| nested_attr(node, &["media:thumbnail"], "url"))
                .or_else(|| nested_attr(node, &["media:content", "media:thumbnail"], "url"))
                .or_else(|| nested_attr(node, &["media:group", "media:thumbnail"], "url"))
                .or_else(|| nested_attr(node, &["media:group", "media:content", "media:thumbnail"], "url"));
            if url.is_some() {
                article.image = Some(Image { url, title: None });
            }
        }

        article.categories = dedup_preserve_order(categories);
        article.extensions = node
            .children
            .iter()
            .filter(|(k, _)| !k.starts_with('#'))
            .map(|(k, v)| (rekey_extension(k, dialect.as_str()), v.clone()))
            .collect();

        article
    }
}

fn owner_name(node: &Node) -> Option<String> {
    let owner = node.children_named("itunes:owner").into_iter().next()?;
    owner.children_named("itunes:name").first().and_then(|n| trim_or_none(&n.text))
}

fn parse_source(n: &Node, dialect: Dialect) -> Source {
    match dialect {
        Dialect::Atom => {
            let title = n.children_named("title").first().and_then(|t| trim_or_none(&t.text));
            let url = n.children_named("link").first().and_then(|l| l.attr("href")).map(|s| s.to_string());
            Source { title, url }
        }
        _ => Source { title: trim_or_none(&n.text), url: n.attr("url").and_then(trim_or_none) },
    }
}

fn parse_enclosure(n: &Node) -> Enclosure {
    Enclosure {
        url: n.attr("url").and_then(trim_or_none),
        content_type: n.attr("type").or_else(|| n.attr("medium")).and_then(trim_or_none),
        length: n.attr("length").or_else(|| n.attr("filesize")).and_then(trim_or_none),
    }
}

fn apply_link(value: &Value, article: &mut Article) {
    match value {
        Value::Text(s) => {
            if article.link.is_none() {
                article.link = trim_or_none(s);
            }
        }
        Value::One(n) => apply_link_node(n, article),
        Value::Many(list) => {
            for n in list {
                apply_link_node(n, article);
            }
        }
    }
}

fn apply_link_node(n: &Node, article: &mut Article) {
    if let Some(href) = n.attr("href") {
        match n.attr("rel") {
            Some("canonical") => article.origlink = Some(href.to_string()),
            Some("alternate") => article.link = Some(href.to_string()),
            Some("replies") => article.comments = Some(href.to_string()),
            Some("enclosure") => article.enclosures.push(Enclosure {
                url: Some(href.to_string()),
                content_type: n.attr("type").and_then(trim_or_none),
                length: n.attr("length").and_then(trim_or_none),
            }),
            None => {
                if article.link.is_none() {
                    article.link = Some(href.to_string());
                }
            }
            Some(_) => {}
        }
    } else if article.link.is_none() {
        article.link = trim_or_none(&n.text);
    }
}
