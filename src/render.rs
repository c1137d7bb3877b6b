// src/render.rs - Markdown-subset rendering for chat bubbles
//
// Supported: **bold**, *italic*, line breaks and "- " list items. Everything
// else is emitted as escaped text.
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

use crate::models::Role;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Line(Vec<Inline>),
    Break,
    List(Vec<Vec<Inline>>),
}

/// Parsed message body. Holds no raw markup, so `to_html` is always safe to insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markup {
    pub blocks: Vec<Block>,
}

impl Markup {
    pub fn parse(text: &str) -> Self {
        let mut blocks: Vec<Block> = Vec::new();

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);

            match line.strip_prefix("- ").filter(|item| !item.is_empty()) {
                Some(item) => {
                    let spans = parse_inline(item);
                    match blocks.last_mut() {
                        Some(Block::List(items)) => items.push(spans),
                        Some(Block::Line(_)) => {
                            blocks.push(Block::Break);
                            blocks.push(Block::List(vec![spans]));
                        }
                        _ => blocks.push(Block::List(vec![spans])),
                    }
                }
                None => {
                    if matches!(blocks.last(), Some(Block::Line(_))) {
                        blocks.push(Block::Break);
                    }
                    blocks.push(Block::Line(parse_inline(line)));
                }
            }
        }

        Self { blocks }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Line(spans) => push_inline(&mut out, spans),
                Block::Break => out.push_str("<br>"),
                Block::List(items) => {
                    out.push_str("<ul>");
                    for item in items {
                        out.push_str("<li>");
                        push_inline(&mut out, item);
                        out.push_str("</li>");
                    }
                    out.push_str("</ul>");
                }
            }
        }
        out
    }
}

fn parse_inline(line: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for bold in BOLD.find_iter(line) {
        parse_italic(&line[cursor..bold.start()], &mut spans);
        spans.push(Inline::Strong(line[bold.start() + 2..bold.end() - 2].to_string()));
        cursor = bold.end();
    }
    parse_italic(&line[cursor..], &mut spans);

    spans
}

fn parse_italic(segment: &str, spans: &mut Vec<Inline>) {
    let mut cursor = 0;
    for italic in ITALIC.find_iter(segment) {
        if italic.start() > cursor {
            spans.push(Inline::Text(segment[cursor..italic.start()].to_string()));
        }
        spans.push(Inline::Emphasis(segment[italic.start() + 1..italic.end() - 1].to_string()));
        cursor = italic.end();
    }
    if cursor < segment.len() {
        spans.push(Inline::Text(segment[cursor..].to_string()));
    }
}

fn push_inline(out: &mut String, spans: &[Inline]) {
    for span in spans {
        match span {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Strong(text) => {
                out.push_str("<strong>");
                out.push_str(&escape_html(text));
                out.push_str("</strong>");
            }
            Inline::Emphasis(text) => {
                out.push_str("<em>");
                out.push_str(&escape_html(text));
                out.push_str("</em>");
            }
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceLink {
    pub href: String,
    pub label: String,
}

impl SourceLink {
    /// Accepts absolute http(s) URLs only; anything else is not linkable.
    pub fn parse(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let label = match url.path() {
            "" | "/" => "Homepage".to_string(),
            path => path.to_string(),
        };
        Some(Self {
            href: url.to_string(),
            label,
        })
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(&self.href),
            escape_html(&self.label)
        )
    }
}

pub fn source_links(urls: &[String]) -> Vec<SourceLink> {
    urls.iter()
        .filter_map(|raw| {
            let link = SourceLink::parse(raw);
            if link.is_none() {
                tracing::warn!(source = %raw, "Dropping source that is not an http(s) URL");
            }
            link
        })
        .collect()
}

/// A chat bubble ready to be appended to the message list.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub role: Role,
    pub content: String,
    pub body: Markup,
    pub sources: Vec<SourceLink>,
}

impl RenderedMessage {
    pub fn new(role: Role, content: &str, sources: &[String]) -> Self {
        Self {
            role,
            content: content.to_string(),
            body: Markup::parse(content),
            sources: source_links(sources),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div class="message {}"><div class="message-avatar">{}</div><div class="message-content">{}"#,
            self.role.as_str(),
            self.role.avatar(),
            self.body.to_html()
        );
        if !self.sources.is_empty() {
            let links: Vec<String> = self.sources.iter().map(SourceLink::to_html).collect();
            html.push_str(r#"<div class="message-sources">📚 Sources: "#);
            html.push_str(&links.join(", "));
            html.push_str("</div>");
        }
        html.push_str("</div></div>");
        html
    }
}
