// pulldown-cmark → markdown-it-shaped token stream.
//
// pulldown-cmark emits a nested event stream; this adapter replays it as the
// flat block stream the normalizer expects. Inline events are buffered and
// emitted as the `children` of one `inline` token per text block. Image alt
// content is collected into the image token's own children. Raw HTML is not
// interpreted: inline HTML stays text and an HTML block becomes a paragraph
// of its literal lines.

use std::ops::Range;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::Tokenizer;
use crate::error::MarkdownRenderError;
use crate::normalize::render_inline_as_text;
use crate::token::{Nesting, Token};

/// CommonMark tokenizer backed by pulldown-cmark, with tables,
/// strikethrough and smart punctuation enabled by default.
#[derive(Debug, Clone)]
pub struct CmarkTokenizer {
    options: Options,
}

impl CmarkTokenizer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        Self { options }
    }

    /// Use a custom set of pulldown-cmark extensions.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for CmarkTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for CmarkTokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, MarkdownRenderError> {
        let mut stream = TokenStream::new(source);
        for (event, range) in Parser::new_ext(source, self.options).into_offset_iter() {
            stream.event(event, range);
        }
        Ok(stream.finish())
    }
}

/// A block scope that is open in the output stream.
struct OpenBlock {
    close_type: &'static str,
    tag: String,
    markup: String,
    hidden: bool,
}

struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    body_open: bool,
    cell: usize,
}

struct TokenStream<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    open: Vec<OpenBlock>,
    /// Inline children of the text block being read.
    inline: Option<Vec<Token>>,
    /// Images whose alt content is being read, innermost last.
    images: Vec<Token>,
    /// Code block whose content is being read.
    literal: Option<Token>,
    in_html_block: bool,
    table: Option<TableState>,
}

impl<'s> TokenStream<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            open: Vec::new(),
            inline: None,
            images: Vec::new(),
            literal: None,
            in_html_block: false,
            table: None,
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_inline();
        while !self.open.is_empty() {
            self.close();
        }
        self.tokens
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start(tag, range),
            Event::End(tag) => self.end(tag),
            Event::Html(html) if self.in_html_block => self.push_html_lines(&html),
            Event::Text(text) | Event::Html(text) => match self.literal.as_mut() {
                Some(literal) => literal.content.push_str(&text),
                None => self.push_inline(Token::text(text.into_string())),
            },
            Event::Code(code) => {
                let mut token = Token::new("code_inline", "code", Nesting::SelfClosing);
                token.content = code.into_string();
                token.markup = "`".to_string();
                self.push_inline(token);
            }
            Event::InlineHtml(html) => self.push_inline(Token::text(html.into_string())),
            Event::SoftBreak => {
                self.push_inline(Token::new("softbreak", "br", Nesting::SelfClosing));
            }
            Event::HardBreak => {
                self.push_inline(Token::new("hardbreak", "br", Nesting::SelfClosing));
            }
            Event::Rule => {
                self.begin_block();
                let mut token = Token::new("hr", "hr", Nesting::SelfClosing);
                token.markup = self.slice(&range).trim().to_string();
                self.push_block(token);
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_inline(Token::text(marker));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) {
        match tag {
            Tag::Paragraph => {
                self.begin_block();
                self.open(Token::new("paragraph_open", "p", Nesting::Open), "paragraph_close");
            }
            Tag::Heading { level, .. } => {
                self.begin_block();
                let n = heading_level_to_u8(level);
                let mut token = Token::new("heading_open", format!("h{n}"), Nesting::Open);
                token.markup = "#".repeat(n as usize);
                self.open(token, "heading_close");
            }
            Tag::BlockQuote(_) => {
                self.begin_block();
                let mut token = Token::new("blockquote_open", "blockquote", Nesting::Open);
                token.markup = ">".to_string();
                self.open(token, "blockquote_close");
            }
            Tag::CodeBlock(kind) => {
                self.begin_block();
                let token = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let mut token = Token::new("fence", "code", Nesting::SelfClosing);
                        token.info = info.into_string();
                        token.markup = fence_markup(self.slice(&range));
                        token
                    }
                    CodeBlockKind::Indented => {
                        Token::new("code_block", "code", Nesting::SelfClosing)
                    }
                };
                self.literal = Some(token);
            }
            Tag::HtmlBlock => {
                self.begin_block();
                self.open(Token::new("paragraph_open", "p", Nesting::Open), "paragraph_close");
                self.in_html_block = true;
            }
            Tag::List(Some(start)) => {
                self.begin_block();
                let mut token = Token::new("ordered_list_open", "ol", Nesting::Open);
                token.markup = list_marker(self.slice(&range), true);
                if start != 1 {
                    token.attr_push("start", start.to_string());
                }
                self.open(token, "ordered_list_close");
            }
            Tag::List(None) => {
                self.begin_block();
                let mut token = Token::new("bullet_list_open", "ul", Nesting::Open);
                token.markup = list_marker(self.slice(&range), false);
                self.open(token, "bullet_list_close");
            }
            Tag::Item => {
                self.begin_block();
                let ordered = self
                    .open
                    .last()
                    .is_some_and(|block| block.close_type == "ordered_list_close");
                let text = self.slice(&range).trim_start();
                let mut token = Token::new("list_item_open", "li", Nesting::Open);
                token.markup = list_marker(text, ordered);
                if ordered {
                    token.info = text.chars().take_while(char::is_ascii_digit).collect();
                }
                self.open(token, "list_item_close");
            }
            Tag::Table(alignments) => {
                self.begin_block();
                self.open(Token::new("table_open", "table", Nesting::Open), "table_close");
                self.table = Some(TableState {
                    alignments,
                    in_head: false,
                    body_open: false,
                    cell: 0,
                });
            }
            Tag::TableHead => {
                self.begin_block();
                self.open(Token::new("thead_open", "thead", Nesting::Open), "thead_close");
                self.open(Token::new("tr_open", "tr", Nesting::Open), "tr_close");
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                    table.cell = 0;
                }
            }
            Tag::TableRow => {
                self.begin_block();
                let open_body = self.table.as_mut().is_some_and(|table| {
                    table.cell = 0;
                    !std::mem::replace(&mut table.body_open, true)
                });
                if open_body {
                    self.open(Token::new("tbody_open", "tbody", Nesting::Open), "tbody_close");
                }
                self.open(Token::new("tr_open", "tr", Nesting::Open), "tr_close");
            }
            Tag::TableCell => {
                self.begin_block();
                let (in_head, alignment) = match self.table.as_mut() {
                    Some(table) => {
                        let alignment = table.alignments.get(table.cell).copied();
                        table.cell += 1;
                        (table.in_head, alignment)
                    }
                    None => (false, None),
                };
                let (open_type, close_type, tag) = if in_head {
                    ("th_open", "th_close", "th")
                } else {
                    ("td_open", "td_close", "td")
                };
                let mut token = Token::new(open_type, tag, Nesting::Open);
                if let Some(align) = alignment.and_then(text_align) {
                    token.attr_push("style", format!("text-align:{align}"));
                }
                self.open(token, close_type);
            }
            Tag::Emphasis => {
                let mut token = Token::new("em_open", "em", Nesting::Open);
                token.markup = self.delimiter(&range, 1, "*");
                self.push_inline(token);
            }
            Tag::Strong => {
                let mut token = Token::new("strong_open", "strong", Nesting::Open);
                token.markup = self.delimiter(&range, 2, "**");
                self.push_inline(token);
            }
            Tag::Strikethrough => {
                let mut token = Token::new("s_open", "s", Nesting::Open);
                token.markup = "~~".to_string();
                self.push_inline(token);
            }
            Tag::Link { dest_url, title, .. } => {
                let mut token = Token::new("link_open", "a", Nesting::Open);
                token.attr_push("href", dest_url.into_string());
                if !title.is_empty() {
                    token.attr_push("title", title.into_string());
                }
                self.push_inline(token);
            }
            Tag::Image { dest_url, title, .. } => {
                let mut token = Token::new("image", "img", Nesting::SelfClosing);
                token.attr_push("src", dest_url.into_string());
                token.attr_push("alt", "");
                if !title.is_empty() {
                    token.attr_push("title", title.into_string());
                }
                token.children = Some(Vec::new());
                self.images.push(token);
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::TableCell
            | TagEnd::TableRow => {
                self.begin_block();
                self.close();
            }
            TagEnd::TableHead => {
                self.begin_block();
                self.close();
                self.close();
                if let Some(table) = self.table.as_mut() {
                    table.in_head = false;
                }
            }
            TagEnd::Table => {
                self.begin_block();
                if self.table.take().is_some_and(|table| table.body_open) {
                    self.close();
                }
                self.close();
            }
            TagEnd::CodeBlock => {
                if let Some(token) = self.literal.take() {
                    self.push_block(token);
                }
            }
            TagEnd::HtmlBlock => {
                self.in_html_block = false;
                self.begin_block();
                self.close();
            }
            TagEnd::Emphasis => self.push_inline_close("em_close", "em"),
            TagEnd::Strong => self.push_inline_close("strong_close", "strong"),
            TagEnd::Strikethrough => self.push_inline_close("s_close", "s"),
            TagEnd::Link => self.push_inline_close("link_close", "a"),
            TagEnd::Image => {
                if let Some(mut image) = self.images.pop() {
                    let alt = render_inline_as_text(image.children.as_deref());
                    image.attr_set("alt", alt);
                    self.push_inline(image);
                }
            }
            _ => {}
        }
    }

    /// Close the current text block before a block-level event.
    fn begin_block(&mut self) {
        self.flush_inline();
        if self.open.last().is_some_and(|block| block.hidden) {
            self.close();
        }
    }

    fn open(&mut self, mut token: Token, close_type: &'static str) {
        self.open.push(OpenBlock {
            close_type,
            tag: token.tag.clone(),
            markup: token.markup.clone(),
            hidden: token.hidden,
        });
        token.block = true;
        token.level = (self.open.len() - 1) as u32;
        self.tokens.push(token);
    }

    fn close(&mut self) {
        let Some(block) = self.open.pop() else {
            return;
        };
        let mut token = Token::new(block.close_type, block.tag, Nesting::Close);
        token.block = true;
        token.hidden = block.hidden;
        token.markup = block.markup;
        token.level = self.open.len() as u32;
        self.tokens.push(token);
    }

    fn push_block(&mut self, mut token: Token) {
        token.block = true;
        token.level = self.open.len() as u32;
        self.tokens.push(token);
    }

    fn push_inline(&mut self, token: Token) {
        if let Some(image) = self.images.last_mut() {
            append_inline(image.children.get_or_insert_with(Vec::new), token);
            return;
        }

        if self.inline.is_none() {
            // Tight list items carry their text without a paragraph.
            if self
                .open
                .last()
                .is_some_and(|block| block.close_type == "list_item_close")
            {
                let mut paragraph = Token::new("paragraph_open", "p", Nesting::Open);
                paragraph.hidden = true;
                self.open(paragraph, "paragraph_close");
            }
        }

        append_inline(self.inline.get_or_insert_with(Vec::new), token);
    }

    /// HTML block source, as text lines joined by soft breaks.
    fn push_html_lines(&mut self, html: &str) {
        for line in html.lines() {
            if self.inline.as_ref().is_some_and(|children| !children.is_empty()) {
                self.push_inline(Token::new("softbreak", "br", Nesting::SelfClosing));
            }
            if !line.is_empty() {
                self.push_inline(Token::text(line));
            }
        }
    }

    fn push_inline_close(&mut self, token_type: &str, tag: &str) {
        let markup = self.matching_markup(token_type);
        let mut token = Token::new(token_type, tag, Nesting::Close);
        token.markup = markup;
        self.push_inline(token);
    }

    /// Markup of the innermost unclosed inline opener matching `close_type`.
    fn matching_markup(&self, close_type: &str) -> String {
        let open_type = close_type.replace("_close", "_open");
        let buffer = match self.images.last() {
            Some(image) => image.children.as_deref(),
            None => self.inline.as_deref(),
        };
        buffer
            .unwrap_or_default()
            .iter()
            .rev()
            .find(|token| token.token_type == open_type)
            .map(|token| token.markup.clone())
            .unwrap_or_default()
    }

    fn flush_inline(&mut self) {
        let Some(children) = self.inline.take() else {
            return;
        };
        let mut token = Token::new("inline", "", Nesting::SelfClosing);
        token.content = children
            .iter()
            .filter(|child| matches!(child.token_type.as_str(), "text" | "code_inline"))
            .map(|child| child.content.as_str())
            .collect();
        token.children = Some(children);
        self.push_block(token);
    }

    fn slice(&self, range: &Range<usize>) -> &'s str {
        self.source.get(range.clone()).unwrap_or_default()
    }

    /// Emphasis delimiter as written in the source (`*` or `_`).
    fn delimiter(&self, range: &Range<usize>, len: usize, fallback: &str) -> String {
        match self.slice(range).chars().next() {
            Some(c @ ('*' | '_')) => c.to_string().repeat(len),
            _ => fallback.to_string(),
        }
    }
}

/// Append an inline token, joining it onto a preceding text token.
fn append_inline(buffer: &mut Vec<Token>, token: Token) {
    if token.token_type == "text" {
        if let Some(last) = buffer.last_mut().filter(|last| last.token_type == "text") {
            last.content.push_str(&token.content);
            return;
        }
    }
    buffer.push(token);
}

fn list_marker(text: &str, ordered: bool) -> String {
    let text = text.trim_start();
    if ordered {
        let digits = text.chars().take_while(char::is_ascii_digit).count();
        match text[digits..].chars().next() {
            Some(c @ ('.' | ')')) => c.to_string(),
            _ => ".".to_string(),
        }
    } else {
        match text.chars().next() {
            Some(c @ ('-' | '*' | '+')) => c.to_string(),
            _ => "-".to_string(),
        }
    }
}

fn fence_markup(text: &str) -> String {
    let text = text.trim_start();
    match text.chars().next() {
        Some(c @ ('`' | '~')) => text.chars().take_while(|&next| next == c).collect(),
        _ => "```".to_string(),
    }
}

fn text_align(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
