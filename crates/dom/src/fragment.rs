//! Markup fragment parser used for inserting markup into an editable tree.
//!
//! This is deliberately small: tags, attributes, comments, void elements and
//! the entity subset in [`crate::entities`]. End tags close the nearest open
//! element of the same name; end tags with no open match are dropped.

use crate::entities::decode_entities;
use crate::tags::is_void;
use crate::Node;

#[derive(Debug, PartialEq, Eq)]
enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    Comment(String),
}

/// Parse a markup fragment into top-level nodes. Ids are left unassigned.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let tokens = tokenize(input);
    log::trace!(target: "editable.dom", "fragment tokens: {}", tokens.len());
    build(tokens)
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut tokens, &decode_entities(rest));
            break;
        };
        if lt > 0 {
            push_text(&mut tokens, &decode_entities(&rest[..lt]));
            rest = &rest[lt..];
        }

        match markup_at(rest) {
            Some((token, consumed)) => {
                tokens.push(token);
                rest = &rest[consumed..];
            }
            None => {
                // A lone '<' is text.
                push_text(&mut tokens, "<");
                rest = &rest[1..];
            }
        }
    }
    tokens
}

fn push_text(tokens: &mut Vec<Token>, s: &str) {
    if let Some(Token::Text(prev)) = tokens.last_mut() {
        prev.push_str(s);
    } else {
        tokens.push(Token::Text(s.to_string()));
    }
}

/// Try to read one tag or comment at the start of `s` (which begins with '<').
fn markup_at(s: &str) -> Option<(Token, usize)> {
    if let Some(body) = s.strip_prefix("<!--") {
        return Some(match body.find("-->") {
            Some(end) => (Token::Comment(body[..end].to_string()), 4 + end + 3),
            None => (Token::Comment(body.to_string()), s.len()),
        });
    }
    if let Some(body) = s.strip_prefix("</") {
        let end = body.find('>')?;
        let name = body[..end].trim();
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        return Some((Token::EndTag(name.to_ascii_lowercase()), 2 + end + 1));
    }

    let body = &s[1..];
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let (attributes, self_closing, consumed) = attributes_at(&body[name_len..])?;
    Some((
        Token::StartTag {
            name,
            attributes,
            self_closing,
        },
        1 + name_len + consumed,
    ))
}

type Attributes = Vec<(String, Option<String>)>;

/// Read attributes up to and including the closing '>'.
fn attributes_at(s: &str) -> Option<(Attributes, bool, usize)> {
    let bytes = s.as_bytes();
    let mut attributes = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => return Some((attributes, false, i + 1)),
            b'/' if bytes.get(i + 1) == Some(&b'>') => return Some((attributes, true, i + 2)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let key_start = i;
        while i < bytes.len()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
            && !bytes[i].is_ascii_whitespace()
        {
            i += 1;
        }
        let key = s[key_start..i].to_ascii_lowercase();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            attributes.push((key, None));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i)? {
            quote @ (b'"' | b'\'') => {
                let start = i + 1;
                let len = s[start..].find(*quote as char)?;
                i = start + len + 1;
                &s[start..start + len]
            }
            _ => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &s[start..i]
            }
        };
        attributes.push((key, Some(decode_entities(value))));
    }
}

struct OpenElement {
    name: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl OpenElement {
    fn into_node(self) -> Node {
        Node::Element {
            id: crate::Id::UNASSIGNED,
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn build(tokens: Vec<Token>) -> Vec<Node> {
    let mut top: Vec<Node> = Vec::new();
    let mut open: Vec<OpenElement> = Vec::new();

    fn append(top: &mut Vec<Node>, open: &mut [OpenElement], node: Node) {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }

    for token in tokens {
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    append(&mut top, &mut open, Node::text(text));
                }
            }
            Token::Comment(text) => append(&mut top, &mut open, Node::comment(text)),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if self_closing || is_void(&name) {
                    let node = OpenElement {
                        name,
                        attributes,
                        children: Vec::new(),
                    }
                    .into_node();
                    append(&mut top, &mut open, node);
                } else {
                    open.push(OpenElement {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            Token::EndTag(name) => {
                if !open.iter().any(|e| e.name == name) {
                    continue;
                }
                while let Some(element) = open.pop() {
                    let matched = element.name == name;
                    append(&mut top, &mut open, element.into_node());
                    if matched {
                        break;
                    }
                }
            }
        }
    }

    while let Some(element) = open.pop() {
        append(&mut top, &mut open, element.into_node());
    }
    top
}
