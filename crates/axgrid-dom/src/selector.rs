//! Simple selector matching
//!
//! A small subset of CSS selector syntax, enough for structural lookups:
//! tag names, `#id`, `.class`, `[attr]`, `[attr=value]`, compounds of
//! those, and comma-separated alternation. No combinators.

use crate::view::DomView;
use crate::NodeId;

/// Selector parse failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unclosed attribute predicate in {0:?}")]
    UnclosedAttribute(String),

    #[error("unexpected character {0:?} in selector {1:?}")]
    UnexpectedChar(char, String),
}

/// A parsed selector: one or more comma-separated compounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

/// One compound: every part must match the same element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrPredicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrPredicate {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::Empty);
            }
            alternatives.push(Compound::parse(part)?);
        }
        if alternatives.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { alternatives })
    }

    /// Check whether the element `id` matches any alternative.
    pub fn matches<V: DomView + ?Sized>(&self, view: &V, id: NodeId) -> bool {
        let Some(tag) = view.tag_name(id) else {
            return false;
        };
        self.alternatives.iter().any(|c| c.matches(view, id, tag))
    }
}

impl Compound {
    fn parse(input: &str) -> Result<Self, SelectorError> {
        fn take_name(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
            let mut name = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            name
        }

        let mut compound = Compound::default();
        let mut chars = input.char_indices().peekable();

        // Leading tag name (or `*`).
        if let Some(&(_, c)) = chars.peek() {
            if c == '*' {
                chars.next();
            } else if c.is_alphanumeric() {
                compound.tag = Some(take_name(&mut chars).to_ascii_lowercase());
            }
        }

        while let Some((_, c)) = chars.next() {
            match c {
                '#' => {
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::UnexpectedChar('#', input.to_string()));
                    }
                    compound.id = Some(name);
                }
                '.' => {
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::UnexpectedChar('.', input.to_string()));
                    }
                    compound.classes.push(name);
                }
                '[' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        body.push(c);
                    }
                    if !closed {
                        return Err(SelectorError::UnclosedAttribute(input.to_string()));
                    }
                    let (name, value) = match body.split_once('=') {
                        Some((n, v)) => {
                            let v = v.trim().trim_matches('"').trim_matches('\'');
                            (n.trim(), Some(v.to_string()))
                        }
                        None => (body.trim(), None),
                    };
                    if name.is_empty() {
                        return Err(SelectorError::UnexpectedChar('[', input.to_string()));
                    }
                    compound.attrs.push(AttrPredicate {
                        name: name.to_ascii_lowercase(),
                        value,
                    });
                }
                other => {
                    return Err(SelectorError::UnexpectedChar(other, input.to_string()));
                }
            }
        }

        Ok(compound)
    }

    fn matches<V: DomView + ?Sized>(&self, view: &V, id: NodeId, tag: &str) -> bool {
        if let Some(want) = &self.tag {
            if !tag.eq_ignore_ascii_case(want) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if view.attribute(id, "id") != Some(want.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            let found = view
                .attribute(id, "class")
                .is_some_and(|v| v.split_whitespace().any(|c| c == class));
            if !found {
                return false;
            }
        }
        for pred in &self.attrs {
            match (view.attribute(id, &pred.name), &pred.value) {
                (None, _) => return false,
                (Some(_), None) => {}
                (Some(actual), Some(want)) => {
                    if actual != want {
                        return false;
                    }
                }
            }
        }
        true
    }
}
