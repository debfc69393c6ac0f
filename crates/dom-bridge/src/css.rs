//! CSS-subset matcher backing the uniqueness oracle.
//!
//! The synthesis chain only emits single compound selectors: `#id`,
//! `tag[attr="value"]` and `.class.class` forms. Combinators, pseudo-classes
//! and anything else are rejected with [`QueryError::UnsupportedSelector`].

use tracing::trace;

use crate::errors::QueryError;
use crate::tree::{DomTree, ElementRef};

#[derive(Debug, Default)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
}

/// Count the elements matched by `selector`.
pub(crate) fn count(tree: &DomTree, selector: &str) -> Result<usize, QueryError> {
    let compound = parse(selector)?;
    let matched = tree
        .elements()
        .into_iter()
        .filter(|el| matches(*el, &compound))
        .count();
    trace!(selector, matches = matched, "evaluated css selector");
    Ok(matched)
}

fn unsupported(selector: &str) -> QueryError {
    QueryError::UnsupportedSelector(selector.to_string())
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse(selector: &str) -> Result<CompoundSelector, QueryError> {
    let sel = selector.trim();
    if sel.is_empty() {
        return Err(QueryError::EmptyExpression);
    }

    let chars: Vec<char> = sel.chars().collect();
    let mut compound = CompoundSelector::default();
    let mut pos = 0usize;

    let take_ident = |pos: &mut usize| -> String {
        let start = *pos;
        while *pos < chars.len() && is_ident_char(chars[*pos]) {
            *pos += 1;
        }
        chars[start..*pos].iter().collect()
    };

    // Optional leading tag name.
    if chars[0].is_ascii_alphabetic() {
        compound.tag = Some(take_ident(&mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            marker @ ('#' | '.') => {
                pos += 1;
                let name = take_ident(&mut pos);
                if name.is_empty() {
                    return Err(unsupported(sel));
                }
                if marker == '#' {
                    if compound.id.is_some() {
                        return Err(unsupported(sel));
                    }
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            '[' => {
                pos += 1;
                let name = take_ident(&mut pos);
                if name.is_empty() {
                    return Err(unsupported(sel));
                }
                if chars.get(pos) != Some(&'=') {
                    return Err(unsupported(sel));
                }
                pos += 1;
                let quote = match chars.get(pos) {
                    Some(q @ ('"' | '\'')) => *q,
                    _ => return Err(unsupported(sel)),
                };
                pos += 1;
                let start = pos;
                while pos < chars.len() && chars[pos] != quote {
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(unsupported(sel));
                }
                let value: String = chars[start..pos].iter().collect();
                pos += 1;
                if chars.get(pos) != Some(&']') {
                    return Err(unsupported(sel));
                }
                pos += 1;
                compound.attrs.push((name, value));
            }
            _ => return Err(unsupported(sel)),
        }
    }

    Ok(compound)
}

fn matches(el: ElementRef<'_>, compound: &CompoundSelector) -> bool {
    if let Some(tag) = &compound.tag {
        if el.tag_name() != tag {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if el.attribute("id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let classes = el.class_list();
        if !compound.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
    }
    compound
        .attrs
        .iter()
        .all(|(name, value)| el.attribute(name) == Some(value.as_str()))
}
