//! XPath-subset evaluator backing the uniqueness oracle.
//!
//! Covers exactly the expression forms the synthesis chain emits: absolute
//! and `//` location paths, `*` or tag node tests, and the predicates
//! `[@attr="v"]`, `[translate(@attr, 'FROM', 'TO') = 'v']`,
//! `[normalize-space(.)="t"]`, `[contains(normalize-space(.), "t")]` and
//! positional `[k]`. Everything else is rejected with
//! [`QueryError::UnsupportedXPath`], which the chain treats as a failed
//! candidate rather than an abort.

use tracing::trace;

use crate::errors::QueryError;
use crate::tree::{DomTree, ElementRef, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Clone, Debug)]
enum NodeTest {
    Any,
    Tag(String),
}

#[derive(Clone, Debug)]
enum Predicate {
    AttrEq {
        name: String,
        value: String,
    },
    TranslateAttrEq {
        name: String,
        from: String,
        to: String,
        value: String,
    },
    TextEq(String),
    TextContains(String),
    Position(usize),
}

#[derive(Clone, Debug)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

/// Count the elements matched by `expression`.
pub(crate) fn count(tree: &DomTree, expression: &str) -> Result<usize, QueryError> {
    let steps = parse(expression)?;
    let matched = evaluate(tree, &steps);
    trace!(expression, matches = matched.len(), "evaluated xpath");
    Ok(matched.len())
}

// --- parsing ---

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.rest().starts_with(' ') {
            self.pos += 1;
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        for (offset, ch) in self.rest().char_indices() {
            if !pred(ch) {
                self.pos = start + offset;
                return &self.input[start..self.pos];
            }
        }
        self.pos = self.input.len();
        &self.input[start..]
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':'
}

fn unsupported(expression: &str) -> QueryError {
    QueryError::UnsupportedXPath(expression.to_string())
}

fn parse(expression: &str) -> Result<Vec<Step>, QueryError> {
    let expr = expression.trim();
    if expr.is_empty() {
        return Err(QueryError::EmptyExpression);
    }

    let mut cur = Cursor::new(expr);
    let mut steps = Vec::new();
    while !cur.done() {
        let axis = if cur.eat("//") {
            Axis::Descendant
        } else if cur.eat("/") {
            Axis::Child
        } else {
            return Err(unsupported(expr));
        };

        let test = if cur.eat("*") {
            NodeTest::Any
        } else {
            let name = cur.take_while(is_name_char);
            if name.is_empty() {
                return Err(unsupported(expr));
            }
            NodeTest::Tag(name.to_string())
        };

        let mut predicates = Vec::new();
        while cur.eat("[") {
            predicates.push(parse_predicate(&mut cur, expr)?);
            cur.skip_ws();
            if !cur.eat("]") {
                return Err(unsupported(expr));
            }
        }

        steps.push(Step {
            axis,
            test,
            predicates,
        });
    }

    if steps.is_empty() {
        return Err(unsupported(expr));
    }
    Ok(steps)
}

fn parse_predicate(cur: &mut Cursor<'_>, expr: &str) -> Result<Predicate, QueryError> {
    cur.skip_ws();

    if cur.eat("@") {
        let name = cur.take_while(is_name_char).to_string();
        if name.is_empty() {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        if !cur.eat("=") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let value = parse_quoted(cur, expr)?;
        return Ok(Predicate::AttrEq { name, value });
    }

    if cur.eat("translate(") {
        cur.skip_ws();
        if !cur.eat("@") {
            return Err(unsupported(expr));
        }
        let name = cur.take_while(is_name_char).to_string();
        cur.skip_ws();
        if !cur.eat(",") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let from = parse_quoted(cur, expr)?;
        cur.skip_ws();
        if !cur.eat(",") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let to = parse_quoted(cur, expr)?;
        cur.skip_ws();
        if !cur.eat(")") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        if !cur.eat("=") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let value = parse_quoted(cur, expr)?;
        return Ok(Predicate::TranslateAttrEq {
            name,
            from,
            to,
            value,
        });
    }

    if cur.eat("contains(normalize-space(.)") {
        cur.skip_ws();
        if !cur.eat(",") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let value = parse_quoted(cur, expr)?;
        cur.skip_ws();
        if !cur.eat(")") {
            return Err(unsupported(expr));
        }
        return Ok(Predicate::TextContains(value));
    }

    if cur.eat("normalize-space(.)") {
        cur.skip_ws();
        if !cur.eat("=") {
            return Err(unsupported(expr));
        }
        cur.skip_ws();
        let value = parse_quoted(cur, expr)?;
        return Ok(Predicate::TextEq(value));
    }

    let digits = cur.take_while(|c| c.is_ascii_digit());
    if !digits.is_empty() {
        let position: usize = digits.parse().map_err(|_| unsupported(expr))?;
        if position == 0 {
            return Err(unsupported(expr));
        }
        return Ok(Predicate::Position(position));
    }

    Err(unsupported(expr))
}

fn parse_quoted(cur: &mut Cursor<'_>, expr: &str) -> Result<String, QueryError> {
    let quote = if cur.eat("\"") {
        '"'
    } else if cur.eat("'") {
        '\''
    } else {
        return Err(unsupported(expr));
    };
    let value = cur.take_while(|c| c != quote).to_string();
    if !cur.eat(&quote.to_string()) {
        return Err(unsupported(expr));
    }
    Ok(value)
}

// --- evaluation ---

fn evaluate(tree: &DomTree, steps: &[Step]) -> Vec<NodeId> {
    // `None` stands for the document node above the root element.
    let mut current: Vec<Option<NodeId>> = vec![None];

    for step in steps {
        let mut next: Vec<NodeId> = Vec::new();
        for ctx in &current {
            let candidates = match (step.axis, ctx) {
                (Axis::Child, None) => vec![tree.root_id()],
                (Axis::Child, Some(id)) => tree.element_children(*id),
                (Axis::Descendant, None) => {
                    let mut all = vec![tree.root_id()];
                    all.extend(tree.descendants(tree.root_id()));
                    all
                }
                (Axis::Descendant, Some(id)) => tree.descendants(*id),
            };

            for candidate in candidates {
                let Some(el) = tree.element(candidate) else {
                    continue;
                };
                if !matches_test(el, &step.test) {
                    continue;
                }
                if step
                    .predicates
                    .iter()
                    .all(|p| eval_predicate(el, &step.test, p))
                    && !next.contains(&candidate)
                {
                    next.push(candidate);
                }
            }
        }
        current = next.into_iter().map(Some).collect();
    }

    current.into_iter().flatten().collect()
}

fn matches_test(el: ElementRef<'_>, test: &NodeTest) -> bool {
    match test {
        NodeTest::Any => true,
        NodeTest::Tag(tag) => el.tag_name() == tag,
    }
}

fn eval_predicate(el: ElementRef<'_>, test: &NodeTest, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::AttrEq { name, value } => el.attribute(name) == Some(value.as_str()),
        Predicate::TranslateAttrEq {
            name,
            from,
            to,
            value,
        } => el
            .attribute(name)
            .map(|v| translate(v, from, to) == *value)
            .unwrap_or(false),
        Predicate::TextEq(value) => normalize_space(&el.text_content()) == *value,
        Predicate::TextContains(value) => normalize_space(&el.text_content()).contains(value),
        Predicate::Position(position) => sibling_position(el, test) == *position,
    }
}

/// 1-based index of `el` among its parent's element children that satisfy the
/// step's node test, matching abbreviated child-axis positional semantics.
fn sibling_position(el: ElementRef<'_>, test: &NodeTest) -> usize {
    let Some(parent) = el.parent() else {
        return 1;
    };
    parent
        .children()
        .iter()
        .filter(|sib| matches_test(**sib, test))
        .position(|sib| *sib == el)
        .map(|index| index + 1)
        .unwrap_or(0)
}

/// XPath `translate()`: map characters of `from` to the same position in
/// `to`; characters beyond `to`'s length are deleted.
fn translate(input: &str, from: &str, to: &str) -> String {
    let to_chars: Vec<char> = to.chars().collect();
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match from.chars().position(|f| f == ch) {
            Some(index) => {
                if let Some(mapped) = to_chars.get(index) {
                    out.push(*mapped);
                }
            }
            None => out.push(ch),
        }
    }
    out
}

fn normalize_space(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
