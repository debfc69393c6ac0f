//! Candidate generation, one function per strategy.
//!
//! Strategies only build expressions; validation against the document is the
//! driver's job. Attribute values are interpolated as-is - a value containing
//! the surrounding quote character yields a malformed expression, which the
//! oracle rejects and the chain skips past.

use dom_bridge::ElementRef;

use crate::types::{Candidate, CssStrategy, XpathStrategy};

/// Attribute names considered stable identity evidence, in priority order.
pub const STABLE_ATTRIBUTES: [&str; 10] = [
    "data-testid",
    "data-cy",
    "data-test",
    "name",
    "role",
    "aria-label",
    "alt",
    "title",
    "placeholder",
    "type",
];

/// Shorter list used by the CSS chain.
pub const CSS_STABLE_ATTRIBUTES: [&str; 5] = ["data-testid", "data-cy", "data-test", "name", "role"];

const ASCII_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ASCII_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Candidates for one XPath strategy, in the order they should be validated.
pub fn xpath_candidates(strategy: XpathStrategy, el: ElementRef<'_>) -> Vec<Candidate> {
    match strategy {
        XpathStrategy::Identifier => identifier_candidates(el),
        XpathStrategy::StableAttribute => stable_attribute_candidates(el),
        XpathStrategy::DataAttribute => data_attribute_candidates(el),
        XpathStrategy::MultiAttribute => multi_attribute_candidates(el),
        XpathStrategy::TextContent => text_candidates(el),
        XpathStrategy::AncestorRelative => ancestor_relative_candidates(el),
        XpathStrategy::AbsolutePositional => absolute_candidates(el),
    }
}

/// Candidates for one CSS strategy.
pub fn css_candidates(strategy: CssStrategy, el: ElementRef<'_>) -> Vec<String> {
    match strategy {
        CssStrategy::Identifier => el.id().map(|id| format!("#{id}")).into_iter().collect(),
        CssStrategy::StableAttribute => CSS_STABLE_ATTRIBUTES
            .iter()
            .filter_map(|attr| {
                el.attribute(attr)
                    .filter(|value| !value.is_empty())
                    .map(|value| format!("{}[{attr}=\"{value}\"]", el.tag_name()))
            })
            .collect(),
        CssStrategy::ClassNames => {
            let stable: Vec<&str> = el
                .class_list()
                .into_iter()
                .filter(|token| !token.starts_with(|c: char| c.is_ascii_digit()))
                .collect();
            if stable.is_empty() {
                Vec::new()
            } else {
                vec![format!(".{}", stable.join("."))]
            }
        }
    }
}

fn identifier_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    let Some(id) = el.id() else {
        return Vec::new();
    };
    vec![
        Candidate::exact(format!("//*[@id=\"{id}\"]")),
        // Matched by normalization rather than exact value: lower confidence.
        Candidate::review(format!(
            "//*[translate(@id, '{ASCII_UPPER}', '{ASCII_LOWER}') = '{}']",
            id.to_lowercase()
        )),
    ]
}

fn stable_attribute_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    STABLE_ATTRIBUTES
        .iter()
        .filter_map(|attr| {
            el.attribute(attr)
                .filter(|value| !value.is_empty())
                .map(|value| {
                    Candidate::exact(format!("//{}[@{attr}=\"{value}\"]", el.tag_name()))
                })
        })
        .collect()
}

fn data_attribute_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    el.attributes()
        .iter()
        .filter(|(name, _)| name.starts_with("data-"))
        .map(|(name, value)| {
            Candidate::exact(format!("//{}[@{name}=\"{value}\"]", el.tag_name()))
        })
        .collect()
}

fn multi_attribute_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    let predicates: String = STABLE_ATTRIBUTES
        .iter()
        .filter_map(|attr| {
            el.attribute(attr)
                .filter(|value| !value.is_empty())
                .map(|value| format!("[@{attr}=\"{value}\"]"))
        })
        .collect();
    if predicates.is_empty() {
        Vec::new()
    } else {
        vec![Candidate::exact(format!(
            "//{}{predicates}",
            el.tag_name()
        ))]
    }
}

fn text_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    let text = el.text_content();
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Candidate::exact(format!(
        "//{}[normalize-space(.)=\"{text}\"]",
        el.tag_name()
    ))];
    if el.has_element_children() {
        // Substring match is weaker evidence of uniqueness-by-intent.
        out.push(Candidate::review(format!(
            "//{}[contains(normalize-space(.), \"{text}\")]",
            el.tag_name()
        )));
    }
    out
}

fn ancestor_relative_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut ancestor = el.parent();
    while let Some(node) = ancestor {
        if let Some(id) = node.id() {
            let relative = positional_path(el, Some(node));
            out.push(Candidate::exact(format!("//*[@id=\"{id}\"]//{relative}")));
        }
        if node.is_body() {
            break;
        }
        ancestor = node.parent();
    }
    out
}

fn absolute_candidates(el: ElementRef<'_>) -> Vec<Candidate> {
    // Positional paths are brittle across re-renders.
    vec![Candidate::review(format!("/{}", positional_path(el, None)))]
}

/// `tag[k]/tag[k]/...` chain from below `stop` (or the root when `None`)
/// down to `el`, 1-based, counting only preceding same-tag siblings.
fn positional_path(el: ElementRef<'_>, stop: Option<ElementRef<'_>>) -> String {
    let mut parts = Vec::new();
    let mut current = Some(el);
    while let Some(node) = current {
        if stop == Some(node) {
            break;
        }
        let index = node.same_tag_preceding_siblings() + 1;
        parts.push(format!("{}[{index}]", node.tag_name()));
        current = node.parent();
    }
    parts.reverse();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_bridge::DomTree;

    #[test]
    fn identifier_emits_exact_then_case_insensitive() {
        let tree = DomTree::build(|b| {
            b.leaf("div", &[("id", "MainNav")]);
        });
        let el = tree.root().children()[0];
        let candidates = xpath_candidates(XpathStrategy::Identifier, el);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].expression, "//*[@id=\"MainNav\"]");
        assert!(!candidates[0].needs_review);
        assert!(candidates[1].expression.contains("translate(@id"));
        assert!(candidates[1].expression.contains("'mainnav'"));
        assert!(candidates[1].needs_review);
    }

    #[test]
    fn stable_attributes_follow_priority_order() {
        let tree = DomTree::build(|b| {
            b.leaf("input", &[("type", "text"), ("name", "user")]);
        });
        let el = tree.root().children()[0];
        let candidates = xpath_candidates(XpathStrategy::StableAttribute, el);
        assert_eq!(candidates[0].expression, "//input[@name=\"user\"]");
        assert_eq!(candidates[1].expression, "//input[@type=\"text\"]");
    }

    #[test]
    fn data_attributes_in_encounter_order() {
        let tree = DomTree::build(|b| {
            b.leaf(
                "div",
                &[("class", "x"), ("data-kind", "row"), ("data-index", "3")],
            );
        });
        let el = tree.root().children()[0];
        let candidates = xpath_candidates(XpathStrategy::DataAttribute, el);
        assert_eq!(candidates[0].expression, "//div[@data-kind=\"row\"]");
        assert_eq!(candidates[1].expression, "//div[@data-index=\"3\"]");
    }

    #[test]
    fn multi_attribute_combines_all_present() {
        let tree = DomTree::build(|b| {
            b.leaf("a", &[("role", "link"), ("title", "Docs")]);
        });
        let el = tree.root().children()[0];
        let candidates = xpath_candidates(XpathStrategy::MultiAttribute, el);
        assert_eq!(
            candidates[0].expression,
            "//a[@role=\"link\"][@title=\"Docs\"]"
        );
        assert!(!candidates[0].needs_review);
    }

    #[test]
    fn text_substring_form_only_with_element_children() {
        let tree = DomTree::build(|b| {
            b.element("p", &[], |b| b.text("  plain  "));
            b.element("div", &[], |b| {
                b.text("outer ");
                b.element("b", &[], |b| b.text("bold"));
            });
        });
        let plain = tree.root().children()[0];
        let nested = tree.root().children()[1];

        let candidates = xpath_candidates(XpathStrategy::TextContent, plain);
        assert_eq!(
            candidates,
            vec![Candidate::exact("//p[normalize-space(.)=\"plain\"]")]
        );

        let candidates = xpath_candidates(XpathStrategy::TextContent, nested);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[1].needs_review);
        assert!(candidates[1]
            .expression
            .starts_with("//div[contains(normalize-space(.),"));
    }

    #[test]
    fn ancestor_candidates_closest_first_stop_at_body() {
        let tree = DomTree::build(|b| {
            b.element("body", &[("id", "page")], |b| {
                b.element("section", &[("id", "content")], |b| {
                    b.element("div", &[], |b| {
                        b.leaf("span", &[]);
                    });
                });
            });
        });
        let span = tree.root().children()[0].children()[0].children()[0].children()[0];
        let candidates = xpath_candidates(XpathStrategy::AncestorRelative, span);
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].expression,
            "//*[@id=\"content\"]//div[1]/span[1]"
        );
        assert_eq!(
            candidates[1].expression,
            "//*[@id=\"page\"]//section[1]/div[1]/span[1]"
        );
    }

    #[test]
    fn absolute_path_counts_same_tag_siblings() {
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                b.leaf("div", &[]);
                b.leaf("p", &[]);
                b.leaf("div", &[]);
                b.element("div", &[], |b| {
                    b.leaf("span", &[]);
                });
            });
        });
        let span = tree.root().children()[0].children()[3].children()[0];
        let candidates = xpath_candidates(XpathStrategy::AbsolutePositional, span);
        assert_eq!(
            candidates[0].expression,
            "/html[1]/body[1]/div[3]/span[1]"
        );
        assert!(candidates[0].needs_review);
    }

    #[test]
    fn css_class_candidates_drop_digit_leading_tokens() {
        let tree = DomTree::build(|b| {
            b.leaf("div", &[("class", "card 3fa9b highlight")]);
        });
        let el = tree.root().children()[0];
        let candidates = css_candidates(CssStrategy::ClassNames, el);
        assert_eq!(candidates, vec![".card.highlight".to_string()]);
    }

    #[test]
    fn css_stable_attribute_candidates() {
        let tree = DomTree::build(|b| {
            b.leaf("input", &[("type", "text"), ("name", "email")]);
        });
        let el = tree.root().children()[0];
        let candidates = css_candidates(CssStrategy::StableAttribute, el);
        // `type` is not in the short CSS list.
        assert_eq!(candidates, vec!["input[name=\"email\"]".to_string()]);
    }
}
