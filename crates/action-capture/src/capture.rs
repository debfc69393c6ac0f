//! Capture handlers: event + element in, action record out.

use dom_bridge::{DomTree, ElementRef};
use locator_synth::{to_label, LocatorSynthesizer};
use recorder_core_types::{now_ms, ActionKind, ActionRecord, NOT_AVAILABLE};
use tracing::debug;

use crate::session::RecorderSession;
use crate::sink::ActionSink;

/// Assembles action records for one page. Synthesis runs once per captured
/// event, synchronously, before the handler returns.
pub struct Recorder<'t, S: ActionSink> {
    tree: &'t DomTree,
    session: RecorderSession,
    sink: S,
}

impl<'t, S: ActionSink> Recorder<'t, S> {
    pub fn new(tree: &'t DomTree, session: RecorderSession, sink: S) -> Self {
        Self {
            tree,
            session,
            sink,
        }
    }

    pub fn session(&self) -> &RecorderSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RecorderSession {
        &mut self.session
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Click on an element. The captured value is the element's `value`
    /// attribute, falling back to its trimmed text.
    pub fn capture_click(&mut self, el: Option<ElementRef<'t>>) {
        if !self.session.is_enabled() {
            debug!("Recording is off; dropping click");
            return;
        }
        let value = el
            .map(|el| match el.attribute("value") {
                Some(value) => value.to_string(),
                None => el.text_content().trim().to_string(),
            })
            .unwrap_or_default();
        self.emit(ActionKind::Click, el, value);
    }

    /// Value change on a form control. Non-form elements are dropped, the way
    /// the event wiring ignores change events from anything else.
    pub fn capture_input(&mut self, el: Option<ElementRef<'t>>) {
        if !self.session.is_enabled() {
            debug!("Recording is off; dropping input");
            return;
        }
        let Some(el) = el else {
            self.emit(ActionKind::Input, None, String::new());
            return;
        };
        let value = match el.tag_name() {
            "select" => selected_option_value(el),
            "input" => el.attribute("value").unwrap_or_default().to_string(),
            "textarea" => el.text_content(),
            other => {
                debug!("Ignoring input event from <{other}>");
                return;
            }
        };
        self.emit(ActionKind::Input, Some(el), value);
    }

    /// Form submission.
    pub fn capture_submit(&mut self, el: Option<ElementRef<'t>>) {
        if !self.session.is_enabled() {
            debug!("Recording is off; dropping submit");
            return;
        }
        self.emit(ActionKind::FormSubmit, el, String::new());
    }

    /// Page navigation. Carries no locator; the URL is the payload.
    pub fn capture_navigation(&mut self, url: &str) {
        if !self.session.is_enabled() {
            debug!("Recording is off; dropping navigation");
            return;
        }
        self.session.set_url(url);
        let record = ActionRecord {
            kind: ActionKind::Navigation,
            target: String::new(),
            value: String::new(),
            url: url.to_string(),
            xpath: NOT_AVAILABLE.to_string(),
            css_selector: NOT_AVAILABLE.to_string(),
            xpath_validated: true,
            xpath_needs_review: false,
            timestamp: now_ms(),
        };
        debug!("Captured navigation to {url}");
        self.sink.record(record);
    }

    fn emit(&mut self, kind: ActionKind, el: Option<ElementRef<'t>>, value: String) {
        let synthesizer = LocatorSynthesizer::new(self.tree);
        let locator = synthesizer.locate(el);
        let record = ActionRecord {
            kind,
            target: to_label(el),
            value,
            url: self.session.current_url().to_string(),
            xpath: locator.xpath,
            css_selector: locator.css_selector,
            xpath_validated: locator.validated,
            xpath_needs_review: locator.needs_review,
            timestamp: now_ms(),
        };
        debug!("Captured {} on {}", record.kind, record.target);
        self.sink.record(record);
    }
}

/// Text of the selected `<option>` (first flagged `selected`, else the first
/// option), falling back to its `value` attribute when the text is empty.
fn selected_option_value(select: ElementRef<'_>) -> String {
    let options = collect_options(select);
    let selected = options
        .iter()
        .find(|opt| opt.attribute("selected").is_some())
        .or_else(|| options.first());
    let Some(option) = selected else {
        return String::new();
    };
    let text = option.text_content();
    let text = text.trim();
    if text.is_empty() {
        option.attribute("value").unwrap_or_default().to_string()
    } else {
        text.to_string()
    }
}

fn collect_options<'t>(el: ElementRef<'t>) -> Vec<ElementRef<'t>> {
    let mut out = Vec::new();
    for child in el.children() {
        if child.tag_name() == "option" {
            out.push(child);
        } else {
            // optgroup and friends
            out.extend(collect_options(child));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use dom_bridge::NodeId;

    fn recorder(tree: &DomTree) -> Recorder<'_, MemorySink> {
        Recorder::new(
            tree,
            RecorderSession::new("https://example.test/form"),
            MemorySink::new(),
        )
    }

    fn el(tree: &DomTree, id: NodeId) -> Option<ElementRef<'_>> {
        tree.element(id)
    }

    #[test]
    fn click_value_prefers_value_attribute() {
        let mut button = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                button = Some(b.element("button", &[("id", "go"), ("value", "GO")], |b| {
                    b.text("Go now")
                }));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_click(el(&tree, button.unwrap()));
        let records = rec.into_sink().into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ActionKind::Click);
        assert_eq!(records[0].value, "GO");
        assert_eq!(records[0].target, "BUTTON#go");
        assert_eq!(records[0].xpath, "//*[@id=\"go\"]");
        assert!(records[0].xpath_validated);
    }

    #[test]
    fn click_falls_back_to_trimmed_text() {
        let mut link = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                link = Some(b.element("a", &[("id", "docs")], |b| b.text("  Read docs ")));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_click(el(&tree, link.unwrap()));
        assert_eq!(rec.into_sink().records()[0].value, "Read docs");
    }

    #[test]
    fn select_resolves_selected_option_text() {
        let mut select = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                select = Some(b.element("select", &[("name", "color")], |b| {
                    b.element("option", &[("value", "r")], |b| b.text("Red"));
                    b.element("option", &[("value", "g"), ("selected", "")], |b| {
                        b.text("Green")
                    });
                }));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_input(el(&tree, select.unwrap()));
        assert_eq!(rec.into_sink().records()[0].value, "Green");
    }

    #[test]
    fn select_defaults_to_first_option() {
        let mut select = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                select = Some(b.element("select", &[("name", "size")], |b| {
                    b.element("option", &[("value", "s")], |b| b.text("Small"));
                    b.element("option", &[("value", "l")], |b| b.text("Large"));
                }));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_input(el(&tree, select.unwrap()));
        assert_eq!(rec.into_sink().records()[0].value, "Small");
    }

    #[test]
    fn input_events_from_non_form_elements_are_dropped() {
        let mut div = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                div = Some(b.leaf("div", &[]));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_input(el(&tree, div.unwrap()));
        assert!(rec.into_sink().records().is_empty());
    }

    #[test]
    fn disabled_session_drops_everything() {
        let mut button = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                button = Some(b.leaf("button", &[("id", "go")]));
            });
        });
        let mut rec = recorder(&tree);
        rec.session_mut().set_enabled(false);
        rec.capture_click(el(&tree, button.unwrap()));
        rec.capture_submit(el(&tree, button.unwrap()));
        rec.capture_navigation("https://example.test/next");
        assert!(rec.into_sink().records().is_empty());
    }

    #[test]
    fn navigation_record_carries_url_and_no_locator() {
        let tree = DomTree::build(|b| {
            b.element("body", &[], |_| {});
        });
        let mut rec = recorder(&tree);
        rec.capture_navigation("https://example.test/page2");
        let records = rec.into_sink().into_records();
        assert_eq!(records[0].kind, ActionKind::Navigation);
        assert_eq!(records[0].url, "https://example.test/page2");
        assert_eq!(records[0].xpath, "N/A");
        assert!(records[0].xpath_validated);
        assert!(!records[0].xpath_needs_review);
    }

    #[test]
    fn navigation_updates_url_for_later_records() {
        let mut button = None;
        let tree = DomTree::build(|b| {
            b.element("body", &[], |b| {
                button = Some(b.leaf("button", &[("id", "go")]));
            });
        });
        let mut rec = recorder(&tree);
        rec.capture_navigation("https://example.test/checkout");
        rec.capture_click(el(&tree, button.unwrap()));
        let records = rec.into_sink().into_records();
        assert_eq!(records[1].url, "https://example.test/checkout");
    }
}
