//! Human-readable element labels, display only.

use dom_bridge::ElementRef;

/// `TAG#id.class.names` label for display. No validation, never used for
/// replay. Empty when there is no element.
pub fn to_label(el: Option<ElementRef<'_>>) -> String {
    let Some(el) = el else {
        return String::new();
    };
    let mut label = el.tag_name().to_ascii_uppercase();
    if let Some(id) = el.id() {
        label.push('#');
        label.push_str(id);
    }
    for class in el.class_list() {
        label.push('.');
        label.push_str(class);
    }
    label
}
