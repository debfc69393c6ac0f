//! Arena-backed element tree and element handles.
//!
//! Trees are built through [`DomTree::build`]; the host (or a test) describes
//! the document once and the tree is immutable afterwards, which is what the
//! synthesis core assumes: every call is a pure function of the current tree.

/// Index of a node inside its [`DomTree`] arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug)]
enum Node {
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable document tree.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DomTree {
    /// Build a tree. The `html` root element is created implicitly; the
    /// closure describes its content.
    pub fn build(f: impl FnOnce(&mut TreeBuilder<'_>)) -> DomTree {
        let mut tree = DomTree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        let root = tree.push_element("html", &[], None);
        tree.root = root;
        let mut builder = TreeBuilder {
            tree: &mut tree,
            parent: root,
        };
        f(&mut builder);
        tree
    }

    fn push_element(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent,
            children: Vec::new(),
        }));
        if let Some(parent) = parent {
            if let Node::Element(data) = &mut self.nodes[parent.0] {
                data.children.push(id);
            }
        }
        id
    }

    fn push_text(&mut self, text: &str, parent: NodeId) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::Text(text.to_string()));
        if let Node::Element(data) = &mut self.nodes[parent.0] {
            data.children.push(id);
        }
    }

    /// Root element handle (`html`).
    pub fn root(&self) -> ElementRef<'_> {
        ElementRef {
            tree: self,
            id: self.root,
        }
    }

    /// Handle for an element node id. `None` for text nodes or stale ids.
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        match self.nodes.get(id.0) {
            Some(Node::Element(_)) => Some(ElementRef { tree: self, id }),
            _ => None,
        }
    }

    /// All elements in document (preorder) order.
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        let mut out = Vec::new();
        self.collect_subtree(self.root, &mut out);
        out.iter()
            .map(|id| ElementRef {
                tree: self,
                id: *id,
            })
            .collect()
    }

    /// Proper element descendants of `of`, in document order.
    pub(crate) fn descendants(&self, of: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.element_children(of) {
            self.collect_subtree(child, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.element_children(id) {
            self.collect_subtree(child, out);
        }
    }

    pub(crate) fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.nodes[id.0] {
            Node::Element(data) => data
                .children
                .iter()
                .copied()
                .filter(|c| matches!(self.nodes[c.0], Node::Element(_)))
                .collect(),
            Node::Text(_) => Vec::new(),
        }
    }

    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }
}

/// Cheap copyable handle to one element of a [`DomTree`].
#[derive(Clone, Copy)]
pub struct ElementRef<'t> {
    tree: &'t DomTree,
    id: NodeId,
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementRef(<{}> #{})", self.tag_name(), self.id.0)
    }
}

impl<'t> ElementRef<'t> {
    fn data(&self) -> &'t ElementData {
        match &self.tree.nodes[self.id.0] {
            Node::Element(data) => data,
            // A handle is only ever constructed for element nodes.
            Node::Text(_) => unreachable!("ElementRef points at a text node"),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Lower-case tag name.
    pub fn tag_name(&self) -> &'t str {
        &self.data().tag
    }

    /// Attributes in the order they were declared.
    pub fn attributes(&self) -> &'t [(String, String)] {
        &self.data().attrs
    }

    /// Attribute value by name, if present.
    pub fn attribute(&self, name: &str) -> Option<&'t str> {
        self.data()
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Non-empty `id` attribute.
    pub fn id(&self) -> Option<&'t str> {
        self.attribute("id").filter(|v| !v.is_empty())
    }

    /// Class tokens from the `class` attribute.
    pub fn class_list(&self) -> Vec<&'t str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(self.id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Node::Element(data) = &self.tree.nodes[id.0] {
            for child in &data.children {
                match &self.tree.nodes[child.0] {
                    Node::Text(text) => out.push_str(text),
                    Node::Element(_) => self.collect_text(*child, out),
                }
            }
        }
    }

    pub fn parent(&self) -> Option<ElementRef<'t>> {
        self.data().parent.map(|id| ElementRef {
            tree: self.tree,
            id,
        })
    }

    /// Element children in document order.
    pub fn children(&self) -> Vec<ElementRef<'t>> {
        self.tree
            .element_children(self.id)
            .into_iter()
            .map(|id| ElementRef {
                tree: self.tree,
                id,
            })
            .collect()
    }

    pub fn has_element_children(&self) -> bool {
        !self.tree.element_children(self.id).is_empty()
    }

    /// Number of preceding element siblings that share this element's tag.
    pub fn same_tag_preceding_siblings(&self) -> usize {
        let Some(parent) = self.parent() else {
            return 0;
        };
        parent
            .children()
            .iter()
            .take_while(|sib| sib.id != self.id)
            .filter(|sib| sib.tag_name() == self.tag_name())
            .count()
    }

    /// Whether `ancestor` lies on this element's parent chain.
    pub fn is_descendant_of(&self, ancestor: ElementRef<'_>) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.id == ancestor.id && std::ptr::eq(node.tree, ancestor.tree) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    pub fn is_body(&self) -> bool {
        self.tag_name() == "body"
    }
}

/// Builder handed to the closures of [`DomTree::build`].
pub struct TreeBuilder<'t> {
    tree: &'t mut DomTree,
    parent: NodeId,
}

impl TreeBuilder<'_> {
    /// Append an element with children described by `f`. Returns its id so
    /// callers can keep a handle to interesting nodes.
    pub fn element(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
        f: impl FnOnce(&mut TreeBuilder<'_>),
    ) -> NodeId {
        let id = self.tree.push_element(tag, attrs, Some(self.parent));
        let mut child = TreeBuilder {
            tree: &mut *self.tree,
            parent: id,
        };
        f(&mut child);
        id
    }

    /// Append an element with no children.
    pub fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.tree.push_element(tag, attrs, Some(self.parent))
    }

    /// Append a text node.
    pub fn text(&mut self, text: &str) {
        self.tree.push_text(text, self.parent);
    }
}
