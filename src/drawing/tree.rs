//! Structural tree for parsed SVG markup.
//!
//! Nodes live in a flat arena in document order; elements refer to their
//! children by [`NodeId`]. Attribute values are kept exactly as written in
//! the source (entities are not decoded) so rendering reproduces them.

/// Index of a node in an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A parsed SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data between tags, verbatim.
    Text(String),
    /// Comments, CDATA sections, processing instructions and doctype, verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// Written as `<name/>` in the source.
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Element {
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add `class` to the class list unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(attr) if attr.value.trim().is_empty() => attr.value = class.to_owned(),
            Some(attr) => {
                attr.value.push(' ');
                attr.value.push_str(class);
            }
            None => self.attrs.push(Attribute { name: "class".into(), value: class.to_owned() }),
        }
    }

    /// Remove every occurrence of `class`. Drops the attribute when it empties.
    pub fn remove_class(&mut self, class: &str) {
        let Some(pos) = self.attrs.iter().position(|a| a.name == "class") else {
            return;
        };
        let remaining: Vec<&str> = self.attrs[pos]
            .value
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect();
        if remaining.is_empty() {
            self.attrs.remove(pos);
        } else {
            self.attrs[pos].value = remaining.join(" ");
        }
    }
}

impl SvgDocument {
    /// Top-level nodes in document order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node {
                Node::Element(el) => Some((NodeId(i), el)),
                _ => None,
            })
    }

    /// First element in document order whose `id` attribute equals `id` exactly.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .find(|(_, el)| el.attr("id") == Some(id))
            .map(|(node_id, _)| node_id)
    }

    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|(_, el)| el.has_class(class))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    pub(crate) fn push(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match parent.and_then(|p| self.element_mut(p)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }
}
