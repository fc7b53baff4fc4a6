//! Serialize an [`SvgDocument`] back to markup.

use std::fmt;

use super::tree::{Node, NodeId, SvgDocument};

impl SvgDocument {
    /// Render the document, including any class changes made since parsing.
    #[must_use]
    pub fn to_markup(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        match self.node(id) {
            Some(Node::Element(el)) => {
                write!(f, "<{}", el.name)?;
                for attr in &el.attrs {
                    write!(f, " {}=\"{}\"", attr.name, attr.value.replace('"', "&quot;"))?;
                }
                if el.self_closing && el.children.is_empty() {
                    return f.write_str("/>");
                }
                f.write_str(">")?;
                for child in &el.children {
                    self.write_node(f, *child)?;
                }
                write!(f, "</{}>", el.name)
            }
            Some(Node::Text(text) | Node::Raw(text)) => f.write_str(text),
            None => Ok(()),
        }
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.roots() {
            self.write_node(f, *id)?;
        }
        Ok(())
    }
}
