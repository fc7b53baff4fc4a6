//! Single-pass parser for SVG markup into an [`SvgDocument`].
//!
//! Covers the XML subset model-generated SVG uses: elements, quoted
//! attributes, character data, comments, CDATA, processing instructions and
//! a doctype. Entities are left undecoded.

use super::tree::{Attribute, Element, Node, NodeId, SvgDocument};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SvgParseError {
    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEof { pos: usize },
    #[error("unexpected character {found:?} at byte {pos}")]
    UnexpectedChar { pos: usize, found: char },
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    #[error("end tag </{0}> without matching start tag")]
    UnmatchedEndTag(String),
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("markup contains no element")]
    NoRootElement,
}

/// Parse SVG markup.
///
/// # Errors
///
/// Returns a [`SvgParseError`] describing the first structural problem.
pub fn parse(markup: &str) -> Result<SvgDocument, SvgParseError> {
    let mut parser = Parser { src: markup, pos: 0, doc: SvgDocument::default(), open: Vec::new() };
    parser.run()?;

    let has_element = parser
        .doc
        .roots()
        .iter()
        .any(|id| parser.doc.element(*id).is_some());
    if !has_element {
        return Err(SvgParseError::NoRootElement);
    }
    Ok(parser.doc)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    doc: SvgDocument,
    /// Currently open elements, innermost last.
    open: Vec<NodeId>,
}

impl Parser<'_> {
    fn run(&mut self) -> Result<(), SvgParseError> {
        while self.pos < self.src.len() {
            if self.rest().starts_with('<') {
                self.markup()?;
            } else {
                self.text();
            }
        }
        if let Some(&id) = self.open.last() {
            return Err(SvgParseError::Unclosed(self.name_of(id)));
        }
        Ok(())
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn attach(&mut self, node: Node) -> NodeId {
        let parent = self.open.last().copied();
        self.doc.push(node, parent)
    }

    fn name_of(&self, id: NodeId) -> String {
        self.doc
            .element(id)
            .map(|el| el.name.clone())
            .unwrap_or_default()
    }

    fn unexpected(&self) -> SvgParseError {
        match self.rest().chars().next() {
            Some(found) => SvgParseError::UnexpectedChar { pos: self.pos, found },
            None => SvgParseError::UnexpectedEof { pos: self.pos },
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), SvgParseError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn name(&mut self) -> Result<String, SvgParseError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'/' | b'>' | b'=' | b'<' | b'"' | b'\''))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.src[start..self.pos].to_owned())
    }

    fn text(&mut self) {
        let end = self.rest().find('<').map_or(self.src.len(), |i| self.pos + i);
        let text = self.src[self.pos..end].to_owned();
        self.pos = end;
        self.attach(Node::Text(text));
    }

    fn markup(&mut self) -> Result<(), SvgParseError> {
        let rest = self.rest();
        if rest.starts_with("<!--") {
            self.raw_until("-->")
        } else if rest.starts_with("<![CDATA[") {
            self.raw_until("]]>")
        } else if rest.starts_with("<?") {
            self.raw_until("?>")
        } else if rest.starts_with("<!") {
            self.declaration()
        } else if rest.starts_with("</") {
            self.end_tag()
        } else {
            self.start_tag()
        }
    }

    fn raw_until(&mut self, terminator: &str) -> Result<(), SvgParseError> {
        let Some(i) = self.rest().find(terminator) else {
            return Err(SvgParseError::UnexpectedEof { pos: self.src.len() });
        };
        let end = self.pos + i + terminator.len();
        let raw = self.src[self.pos..end].to_owned();
        self.pos = end;
        self.attach(Node::Raw(raw));
        Ok(())
    }

    /// `<!DOCTYPE ...>`, including a bracketed internal subset.
    fn declaration(&mut self) -> Result<(), SvgParseError> {
        let mut depth = 0usize;
        let mut end = None;
        for (i, b) in self.rest().bytes().enumerate() {
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    end = Some(self.pos + i + 1);
                    break;
                }
                _ => {}
            }
        }
        let Some(end) = end else {
            return Err(SvgParseError::UnexpectedEof { pos: self.src.len() });
        };
        let raw = self.src[self.pos..end].to_owned();
        self.pos = end;
        self.attach(Node::Raw(raw));
        Ok(())
    }

    fn end_tag(&mut self) -> Result<(), SvgParseError> {
        self.pos += 2;
        let name = self.name()?;
        self.skip_ws();
        self.expect(b'>')?;

        let Some(open) = self.open.pop() else {
            return Err(SvgParseError::UnmatchedEndTag(name));
        };
        let expected = self.name_of(open);
        if expected != name {
            return Err(SvgParseError::MismatchedTag { expected, found: name });
        }
        Ok(())
    }

    fn start_tag(&mut self) -> Result<(), SvgParseError> {
        self.pos += 1;
        let name = self.name()?;
        let mut attrs = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'>') => {
                    self.pos += 1;
                    let id = self.attach(Node::Element(Element { name, attrs, children: Vec::new(), self_closing: false }));
                    self.open.push(id);
                    return Ok(());
                }
                Some(b'/') => {
                    self.pos += 1;
                    self.expect(b'>')?;
                    self.attach(Node::Element(Element { name, attrs, children: Vec::new(), self_closing: true }));
                    return Ok(());
                }
                Some(_) => attrs.push(self.attribute()?),
                None => return Err(SvgParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }

    fn attribute(&mut self) -> Result<Attribute, SvgParseError> {
        let name = self.name()?;
        self.skip_ws();
        self.expect(b'=')?;
        self.skip_ws();

        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.unexpected()),
        };
        self.pos += 1;
        let Some(len) = self.rest().find(char::from(quote)) else {
            return Err(SvgParseError::UnexpectedEof { pos: self.src.len() });
        };
        let value = self.src[self.pos..self.pos + len].to_owned();
        self.pos += len + 1;
        Ok(Attribute { name, value })
    }
}
