//! Minimal HTML tag building shared by the HTML report and DOT labels.
//!
//! Graphviz HTML-like labels accept the same table, row and cell tags as
//! HTML, so both formatters build rows through the same [`Tag`] type and
//! the same escaping.

use std::borrow::Cow;
use std::fmt::Write as _;

/// Escapes text for HTML content and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Horizontal alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// No alignment attribute; the cell inherits from its table
    #[default]
    Inherit,
    Left,
    Center,
    Right,
}

impl Alignment {
    const fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Inherit => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// An element with attributes, escaped text and nested elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: String,
    emphasis: bool,
    children: Vec<Tag>,
}

/// Starts a `<tr>` element
pub const fn table_row() -> Tag {
    Tag::new("tr")
}

/// Starts a `<td>` element
pub const fn table_cell() -> Tag {
    Tag::new("td")
}

impl Tag {
    /// Starts an element with the given tag name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: String::new(),
            emphasis: false,
            children: Vec::new(),
        }
    }

    /// Sets the element text, escaping it
    pub fn with_escaped_text(mut self, text: &str) -> Self {
        self.text = escape_html(text).into_owned();
        self
    }

    /// Sets the cell alignment
    pub fn with_alignment(self, alignment: Alignment) -> Self {
        match alignment.attribute() {
            Some(align) => self.with_attribute("align", align),
            None => self,
        }
    }

    /// Renders the text in bold
    pub fn with_emphasis(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Spans the cell across several columns
    pub fn with_column_span(self, span: u8) -> Self {
        if span > 1 {
            self.with_attribute("colspan", span.to_string())
        } else {
            self
        }
    }

    /// Sets the CSS class
    pub fn with_class(self, class: &str) -> Self {
        self.with_attribute("class", class)
    }

    /// Adds an attribute; the value is escaped on render
    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Appends a nested element
    pub fn add_inner_tag(&mut self, tag: Self) {
        self.children.push(tag);
    }

    /// Appends a nested element, builder style
    pub fn with_inner_tag(mut self, tag: Self) -> Self {
        self.add_inner_tag(tag);
        self
    }

    /// Renders the element and its children on a single line
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');

        if self.emphasis {
            out.push_str("<b>");
        }
        out.push_str(&self.text);
        if self.emphasis {
            out.push_str("</b>");
        }

        for child in &self.children {
            child.render_into(out);
        }

        let _ = write!(out, "</{}>", self.name);
    }
}
