//! Named sections of a note and their content items

/// One header + body unit of text within a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    header: String,
    text: String,
}

impl ContentItem {
    /// Create a content item; an empty header means "no header line"
    pub fn new(header: impl Into<String>, text: impl Into<String>) -> Self {
        ContentItem {
            header: header.into(),
            text: text.into(),
        }
    }

    /// A header-less content item, the shape produced by parsing
    pub fn plain(text: impl Into<String>) -> Self {
        ContentItem::new(String::new(), text)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn body(&self) -> &str {
        &self.text
    }

    fn render_into(&self, out: &mut String) {
        if !self.header.is_empty() {
            out.push_str(&self.header);
            out.push('\n');
        }
        out.push_str(&self.text);
        if !self.text.ends_with('\n') {
            out.push('\n');
        }
    }
}

/// A named block of a note holding content items in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    contents: Vec<ContentItem>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            contents: Vec::new(),
        }
    }

    pub fn with_contents(name: impl Into<String>, contents: Vec<ContentItem>) -> Self {
        Section {
            name: name.into(),
            contents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[ContentItem] {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Membership test that ignores position
    pub fn contains(&self, item: &ContentItem) -> bool {
        self.contents.contains(item)
    }

    pub fn push(&mut self, item: ContentItem) {
        self.contents.push(item);
    }

    /// Append items after the existing contents, keeping their order
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = ContentItem>,
    {
        self.contents.extend(items);
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    pub(crate) fn replace_contents(&mut self, contents: Vec<ContentItem>) {
        self.contents = contents;
    }

    /// Append the body of this section (everything after its marker line).
    ///
    /// An empty section writes `empty_spacing` instead, so the file keeps
    /// room to type into.
    pub fn render_body_into(&self, out: &mut String, empty_spacing: &str) {
        if self.contents.is_empty() {
            out.push_str(empty_spacing);
            return;
        }
        for item in &self.contents {
            item.render_into(out);
        }
    }
}
