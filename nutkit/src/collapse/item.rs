use crate::element::Element;

/// Props for one collapse panel.
#[derive(Debug, Clone)]
pub struct CollapseItem {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) extra: Option<String>,
    pub(crate) content: Vec<Element>,
    pub(crate) disabled: bool,
    pub(crate) rotate: u16,
    pub(crate) expand_icon: Option<String>,
}

impl Default for CollapseItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            extra: None,
            content: Vec::new(),
            disabled: false,
            rotate: 180,
            expand_icon: None,
        }
    }
}

impl CollapseItem {
    /// Create a panel identified by `name` within its registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Auxiliary header text shown between the title and the icon.
    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Append a line of text content.
    pub fn text(mut self, line: impl Into<String>) -> Self {
        self.content.push(Element::text(line));
        self
    }

    /// Append an arbitrary content element.
    pub fn child(mut self, child: Element) -> Self {
        self.content.push(child);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Icon rotation in degrees while open.
    pub fn rotate(mut self, degrees: u16) -> Self {
        self.rotate = degrees;
        self
    }

    /// Override the registry's shared expand icon.
    pub fn expand_icon(mut self, icon: impl Into<String>) -> Self {
        self.expand_icon = Some(icon.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn content(&self) -> &[Element] {
        &self.content
    }
}
