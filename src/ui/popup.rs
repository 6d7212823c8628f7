use serde::Serialize;

/// Popup content bound to a map element; the renderer opens it on click
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    content: String,
}

impl Popup {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Popup body, HTML allowed and inserted as-is
    pub fn content(&self) -> &str {
        &self.content
    }
}
