#[derive(Debug)]
pub struct TextDocument {
    pub name: String,
    pub content: String,
}

impl TextDocument {
    /// Decode UTF-8 text content.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, String> {
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|error| format!("failed to decode text '{name}' as UTF-8: {error}"))?;
        Ok(Self {
            name: name.to_owned(),
            content,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
