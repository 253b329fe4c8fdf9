pub mod directory;

pub use directory::DirectorySource;

/// One document blob delivered by the mail source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name the attachment was delivered under.
    pub name: String,
    /// Sender the attachment came from, when the source knows it.
    pub sender: Option<String>,
    pub bytes: Vec<u8>,
}

/// Yields report attachments, optionally restricted to one sender.
pub trait AttachmentSource {
    /// Fetch every attachment available from `sender` (all senders when `None`).
    fn fetch(&self, sender: Option<&str>) -> Result<Vec<Attachment>, String>;
}
