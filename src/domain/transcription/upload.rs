//! Inbound audio attachment, as received from the transport layer

/// Raw attachment before validation.
/// Nothing about it is trusted: the declared type and size are checked by the upload gate.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Original file name supplied by the client, if any
    pub file_name: Option<String>,
    /// Media type the client declared for the attachment
    pub declared_type: Option<String>,
    /// Attachment body
    pub data: Vec<u8>,
}

impl AudioUpload {
    /// Create an upload with a declared media type
    pub fn new(data: Vec<u8>, declared_type: impl Into<String>) -> Self {
        Self {
            file_name: None,
            declared_type: Some(declared_type.into()),
            data,
        }
    }

    /// Attach the client-supplied file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Size of the attachment body in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
