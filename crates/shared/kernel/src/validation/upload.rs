use std::path::Path;

/// An uploaded file as received from a form, before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Client-supplied file name; normalized by the validators that accept it.
    pub name: String,
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), data: data.into() }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.data.len()).unwrap_or(u64::MAX)
    }

    /// Lowercased extension without the dot; empty when the name has none.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(FileUpload::new("Rex.JPG", vec![]).extension(), "jpg");
        assert_eq!(FileUpload::new("archive.tar.gz", vec![]).extension(), "gz");
        assert_eq!(FileUpload::new("README", vec![]).extension(), "");
        assert_eq!(FileUpload::new(".png", vec![]).extension(), "");
    }

    #[test]
    fn size_counts_bytes() {
        assert_eq!(FileUpload::new("a.pdf", vec![0u8; 42]).size(), 42);
    }
}
