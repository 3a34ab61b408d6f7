//! Receipt image entity

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// File name prefix that marks a stored image as a receipt
pub const RECEIPT_PREFIX: &str = "receipt-";

/// File extension for stored receipt images
pub const RECEIPT_EXTENSION: &str = "jpg";

/// A locally stored receipt image awaiting or having completed sync.
///
/// Invariant: `name` always matches the naming convention
/// (`receipt-<suffix>.jpg`); construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    path: PathBuf,
    name: String,
}

impl ReceiptImage {
    /// Build a ReceiptImage from an existing path, if the file name
    /// matches the receipt naming convention.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        if !Self::matches_convention(&name) {
            return None;
        }
        Some(Self { path, name })
    }

    /// Build a ReceiptImage with a freshly generated name inside `dir`.
    /// The generated name always satisfies the naming convention.
    pub fn generate(dir: &Path) -> Self {
        let name = Self::generate_name();
        Self {
            path: dir.join(&name),
            name,
        }
    }

    /// Check whether a file name follows the receipt naming convention
    pub fn matches_convention(name: &str) -> bool {
        name.starts_with(RECEIPT_PREFIX)
            && Path::new(name).extension().and_then(|e| e.to_str()) == Some(RECEIPT_EXTENSION)
    }

    /// Generate a fresh receipt file name (`receipt-<8 hex chars>.jpg`)
    pub fn generate_name() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("{}{}.{}", RECEIPT_PREFIX, &id[..8], RECEIPT_EXTENSION)
    }

    /// Local filesystem path of the image
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, unique within the store
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_accepts_matching_name() {
        let receipt = ReceiptImage::from_path("/tmp/receipts/receipt-1a2b3c4d.jpg").unwrap();
        assert_eq!(receipt.name(), "receipt-1a2b3c4d.jpg");
        assert_eq!(
            receipt.path(),
            Path::new("/tmp/receipts/receipt-1a2b3c4d.jpg")
        );
    }

    #[test]
    fn from_path_rejects_wrong_prefix() {
        assert!(ReceiptImage::from_path("/tmp/invoice-1a2b3c4d.jpg").is_none());
    }

    #[test]
    fn from_path_rejects_wrong_extension() {
        assert!(ReceiptImage::from_path("/tmp/receipt-1a2b3c4d.png").is_none());
        assert!(ReceiptImage::from_path("/tmp/receipt-1a2b3c4d").is_none());
    }

    #[test]
    fn from_path_rejects_directory_like_paths() {
        assert!(ReceiptImage::from_path("/").is_none());
    }

    #[test]
    fn generated_name_matches_convention() {
        let name = ReceiptImage::generate_name();
        assert!(ReceiptImage::matches_convention(&name));
        assert_eq!(name.len(), RECEIPT_PREFIX.len() + 8 + 4);
    }

    #[test]
    fn generated_names_are_unique() {
        assert_ne!(ReceiptImage::generate_name(), ReceiptImage::generate_name());
    }

    #[test]
    fn generate_places_file_in_dir() {
        let receipt = ReceiptImage::generate(Path::new("/tmp/receipts"));
        assert!(receipt.path().starts_with("/tmp/receipts"));
        assert!(ReceiptImage::matches_convention(receipt.name()));
    }

    #[test]
    fn convention_checks() {
        assert!(ReceiptImage::matches_convention("receipt-abcd1234.jpg"));
        assert!(!ReceiptImage::matches_convention("note.txt"));
        assert!(!ReceiptImage::matches_convention("receipt-abcd1234.jpeg"));
        assert!(!ReceiptImage::matches_convention("RECEIPT-abcd1234.jpg"));
    }
}
