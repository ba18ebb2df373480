use serde::{Deserialize, Serialize};

const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 1024 * 1024;

/// Limits applied to the five uploaded documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPolicy {
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl DocumentPolicy {
    pub fn allows_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            allowed_content_types: vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
        }
    }
}
