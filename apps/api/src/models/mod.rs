//! Value types shared across the optimization pipeline.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The uploaded résumé file exactly as it arrived from the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    /// MIME type declared by the upload, not verified against the bytes.
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Everything the user filled in on the form. One submission's worth of input.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub company: String,
    pub role: String,
    pub skills: String,
    pub level: String,
    pub notes: String,
    pub file: Option<ResumeFile>,
}

impl UserInput {
    /// Generation may only be triggered when company, role, and file are all present.
    /// Skills, level, and notes are allowed to be empty.
    pub fn is_submittable(&self) -> bool {
        !self.company.trim().is_empty()
            && !self.role.trim().is_empty()
            && self.file.as_ref().is_some_and(|f| !f.bytes.is_empty())
    }
}

/// Base64 payload plus declared MIME type, ready to inline into the model request.
/// Derived from `ResumeFile` once per submission and dropped afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedAttachment {
    pub data: String,
    pub mime_type: String,
}

/// The two markdown documents produced by a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub resume: String,
    pub strategy: String,
}

/// Where the application currently is. Exactly one value is active at a time;
/// serialized in the SPA's original `"IDLE"`/`"GENERATING"`/… spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStatus {
    #[default]
    Idle,
    Generating,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_file() -> ResumeFile {
        ResumeFile {
            name: "resume.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 fake"),
        }
    }

    #[test]
    fn test_submittable_with_all_required_fields() {
        let input = UserInput {
            company: "Google".to_string(),
            role: "Senior Frontend Engineer".to_string(),
            file: Some(pdf_file()),
            ..Default::default()
        };
        assert!(input.is_submittable());
    }

    #[test]
    fn test_not_submittable_without_company() {
        let input = UserInput {
            company: "  ".to_string(),
            role: "Engineer".to_string(),
            file: Some(pdf_file()),
            ..Default::default()
        };
        assert!(!input.is_submittable());
    }

    #[test]
    fn test_not_submittable_without_role() {
        let input = UserInput {
            company: "Google".to_string(),
            role: String::new(),
            file: Some(pdf_file()),
            ..Default::default()
        };
        assert!(!input.is_submittable());
    }

    #[test]
    fn test_not_submittable_without_file() {
        let input = UserInput {
            company: "Google".to_string(),
            role: "Engineer".to_string(),
            skills: "React, TypeScript".to_string(),
            level: "Senior".to_string(),
            notes: "anything".to_string(),
            file: None,
        };
        assert!(!input.is_submittable());
    }

    #[test]
    fn test_not_submittable_with_empty_file() {
        let input = UserInput {
            company: "Google".to_string(),
            role: "Engineer".to_string(),
            file: Some(ResumeFile {
                name: "empty.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                bytes: Bytes::new(),
            }),
            ..Default::default()
        };
        assert!(!input.is_submittable());
    }

    #[test]
    fn test_app_status_serializes_in_spa_spelling() {
        assert_eq!(
            serde_json::to_string(&AppStatus::Generating).unwrap(),
            "\"GENERATING\""
        );
        let status: AppStatus = serde_json::from_str("\"IDLE\"").unwrap();
        assert_eq!(status, AppStatus::Idle);
    }
}
