//! Multipart form reading and essay file decoding.
//!
//! Read failures are never surfaced to the user: a form that could not be read
//! in full leaves the draft as it was.

use axum::extract::{multipart::MultipartError, Multipart};
use bytes::Bytes;
use tracing::debug;

use crate::form::EssayDraft;

const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "md"];
const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Fields posted by the essay form. Absent fields leave the draft untouched.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pub essay: Option<String>,
    pub prompt: Option<String>,
    pub file: Option<UploadedFile>,
}

impl FormSubmission {
    /// Copies typed text into the draft.
    pub fn apply_text(&self, draft: &mut EssayDraft) {
        if let Some(essay) = &self.essay {
            draft.essay_text = essay.clone();
        }
        if let Some(prompt) = &self.prompt {
            draft.prompt_text = prompt.clone();
        }
    }

    /// Replaces the essay with the uploaded file's contents, when there is an
    /// acceptable file. Returns whether the essay was replaced.
    pub fn apply_upload(&self, draft: &mut EssayDraft) -> bool {
        let Some(file) = &self.file else {
            return false;
        };
        if !is_accepted_file(&file.file_name) {
            debug!("Ignoring upload with unsupported name '{}'", file.file_name);
            return false;
        }
        draft.essay_text = decode_upload(&file.bytes);
        true
    }
}

pub fn is_accepted_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Decodes file bytes as UTF-8, replacing invalid sequences and dropping a leading BOM.
pub fn decode_upload(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Reads the essay form. Any unreadable field, including a body over the
/// size limit, fails the whole read so a partial form is never applied.
pub async fn read_submission(mut multipart: Multipart) -> Result<FormSubmission, MultipartError> {
    let mut submission = FormSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                // Browsers post an empty, unnamed part when no file was chosen
                if file_name.is_empty() {
                    continue;
                }
                let bytes = field.bytes().await?;
                submission.file = Some(UploadedFile { file_name, bytes });
            }
            "essay" => submission.essay = Some(field.text().await?),
            "prompt" => submission.prompt = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, contents: &[u8]) -> FormSubmission {
        FormSubmission {
            file: Some(UploadedFile {
                file_name: name.to_string(),
                bytes: Bytes::copy_from_slice(contents),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepted_extensions() {
        assert!(is_accepted_file("essay.txt"));
        assert!(is_accepted_file("notes.MD"));
        assert!(is_accepted_file("archive.tar.txt"));
        assert!(!is_accepted_file("essay.pdf"));
        assert!(!is_accepted_file("txt"));
        assert!(!is_accepted_file(""));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_upload(b"\xEF\xBB\xBFHello"), "Hello");
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        assert_eq!(decode_upload(b"caf\xE9"), "caf\u{fffd}");
    }

    #[test]
    fn test_upload_replaces_essay_verbatim() {
        let mut draft = EssayDraft::new("old essay", "keep me");
        let applied = upload("essay.md", b"# Title\n\n  Body text  \n").apply_upload(&mut draft);
        assert!(applied);
        assert_eq!(draft.essay_text, "# Title\n\n  Body text  \n");
        assert_eq!(draft.prompt_text, "keep me");
    }

    #[test]
    fn test_rejected_upload_leaves_essay_unchanged() {
        let mut draft = EssayDraft::new("old essay", "");
        assert!(!upload("essay.docx", b"binary").apply_upload(&mut draft));
        assert_eq!(draft.essay_text, "old essay");
    }

    #[test]
    fn test_missing_upload_leaves_essay_unchanged() {
        let mut draft = EssayDraft::new("old essay", "");
        assert!(!FormSubmission::default().apply_upload(&mut draft));
        assert_eq!(draft.essay_text, "old essay");
    }

    #[test]
    fn test_apply_text_only_touches_present_fields() {
        let mut draft = EssayDraft::new("old essay", "old prompt");
        FormSubmission {
            prompt: Some("new prompt".to_string()),
            ..Default::default()
        }
        .apply_text(&mut draft);
        assert_eq!(draft, EssayDraft::new("old essay", "new prompt"));
    }
}
