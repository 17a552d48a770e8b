//! Multipart file intake for driver documents and vehicle photos.
//!
//! Files are screened against a MIME whitelist before anything touches the
//! uploads directory, then stored under a UUID-prefixed sanitized name so
//! repeated uploads never collide.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use sanitize_filename::sanitize;
use uuid::Uuid;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "application/pdf",
];

/// A stored upload: the on-disk name and the name the client sent.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub original_filename: String,
}

/// Everything extracted from one multipart payload.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    /// Remove every stored file again. For handlers that reject the
    /// request after intake, so no orphaned uploads accumulate.
    pub fn discard_files(&self, uploads_dir: &Path) {
        for file in &self.files {
            let _ = fs::remove_file(uploads_dir.join(&file.filename));
        }
    }
}

/// Check a filename against the upload whitelist by its guessed MIME type.
pub fn is_allowed_upload(filename: &str) -> bool {
    mime_guess::from_path(filename)
        .first()
        .map(|mime| ALLOWED_MIME_TYPES.contains(&mime.essence_str()))
        .unwrap_or(false)
}

/// Drain a multipart payload into text fields and stored files.
///
/// Each file is screened against the MIME whitelist before it is written.
/// A rejected part fails the whole request and removes any files already
/// stored for earlier parts. `max_files` caps the number of file parts.
pub async fn collect_multipart(
    payload: Multipart,
    uploads_dir: &Path,
    max_files: usize,
) -> Result<MultipartForm, String> {
    fs::create_dir_all(uploads_dir)
        .map_err(|e| format!("Failed to create uploads directory: {}", e))?;

    let mut form = MultipartForm::default();
    if let Err(message) = drain_payload(payload, uploads_dir, max_files, &mut form).await {
        form.discard_files(uploads_dir);
        return Err(message);
    }
    Ok(form)
}

async fn drain_payload(
    mut payload: Multipart,
    uploads_dir: &Path,
    max_files: usize,
    form: &mut MultipartForm,
) -> Result<(), String> {
    while let Some(mut field) = payload.try_next().await.map_err(|e| e.to_string())? {
        let content_disposition = field
            .content_disposition()
            .ok_or("Content-Disposition not set")?;
        let field_name = content_disposition
            .get_name()
            .ok_or_else(|| "No field name".to_string())?
            .to_string();

        match content_disposition.get_filename() {
            Some(original) => {
                let original = original.to_string();
                if form.files.len() >= max_files {
                    return Err(format!("At most {} files are allowed", max_files));
                }
                if !is_allowed_upload(&original) {
                    return Err(format!(
                        "File type of '{}' is not supported",
                        original
                    ));
                }

                let sanitized = sanitize(&original);
                let unique_filename = format!("{}_{}", Uuid::new_v4(), sanitized);
                let file_path = uploads_dir.join(&unique_filename);

                let mut file = fs::File::create(&file_path)
                    .map_err(|e| format!("Failed to create file: {}", e))?;
                while let Some(chunk) = field.try_next().await.map_err(|e| e.to_string())? {
                    file.write_all(&chunk)
                        .map_err(|e| format!("Failed to write chunk: {}", e))?;
                }

                log::debug!("Stored upload {} as {}", original, unique_filename);
                form.files.push(UploadedFile {
                    filename: unique_filename,
                    original_filename: original,
                });
            }
            None => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.try_next().await.map_err(|e| e.to_string())? {
                    bytes.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(bytes).map_err(|e| e.to_string())?;
                form.fields.insert(field_name, value);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_image_types() {
        assert!(is_allowed_upload("license.jpg"));
        assert!(is_allowed_upload("id-card.jpeg"));
        assert!(is_allowed_upload("photo.png"));
        assert!(is_allowed_upload("profile.webp"));
        assert!(is_allowed_upload("contract.pdf"));
    }

    #[test]
    fn test_rejected_types() {
        assert!(!is_allowed_upload("malware.exe"));
        assert!(!is_allowed_upload("script.js"));
        assert!(!is_allowed_upload("notes.txt"));
        assert!(!is_allowed_upload("archive.zip"));
    }

    #[test]
    fn test_no_extension_rejected() {
        assert!(!is_allowed_upload("no_extension"));
    }
}
