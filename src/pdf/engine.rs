//! Typst rendering engine.
//!
//! Writes the composed Typst source into a temporary directory, invokes
//! the Typst CLI, and returns the PDF bytes. The temp directory (and the
//! intermediate source file with it) is removed when this function
//! returns, on success and on failure alike.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use super::PdfError;

const SOURCE_FILENAME: &str = "contract.typ";
const OUTPUT_FILENAME: &str = "contract.pdf";

/// Render a complete Typst source string to PDF bytes.
///
/// Non-zero renderer exit surfaces as [`PdfError::RendererExit`] with the
/// captured stderr attached; an empty output file is an error as well.
pub fn render_pdf(typst_bin: &str, typst_source: &str) -> Result<Vec<u8>, PdfError> {
    let temp_dir = tempdir().map_err(PdfError::TempDir)?;
    let source_path = temp_dir.path().join(SOURCE_FILENAME);
    let output_path = temp_dir.path().join(OUTPUT_FILENAME);

    fs::write(&source_path, typst_source).map_err(PdfError::WriteSource)?;

    let output = Command::new(typst_bin)
        .arg("compile")
        .arg(&source_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .output()
        .map_err(PdfError::RendererIo)?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(PdfError::RendererExit { code, stderr });
    }

    let pdf = fs::read(&output_path).map_err(PdfError::ReadPdf)?;
    if pdf.is_empty() {
        return Err(PdfError::EmptyOutput);
    }
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_renderer_binary_is_io_error() {
        let result = render_pdf("definitely-not-a-real-renderer-binary", "#lorem(10)");
        assert!(matches!(result, Err(PdfError::RendererIo(_))));
    }

    #[test]
    fn test_failing_renderer_captures_stderr() {
        // `false` accepts any args and exits 1 with no output file.
        let result = render_pdf("false", "#lorem(10)");
        match result {
            Err(PdfError::RendererExit { code, .. }) => assert_eq!(code, 1),
            other => panic!("expected RendererExit, got {:?}", other),
        }
    }
}
