use tokio::fs;
use tokio::process::Command;
use uuid::Uuid;

pub struct ExtractService;

impl ExtractService {
    /// Best-effort text extraction. Malformed or image-only PDFs yield an
    /// empty string, which the caller treats as contributing nothing to the
    /// generation context.
    pub async fn extract_pdf_text(data: &[u8]) -> String {
        let tmp_path = format!("/tmp/quiz_upload_{}.pdf", Uuid::new_v4());
        if let Err(e) = fs::write(&tmp_path, data).await {
            tracing::error!("Failed to write temp PDF {}: {}", tmp_path, e);
            return String::new();
        }

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(&tmp_path)
            .arg("-")
            .output()
            .await;

        let text = match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).to_string(),
            Ok(out) => {
                tracing::warn!(
                    "pdftotext failed: {}",
                    String::from_utf8_lossy(&out.stderr)
                );
                String::new()
            }
            Err(e) => {
                tracing::error!("Failed to run pdftotext: {}", e);
                String::new()
            }
        };

        let _ = fs::remove_file(&tmp_path).await;
        text
    }
}
