use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use tempfile::NamedTempFile;

use crate::errors::ClientError;
use crate::gateway::{Exchange, ExportKind};
use crate::models::jobs::JobId;

/// Raw bytes of an exported document, exactly as the backend sent them.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Download {
    pub(crate) fn from_exchange(kind: ExportKind, job_id: JobId, exchange: Exchange) -> Self {
        let filename = exchange
            .headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| kind.default_filename(job_id));
        let content_type = exchange
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            filename,
            content_type,
            bytes: exchange.body,
        }
    }

    /// Writes the file into `dir` under its own name and returns the final path.
    ///
    /// Bytes are staged in a temporary file next to the target and renamed into place,
    /// so a failed write never leaves a half-written export behind. The staging file is
    /// removed on every error path when it drops.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ClientError> {
        let target = dir.join(&self.filename);
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&self.bytes)?;
        staged.flush()?;
        staged.persist(&target).map_err(|e| ClientError::Io(e.error))?;
        Ok(target)
    }
}

/// Pulls `filename="..."` out of a Content-Disposition header.
/// Only the final path component is kept.
fn filename_from_disposition(header: &str) -> Option<String> {
    let raw = header.split(';').map(str::trim).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("filename")
            .then(|| value.trim().trim_matches('"'))
    })?;

    let name = Path::new(raw).file_name()?.to_str()?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{gateway, serve};
    use crate::gateway::TimeoutPolicy;
    use axum::{
        http::{header, HeaderMap as AxumHeaders},
        routing::get,
        Router,
    };

    const PDF: &[u8] = b"%PDF-1.4\n\xff\xfe\x00binary\n%%EOF";

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="resume_4.pdf""#).as_deref(),
            Some("resume_4.pdf")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=application_4.zip").as_deref(),
            Some("application_4.zip")
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="../../etc/passwd""#).as_deref(),
            Some("passwd")
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }

    #[test]
    fn test_save_in_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            filename: "cover_letter_2.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(PDF),
        };

        let path = download.save_in(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("cover_letter_2.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), PDF);
        // Only the final file remains; the staging file was renamed away.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_in_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            filename: "resume_1.pdf".to_string(),
            content_type: None,
            bytes: Bytes::from_static(PDF),
        };
        let err = download.save_in(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[tokio::test]
    async fn test_export_requests_binary_and_keeps_raw_bytes() {
        let router = Router::new().route(
            "/api/exports/resume/:job_id",
            get(|headers: AxumHeaders| async move {
                let accept = headers
                    .get(header::ACCEPT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                assert!(accept.contains("application/octet-stream"), "accept: {accept}");
                (
                    [
                        (header::CONTENT_TYPE, "application/pdf"),
                        (
                            header::CONTENT_DISPOSITION,
                            r#"attachment; filename="resume_4.pdf""#,
                        ),
                    ],
                    PDF,
                )
            }),
        );
        let base = serve(router).await;
        let (gw, _) = gateway(&base, TimeoutPolicy::default());

        let download = gw.export(ExportKind::Resume, 4).await.unwrap();
        assert_eq!(download.filename, "resume_4.pdf");
        assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(&download.bytes[..], PDF);
    }

    #[tokio::test]
    async fn test_export_without_disposition_uses_backend_naming() {
        let router = Router::new().route(
            "/api/exports/package/:job_id",
            get(|| async { ([(header::CONTENT_TYPE, "application/zip")], &b"PK\x03\x04"[..]) }),
        );
        let base = serve(router).await;
        let (gw, _) = gateway(&base, TimeoutPolicy::default());

        let download = gw.export(ExportKind::Package, 8).await.unwrap();
        assert_eq!(download.filename, "application_8.zip");
        assert_eq!(&download.bytes[..], b"PK\x03\x04");
    }
}
