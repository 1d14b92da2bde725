use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::jobs::JobId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedResume {
    pub id: i64,
    #[serde(default)]
    pub parsed: Value,
}

/// Stored resume row from `GET /resume/latest` or `/resume/demo` (404 when absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSource {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub parsed: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeVersions {
    #[serde(default)]
    pub resume_versions: Vec<Value>,
    #[serde(default)]
    pub latest: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumesCleared {
    pub deleted: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRequest<'a> {
    pub job_id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
}
