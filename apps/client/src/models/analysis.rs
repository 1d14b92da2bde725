use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::jobs::JobId;

pub const DEFAULT_COVER_LETTER_TONE: &str = "professional";
pub const DEFAULT_TIMELINE_WEEKS: u32 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeJdRequest<'a> {
    pub job_id: JobId,
    pub jd_text: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdAnalysis {
    pub jd_extract: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRef {
    pub job_id: JobId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitScore {
    pub score_breakdown: Value,
    #[serde(default)]
    pub evidence_map: Value,
}

/// Stored analysis for a job; fields fill in as the user runs each step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    #[serde(default)]
    pub jd_extract: Option<Value>,
    #[serde(default)]
    pub evidence_map: Option<Value>,
    #[serde(default)]
    pub score_breakdown: Option<Value>,
    #[serde(default)]
    pub rewrite_plan: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterRequest<'a> {
    pub job_id: JobId,
    pub tone: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    pub cover_letter: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapRequest {
    pub job_id: JobId,
    pub timeline_weeks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub roadmap: Option<Value>,
}
