use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::jobs::JobId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    #[default]
    #[value(alias = "behavioral")]
    Behavioural,
    Technical,
    Mock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest<'a> {
    pub job_id: JobId,
    pub mode: PracticeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_questions: Option<&'a [String]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest<'a> {
    pub job_id: JobId,
    pub question: &'a str,
    pub response: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodingProblemRequest {
    pub job_id: JobId,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeReviewRequest<'a> {
    pub job_id: JobId,
    pub problem: &'a Value,
    pub code: &'a str,
    pub test_results: &'a Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSessions {
    #[serde(default)]
    pub sessions: Vec<Value>,
}
