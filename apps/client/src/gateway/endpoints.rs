//! Typed wrappers, one per backend operation.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;
use crate::gateway::{Download, ExportKind, Gateway, Operation, Payload};
use crate::models::analysis::{
    AnalyzeJdRequest, CoverLetter, CoverLetterRequest, FitScore, JdAnalysis, JobRef, Roadmap,
    RoadmapRequest, StoredAnalysis,
};
use crate::models::jobs::{DemoLoaded, DemoReset, Job, JobCreated, JobId, JobList, JobPatch, NewJob};
use crate::models::practice::{
    AnswerRequest, CodeReviewRequest, CodingProblemRequest, Difficulty, PracticeMode,
    PracticeSessions, QuestionRequest,
};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::resume::{
    OptimizeRequest, ResumeSource, ResumeVersions, ResumesCleared, UploadedResume,
};
use crate::models::Ack;

/// Multipart field the backend reads the resume from.
pub const UPLOAD_FIELD: &str = "file";

fn json_body<T: Serialize>(body: &T) -> Result<Payload, ClientError> {
    Ok(Payload::Json(serde_json::to_value(body)?))
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

impl Gateway {
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let list: JobList = self.json(Operation::ListJobs, Payload::Empty).await?;
        Ok(list.jobs)
    }

    pub async fn get_job(&self, id: JobId) -> Result<Job, ClientError> {
        self.json(Operation::GetJob(id), Payload::Empty).await
    }

    pub async fn create_job(&self, job: &NewJob) -> Result<JobCreated, ClientError> {
        self.json(Operation::CreateJob, json_body(job)?).await
    }

    pub async fn update_job(&self, id: JobId, patch: &JobPatch) -> Result<Ack, ClientError> {
        self.json(Operation::UpdateJob(id), json_body(patch)?).await
    }

    pub async fn delete_job(&self, id: JobId) -> Result<Ack, ClientError> {
        self.json(Operation::DeleteJob(id), Payload::Empty).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

impl Gateway {
    /// Reads `path` and uploads it as multipart content under `UPLOAD_FIELD`.
    pub async fn upload_resume(&self, path: &Path) -> Result<UploadedResume, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        self.upload_resume_bytes(file_name, bytes).await
    }

    pub async fn upload_resume_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadedResume, ClientError> {
        let mime = mime_for(&file_name);
        let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        self.json(Operation::UploadResume, Payload::Multipart(form)).await
    }

    pub async fn latest_resume(&self) -> Result<ResumeSource, ClientError> {
        self.json(Operation::LatestResume, Payload::Empty).await
    }

    pub async fn demo_resume(&self) -> Result<ResumeSource, ClientError> {
        self.json(Operation::DemoResume, Payload::Empty).await
    }

    pub async fn clear_resumes(&self) -> Result<ResumesCleared, ClientError> {
        self.json(Operation::ClearResumes, Payload::Empty).await
    }

    pub async fn resume_versions(&self, job_id: JobId) -> Result<ResumeVersions, ClientError> {
        self.json(Operation::ResumeVersions(job_id), Payload::Empty).await
    }

    pub async fn optimize_resume(
        &self,
        job_id: JobId,
        label: Option<&str>,
    ) -> Result<ResumeVersions, ClientError> {
        let body = OptimizeRequest { job_id, label };
        self.json(Operation::OptimizeResume, json_body(&body)?).await
    }

    /// Direct link to the rendered resume; opened by a browser, not fetched here.
    pub fn resume_view_url(&self) -> String {
        format!("{}/resume/view", self.base_url())
    }

    pub fn demo_resume_view_url(&self) -> String {
        format!("{}/resume/view-demo", self.base_url())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis, cover letter, roadmap
// ────────────────────────────────────────────────────────────────────────────

impl Gateway {
    pub async fn analyze_jd(
        &self,
        job_id: JobId,
        jd_text: &str,
    ) -> Result<JdAnalysis, ClientError> {
        let body = AnalyzeJdRequest { job_id, jd_text };
        self.json(Operation::AnalyzeJd, json_body(&body)?).await
    }

    pub async fn score_fit(&self, job_id: JobId) -> Result<FitScore, ClientError> {
        self.json(Operation::ScoreFit, json_body(&JobRef { job_id })?).await
    }

    pub async fn get_analysis(&self, job_id: JobId) -> Result<StoredAnalysis, ClientError> {
        self.json(Operation::GetAnalysis(job_id), Payload::Empty).await
    }

    pub async fn generate_cover_letter(
        &self,
        job_id: JobId,
        tone: &str,
    ) -> Result<CoverLetter, ClientError> {
        let body = CoverLetterRequest { job_id, tone };
        self.json(Operation::GenerateCoverLetter, json_body(&body)?).await
    }

    pub async fn get_roadmap(&self, job_id: JobId) -> Result<Roadmap, ClientError> {
        self.json(Operation::GetRoadmap(job_id), Payload::Empty).await
    }

    pub async fn generate_roadmap(
        &self,
        job_id: JobId,
        timeline_weeks: u32,
    ) -> Result<Roadmap, ClientError> {
        let body = RoadmapRequest {
            job_id,
            timeline_weeks,
        };
        self.json(Operation::GenerateRoadmap, json_body(&body)?).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Settings, demo, exports
// ────────────────────────────────────────────────────────────────────────────

impl Gateway {
    pub async fn get_profile(&self) -> Result<Profile, ClientError> {
        self.json(Operation::GetProfile, Payload::Empty).await
    }

    pub async fn update_profile(&self, profile: &Profile) -> Result<Ack, ClientError> {
        let body = ProfileUpdate::from(profile);
        self.json(Operation::UpdateProfile, json_body(&body)?).await
    }

    pub async fn load_demo(&self) -> Result<DemoLoaded, ClientError> {
        self.json(Operation::LoadDemo, Payload::Empty).await
    }

    pub async fn reset_demo(&self) -> Result<DemoReset, ClientError> {
        self.json(Operation::ResetDemo, Payload::Empty).await
    }

    /// Fetches an export as raw bytes. The body is never JSON-decoded.
    pub async fn export(&self, kind: ExportKind, job_id: JobId) -> Result<Download, ClientError> {
        let exchange = self
            .execute(Operation::Export(kind, job_id), Payload::Empty)
            .await?;
        Ok(Download::from_exchange(kind, job_id, exchange))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Practice
// ────────────────────────────────────────────────────────────────────────────

impl Gateway {
    pub async fn practice_question(
        &self,
        job_id: JobId,
        mode: PracticeMode,
        previous_questions: Option<&[String]>,
    ) -> Result<Value, ClientError> {
        let body = QuestionRequest {
            job_id,
            mode,
            previous_questions,
        };
        self.json(Operation::PracticeQuestion, json_body(&body)?).await
    }

    pub async fn score_answer(
        &self,
        job_id: JobId,
        question: &str,
        response: &str,
    ) -> Result<Value, ClientError> {
        let body = AnswerRequest {
            job_id,
            question,
            response,
        };
        self.json(Operation::PracticeScore, json_body(&body)?).await
    }

    pub async fn practice_sessions(&self) -> Result<PracticeSessions, ClientError> {
        self.json(Operation::PracticeSessions, Payload::Empty).await
    }

    pub async fn coding_problem(
        &self,
        job_id: JobId,
        difficulty: Difficulty,
    ) -> Result<Value, ClientError> {
        let body = CodingProblemRequest { job_id, difficulty };
        self.json(Operation::CodingProblem, json_body(&body)?).await
    }

    pub async fn review_code(
        &self,
        job_id: JobId,
        problem: &Value,
        code: &str,
        test_results: &Value,
    ) -> Result<Value, ClientError> {
        let body = CodeReviewRequest {
            job_id,
            problem,
            code,
            test_results,
        };
        self.json(Operation::CodingReview, json_body(&body)?).await
    }
}
