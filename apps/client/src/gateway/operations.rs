//! The operation table: every backend call the client makes, with its method, path,
//! latency class and response representation. Callers never pick a timeout; the
//! operation does.

use reqwest::Method;

use crate::models::jobs::JobId;

/// How long an operation is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatencyClass {
    /// CRUD, settings, practice.
    Standard,
    /// AI-backed work that may chain several LLM calls.
    Extended,
    /// Demo load/reset; no AI calls behind them.
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Resume,
    CoverLetter,
    InterviewPack,
    Package,
}

impl ExportKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ExportKind::Resume => "resume",
            ExportKind::CoverLetter => "cover-letter",
            ExportKind::InterviewPack => "interview-pack",
            ExportKind::Package => "package",
        }
    }

    /// File name the backend uses when it does not send a Content-Disposition.
    pub fn default_filename(&self, job_id: JobId) -> String {
        match self {
            ExportKind::Resume => format!("resume_{job_id}.pdf"),
            ExportKind::CoverLetter => format!("cover_letter_{job_id}.pdf"),
            ExportKind::InterviewPack => format!("interview_pack_{job_id}.pdf"),
            ExportKind::Package => format!("application_{job_id}.zip"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListJobs,
    GetJob(JobId),
    CreateJob,
    UpdateJob(JobId),
    DeleteJob(JobId),
    UploadResume,
    LatestResume,
    DemoResume,
    ClearResumes,
    ResumeVersions(JobId),
    OptimizeResume,
    AnalyzeJd,
    ScoreFit,
    GetAnalysis(JobId),
    GenerateCoverLetter,
    GetProfile,
    UpdateProfile,
    LoadDemo,
    ResetDemo,
    Export(ExportKind, JobId),
    GetRoadmap(JobId),
    GenerateRoadmap,
    PracticeQuestion,
    PracticeScore,
    PracticeSessions,
    CodingProblem,
    CodingReview,
}

/// Resolved HTTP shape of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: &'static str,
    pub method: Method,
    pub path: String,
    pub class: LatencyClass,
    pub response: ResponseKind,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListJobs => "list jobs",
            Operation::GetJob(_) => "get job",
            Operation::CreateJob => "create job",
            Operation::UpdateJob(_) => "update job",
            Operation::DeleteJob(_) => "delete job",
            Operation::UploadResume => "upload resume",
            Operation::LatestResume => "latest resume",
            Operation::DemoResume => "demo resume",
            Operation::ClearResumes => "clear resumes",
            Operation::ResumeVersions(_) => "resume versions",
            Operation::OptimizeResume => "optimize resume",
            Operation::AnalyzeJd => "analyze JD",
            Operation::ScoreFit => "score fit",
            Operation::GetAnalysis(_) => "get analysis",
            Operation::GenerateCoverLetter => "generate cover letter",
            Operation::GetProfile => "get profile",
            Operation::UpdateProfile => "update profile",
            Operation::LoadDemo => "demo load",
            Operation::ResetDemo => "demo reset",
            Operation::Export(..) => "export",
            Operation::GetRoadmap(_) => "get roadmap",
            Operation::GenerateRoadmap => "generate roadmap",
            Operation::PracticeQuestion => "practice question",
            Operation::PracticeScore => "practice score",
            Operation::PracticeSessions => "practice sessions",
            Operation::CodingProblem => "coding problem",
            Operation::CodingReview => "code review",
        }
    }

    pub fn route(&self) -> Route {
        use LatencyClass::{Extended, Fast, Standard};

        let (method, path, class) = match *self {
            Operation::ListJobs => (Method::GET, "/jobs".to_string(), Standard),
            Operation::GetJob(id) => (Method::GET, format!("/jobs/{id}"), Standard),
            Operation::CreateJob => (Method::POST, "/jobs".to_string(), Standard),
            Operation::UpdateJob(id) => (Method::PUT, format!("/jobs/{id}"), Standard),
            Operation::DeleteJob(id) => (Method::DELETE, format!("/jobs/{id}"), Standard),
            Operation::UploadResume => (Method::POST, "/resume/upload".to_string(), Extended),
            Operation::LatestResume => (Method::GET, "/resume/latest".to_string(), Standard),
            Operation::DemoResume => (Method::GET, "/resume/demo".to_string(), Standard),
            Operation::ClearResumes => (Method::POST, "/resume/clear".to_string(), Standard),
            Operation::ResumeVersions(job) => {
                (Method::GET, format!("/resume/versions/{job}"), Standard)
            }
            Operation::OptimizeResume => (Method::POST, "/resume/optimize".to_string(), Extended),
            Operation::AnalyzeJd => (Method::POST, "/analysis/jd".to_string(), Extended),
            Operation::ScoreFit => (Method::POST, "/analysis/score".to_string(), Extended),
            Operation::GetAnalysis(job) => (Method::GET, format!("/analysis/{job}"), Standard),
            Operation::GenerateCoverLetter => {
                (Method::POST, "/cover-letter/generate".to_string(), Extended)
            }
            Operation::GetProfile => (Method::GET, "/settings/profile".to_string(), Standard),
            Operation::UpdateProfile => (Method::PUT, "/settings/profile".to_string(), Standard),
            Operation::LoadDemo => (Method::POST, "/demo/load".to_string(), Fast),
            Operation::ResetDemo => (Method::POST, "/demo/reset".to_string(), Fast),
            Operation::Export(kind, job) => (
                Method::GET,
                format!("/exports/{}/{job}", kind.path_segment()),
                Standard,
            ),
            Operation::GetRoadmap(job) => (Method::GET, format!("/roadmap/{job}"), Standard),
            Operation::GenerateRoadmap => {
                (Method::POST, "/roadmap/generate".to_string(), Extended)
            }
            Operation::PracticeQuestion => {
                (Method::POST, "/practice/question".to_string(), Standard)
            }
            Operation::PracticeScore => (Method::POST, "/practice/score".to_string(), Standard),
            Operation::PracticeSessions => {
                (Method::GET, "/practice/sessions".to_string(), Standard)
            }
            Operation::CodingProblem => {
                (Method::POST, "/practice/coding/problem".to_string(), Standard)
            }
            Operation::CodingReview => {
                (Method::POST, "/practice/coding/review".to_string(), Standard)
            }
        };

        let response = match self {
            Operation::Export(..) => ResponseKind::Binary,
            _ => ResponseKind::Json,
        };

        Route {
            operation: self.name(),
            method,
            path,
            class,
            response,
        }
    }
}
