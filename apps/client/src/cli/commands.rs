use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::render::print_json;
use crate::cli::{
    AnalysisCommand, Command, DemoCommand, JobsCommand, PracticeCommand, ResumeCommand,
    RoadmapCommand, SettingsCommand,
};
use crate::confirm::ConfirmationRequest;
use crate::errors::ClientError;
use crate::gateway::ExportKind;
use crate::models::jobs::{JobId, JobPatch, NewJob};
use crate::state::Services;

const EXPORT_FALLBACK: &str = "Export failed. Make sure JD is analyzed and resume is available.";
const COVER_LETTER_FALLBACK: &str =
    "Could not generate cover letter. Make sure JD is analyzed and a resume is available.";

pub async fn run(command: Command, services: &Services) -> Result<()> {
    match command {
        Command::Jobs(cmd) => jobs(cmd, services).await,
        Command::Resume(cmd) => resume(cmd, services).await,
        Command::Analysis(cmd) => analysis(cmd, services).await,
        Command::CoverLetter { job_id, tone } => {
            let letter = services
                .gateway
                .generate_cover_letter(job_id, &tone)
                .await
                .map_err(|e| failed(services, "Generation failed", COVER_LETTER_FALLBACK, e))?;
            print_json(&letter);
            Ok(())
        }
        Command::Settings(cmd) => settings(cmd, services).await,
        Command::Demo(cmd) => demo(cmd, services).await,
        Command::Export { kind, job_id, out } => export(services, kind.into(), job_id, &out).await,
        Command::Roadmap(cmd) => roadmap(cmd, services).await,
        Command::Practice(cmd) => practice(cmd, services).await,
    }
}

/// Pushes an error notification and turns the failure into the command's error.
fn failed(services: &Services, title: &str, fallback: &str, err: ClientError) -> anyhow::Error {
    let message = err.user_message(fallback);
    services.notifications.error(title, message.clone());
    anyhow::Error::new(err).context(format!("{title}: {message}"))
}

async fn confirmed(services: &Services, request: ConfirmationRequest) -> bool {
    let accepted = services.confirmations.confirm(request).await;
    if !accepted {
        info!("Cancelled");
    }
    accepted
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path).await?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

async fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => Ok(Some(read_text(path).await?)),
        None => Ok(None),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

async fn jobs(cmd: JobsCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        JobsCommand::List => {
            let jobs = gateway
                .list_jobs()
                .await
                .map_err(|e| failed(services, "Load failed", "Could not load jobs.", e))?;
            print_json(&jobs);
        }
        JobsCommand::Get { id } => {
            let job = gateway
                .get_job(id)
                .await
                .map_err(|e| failed(services, "Load failed", "Could not load the job.", e))?;
            print_json(&job);
        }
        JobsCommand::Create {
            title,
            company,
            link,
            jd_file,
            status,
            tags,
        } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                services.notifications.error("Missing title", "Job title is required.");
                bail!("Job title is required");
            }
            let job = NewJob {
                title,
                company,
                link,
                jd_text: read_optional(jd_file.as_deref()).await?,
                status,
                tags: (!tags.is_empty()).then_some(tags),
            };
            let created = gateway.create_job(&job).await.map_err(|e| {
                failed(
                    services,
                    "Create failed",
                    "Could not create the job. Please try again.",
                    e,
                )
            })?;
            services.notifications.success("Job created", format!("Saved \"{}\".", job.title));
            print_json(&created);
        }
        JobsCommand::Update {
            id,
            title,
            company,
            link,
            jd_file,
            status,
            tags,
        } => {
            let patch = JobPatch {
                title,
                company,
                link,
                jd_text: read_optional(jd_file.as_deref()).await?,
                status,
                tags,
            };
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one field.");
            }
            let ack = gateway
                .update_job(id, &patch)
                .await
                .map_err(|e| failed(services, "Update failed", "Could not update the job.", e))?;
            services.notifications.success("Job updated", ack.message);
        }
        JobsCommand::Delete { id } => {
            let request = ConfirmationRequest::danger(
                "Delete job?",
                format!(
                    "Job {id} and everything generated for it will be deleted. \
                     This cannot be undone."
                ),
                "Delete",
            );
            if !confirmed(services, request).await {
                return Ok(());
            }
            let ack = gateway.delete_job(id).await.map_err(|e| {
                failed(
                    services,
                    "Delete failed",
                    "Could not delete the job. Please try again.",
                    e,
                )
            })?;
            services.notifications.success("Job deleted", ack.message);
        }
        JobsCommand::Clear => {
            let request = ConfirmationRequest::danger(
                "Delete all jobs?",
                "This will delete every job (including demo). This cannot be undone.",
                "Delete all",
            );
            if !confirmed(services, request).await {
                return Ok(());
            }
            let fail =
                |e: ClientError| failed(services, "Delete failed", "Failed to delete jobs.", e);
            let jobs = gateway.list_jobs().await.map_err(fail)?;
            for job in &jobs {
                gateway.delete_job(job.id).await.map_err(fail)?;
                debug!("Deleted job {}", job.id);
            }
            services.notifications.success("Jobs cleared", "All jobs were deleted.");
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

async fn resume(cmd: ResumeCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        ResumeCommand::Upload { path } => {
            let uploaded = gateway.upload_resume(&path).await.map_err(|e| {
                failed(
                    services,
                    "Upload failed",
                    "Could not upload your resume. Please try again.",
                    e,
                )
            })?;
            services.notifications.success(
                "Resume uploaded",
                format!("Stored as resume #{}.", uploaded.id),
            );
            print_json(&uploaded);
        }
        ResumeCommand::Latest => {
            let source = gateway
                .latest_resume()
                .await
                .map_err(|e| failed(services, "Load failed", "No resume found.", e))?;
            print_json(&source);
        }
        ResumeCommand::Demo => {
            let source = gateway
                .demo_resume()
                .await
                .map_err(|e| failed(services, "Load failed", "No demo resume found.", e))?;
            print_json(&source);
        }
        ResumeCommand::Clear => {
            let request = ConfirmationRequest::danger(
                "Clear resumes?",
                "This will remove all resumes (including demo resume). \
                 You can load demo again anytime.",
                "Clear",
            );
            if !confirmed(services, request).await {
                return Ok(());
            }
            let cleared = gateway
                .clear_resumes()
                .await
                .map_err(|e| failed(services, "Clear failed", "Failed to clear resumes.", e))?;
            services.notifications.success("Resumes cleared", "All resumes were removed.");
            print_json(&cleared);
        }
        ResumeCommand::Versions { job_id } => {
            let versions = gateway.resume_versions(job_id).await.map_err(|e| {
                failed(services, "Load failed", "Could not load resume versions.", e)
            })?;
            print_json(&versions);
        }
        ResumeCommand::Optimize { job_id, label } => {
            let versions = gateway
                .optimize_resume(job_id, label.as_deref())
                .await
                .map_err(|e| failed(services, "Optimize failed", "Failed to optimize resume.", e))?;
            services.notifications.success(
                "Optimized",
                "Saved an optimized resume version for this job.",
            );
            print_json(&versions);
        }
        ResumeCommand::ViewUrl { demo } => {
            let url = if demo {
                gateway.demo_resume_view_url()
            } else {
                gateway.resume_view_url()
            };
            println!("{url}");
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

async fn analysis(cmd: AnalysisCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        AnalysisCommand::Jd { job_id, jd_file } => {
            let jd_text = match jd_file {
                Some(path) => read_text(&path).await?,
                None => {
                    let job = gateway.get_job(job_id).await.map_err(|e| {
                        failed(services, "Analyze failed", "Could not load the job.", e)
                    })?;
                    job.jd_text.unwrap_or_default()
                }
            };
            if jd_text.trim().is_empty() {
                services.notifications.error(
                    "Missing job description",
                    "Add a job description before analyzing.",
                );
                bail!("Job {job_id} has no job description");
            }
            let analysis = gateway.analyze_jd(job_id, &jd_text).await.map_err(|e| {
                failed(
                    services,
                    "Analyze failed",
                    "Could not analyze the job description.",
                    e,
                )
            })?;
            services.notifications.success("Analyzed", "Job description analyzed.");
            print_json(&analysis);
        }
        AnalysisCommand::Score { job_id } => {
            let score = gateway.score_fit(job_id).await.map_err(|e| {
                failed(
                    services,
                    "Score failed",
                    "Failed to score fit. Make sure JD is analyzed and a resume is available.",
                    e,
                )
            })?;
            print_json(&score);
        }
        AnalysisCommand::Get { job_id } => {
            let stored = gateway
                .get_analysis(job_id)
                .await
                .map_err(|e| failed(services, "Load failed", "Could not load the analysis.", e))?;
            print_json(&stored);
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Settings, demo, exports, roadmap
// ────────────────────────────────────────────────────────────────────────────

async fn settings(cmd: SettingsCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    let mut profile = gateway
        .get_profile()
        .await
        .map_err(|e| failed(services, "Load failed", "Could not load your profile.", e))?;

    if let SettingsCommand::Set { fields } = cmd {
        for (key, value) in fields {
            profile.set(&key, value);
        }
        gateway.update_profile(&profile).await.map_err(|e| {
            failed(
                services,
                "Save failed",
                "Could not save your profile. Please try again.",
                e,
            )
        })?;
        services.notifications.success("Saved", "Profile updated.");
    }

    print_json(&profile);
    Ok(())
}

async fn demo(cmd: DemoCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        DemoCommand::Load => {
            let loaded = gateway
                .load_demo()
                .await
                .map_err(|e| failed(services, "Demo failed", "Failed to load demo.", e))?;
            services.notifications.success("Demo loaded", "Demo job + demo resume are ready.");
            print_json(&loaded);
        }
        DemoCommand::Reset => {
            let request = ConfirmationRequest::danger(
                "Reset demo?",
                "This removes the demo job and demo resume. You can load demo again anytime.",
                "Reset",
            );
            if !confirmed(services, request).await {
                return Ok(());
            }
            let reset = gateway
                .reset_demo()
                .await
                .map_err(|e| failed(services, "Reset failed", "Failed to reset demo.", e))?;
            services.notifications.success("Demo reset", "Demo job + demo resume removed.");
            print_json(&reset);
        }
    }
    Ok(())
}

async fn export(services: &Services, kind: ExportKind, job_id: JobId, out: &Path) -> Result<()> {
    let download = services
        .gateway
        .export(kind, job_id)
        .await
        .map_err(|e| failed(services, "Export failed", EXPORT_FALLBACK, e))?;

    let dir = out.to_path_buf();
    let path = tokio::task::spawn_blocking(move || download.save_in(&dir))
        .await
        .context("Export writer task failed")?
        .map_err(|e| failed(services, "Export failed", "Could not write the file.", e))?;

    services.notifications.success("Download started", format!("Saved {}.", path.display()));
    println!("{}", path.display());
    Ok(())
}

async fn roadmap(cmd: RoadmapCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        RoadmapCommand::Get { job_id } => {
            let roadmap = gateway
                .get_roadmap(job_id)
                .await
                .map_err(|e| failed(services, "Load failed", "Could not load the roadmap.", e))?;
            print_json(&roadmap);
        }
        RoadmapCommand::Generate { job_id, weeks } => {
            let roadmap = gateway
                .generate_roadmap(job_id, weeks)
                .await
                .map_err(|e| failed(services, "Roadmap failed", "Failed to generate roadmap.", e))?;
            services.notifications.success(
                "Roadmap ready",
                format!("Generated a {weeks}-week roadmap."),
            );
            print_json(&roadmap);
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Practice
// ────────────────────────────────────────────────────────────────────────────

async fn practice(cmd: PracticeCommand, services: &Services) -> Result<()> {
    let gateway = &services.gateway;
    match cmd {
        PracticeCommand::Question {
            job_id,
            mode,
            previous,
        } => {
            let previous = (!previous.is_empty()).then_some(previous.as_slice());
            let question = gateway
                .practice_question(job_id, mode, previous)
                .await
                .map_err(|e| {
                    failed(
                        services,
                        "Generate failed",
                        "Failed to generate question. Make sure JD is analyzed.",
                        e,
                    )
                })?;
            print_json(&question);
        }
        PracticeCommand::Score {
            job_id,
            question,
            answer,
        } => {
            let scored = gateway
                .score_answer(job_id, &question, &answer)
                .await
                .map_err(|e| failed(services, "Scoring failed", "Failed to score response.", e))?;
            print_json(&scored);
        }
        PracticeCommand::Sessions => {
            let sessions = gateway.practice_sessions().await.map_err(|e| {
                failed(services, "Load failed", "Could not load practice sessions.", e)
            })?;
            print_json(&sessions);
        }
        PracticeCommand::CodingProblem { job_id, difficulty } => {
            let problem = gateway
                .coding_problem(job_id, difficulty)
                .await
                .map_err(|e| {
                    failed(
                        services,
                        "Generate failed",
                        "Failed to generate problem. Make sure JD is analyzed.",
                        e,
                    )
                })?;
            print_json(&problem);
        }
        PracticeCommand::CodingReview {
            job_id,
            problem_file,
            code_file,
            results_file,
        } => {
            let problem: Value = read_json(&problem_file).await?;
            let code = read_text(&code_file).await?;
            // No local runner: results default to an empty object.
            let results = match results_file {
                Some(path) => read_json(&path).await?,
                None => Value::Object(Default::default()),
            };
            let review = gateway
                .review_code(job_id, &problem, &code, &results)
                .await
                .map_err(|e| failed(services, "Review failed", "Failed to review code.", e))?;
            print_json(&review);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{ConfirmPresenter, ConfirmationBroker, Decision};
    use crate::gateway::testing::{gateway, serve};
    use crate::gateway::TimeoutPolicy;
    use crate::notify::{NotificationKind, NotificationQueue};
    use async_trait::async_trait;
    use axum::{
        http::StatusCode,
        routing::{delete, get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct Always(Decision);

    #[async_trait]
    impl ConfirmPresenter for Always {
        async fn present(&self, _request: &ConfirmationRequest) -> Decision {
            self.0
        }
    }

    async fn services(router: Router, decision: Decision) -> Services {
        let base = serve(router).await;
        let (gw, _) = gateway(&base, TimeoutPolicy::default());
        Services {
            gateway: gw,
            notifications: NotificationQueue::new(),
            confirmations: ConfirmationBroker::spawn(Arc::new(Always(decision))),
        }
    }

    fn delete_route(hits: Arc<AtomicUsize>, status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/api/jobs/:id",
            delete(move || {
                let hits = hits.clone();
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                }
            }),
        )
    }

    fn toasts(services: &Services) -> Vec<(NotificationKind, String, String)> {
        services
            .notifications
            .visible()
            .into_iter()
            .map(|n| (n.kind, n.title.unwrap_or_default(), n.message))
            .collect()
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_backend_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = delete_route(hits.clone(), StatusCode::OK, json!({"message": "Job deleted"}));
        let services = services(router, Decision::Cancelled).await;

        run(Command::Jobs(JobsCommand::Delete { id: 7 }), &services)
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(toasts(&services).is_empty());
    }

    #[tokio::test]
    async fn test_dismissed_delete_counts_as_no() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = delete_route(hits.clone(), StatusCode::OK, json!({"message": "Job deleted"}));
        let services = services(router, Decision::Dismissed).await;

        run(Command::Jobs(JobsCommand::Delete { id: 7 }), &services)
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_confirmed_delete_calls_backend_and_notifies() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = delete_route(hits.clone(), StatusCode::OK, json!({"message": "Job deleted"}));
        let services = services(router, Decision::Confirmed).await;

        run(Command::Jobs(JobsCommand::Delete { id: 7 }), &services)
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(
            toasts(&services),
            vec![(
                NotificationKind::Success,
                "Job deleted".to_string(),
                "Job deleted".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_shows_backend_detail() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = delete_route(
            hits.clone(),
            StatusCode::NOT_FOUND,
            json!({"detail": "Job not found"}),
        );
        let services = services(router, Decision::Confirmed).await;

        let err = run(Command::Jobs(JobsCommand::Delete { id: 99 }), &services)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Delete failed"));
        assert_eq!(
            toasts(&services),
            vec![(
                NotificationKind::Error,
                "Delete failed".to_string(),
                "Job not found".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_clear_jobs_deletes_each_listed_job() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = delete_route(hits.clone(), StatusCode::OK, json!({"message": "ok"})).route(
            "/api/jobs",
            get(|| async {
                Json(json!({"jobs": [
                    {"id": 1, "title": "[Demo] Backend Engineer", "tags": ["demo"]},
                    {"id": 2, "title": "Data Engineer"}
                ]}))
            }),
        );
        let services = services(router, Decision::Confirmed).await;

        run(Command::Jobs(JobsCommand::Clear), &services)
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(toasts(&services)[0].1, "Jobs cleared");
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected_before_any_call() {
        let services = services(Router::new(), Decision::Confirmed).await;

        let result = run(
            Command::Jobs(JobsCommand::Create {
                title: "   ".to_string(),
                company: None,
                link: None,
                jd_file: None,
                status: "Saved".to_string(),
                tags: vec![],
            }),
            &services,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            toasts(&services),
            vec![(
                NotificationKind::Error,
                "Missing title".to_string(),
                "Job title is required.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_analyze_uses_stored_job_description() {
        let captured = Arc::new(Mutex::new(None::<Value>));
        let sink = captured.clone();
        let router = Router::new()
            .route(
                "/api/jobs/:id",
                get(|| async {
                    Json(json!({"id": 3, "title": "SRE", "jd_text": "Run Kubernetes at scale."}))
                }),
            )
            .route(
                "/api/analysis/jd",
                post(move |Json(body): Json<Value>| {
                    let sink = sink.clone();
                    async move {
                        *sink.lock().unwrap() = Some(body);
                        Json(json!({"jd_extract": {"skills": ["kubernetes"]}}))
                    }
                }),
            );
        let services = services(router, Decision::Confirmed).await;

        run(
            Command::Analysis(AnalysisCommand::Jd {
                job_id: 3,
                jd_file: None,
            }),
            &services,
        )
        .await
        .unwrap();

        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body, json!({"job_id": 3, "jd_text": "Run Kubernetes at scale."}));
    }

    #[tokio::test]
    async fn test_analyze_without_description_skips_backend() {
        let analyzed = Arc::new(AtomicUsize::new(0));
        let counter = analyzed.clone();
        let router = Router::new()
            .route(
                "/api/jobs/:id",
                get(|| async { Json(json!({"id": 3, "title": "SRE"})) }),
            )
            .route(
                "/api/analysis/jd",
                post(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"jd_extract": {}}))
                    }
                }),
            );
        let services = services(router, Decision::Confirmed).await;

        let result = run(
            Command::Analysis(AnalysisCommand::Jd {
                job_id: 3,
                jd_file: None,
            }),
            &services,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(analyzed.load(Ordering::SeqCst), 0);
        assert_eq!(toasts(&services)[0].1, "Missing job description");
    }

    #[tokio::test]
    async fn test_settings_set_keeps_untouched_fields() {
        let captured = Arc::new(Mutex::new(None::<Value>));
        let sink = captured.clone();
        let router = Router::new().route(
            "/api/settings/profile",
            get(|| async {
                Json(json!({
                    "id": 1,
                    "name": "Ada",
                    "email": "ada@old.example",
                    "other_platforms_json": "{\"kaggle\": \"ada\"}"
                }))
            })
            .put(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({"message": "Profile updated"}))
                }
            }),
        );
        let services = services(router, Decision::Confirmed).await;

        run(
            Command::Settings(SettingsCommand::Set {
                fields: vec![("email".to_string(), "ada@new.example".to_string())],
            }),
            &services,
        )
        .await
        .unwrap();

        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["email"], "ada@new.example");
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["other_platforms_json"], "{\"kaggle\": \"ada\"}");
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_export_saves_file_and_notifies() {
        let router = Router::new().route(
            "/api/exports/cover-letter/:job_id",
            get(|| async { ([("content-type", "application/pdf")], &b"%PDF-1.4 letter"[..]) }),
        );
        let services = services(router, Decision::Confirmed).await;
        let dir = tempfile::tempdir().unwrap();

        run(
            Command::Export {
                kind: crate::cli::ExportArg::CoverLetter,
                job_id: 5,
                out: dir.path().to_path_buf(),
            },
            &services,
        )
        .await
        .unwrap();

        let saved = std::fs::read(dir.path().join("cover_letter_5.pdf")).unwrap();
        assert_eq!(saved, b"%PDF-1.4 letter");
        assert_eq!(toasts(&services)[0].1, "Download started");
    }

    #[tokio::test]
    async fn test_export_failure_uses_export_fallback() {
        let router = Router::new().route(
            "/api/exports/resume/:job_id",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let services = services(router, Decision::Confirmed).await;
        let dir = tempfile::tempdir().unwrap();

        let result = run(
            Command::Export {
                kind: crate::cli::ExportArg::Resume,
                job_id: 5,
                out: dir.path().to_path_buf(),
            },
            &services,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            toasts(&services),
            vec![(
                NotificationKind::Error,
                "Export failed".to_string(),
                EXPORT_FALLBACK.to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_declined_demo_reset_keeps_demo() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/demo/reset",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"deleted_jobs": 1, "deleted_demo_resumes": 1}))
                }
            }),
        );
        let services = services(router, Decision::Cancelled).await;

        run(Command::Demo(DemoCommand::Reset), &services)
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
