use serde::{Deserialize, Serialize};

pub type JobId = i64;

/// Status a job starts in when the caller does not pick one.
pub const DEFAULT_STATUS: &str = "Saved";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Omitted by the list endpoint; present on `GET /jobs/{id}`.
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Job {
    pub fn is_demo(&self) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == "demo"))
            || self.title.contains("[Demo]")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_text: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial update. Only the fields that are set go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.link.is_none()
            && self.jd_text.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    pub id: JobId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoLoaded {
    pub job_id: JobId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoReset {
    pub deleted_jobs: u64,
    pub deleted_demo_resumes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_entry_without_jd_text_parses() {
        let list: JobList = serde_json::from_value(json!({
            "jobs": [{
                "id": 3,
                "title": "Backend Engineer",
                "company": null,
                "status": "Applied",
                "created_at": "2024-05-01 10:00:00"
            }]
        }))
        .unwrap();
        assert_eq!(list.jobs[0].id, 3);
        assert!(list.jobs[0].jd_text.is_none());
        assert!(list.jobs[0].tags.is_none());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = JobPatch {
            status: Some("Interviewing".to_string()),
            ..JobPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"status": "Interviewing"})
        );
        assert!(!patch.is_empty());
        assert!(JobPatch::default().is_empty());
    }

    #[test]
    fn test_demo_detection() {
        let mut job: Job = serde_json::from_value(json!({
            "id": 1, "title": "Software Engineer Intern [Demo]"
        }))
        .unwrap();
        assert!(job.is_demo());

        job.title = "Staff Engineer".to_string();
        assert!(!job.is_demo());
        job.tags = Some(vec!["demo".to_string()]);
        assert!(job.is_demo());
    }
}
