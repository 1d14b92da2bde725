#![allow(dead_code)]

pub mod analysis;
pub mod jobs;
pub mod practice;
pub mod profile;
pub mod resume;

use serde::{Deserialize, Serialize};

/// `{"message": "..."}` acknowledgement returned by most write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}
