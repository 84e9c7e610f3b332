use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::submission::fields::ContactForm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    /// Stamp a validated form with a fresh time-ordered id and the intake time.
    pub fn new(form: ContactForm) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: form.name,
            email: form.email,
            message: form.message,
            timestamp: Utc::now(),
        }
    }
}
