use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{validation_error, Error};

/// A named group owning a list of saved routes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: &str, start_time: &str, end_time: &str) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() || start_time.is_empty() || end_time.is_empty() {
            return Err(validation_error(
                "name, start time and end time are required",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            created_at: Utc::now(),
        })
    }
}
