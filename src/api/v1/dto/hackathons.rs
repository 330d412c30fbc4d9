/*
 * Responsibility
 * - Hackathons の request DTO と validate()
 */
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::hackathon::HackathonStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHackathonRequest {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl CreateHackathonRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 200 {
            return Err("name must be <= 200 chars");
        }
        if let Some(desc) = &self.description
            && desc.len() > 5000
        {
            return Err("description must be <= 5000 chars");
        }
        if self.ends_at <= self.starts_at {
            return Err("endsAt must be after startsAt");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: HackathonStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(name: &str, hours: i64) -> CreateHackathonRequest {
        let starts_at = Utc::now();
        CreateHackathonRequest {
            name: name.into(),
            description: None,
            starts_at,
            ends_at: starts_at + Duration::hours(hours),
        }
    }

    #[test]
    fn rejects_blank_name_and_inverted_window() {
        assert!(request("  ", 24).validate().is_err());
        assert!(request("Spring Jam", 0).validate().is_err());
        assert!(request("Spring Jam", -1).validate().is_err());
        assert!(request("Spring Jam", 48).validate().is_ok());
    }

    #[test]
    fn list_query_is_clamped() {
        let q = ListQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(q.limit(), 100);
        assert_eq!(q.offset(), 0);
    }
}
