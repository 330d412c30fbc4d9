//! Hackathon entities as they are stored and shown to clients.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HackathonStatus {
    Draft,
    Open,
    Judging,
    Published,
}

impl HackathonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HackathonStatus::Draft => "draft",
            HackathonStatus::Open => "open",
            HackathonStatus::Judging => "judging",
            HackathonStatus::Published => "published",
        }
    }

    /// The only status this one may move to. `Published` is terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            HackathonStatus::Draft => Some(HackathonStatus::Open),
            HackathonStatus::Open => Some(HackathonStatus::Judging),
            HackathonStatus::Judging => Some(HackathonStatus::Published),
            HackathonStatus::Published => None,
        }
    }

    /// Forward by exactly one step; no skipping, no going back.
    pub fn can_advance_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    pub fn accepts_scores(self) -> bool {
        self == HackathonStatus::Judging
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hackathon status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for HackathonStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "judging" => Ok(Self::Judging),
            "published" => Ok(Self::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: HackathonStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub hackathon_id: i64,
    pub team_id: i64,
    pub title: String,
    pub repo_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// A weighted axis judges score submissions on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgingCriterion {
    pub id: i64,
    pub hackathon_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub max_score: i32,
}

/// One judge's value for one criterion of one submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub submission_id: i64,
    pub judge_id: Uuid,
    pub criterion_id: i64,
    pub value: i32,
    pub comment: Option<String>,
}
