use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

use crate::validate::ValidCase;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Active,
    Closed,
    Won,
    Lost,
}

impl CaseStatus {
    /// Pending and active cases are still on the practitioner's desk.
    pub fn is_open(self) -> bool {
        matches!(self, CaseStatus::Pending | CaseStatus::Active)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CasePriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for CaseStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CaseStatus::Pending),
            "active" => Ok(CaseStatus::Active),
            "closed" => Ok(CaseStatus::Closed),
            "won" => Ok(CaseStatus::Won),
            "lost" => Ok(CaseStatus::Lost),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for CasePriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(CasePriority::Low),
            "medium" => Ok(CasePriority::Medium),
            "high" => Ok(CasePriority::High),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Case {
    pub id: String,
    pub case_number: String,
    pub title_bn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub client_id: String,
    pub client_name: String,
    pub case_type: String,
    pub status: CaseStatus,
    pub priority: CasePriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hearing: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for `POST /api/cases`.
///
/// `status` and `priority` stay strings here; they are parsed during
/// validation so bad values come back as field errors.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct NewCase {
    pub case_number: String,
    pub title_bn: String,
    pub title_en: Option<String>,
    pub client_id: String,
    pub client_name: Option<String>,
    pub case_type: String,
    pub status: String,
    pub priority: String,
    pub court_name: Option<String>,
    #[serde(deserialize_with = "blank_date")]
    pub filing_date: Option<NaiveDate>,
    #[serde(alias = "next_hearing_date", deserialize_with = "blank_date")]
    pub next_hearing: Option<NaiveDate>,
    pub description: Option<String>,
}

/// The case form posts untouched date inputs as `""`.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(date) if !date.trim().is_empty() => {
            date.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

impl Case {
    pub fn create(valid: ValidCase, client_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            case_number: valid.case_number,
            title_bn: valid.title_bn,
            title_en: valid.title_en,
            client_id: valid.client_id,
            client_name,
            case_type: valid.case_type,
            status: valid.status,
            priority: valid.priority,
            court_name: valid.court_name,
            filing_date: valid.filing_date,
            next_hearing: valid.next_hearing,
            description: valid.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the next hearing falls within `days` days from `today`, inclusive.
    pub fn hearing_within(&self, today: NaiveDate, days: i64) -> bool {
        match self.next_hearing {
            Some(date) => date >= today && date <= today + chrono::Duration::days(days),
            None => false,
        }
    }
}
