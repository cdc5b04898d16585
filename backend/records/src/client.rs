use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::ValidClient;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Client {
    pub id: String,
    pub name_bn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub nid: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub district: String,
    pub upazila: String,
    pub address_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload as posted by the two-step client form.
///
/// Required fields default to empty strings so a missing field is reported
/// by validation instead of failing JSON extraction.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct NewClient {
    pub name_bn: String,
    pub name_en: Option<String>,
    pub nid: String,
    pub phone: String,
    pub email: Option<String>,
    pub district: String,
    pub upazila: String,
    pub address_details: String,
    pub notes: Option<String>,
}

impl Client {
    pub fn create(valid: ValidClient, now: DateTime<Utc>) -> Self {
        let ValidClient(input) = valid;

        Self {
            id: Uuid::new_v4().to_string(),
            name_bn: input.name_bn,
            name_en: input.name_en,
            nid: input.nid,
            phone: input.phone,
            email: input.email,
            district: input.district,
            upazila: input.upazila,
            address_details: input.address_details,
            notes: input.notes,
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}
