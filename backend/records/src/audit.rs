use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Client,
    Case,
    Document,
    User,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: Value,
}

impl AuditLog {
    pub fn login(
        user_id: &str,
        ip_address: String,
        user_agent: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            action: "login".to_string(),
            resource_type: ResourceType::User,
            resource_id: user_id.to_string(),
            ip_address,
            user_agent,
            timestamp,
            details: serde_json::json!({ "success": true }),
        }
    }
}
