use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Lawyer,
    Assistant,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Lawyer => "lawyer",
            Role::Assistant => "assistant",
            Role::Admin => "admin",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public part of a user, returned by the login endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub email: String,
}

pub const DEMO_FULL_NAME: &str = "আইনজীবী প্রশাসক";
pub const DEMO_EMAIL: &str = "admin@lawem.com";

impl User {
    /// The default lawyer account created on first database login.
    pub fn default_admin(username: &str, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: DEMO_EMAIL.to_string(),
            password_hash,
            full_name: DEMO_FULL_NAME.to_string(),
            role: Role::Lawyer,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> Profile {
        Profile {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            email: self.email.clone(),
        }
    }

    pub fn touch_login(&mut self, now: DateTime<Utc>) {
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

impl Profile {
    pub fn demo(username: &str) -> Self {
        Self {
            username: username.to_string(),
            full_name: DEMO_FULL_NAME.to_string(),
            role: Role::Lawyer,
            email: DEMO_EMAIL.to_string(),
        }
    }
}
