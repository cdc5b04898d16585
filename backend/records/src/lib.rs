//! # Records
//!
//! Documents stored by the case desk and the payloads that create them.
//!
//! ## Collections
//! - users: login accounts, unique by username
//! - clients: unique by NID
//! - cases: unique by case number, each referencing one client
//! - audit_logs: append only, one entry per database login
//!
//! Timestamps serialize as RFC 3339 UTC, hearing and filing dates as `YYYY-MM-DD`.

pub mod audit;
pub mod case;
pub mod client;
pub mod seed;
pub mod user;
pub mod validate;

pub use audit::{AuditLog, ResourceType};
pub use case::{Case, CasePriority, CaseStatus, NewCase};
pub use client::{Client, ClientStatus, NewClient};
pub use user::{Profile, Role, User};
pub use validate::{FieldErrors, FormStep, ValidCase, ValidClient};
