mod auth;
mod cases;
mod clients;
mod dashboard;
mod seed;

pub use auth::{LoginRequest, LoginResponse, login, login_handler};
pub use cases::{create_case_handler, list_cases_handler};
pub use clients::{create_client_handler, list_clients_handler, validate_client_handler};
pub use dashboard::stats_handler;
pub use seed::seed_handler;

pub async fn health_handler() -> &'static str {
    "ok"
}
