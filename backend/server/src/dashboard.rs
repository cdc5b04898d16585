//! # Dashboard Stats
//!
//! Six counters for the dashboard home cards.
//!
//! - Active clients: status `active`
//! - Active cases: status `pending` or `active`
//! - Upcoming hearings: next hearing within the coming 7 days, today included
//! - Pending documents: documents are not stored yet, always falls back
//!
//! Totals come from the store's counts. The collections are only listed
//! when one of them holds something.
//!
//! A counter that comes back zero shows its demo value instead, and an
//! unreachable store shows the demo values for every card.
use chrono::NaiveDate;
use records::{Case, Client};
use serde::Serialize;

use crate::store::{Collection, Repository, StoreError};

const HEARING_WINDOW_DAYS: i64 = 7;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_cases: usize,
    pub active_cases: usize,
    pub upcoming_hearings: usize,
    pub pending_documents: usize,
}

pub const DEMO_STATS: DashboardStats = DashboardStats {
    total_clients: 45,
    active_clients: 38,
    total_cases: 62,
    active_cases: 24,
    upcoming_hearings: 8,
    pending_documents: 12,
};

fn or_demo(count: usize, demo: usize) -> usize {
    if count == 0 { demo } else { count }
}

impl DashboardStats {
    pub fn aggregate(clients: &[Client], cases: &[Case], today: NaiveDate) -> Self {
        Self {
            total_clients: clients.len(),
            active_clients: clients.iter().filter(|c| c.is_active()).count(),
            total_cases: cases.len(),
            active_cases: cases.iter().filter(|c| c.status.is_open()).count(),
            upcoming_hearings: cases
                .iter()
                .filter(|c| c.hearing_within(today, HEARING_WINDOW_DAYS))
                .count(),
            pending_documents: 0,
        }
    }

    pub fn or_demo(self) -> Self {
        Self {
            total_clients: or_demo(self.total_clients, DEMO_STATS.total_clients),
            active_clients: or_demo(self.active_clients, DEMO_STATS.active_clients),
            total_cases: or_demo(self.total_cases, DEMO_STATS.total_cases),
            active_cases: or_demo(self.active_cases, DEMO_STATS.active_cases),
            upcoming_hearings: or_demo(self.upcoming_hearings, DEMO_STATS.upcoming_hearings),
            pending_documents: or_demo(self.pending_documents, DEMO_STATS.pending_documents),
        }
    }
}

pub async fn collect(repository: &Repository, today: NaiveDate) -> Result<DashboardStats, StoreError> {
    let (total_clients, total_cases) = tokio::try_join!(
        repository.count(Collection::Clients),
        repository.count(Collection::Cases)
    )?;

    if total_clients == 0 && total_cases == 0 {
        return Ok(DEMO_STATS);
    }

    let (clients, cases) = tokio::try_join!(repository.list::<Client>(), repository.list::<Case>())?;

    let stats = DashboardStats {
        total_clients,
        total_cases,
        ..DashboardStats::aggregate(&clients, &cases, today)
    };

    Ok(stats.or_demo())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use records::{
        ClientStatus,
        seed::{sample_cases, sample_clients},
    };

    use super::*;
    use crate::store::{DocumentStore, MemoryStore, OfflineStore};

    /// Reports empty collections and fails everything else.
    struct CountsOnly;

    #[async_trait]
    impl DocumentStore for CountsOnly {
        async fn insert_if_absent(
            &self,
            _: Collection,
            _: &str,
            _: &str,
            _: String,
        ) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("read only".to_string()))
        }

        async fn replace(&self, _: Collection, _: &str, _: &str, _: String) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read only".to_string()))
        }

        async fn find_by_key(&self, _: Collection, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("counts only".to_string()))
        }

        async fn find_by_id(&self, _: Collection, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("counts only".to_string()))
        }

        async fn list(&self, _: Collection) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("counts only".to_string()))
        }

        async fn count(&self, _: Collection) -> Result<usize, StoreError> {
            Ok(0)
        }

        async fn clear(&self, _: Collection) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read only".to_string()))
        }
    }

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn test_aggregate_sample_data() {
        let mut clients = sample_clients();
        clients[4].status = ClientStatus::Inactive;
        let cases = sample_cases(&clients);

        let stats = DashboardStats::aggregate(&clients, &cases, day(3, 10));

        assert_eq!(stats.total_clients, 5);
        assert_eq!(stats.active_clients, 4);
        assert_eq!(stats.total_cases, 6);
        // CC-001, CR-002, FC-003, BC-005
        assert_eq!(stats.active_cases, 4);
        // 03-10, 03-15 are inside, 03-20 and 03-25 are not
        assert_eq!(stats.upcoming_hearings, 2);
        assert_eq!(stats.pending_documents, 0);
    }

    #[test]
    fn test_zero_counts_take_demo_values() {
        let stats = DashboardStats::aggregate(&[], &[], day(3, 10)).or_demo();

        assert_eq!(stats, DEMO_STATS);
    }

    #[test]
    fn test_nonzero_counts_are_kept() {
        let clients = sample_clients();
        let stats = DashboardStats::aggregate(&clients, &[], day(3, 10)).or_demo();

        assert_eq!(stats.total_clients, 5);
        assert_eq!(stats.total_cases, DEMO_STATS.total_cases);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(DEMO_STATS).unwrap();

        assert_eq!(json["totalClients"], 45);
        assert_eq!(json["upcomingHearings"], 8);
        assert_eq!(json["pendingDocuments"], 12);
    }

    #[tokio::test]
    async fn test_collect_from_store() {
        let repository = Repository::new(Arc::new(MemoryStore::new()));
        let clients = sample_clients();
        for client in &clients {
            repository.insert_unique(client).await.unwrap();
        }
        for case in sample_cases(&clients) {
            repository.insert_unique(&case).await.unwrap();
        }

        let stats = collect(&repository, day(3, 18)).await.unwrap();

        assert_eq!(stats.total_clients, 5);
        assert_eq!(stats.active_clients, 5);
        // 03-20 and 03-25
        assert_eq!(stats.upcoming_hearings, 2);
        assert_eq!(stats.pending_documents, DEMO_STATS.pending_documents);
    }

    #[tokio::test]
    async fn test_empty_store_is_counted_not_listed() {
        let repository = Repository::new(Arc::new(CountsOnly));

        assert_eq!(collect(&repository, day(3, 10)).await.unwrap(), DEMO_STATS);
    }

    #[tokio::test]
    async fn test_collect_propagates_store_errors() {
        let repository = Repository::new(Arc::new(OfflineStore::new("down")));

        assert!(collect(&repository, day(3, 10)).await.is_err());
    }
}
