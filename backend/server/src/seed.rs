use records::seed::{sample_cases, sample_clients};
use serde::Serialize;
use tracing::info;

use crate::store::{Collection, Repository, StoreError};

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub cases: usize,
}

/// Replaces every client and case with the sample fixtures.
pub async fn seed_database(repository: &Repository) -> Result<SeedSummary, StoreError> {
    repository.clear(Collection::Clients).await?;
    repository.clear(Collection::Cases).await?;

    let clients = sample_clients();
    let cases = sample_cases(&clients);

    for client in &clients {
        repository.insert_unique(client).await?;
    }

    for case in &cases {
        repository.insert_unique(case).await?;
    }

    info!("Inserted {} clients and {} cases", clients.len(), cases.len());

    Ok(SeedSummary {
        clients: clients.len(),
        cases: cases.len(),
    })
}
