//! Business logic services
//!
//! Each operation owns one store scope: it opens a transaction (or checks out
//! a connection for reads), passes it to the per-table repositories and
//! commits on success. Any early return drops the transaction, which rolls
//! it back.

pub mod catalog;
pub mod loans;
pub mod members;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub members: members::MembersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            members: members::MembersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip to the store, used by the readiness probe
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
