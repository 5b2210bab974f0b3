//! Employer dashboard aggregation

use std::sync::Arc;

use crate::domain::{DomainResult, LeadStatus, RepositoryProvider};

/// Lead counts by status over the entire store, plus their sum.
///
/// Each count is exact at the moment it is taken; the three are not taken
/// under one transaction, which is acceptable for operational reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadStats {
    pub in_progress: u64,
    pub completed: u64,
    pub canceled: u64,
    pub total: u64,
}

pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Count leads per status. The three queries are independent and
    /// read-only, so they run concurrently.
    pub async fn lead_stats(&self) -> DomainResult<LeadStats> {
        let leads = self.repos.leads();
        let (in_progress, completed, canceled) = tokio::try_join!(
            leads.count_by_status(LeadStatus::InProgress),
            leads.count_by_status(LeadStatus::Completed),
            leads.count_by_status(LeadStatus::Canceled),
        )?;

        Ok(LeadStats {
            in_progress,
            completed,
            canceled,
            total: in_progress + completed + canceled,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{lead_for, InMemoryStore};

    #[tokio::test]
    async fn counts_group_by_status_and_sum() {
        let store = InMemoryStore::new();
        let mut a = lead_for("l1", "m1");
        a.status = LeadStatus::InProgress;
        let mut b = lead_for("l2", "m1");
        b.status = LeadStatus::InProgress;
        let mut c = lead_for("l3", "m2");
        c.status = LeadStatus::Completed;
        for lead in [a, b, c] {
            store.seed_lead(lead);
        }

        let stats = DashboardService::new(store).lead_stats().await.unwrap();
        assert_eq!(
            stats,
            LeadStats {
                in_progress: 2,
                completed: 1,
                canceled: 0,
                total: 3,
            }
        );
    }

    #[tokio::test]
    async fn empty_store_yields_zeros() {
        let store = InMemoryStore::new();
        let stats = DashboardService::new(store).lead_stats().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.in_progress, 0);
    }
}
