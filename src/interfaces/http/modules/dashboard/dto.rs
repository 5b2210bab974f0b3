//! Dashboard DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::LeadStats;

/// Aggregate lead counts for the employer dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub leads_in_progress: u64,
    pub leads_completed: u64,
    pub leads_canceled: u64,
    pub total_leads: u64,
}

impl From<LeadStats> for DashboardStatsResponse {
    fn from(stats: LeadStats) -> Self {
        Self {
            leads_in_progress: stats.in_progress,
            leads_completed: stats.completed,
            leads_canceled: stats.canceled,
            total_leads: stats.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let stats = DashboardStatsResponse::from(LeadStats {
            in_progress: 3,
            completed: 2,
            canceled: 1,
            total: 6,
        });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["leadsInProgress"], 3);
        assert_eq!(json["leadsCompleted"], 2);
        assert_eq!(json["leadsCanceled"], 1);
        assert_eq!(json["totalLeads"], 6);
    }
}
