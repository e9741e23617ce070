use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::saturating_total;
use crate::status::resolve_status;
use crate::store::EntityStore;

/// Contracts sharing one status, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub code: String,
    pub label: String,
    pub count: usize,
}

/// KPI figures shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_contracts: usize,
    pub total_value_post_vat: Decimal,
    pub collected: Decimal,
    pub outstanding: Decimal,
    /// In order of first appearance
    pub by_status: Vec<StatusCount>,
}

impl DashboardSummary {
    /// Computes the KPIs from every stored contract.
    ///
    /// `outstanding` is the scheduled payment-term total minus what has been collected.
    pub fn compute(store: &EntityStore) -> Self {
        let mut by_status: Vec<StatusCount> = Vec::new();
        for contract in &store.contracts {
            match by_status.iter_mut().find(|s| s.code == contract.status) {
                Some(entry) => entry.count += 1,
                None => by_status.push(StatusCount {
                    code: contract.status.clone(),
                    label: resolve_status(&contract.status, &store.master.statuses).name,
                    count: 1,
                }),
            }
        }

        let scheduled = saturating_total(
            store
                .contracts
                .iter()
                .flat_map(|c| c.payment_terms.iter())
                .map(|t| t.value),
        );
        let collected = saturating_total(store.contracts.iter().map(|c| c.collected_amount()));
        let total_value_post_vat = saturating_total(store.contracts.iter().map(|c| c.value_post_vat));
        if [scheduled, collected, total_value_post_vat]
            .iter()
            .any(|v| *v == Decimal::MAX || *v == Decimal::MIN)
        {
            warn!("Dashboard totals hit the decimal range limit");
        }

        Self {
            total_contracts: store.contracts.len(),
            total_value_post_vat,
            collected,
            outstanding: scheduled.saturating_sub(collected),
            by_status,
        }
    }
}

/// Recomputes the summary after the simulated loading delay.
pub async fn refresh_dashboard(store: &EntityStore, delay: Duration) -> DashboardSummary {
    tokio::time::sleep(delay).await;
    let summary = DashboardSummary::compute(store);
    info!(
        "Dashboard refreshed: {} contracts, {} collected",
        summary.total_contracts, summary.collected
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_seeded_store() {
        let store = EntityStore::seeded();
        let summary = DashboardSummary::compute(&store);

        assert_eq!(summary.total_contracts, 2);
        assert_eq!(summary.total_value_post_vat, Decimal::from(1_320_000_000));
        assert_eq!(summary.collected, Decimal::from(330_000_000));
        assert_eq!(summary.outstanding, Decimal::from(770_000_000));

        let legacy = summary.by_status.iter().find(|s| s.code == "completed").unwrap();
        assert_eq!(legacy.label, "Hoàn thành");
        assert_eq!(legacy.count, 1);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_panicking() {
        let mut store = EntityStore::seeded();
        for contract in store.contracts.iter_mut() {
            contract.value_post_vat = Decimal::MAX;
            for term in contract.payment_terms.iter_mut() {
                term.value = Decimal::MAX;
                term.is_collected = true;
            }
        }

        let summary = DashboardSummary::compute(&store);
        assert_eq!(summary.total_value_post_vat, Decimal::MAX);
        assert_eq!(summary.collected, Decimal::MAX);
        assert_eq!(summary.outstanding, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_refresh_matches_compute() {
        let store = EntityStore::seeded();
        let summary = refresh_dashboard(&store, Duration::ZERO).await;
        assert_eq!(summary, DashboardSummary::compute(&store));
    }
}
