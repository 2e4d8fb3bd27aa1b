use super::credits::{ActiveCreditsWidget, CreditAuthorizationsWidget};
use super::requests::{PriceRequestsWidget, TransferRequestsWidget};
use super::sales::SalesAnalytics;
use super::service::{OpenRepairsWidget, WarrantiesWidget};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query_cache::use_query_cache;
use crate::system::session::use_session;
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use thaw::*;

/// Every key the dashboard reads for `branch_id`.
fn dashboard_keys(branch_id: i64) -> Vec<QueryKey> {
    vec![
        QueryKey::SalesOverview(branch_id),
        QueryKey::WeeklySalesChart(branch_id),
        QueryKey::TopProducts,
        QueryKey::RecentSales,
        QueryKey::CreditAuthorizations,
        QueryKey::ActiveCredits,
        QueryKey::PriceRequests(branch_id),
        QueryKey::TransferRequests(branch_id),
        QueryKey::OpenRepairs,
        QueryKey::Warranties,
    ]
}

#[component]
pub fn OperationsDashboard() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();

    let refresh = move |_| {
        let branch_id = session.branch_id().unwrap_or_default();
        cache.invalidate_all(&dashboard_keys(branch_id));
    };

    view! {
        <PageFrame page_id="d400_operations--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("dashboard")}
                    <h1 class="page__title">"Panel de operaciones"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=refresh>
                        {icon("refresh")}
                        "Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content dashboard">
                <SalesAnalytics />

                <div class="dashboard__grid">
                    <CreditAuthorizationsWidget />
                    <ActiveCreditsWidget />
                    <PriceRequestsWidget />
                    <TransferRequestsWidget />
                    <OpenRepairsWidget />
                    <WarrantiesWidget />
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_keys_are_branch_scoped() {
        let keys = dashboard_keys(4);
        assert!(keys.contains(&QueryKey::PriceRequests(4)));
        assert!(keys.contains(&QueryKey::TransferRequests(4)));
        assert!(keys.contains(&QueryKey::SalesOverview(4)));
        assert!(!keys.contains(&QueryKey::Inventory));
    }
}
