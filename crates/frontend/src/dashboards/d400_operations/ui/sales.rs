use super::widget::WidgetCard;
use crate::dashboards::d400_operations::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabKey;
use crate::shared::clock::local_date_text;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status::{EmptyBlock, LoadingBlock};
use crate::shared::query_cache::use_query_cache;
use crate::system::session::use_session;
use contracts::dashboards::d400_operations::{
    chart_bar_heights, RecentSale, SalesOverview, TopProduct, WeeklySalesPoint, ANALYTICS_ERROR,
};
use contracts::shared::money::format_quetzal;
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Everything the analytics endpoints return for one branch.
#[derive(Debug, Clone, PartialEq)]
struct AnalyticsBatch {
    overview: SalesOverview,
    weekly: Vec<WeeklySalesPoint>,
    top_products: Vec<TopProduct>,
    recent_sales: Vec<RecentSale>,
}

async fn fetch_batch(branch_id: i64) -> Result<AnalyticsBatch, String> {
    Ok(AnalyticsBatch {
        overview: api::fetch_sales_overview(branch_id).await?,
        weekly: api::fetch_weekly_chart(branch_id).await?,
        top_products: api::fetch_top_products().await?,
        recent_sales: api::fetch_recent_sales().await?,
    })
}

/// Sales figures, weekly chart, top products and recent sales. They load as
/// one batch and fail with a single message.
#[component]
pub fn SalesAnalytics() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let batch = RwSignal::new(None::<Result<AnalyticsBatch, String>>);

    Effect::new(move |_| {
        let Some(branch_id) = session.branch_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::SalesOverview(branch_id));
        let _ = cache.version(&QueryKey::WeeklySalesChart(branch_id));
        let _ = cache.version(&QueryKey::TopProducts);
        let _ = cache.version(&QueryKey::RecentSales);
        spawn_local(async move {
            let result = fetch_batch(branch_id).await;
            if let Err(e) = &result {
                log::error!("analytics batch failed: {}", e);
            }
            batch.set(Some(result));
        });
    });

    let overview = move || {
        batch.with(|b| match b {
            Some(Ok(b)) => Some(b.overview),
            _ => None,
        })
    };

    let section = move |select: fn(&AnalyticsBatch) -> AnyView| {
        move || match batch.get() {
            None => view! { <LoadingBlock /> }.into_any(),
            Some(Err(_)) => view! { <EmptyBlock label="Sin datos" /> }.into_any(),
            Some(Ok(b)) => select(&b),
        }
    };

    view! {
        <Show when=move || matches!(batch.with(|b| b.as_ref().map(Result::is_err)), Some(true))>
            <div class="dashboard__alert">{ANALYTICS_ERROR}</div>
        </Show>

        <div class="dashboard__stats">
            <StatCard
                label="Ventas del mes"
                icon_name="receipt"
                value=Signal::derive(move || overview().map(|o| o.month))
            />
            <StatCard
                label="Ventas de la semana"
                icon_name="receipt"
                value=Signal::derive(move || overview().map(|o| o.week))
            />
            <StatCard
                label="Ventas de hoy"
                icon_name="receipt"
                value=Signal::derive(move || overview().map(|o| o.day))
                hint="Total acumulado del día"
            />
        </div>

        <div class="dashboard__row">
            <WidgetCard title="Ventas de la semana" icon_name="dashboard">
                {section(|b| weekly_chart(&b.weekly))}
            </WidgetCard>
            <WidgetCard title="Productos más vendidos" icon_name="products">
                {section(|b| top_products(&b.top_products))}
            </WidgetCard>
        </div>

        <WidgetCard title="Transacciones recientes" icon_name="receipt">
            {section(|b| view! { <RecentSalesTable sales=b.recent_sales.clone() /> }.into_any())}
        </WidgetCard>
    }
}

fn weekly_chart(points: &[WeeklySalesPoint]) -> AnyView {
    if points.is_empty() {
        return view! { <EmptyBlock label="Sin ventas esta semana" /> }.into_any();
    }
    let heights = chart_bar_heights(points);
    view! {
        <div class="bar-chart">
            {points.iter().zip(heights).map(|(point, height)| view! {
                <div class="bar-chart__column" title=format_quetzal(point.total_venta)>
                    <div class="bar-chart__track">
                        <div class="bar-chart__bar" style=format!("height: {:.1}%;", height)></div>
                    </div>
                    <span class="bar-chart__label">{point.dia.clone()}</span>
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}

fn top_products(products: &[TopProduct]) -> AnyView {
    if products.is_empty() {
        return view! { <EmptyBlock label="Aún no hay ventas registradas" /> }.into_any();
    }
    view! {
        <ol class="ranking">
            {products.iter().map(|p| view! {
                <li class="ranking__item">
                    <span class="ranking__name">{p.nombre.clone()}</span>
                    <span class="ranking__value">{format!("{} vendidos", p.total_ventas)}</span>
                </li>
            }).collect_view()}
        </ol>
    }
    .into_any()
}

#[component]
fn RecentSalesTable(sales: Vec<RecentSale>) -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    if sales.is_empty() {
        return view! { <EmptyBlock label="No hay transacciones recientes" /> }.into_any();
    }
    view! {
        <table class="table__data table--compact">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Fecha"</th>
                    <th>"Sucursal"</th>
                    <th class="table__number">"Total"</th>
                </tr>
            </thead>
            <tbody>
                {sales.into_iter().map(|sale| {
                    let sale_id = sale.id;
                    let branch = sale.sucursal.map(|s| s.nombre).unwrap_or_default();
                    view! {
                        <tr>
                            <td>
                                <a
                                    href="#"
                                    class="table__link"
                                    on:click=move |e| {
                                        e.prevent_default();
                                        tabs_store.open(TabKey::Invoice { sale_id });
                                    }
                                >
                                    {format!("#{}", sale_id)}
                                </a>
                            </td>
                            <td>{local_date_text(Some(&sale.fecha_venta))}</td>
                            <td>{branch}</td>
                            <td class="table__number">{format_quetzal(sale.total_venta)}</td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
