use crate::shared::api_utils::{delete, get_json, get_json_with_query, patch_empty, patch_json, post_json};
use contracts::dashboards::d400_operations::credit::{
    AuthorizationFilters, CreditAuthorizationList, ACCEPT_CREDIT_PATH, AUTHORIZATIONS_PATH,
    REJECT_CREDIT_PATH,
};
use contracts::dashboards::d400_operations::requests::{
    accept_price_path, reject_price_path, reject_transfer_path, AcceptTransferRequest,
    PriceRequest, TransferRequest, ACCEPT_TRANSFER_PATH, PRICE_REQUESTS_PATH,
    TRANSFER_REQUESTS_PATH,
};
use contracts::dashboards::d400_operations::warranty::{
    warranty_path, FinishWarrantyRequest, UpdateWarrantyRequest, Warranty, FINISH_WARRANTY_PATH,
    WARRANTIES_PATH,
};
use contracts::dashboards::d400_operations::{
    cash_registers_path, sales_day_path, sales_month_path, sales_week_path, weekly_chart_path,
    AcceptCreditRequest, ActiveCredit, CashRegister, DailySales, RecentSale, RejectCreditRequest,
    Repair, SalesOverview, SelectOption, TopProduct, WeeklySalesPoint, ACTIVE_CREDITS_PATH,
    BANK_ACCOUNTS_PATH, OPEN_REPAIRS_PATH, RECENT_SALES_PATH, TOP_PRODUCTS_PATH,
};
use contracts::shared::lenient::number_from_value;

/// Month, week and day totals. One failure fails the whole overview.
pub async fn fetch_sales_overview(branch_id: i64) -> Result<SalesOverview, String> {
    let month: serde_json::Value = get_json(&sales_month_path(branch_id))
        .await
        .map_err(|e| e.to_string())?;
    let week: serde_json::Value = get_json(&sales_week_path(branch_id))
        .await
        .map_err(|e| e.to_string())?;
    let day: DailySales = get_json(&sales_day_path(branch_id))
        .await
        .map_err(|e| e.to_string())?;
    Ok(SalesOverview {
        month: number_from_value(&month),
        week: number_from_value(&week),
        day: day.total_de_hoy,
    })
}

pub async fn fetch_weekly_chart(branch_id: i64) -> Result<Vec<WeeklySalesPoint>, String> {
    get_json(&weekly_chart_path(branch_id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn fetch_top_products() -> Result<Vec<TopProduct>, String> {
    get_json(TOP_PRODUCTS_PATH).await.map_err(|e| e.to_string())
}

pub async fn fetch_recent_sales() -> Result<Vec<RecentSale>, String> {
    get_json(RECENT_SALES_PATH).await.map_err(|e| e.to_string())
}

// ============================================================================
// Credits
// ============================================================================

pub async fn fetch_authorizations() -> Result<CreditAuthorizationList, String> {
    get_json_with_query(AUTHORIZATIONS_PATH, &AuthorizationFilters::default())
        .await
        .map_err(|e| e.to_string())
}

pub async fn fetch_active_credits() -> Result<Vec<ActiveCredit>, String> {
    get_json(ACTIVE_CREDITS_PATH).await.map_err(|e| e.to_string())
}

pub async fn fetch_bank_accounts() -> Result<Vec<SelectOption>, String> {
    get_json(BANK_ACCOUNTS_PATH).await.map_err(|e| e.to_string())
}

pub async fn fetch_cash_registers(branch_id: i64) -> Result<Vec<CashRegister>, String> {
    get_json(&cash_registers_path(branch_id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn accept_credit(request: &AcceptCreditRequest) -> Result<(), String> {
    post_json(ACCEPT_CREDIT_PATH, request)
        .await
        .map_err(|e| e.to_string())
}

pub async fn reject_credit(request: &RejectCreditRequest) -> Result<(), String> {
    patch_json(REJECT_CREDIT_PATH, request)
        .await
        .map_err(|e| e.to_string())
}

// ============================================================================
// Price and transfer requests
// ============================================================================

pub async fn fetch_price_requests() -> Result<Vec<PriceRequest>, String> {
    get_json(PRICE_REQUESTS_PATH).await.map_err(|e| e.to_string())
}

pub async fn accept_price(request_id: i64, user_id: i64) -> Result<(), String> {
    patch_empty(&accept_price_path(request_id, user_id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn reject_price(request_id: i64, user_id: i64) -> Result<(), String> {
    patch_empty(&reject_price_path(request_id, user_id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn fetch_transfer_requests() -> Result<Vec<TransferRequest>, String> {
    get_json(TRANSFER_REQUESTS_PATH)
        .await
        .map_err(|e| e.to_string())
}

pub async fn accept_transfer(request_id: i64, user_id: i64) -> Result<(), String> {
    let body = AcceptTransferRequest {
        request_id,
        user_id,
    };
    post_json(ACCEPT_TRANSFER_PATH, &body)
        .await
        .map_err(|e| e.to_string())
}

pub async fn reject_transfer(request_id: i64, user_id: i64) -> Result<(), String> {
    delete(&reject_transfer_path(request_id, user_id))
        .await
        .map_err(|e| e.to_string())
}

// ============================================================================
// Repairs and warranties
// ============================================================================

pub async fn fetch_open_repairs() -> Result<Vec<Repair>, String> {
    get_json(OPEN_REPAIRS_PATH).await.map_err(|e| e.to_string())
}

pub async fn fetch_warranties() -> Result<Vec<Warranty>, String> {
    get_json(WARRANTIES_PATH).await.map_err(|e| e.to_string())
}

pub async fn update_warranty(id: i64, request: &UpdateWarrantyRequest) -> Result<(), String> {
    patch_json(&warranty_path(id), request)
        .await
        .map_err(|e| e.to_string())
}

pub async fn finish_warranty(request: &FinishWarrantyRequest) -> Result<(), String> {
    post_json(FINISH_WARRANTY_PATH, request)
        .await
        .map_err(|e| e.to_string())
}
