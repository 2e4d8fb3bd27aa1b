use crate::shared::api_utils::{get_json_with_query, patch_json};
use contracts::domain::a001_stock_lot::edit::{stock_to_edit_path, UPDATE_STOCK_DATES_PATH};
use contracts::domain::a001_stock_lot::{
    StockKind, StockToEdit, StockToEditQuery, UpdateStockDatesRequest,
};

pub async fn fetch_stock(id: i64, kind: Option<StockKind>) -> Result<StockToEdit, String> {
    get_json_with_query(&stock_to_edit_path(id), &StockToEditQuery { kind })
        .await
        .map_err(|e| e.to_string())
}

pub async fn update_dates(request: &UpdateStockDatesRequest) -> Result<(), String> {
    patch_json(UPDATE_STOCK_DATES_PATH, request)
        .await
        .map_err(|e| e.to_string())
}
