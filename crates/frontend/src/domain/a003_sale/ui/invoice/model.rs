use crate::shared::api_utils::get_json;
use contracts::domain::a003_sale::receipt::sale_path;
use contracts::domain::a003_sale::Sale;

pub async fn fetch_sale(id: i64) -> Result<Sale, String> {
    get_json(&sale_path(id)).await.map_err(|e| e.to_string())
}
