use crate::shared::api_utils::{get_json, patch_json, post_json};
use contracts::domain::a002_product::mapping::{map_presentation_detail, map_product_detail};
use contracts::domain::a002_product::{
    Category, EditorMode, Paginated, PresentationDetail, PresentationType, ProductDetail,
    ProductForm, SubmitMethod, SubmitProductRequest, CATEGORIES_PATH, PRESENTATION_TYPES_PATH,
};

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    get_json(CATEGORIES_PATH).await.map_err(|e| e.to_string())
}

pub async fn fetch_presentation_types() -> Result<Vec<PresentationType>, String> {
    get_json::<Paginated<PresentationType>>(PRESENTATION_TYPES_PATH)
        .await
        .map(|page| page.data)
        .map_err(|e| e.to_string())
}

/// Loads the record being edited and maps it to the form, together with the
/// name shown in the tab title.
pub async fn fetch_form(mode: EditorMode, id: i64) -> Result<(ProductForm, String), String> {
    let path = mode.detail_path(id);
    match mode {
        EditorMode::Product => {
            let dto: ProductDetail = get_json(&path).await.map_err(|e| e.to_string())?;
            Ok((map_product_detail(&dto), dto.nombre))
        }
        EditorMode::Presentation => {
            let dto: PresentationDetail = get_json(&path).await.map_err(|e| e.to_string())?;
            Ok((map_presentation_detail(&dto), dto.nombre))
        }
    }
}

pub async fn submit(
    mode: EditorMode,
    id: Option<i64>,
    form: &ProductForm,
    user_id: i64,
) -> Result<(), String> {
    let body = SubmitProductRequest { form, user_id };
    let (method, path) = mode.submit_target(id);
    let result = match method {
        SubmitMethod::Post => post_json(&path, &body).await,
        SubmitMethod::Patch => patch_json(&path, &body).await,
    };
    result.map_err(|e| e.to_string())
}
