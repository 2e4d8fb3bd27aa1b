use super::prices::PriceRole;
use crate::shared::lenient::{lenient_f64, lenient_string, null_as_default};
use crate::shared::query_key::QueryKey;
use serde::{Deserialize, Serialize};

pub const CATEGORIES_PATH: &str = "/categoria";
pub const PRESENTATION_TYPES_PATH: &str = "/tipo-presentacion";

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationType {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
}

/// `GET tipo-presentacion` is paginated.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingImage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

// ============================================================================
// Detail DTOs (what the backend returns)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rol: String,
    #[serde(default)]
    pub orden: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub precio: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresentationDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(rename = "codigoBarras", default)]
    pub codigo_barras: Option<String>,
    #[serde(rename = "tipoPresentacionId", default)]
    pub tipo_presentacion_id: Option<i64>,
    #[serde(rename = "tipoPresentacion", default)]
    pub tipo_presentacion: Option<PresentationType>,
    #[serde(rename = "costoReferencialPresentacion", default, deserialize_with = "lenient_string")]
    pub costo_referencial: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(rename = "stockMinimo", default, deserialize_with = "lenient_f64")]
    pub stock_minimo: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub precios: Vec<PriceDetail>,
    #[serde(rename = "esDefault", default, deserialize_with = "null_as_default")]
    pub es_default: bool,
    #[serde(rename = "imagenesPresentacion", default, deserialize_with = "null_as_default")]
    pub imagenes: Vec<ExistingImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activo: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categorias: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(rename = "codigoProducto", default, deserialize_with = "null_as_default")]
    pub codigo_producto: String,
    #[serde(rename = "codigoProveedor", default)]
    pub codigo_proveedor: Option<String>,
    #[serde(rename = "stockMinimo", default, deserialize_with = "lenient_f64")]
    pub stock_minimo: f64,
    #[serde(rename = "precioCostoActual", default, deserialize_with = "lenient_f64")]
    pub precio_costo_actual: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categorias: Vec<Category>,
    #[serde(rename = "tipoPresentacionId", default)]
    pub tipo_presentacion_id: Option<i64>,
    #[serde(rename = "tipoPresentacion", default)]
    pub tipo_presentacion: Option<PresentationType>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(rename = "imagenesProducto", default, deserialize_with = "null_as_default")]
    pub imagenes: Vec<ExistingImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub precios: Vec<PriceDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub presentaciones: Vec<PresentationDetail>,
}

// ============================================================================
// Form DTO (what the editor holds and submits)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub rol: Option<PriceRole>,
    pub orden: i64,
    pub precio: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicInfo {
    pub nombre: String,
    #[serde(rename = "codigoProducto")]
    pub codigo_producto: String,
    #[serde(rename = "codigoProveedor")]
    pub codigo_proveedor: String,
    #[serde(rename = "stockMinimo")]
    pub stock_minimo: f64,
    #[serde(rename = "precioCostoActual")]
    pub precio_costo_actual: f64,
    pub categorias: Vec<i64>,
    #[serde(rename = "tipoPresentacionId")]
    pub tipo_presentacion_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresentationForm {
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(rename = "codigoBarras")]
    pub codigo_barras: String,
    #[serde(rename = "tipoPresentacionId")]
    pub tipo_presentacion_id: Option<i64>,
    #[serde(rename = "costoReferencialPresentacion")]
    pub costo_referencial: String,
    pub descripcion: String,
    #[serde(rename = "stockMinimo")]
    pub stock_minimo: f64,
    pub precios: Vec<PriceRow>,
    #[serde(rename = "esDefault")]
    pub es_default: bool,
    pub imagenes: Vec<ExistingImage>,
    pub activo: bool,
    pub categorias: Vec<i64>,
}

impl PresentationForm {
    /// Blank row appended by "Agregar presentación".
    pub fn blank() -> Self {
        Self {
            activo: true,
            costo_referencial: "0".to_string(),
            ..Self::default()
        }
    }

    /// Name used in messages: the name, or the id for unnamed rows.
    pub fn display_name(&self) -> String {
        let name = self.nombre.trim();
        if !name.is_empty() {
            name.to_string()
        } else {
            self.id.map(|id| id.to_string()).unwrap_or_default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(rename = "basicInfo")]
    pub basic_info: BasicInfo,
    pub description: String,
    pub images: Vec<ExistingImage>,
    pub prices: Vec<PriceRow>,
    pub presentations: Vec<PresentationForm>,
}

/// Body of the create/update calls: the form plus the acting user.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitProductRequest<'a> {
    #[serde(flatten)]
    pub form: &'a ProductForm,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
}

// ============================================================================
// Editor mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Product,
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Post,
    Patch,
}

impl EditorMode {
    fn base_path(&self) -> &'static str {
        match self {
            EditorMode::Product => "/products",
            EditorMode::Presentation => "/presentations",
        }
    }

    pub fn detail_path(&self, id: i64) -> String {
        format!("{}/{}", self.base_path(), id)
    }

    /// POST to the collection when creating, PATCH the item when editing.
    pub fn submit_target(&self, id: Option<i64>) -> (SubmitMethod, String) {
        match id {
            Some(id) => (SubmitMethod::Patch, self.detail_path(id)),
            None => (SubmitMethod::Post, self.base_path().to_string()),
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            EditorMode::Product => "producto",
            EditorMode::Presentation => "presentación",
        }
    }

    pub fn title_noun(&self) -> &'static str {
        match self {
            EditorMode::Product => "Producto",
            EditorMode::Presentation => "Presentación",
        }
    }

    pub fn detail_key(&self, id: i64) -> QueryKey {
        match self {
            EditorMode::Product => QueryKey::Product(id),
            EditorMode::Presentation => QueryKey::Presentation(id),
        }
    }

    /// Cache entries that go stale after a successful create or update.
    pub fn keys_to_invalidate(&self, id: Option<i64>) -> Vec<QueryKey> {
        let mut keys = vec![QueryKey::Categories, QueryKey::PresentationTypes];
        keys.push(match self {
            EditorMode::Product => QueryKey::Products,
            EditorMode::Presentation => QueryKey::Presentations,
        });
        if let Some(id) = id {
            keys.push(self.detail_key(id));
        }
        keys.push(QueryKey::Inventory);
        keys
    }

    pub fn pending_message(&self, editing: bool) -> String {
        if editing {
            format!("Actualizando {}...", self.noun())
        } else {
            format!("Creando {}...", self.noun())
        }
    }

    pub fn success_message(&self, editing: bool) -> String {
        let suffix = match self {
            EditorMode::Product => "o",
            EditorMode::Presentation => "a",
        };
        if editing {
            format!("{} actualizad{}", self.title_noun(), suffix)
        } else {
            format!("{} cread{}", self.title_noun(), suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_target() {
        assert_eq!(
            EditorMode::Product.submit_target(None),
            (SubmitMethod::Post, "/products".to_string())
        );
        assert_eq!(
            EditorMode::Presentation.submit_target(Some(8)),
            (SubmitMethod::Patch, "/presentations/8".to_string())
        );
    }

    #[test]
    fn test_keys_to_invalidate() {
        let keys = EditorMode::Product.keys_to_invalidate(Some(4));
        assert!(keys.contains(&QueryKey::Categories));
        assert!(keys.contains(&QueryKey::PresentationTypes));
        assert!(keys.contains(&QueryKey::Products));
        assert!(keys.contains(&QueryKey::Product(4)));
        assert!(!keys.contains(&QueryKey::Presentations));

        let keys = EditorMode::Presentation.keys_to_invalidate(None);
        assert!(keys.contains(&QueryKey::Presentations));
        assert!(!keys.iter().any(|k| matches!(k, QueryKey::Presentation(_))));
    }

    #[test]
    fn test_submit_body_carries_user() {
        let form = ProductForm::default();
        let body = serde_json::to_value(SubmitProductRequest { form: &form, user_id: 5 }).unwrap();
        assert_eq!(body["usuarioId"], 5);
        assert!(body.get("basicInfo").is_some());
    }

    #[test]
    fn test_messages() {
        assert_eq!(EditorMode::Product.pending_message(false), "Creando producto...");
        assert_eq!(EditorMode::Presentation.success_message(true), "Presentación actualizada");
    }
}
