//! Detail DTO → editor form.

use super::aggregate::{
    BasicInfo, PresentationDetail, PresentationForm, PriceDetail, PriceRow, ProductDetail,
    ProductForm,
};
use super::prices::PriceRole;

fn map_price(price: &PriceDetail) -> PriceRow {
    PriceRow {
        rol: PriceRole::parse(&price.rol),
        orden: price.orden,
        precio: price.precio.clone(),
    }
}

pub fn map_presentation(dto: &PresentationDetail) -> PresentationForm {
    let costo_referencial = if dto.costo_referencial.trim().is_empty() {
        "0".to_string()
    } else {
        dto.costo_referencial.clone()
    };

    PresentationForm {
        id: Some(dto.id),
        nombre: dto.nombre.clone(),
        codigo_barras: dto.codigo_barras.clone().unwrap_or_default(),
        tipo_presentacion_id: dto
            .tipo_presentacion_id
            .or_else(|| dto.tipo_presentacion.as_ref().map(|t| t.id)),
        costo_referencial,
        descripcion: dto.descripcion.clone().unwrap_or_default(),
        stock_minimo: dto.stock_minimo,
        precios: dto.precios.iter().map(map_price).collect(),
        es_default: dto.es_default,
        imagenes: dto.imagenes.clone(),
        activo: dto.activo,
        categorias: dto.categorias.iter().map(|c| c.id).collect(),
    }
}

pub fn map_product_detail(dto: &ProductDetail) -> ProductForm {
    ProductForm {
        basic_info: BasicInfo {
            nombre: dto.nombre.clone(),
            codigo_producto: dto.codigo_producto.clone(),
            codigo_proveedor: dto.codigo_proveedor.clone().unwrap_or_default(),
            stock_minimo: dto.stock_minimo,
            precio_costo_actual: dto.precio_costo_actual,
            categorias: dto.categorias.iter().map(|c| c.id).collect(),
            tipo_presentacion_id: dto
                .tipo_presentacion_id
                .or_else(|| dto.tipo_presentacion.as_ref().map(|t| t.id)),
        },
        description: dto.descripcion.clone().unwrap_or_default(),
        images: dto.imagenes.clone(),
        prices: dto.precios.iter().map(map_price).collect(),
        presentations: dto.presentaciones.iter().map(map_presentation).collect(),
    }
}

/// Presentation editing reuses the product form with the basic block left
/// blank and the single presentation in the list.
pub fn map_presentation_detail(dto: &PresentationDetail) -> ProductForm {
    ProductForm {
        presentations: vec![map_presentation(dto)],
        ..ProductForm::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 12,
        "nombre": "Cable Lightning",
        "codigoProducto": "CAB-LI",
        "codigoProveedor": null,
        "stockMinimo": null,
        "precioCostoActual": "18.75",
        "categorias": [{"id": 3, "nombre": "Cables"}],
        "tipoPresentacionId": null,
        "descripcion": null,
        "imagenesProducto": [{"id": 1, "url": "https://cdn/img.png"}],
        "precios": [{"rol": "PUBLICO", "orden": 1, "precio": 35}],
        "presentaciones": [{
            "id": 40,
            "nombre": "Blister",
            "codigoBarras": null,
            "tipoPresentacion": {"id": 6, "nombre": "Blister"},
            "costoReferencialPresentacion": null,
            "stockMinimo": 2,
            "precios": [{"rol": "DISTRIBUIDOR", "orden": 2, "precio": "30.00"}],
            "esDefault": null,
            "activo": true,
            "categorias": null
        }]
    }"#;

    #[test]
    fn test_map_product_detail_defaults() {
        let dto: ProductDetail = serde_json::from_str(PRODUCT_JSON).unwrap();
        let form = map_product_detail(&dto);

        assert_eq!(form.basic_info.codigo_proveedor, "");
        assert_eq!(form.basic_info.stock_minimo, 0.0);
        assert_eq!(form.basic_info.precio_costo_actual, 18.75);
        assert_eq!(form.basic_info.categorias, vec![3]);
        assert_eq!(form.basic_info.tipo_presentacion_id, None);
        assert_eq!(form.description, "");
        assert_eq!(form.images.len(), 1);
        assert_eq!(form.prices[0].precio, "35");
        assert_eq!(form.prices[0].rol, Some(PriceRole::Public));
    }

    #[test]
    fn test_map_nested_presentation() {
        let dto: ProductDetail = serde_json::from_str(PRODUCT_JSON).unwrap();
        let form = map_product_detail(&dto);
        let p = &form.presentations[0];

        assert_eq!(p.id, Some(40));
        assert_eq!(p.codigo_barras, "");
        assert_eq!(p.tipo_presentacion_id, Some(6));
        assert_eq!(p.costo_referencial, "0");
        assert_eq!(p.stock_minimo, 2.0);
        assert!(!p.es_default);
        assert!(p.activo);
        assert!(p.categorias.is_empty());
        assert_eq!(p.precios[0].precio, "30.00");
        assert_eq!(p.precios[0].rol, Some(PriceRole::Distributor));
    }

    #[test]
    fn test_map_presentation_detail_leaves_basic_info_blank() {
        let json = r#"{
            "id": 9,
            "nombre": "Caja x12",
            "tipoPresentacionId": 2,
            "costoReferencialPresentacion": "11.5",
            "precios": [{"rol": "PROMOCION", "orden": 1, "precio": "9.99"}],
            "esDefault": true,
            "activo": false
        }"#;
        let dto: PresentationDetail = serde_json::from_str(json).unwrap();
        let form = map_presentation_detail(&dto);

        assert_eq!(form.basic_info, BasicInfo::default());
        assert!(form.prices.is_empty());
        assert_eq!(form.presentations.len(), 1);
        assert_eq!(form.presentations[0].costo_referencial, "11.5");
        assert!(form.presentations[0].es_default);
        assert!(!form.presentations[0].activo);
    }
}
