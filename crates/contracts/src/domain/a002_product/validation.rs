//! Pre-submit checks for the product and presentation editor.
//!
//! Every rule runs; the caller gets all messages at once, in display order.

use super::aggregate::{EditorMode, PriceRow, ProductForm};
use crate::shared::lenient::parse_number;
use std::collections::HashSet;

fn positive(value: &str) -> bool {
    parse_number(value).is_some_and(|v| v > 0.0)
}

/// A usable price list: non-empty, and every row has a positive price, a
/// role and a positive order.
pub fn has_valid_prices(rows: &[PriceRow]) -> bool {
    !rows.is_empty()
        && rows
            .iter()
            .all(|p| positive(&p.precio) && p.rol.is_some() && p.orden > 0)
}

/// No two rows share the same (role, order) pair.
pub fn unique_role_order(rows: &[PriceRow]) -> bool {
    let mut seen = HashSet::new();
    rows.iter().all(|p| seen.insert((p.rol, p.orden)))
}

pub fn validate_before_submit(form: &ProductForm, mode: EditorMode) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let info = &form.basic_info;

    if info.nombre.trim().is_empty() {
        errors.push("El nombre es obligatorio.".to_string());
    }
    if info.codigo_producto.trim().is_empty() {
        errors.push("El código de producto es obligatorio.".to_string());
    }
    if info.stock_minimo < 0.0 {
        errors.push("El stock mínimo no puede ser negativo.".to_string());
    }

    match mode {
        EditorMode::Product => {
            if !(info.precio_costo_actual.is_finite() && info.precio_costo_actual > 0.0) {
                errors.push("El precio costo actual debe ser mayor a 0.".to_string());
            }
            let any_presentation_priced = form
                .presentations
                .iter()
                .any(|p| has_valid_prices(&p.precios));
            if !has_valid_prices(&form.prices) && !any_presentation_priced {
                errors.push(
                    "Debes definir al menos un precio: a nivel de producto o en alguna presentación."
                        .to_string(),
                );
            }
            if !unique_role_order(&form.prices) {
                errors.push(
                    "Precios de producto: no puede repetirse la combinación (rol, orden)."
                        .to_string(),
                );
            }
        }
        EditorMode::Presentation => {
            if form.presentations.is_empty() {
                errors.push("Debes agregar al menos una presentación.".to_string());
            }
            if !form.presentations.iter().all(|p| has_valid_prices(&p.precios)) {
                errors.push("Cada presentación debe tener al menos un precio válido.".to_string());
            }
            if form
                .presentations
                .iter()
                .any(|p| p.tipo_presentacion_id.is_none())
            {
                errors.push("Cada presentación debe tener un tipo de presentación.".to_string());
            }
        }
    }

    if form.presentations.iter().filter(|p| p.es_default).count() > 1 {
        errors.push("Sólo puede haber una presentación marcada como predeterminada.".to_string());
    }

    for presentation in &form.presentations {
        if !unique_role_order(&presentation.precios) {
            errors.push(format!(
                "Presentación \"{}\": no puede repetirse la combinación (rol, orden).",
                presentation.display_name()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product::aggregate::{BasicInfo, PresentationForm};
    use crate::domain::a002_product::prices::PriceRole;

    fn price(rol: PriceRole, orden: i64, precio: &str) -> PriceRow {
        PriceRow {
            rol: Some(rol),
            orden,
            precio: precio.to_string(),
        }
    }

    fn valid_product() -> ProductForm {
        ProductForm {
            basic_info: BasicInfo {
                nombre: "Funda iPhone 15".into(),
                codigo_producto: "FUN-15".into(),
                precio_costo_actual: 20.0,
                ..BasicInfo::default()
            },
            prices: vec![price(PriceRole::Public, 1, "45")],
            ..ProductForm::default()
        }
    }

    fn presentation(nombre: &str, es_default: bool) -> PresentationForm {
        PresentationForm {
            nombre: nombre.into(),
            tipo_presentacion_id: Some(1),
            es_default,
            precios: vec![price(PriceRole::Public, 1, "10")],
            ..PresentationForm::blank()
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert_eq!(validate_before_submit(&valid_product(), EditorMode::Product), Ok(()));
    }

    #[test]
    fn test_empty_product_collects_all_errors_in_order() {
        let mut form = ProductForm::default();
        form.basic_info.stock_minimo = -1.0;
        let errors = validate_before_submit(&form, EditorMode::Product).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "El nombre es obligatorio.",
                "El código de producto es obligatorio.",
                "El stock mínimo no puede ser negativo.",
                "El precio costo actual debe ser mayor a 0.",
                "Debes definir al menos un precio: a nivel de producto o en alguna presentación.",
            ]
        );
    }

    #[test]
    fn test_duplicate_role_order_rejected() {
        let mut form = valid_product();
        form.prices.push(price(PriceRole::Public, 1, "50"));
        let errors = validate_before_submit(&form, EditorMode::Product).unwrap_err();
        assert_eq!(
            errors,
            vec!["Precios de producto: no puede repetirse la combinación (rol, orden)."]
        );

        form.prices[1].rol = Some(PriceRole::Distributor);
        assert!(validate_before_submit(&form, EditorMode::Product).is_ok());
    }

    #[test]
    fn test_presentation_prices_satisfy_product_rule() {
        let mut form = valid_product();
        form.prices.clear();
        form.presentations.push(presentation("Caja", false));
        assert!(validate_before_submit(&form, EditorMode::Product).is_ok());
    }

    #[test]
    fn test_invalid_price_rows() {
        assert!(!has_valid_prices(&[]));
        assert!(!has_valid_prices(&[price(PriceRole::Public, 1, "0")]));
        assert!(!has_valid_prices(&[price(PriceRole::Public, 0, "5")]));
        assert!(!has_valid_prices(&[PriceRow { rol: None, orden: 1, precio: "5".into() }]));
        assert!(!has_valid_prices(&[price(PriceRole::Public, 1, "abc")]));
        assert!(has_valid_prices(&[price(PriceRole::Public, 1, "0.5")]));
    }

    #[test]
    fn test_single_default_accepted_double_rejected() {
        let mut form = valid_product();
        form.presentations = vec![presentation("Unidad", true), presentation("Caja", false)];
        assert!(validate_before_submit(&form, EditorMode::Product).is_ok());

        form.presentations[1].es_default = true;
        let errors = validate_before_submit(&form, EditorMode::Product).unwrap_err();
        assert_eq!(
            errors,
            vec!["Sólo puede haber una presentación marcada como predeterminada."]
        );
    }

    #[test]
    fn test_presentation_mode_rules() {
        let mut form = valid_product();
        form.basic_info.precio_costo_actual = 0.0;
        let errors = validate_before_submit(&form, EditorMode::Presentation).unwrap_err();
        assert_eq!(errors, vec!["Debes agregar al menos una presentación."]);

        let mut bare = presentation("Display", false);
        bare.precios.clear();
        bare.tipo_presentacion_id = None;
        form.presentations.push(bare);
        let errors = validate_before_submit(&form, EditorMode::Presentation).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Cada presentación debe tener al menos un precio válido.",
                "Cada presentación debe tener un tipo de presentación.",
            ]
        );
    }

    #[test]
    fn test_presentation_duplicate_named_in_message() {
        let mut form = valid_product();
        let mut pack = presentation("Pack x3", false);
        pack.precios.push(price(PriceRole::Public, 1, "12"));
        let mut unnamed = presentation("", false);
        unnamed.id = Some(31);
        unnamed.precios.push(price(PriceRole::Public, 1, "12"));
        form.presentations = vec![pack, unnamed];
        let errors = validate_before_submit(&form, EditorMode::Product).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Presentación \"Pack x3\": no puede repetirse la combinación (rol, orden).",
                "Presentación \"31\": no puede repetirse la combinación (rol, orden).",
            ]
        );
    }
}
