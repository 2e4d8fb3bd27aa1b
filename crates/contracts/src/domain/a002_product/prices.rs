//! Price list editing for products and presentations.

use super::aggregate::{PresentationForm, PriceRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRole {
    #[serde(rename = "PUBLICO")]
    Public,
    #[serde(rename = "DISTRIBUIDOR")]
    Distributor,
    #[serde(rename = "PROMOCION")]
    Promotion,
}

impl PriceRole {
    pub const ALL: [PriceRole; 3] = [PriceRole::Public, PriceRole::Distributor, PriceRole::Promotion];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRole::Public => "PUBLICO",
            PriceRole::Distributor => "DISTRIBUIDOR",
            PriceRole::Promotion => "PROMOCION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRole::Public => "Público",
            PriceRole::Distributor => "Distribuidor",
            PriceRole::Promotion => "Promoción",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value.trim())
    }
}

/// One edit applied to a price row.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceRowChange {
    Price(String),
    Order(i64),
    Role(Option<PriceRole>),
}

/// Append an empty public price ordered after the existing ones.
pub fn add_price_row(rows: &mut Vec<PriceRow>) {
    let orden = rows.len() as i64 + 1;
    rows.push(PriceRow {
        rol: Some(PriceRole::Public),
        orden,
        precio: String::new(),
    });
}

pub fn remove_price_row(rows: &mut Vec<PriceRow>, index: usize) {
    if index < rows.len() {
        rows.remove(index);
    }
}

pub fn update_price_row(rows: &mut [PriceRow], index: usize, change: PriceRowChange) {
    let Some(row) = rows.get_mut(index) else {
        return;
    };
    match change {
        PriceRowChange::Price(value) => row.precio = value,
        PriceRowChange::Order(value) => row.orden = value,
        PriceRowChange::Role(value) => row.rol = value,
    }
}

pub fn add_presentation(items: &mut Vec<PresentationForm>) {
    items.push(PresentationForm::blank());
}

pub fn remove_presentation(items: &mut Vec<PresentationForm>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

/// Toggle the default flag on one presentation. Marking a row clears the
/// flag everywhere else.
pub fn toggle_default_presentation(items: &mut [PresentationForm], index: usize) {
    let Some(current) = items.get(index).map(|p| p.es_default) else {
        return;
    };
    for (i, item) in items.iter_mut().enumerate() {
        item.es_default = i == index && !current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_price_row_orders_after_existing() {
        let mut rows = Vec::new();
        add_price_row(&mut rows);
        add_price_row(&mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].orden, 2);
        assert_eq!(rows[1].rol, Some(PriceRole::Public));
        assert!(rows[1].precio.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut rows = Vec::new();
        add_price_row(&mut rows);
        update_price_row(&mut rows, 0, PriceRowChange::Price("25".into()));
        update_price_row(&mut rows, 0, PriceRowChange::Role(Some(PriceRole::Promotion)));
        update_price_row(&mut rows, 7, PriceRowChange::Order(9));
        assert_eq!(rows[0].precio, "25");
        assert_eq!(rows[0].rol, Some(PriceRole::Promotion));
        remove_price_row(&mut rows, 3);
        assert_eq!(rows.len(), 1);
        remove_price_row(&mut rows, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_toggle_default_is_exclusive() {
        let mut items = vec![PresentationForm::blank(), PresentationForm::blank()];
        toggle_default_presentation(&mut items, 0);
        toggle_default_presentation(&mut items, 1);
        assert!(!items[0].es_default);
        assert!(items[1].es_default);
        toggle_default_presentation(&mut items, 1);
        assert!(items.iter().all(|p| !p.es_default));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(PriceRole::parse("DISTRIBUIDOR"), Some(PriceRole::Distributor));
        assert_eq!(PriceRole::parse("MAYORISTA"), None);
    }
}
