//! Tab keys. A key is also what `?active=` carries, so it must round-trip
//! through a string.

use contracts::domain::a001_stock_lot::StockKind;
use contracts::domain::a002_product::EditorMode;

pub const OPERATIONS: &str = "d400_operations";
pub const INVENTORY: &str = "p900_inventory";
pub const PRODUCT_NEW: &str = "a002_product_new";
pub const PRESENTATION_NEW: &str = "a002_presentation_new";

const STOCK_EDIT_PREFIX: &str = "a001_stock_lot_edit_";
const PRODUCT_EDIT_PREFIX: &str = "a002_product_edit_";
const PRESENTATION_EDIT_PREFIX: &str = "a002_presentation_edit_";
const INVOICE_PREFIX: &str = "a003_sale_invoice_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKey {
    Operations,
    Inventory,
    StockEdit { id: i64, kind: Option<StockKind> },
    Editor { mode: EditorMode, id: Option<i64> },
    Invoice { sale_id: i64 },
}

impl TabKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            OPERATIONS => return Some(TabKey::Operations),
            INVENTORY => return Some(TabKey::Inventory),
            PRODUCT_NEW => {
                return Some(TabKey::Editor {
                    mode: EditorMode::Product,
                    id: None,
                })
            }
            PRESENTATION_NEW => {
                return Some(TabKey::Editor {
                    mode: EditorMode::Presentation,
                    id: None,
                })
            }
            _ => {}
        }

        if let Some(rest) = key.strip_prefix(STOCK_EDIT_PREFIX) {
            let (id, kind) = match rest.split_once('_') {
                Some((id, kind)) => (id, Some(StockKind::parse(kind)?)),
                None => (rest, None),
            };
            return Some(TabKey::StockEdit {
                id: id.parse().ok()?,
                kind,
            });
        }
        if let Some(id) = key.strip_prefix(PRODUCT_EDIT_PREFIX) {
            return Some(TabKey::Editor {
                mode: EditorMode::Product,
                id: Some(id.parse().ok()?),
            });
        }
        if let Some(id) = key.strip_prefix(PRESENTATION_EDIT_PREFIX) {
            return Some(TabKey::Editor {
                mode: EditorMode::Presentation,
                id: Some(id.parse().ok()?),
            });
        }
        if let Some(id) = key.strip_prefix(INVOICE_PREFIX) {
            return Some(TabKey::Invoice {
                sale_id: id.parse().ok()?,
            });
        }
        None
    }

    pub fn key(&self) -> String {
        match self {
            TabKey::Operations => OPERATIONS.to_string(),
            TabKey::Inventory => INVENTORY.to_string(),
            TabKey::StockEdit { id, kind: Some(kind) } => {
                format!("{}{}_{}", STOCK_EDIT_PREFIX, id, kind.as_str())
            }
            TabKey::StockEdit { id, kind: None } => format!("{}{}", STOCK_EDIT_PREFIX, id),
            TabKey::Editor {
                mode: EditorMode::Product,
                id: None,
            } => PRODUCT_NEW.to_string(),
            TabKey::Editor {
                mode: EditorMode::Presentation,
                id: None,
            } => PRESENTATION_NEW.to_string(),
            TabKey::Editor {
                mode: EditorMode::Product,
                id: Some(id),
            } => format!("{}{}", PRODUCT_EDIT_PREFIX, id),
            TabKey::Editor {
                mode: EditorMode::Presentation,
                id: Some(id),
            } => format!("{}{}", PRESENTATION_EDIT_PREFIX, id),
            TabKey::Invoice { sale_id } => format!("{}{}", INVOICE_PREFIX, sale_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_keys() {
        assert_eq!(TabKey::parse("p900_inventory"), Some(TabKey::Inventory));
        assert_eq!(TabKey::parse("d400_operations"), Some(TabKey::Operations));
        assert_eq!(TabKey::parse("unknown"), None);
    }

    #[test]
    fn test_stock_edit_key() {
        let key = TabKey::StockEdit {
            id: 12,
            kind: Some(StockKind::Presentation),
        };
        assert_eq!(key.key(), "a001_stock_lot_edit_12_PRESENTACION");
        assert_eq!(TabKey::parse(&key.key()), Some(key));
        assert_eq!(
            TabKey::parse("a001_stock_lot_edit_7"),
            Some(TabKey::StockEdit { id: 7, kind: None })
        );
        assert_eq!(TabKey::parse("a001_stock_lot_edit_x"), None);
    }

    #[test]
    fn test_editor_keys() {
        assert_eq!(
            TabKey::parse("a002_presentation_edit_5"),
            Some(TabKey::Editor {
                mode: EditorMode::Presentation,
                id: Some(5)
            })
        );
        assert_eq!(
            TabKey::Editor {
                mode: EditorMode::Product,
                id: None
            }
            .key(),
            "a002_product_new"
        );
    }
}
