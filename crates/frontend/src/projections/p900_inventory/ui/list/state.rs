use contracts::projections::p900_inventory::ProductInventoryRow;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct InventoryState {
    pub items: Vec<ProductInventoryRow>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "nombre".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<InventoryState> {
    RwSignal::new(InventoryState::default())
}
