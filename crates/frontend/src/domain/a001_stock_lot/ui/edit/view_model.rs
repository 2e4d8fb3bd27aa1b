use super::model;
use crate::shared::query_cache::QueryCache;
use crate::shared::toast::{ToastKind, ToastService};
use chrono::Utc;
use contracts::domain::a001_stock_lot::edit::prepare_submit;
use contracts::domain::a001_stock_lot::{EditStockPhase, StockDatesForm, StockKind};
use contracts::shared::dates::{from_input_date, to_input_date};
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct EditStockVm {
    pub id: i64,
    pub kind: Option<StockKind>,
    pub phase: RwSignal<EditStockPhase>,
    pub form: RwSignal<Option<StockDatesForm>>,
    pub saving: RwSignal<bool>,
}

impl EditStockVm {
    pub fn new(id: i64, kind: Option<StockKind>) -> Self {
        Self {
            id,
            kind,
            phase: RwSignal::new(EditStockPhase::Loading),
            form: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    /// Always hits the server; the lot may have changed since the last open.
    pub fn load(&self) {
        let this = *self;
        this.phase.set(EditStockPhase::Loading);
        spawn_local(async move {
            match model::fetch_stock(this.id, this.kind).await {
                Ok(record) => {
                    this.form
                        .set(Some(StockDatesForm::from_record(&record, Utc::now())));
                    this.phase.set(EditStockPhase::Loaded(record));
                }
                Err(e) => {
                    log::error!("stock {} not loaded: {}", this.id, e);
                    this.phase.set(EditStockPhase::Failed(e));
                }
            }
        });
    }

    pub fn intake_input(&self) -> String {
        self.form
            .with(|f| f.as_ref().map(|f| to_input_date(&f.intake_date)))
            .unwrap_or_default()
    }

    pub fn expiry_input(&self) -> String {
        self.form
            .with(|f| f.as_ref().and_then(|f| f.expiry_date.as_ref().map(to_input_date)))
            .unwrap_or_default()
    }

    /// An empty or invalid intake keeps the previous value.
    pub fn set_intake(&self, value: &str) {
        if let Some(date) = from_input_date(value) {
            self.form.update(|f| {
                if let Some(f) = f {
                    f.intake_date = date;
                }
            });
        }
    }

    /// Clearing the field removes the expiry.
    pub fn set_expiry(&self, value: &str) {
        let date = from_input_date(value);
        self.form.update(|f| {
            if let Some(f) = f {
                f.expiry_date = date;
            }
        });
    }

    pub fn save_command(&self, toast: ToastService, cache: QueryCache, on_saved: Callback<()>) {
        let request = self
            .phase
            .with_untracked(|phase| self.form.with_untracked(|f| prepare_submit(phase, f.as_ref())));
        let Some(request) = request else {
            return;
        };

        let this = *self;
        this.saving.set(true);
        let pending = toast.loading("Actualizando fechas...");
        spawn_local(async move {
            match model::update_dates(&request).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, "Fechas de stock actualizadas");
                    cache.invalidate_all(&[QueryKey::Inventory, QueryKey::StockToEdit(this.id)]);
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("stock {} dates not saved: {}", this.id, e);
                    toast.resolve(pending, ToastKind::Error, e);
                }
            }
            this.saving.set(false);
        });
    }
}
