use super::model;
use crate::shared::query_cache::QueryCache;
use crate::shared::toast::{ToastKind, ToastService};
use contracts::domain::a002_product::prices::{
    add_presentation, add_price_row, remove_presentation, remove_price_row,
    toggle_default_presentation, update_price_row, PriceRowChange,
};
use contracts::domain::a002_product::{
    validate_before_submit, BasicInfo, Category, EditorMode, ExistingImage, PresentationForm,
    PresentationType, PriceRow, ProductForm,
};
use contracts::shared::lenient::parse_number;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Edit applied to a price list.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceEdit {
    Add,
    Remove(usize),
    Update(usize, PriceRowChange),
}

fn apply_price_edit(rows: &mut Vec<PriceRow>, edit: PriceEdit) {
    match edit {
        PriceEdit::Add => add_price_row(rows),
        PriceEdit::Remove(index) => remove_price_row(rows, index),
        PriceEdit::Update(index, change) => update_price_row(rows, index, change),
    }
}

fn number_or_zero(value: &str) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

fn number_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

#[derive(Clone, Copy)]
pub struct ProductEditorVm {
    pub mode: EditorMode,
    pub id: Option<i64>,

    // === Basic block ===
    pub nombre: RwSignal<String>,
    pub codigo_producto: RwSignal<String>,
    pub codigo_proveedor: RwSignal<String>,
    pub stock_minimo: RwSignal<String>,
    pub precio_costo: RwSignal<String>,
    pub descripcion: RwSignal<String>,
    pub tipo_presentacion_id: RwSignal<String>,
    pub categorias: RwSignal<Vec<i64>>,
    pub images: RwSignal<Vec<ExistingImage>>,

    // === Rows ===
    pub prices: RwSignal<Vec<PriceRow>>,
    pub presentations: RwSignal<Vec<PresentationForm>>,

    // === Reference data ===
    pub all_categories: RwSignal<Vec<Category>>,
    pub presentation_types: RwSignal<Vec<PresentationType>>,

    // === UI State ===
    pub record_name: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub validation_errors: RwSignal<Vec<String>>,
}

impl ProductEditorVm {
    pub fn new(mode: EditorMode, id: Option<i64>) -> Self {
        Self {
            mode,
            id,
            nombre: RwSignal::new(String::new()),
            codigo_producto: RwSignal::new(String::new()),
            codigo_proveedor: RwSignal::new(String::new()),
            stock_minimo: RwSignal::new(String::new()),
            precio_costo: RwSignal::new(String::new()),
            descripcion: RwSignal::new(String::new()),
            tipo_presentacion_id: RwSignal::new(String::new()),
            categorias: RwSignal::new(Vec::new()),
            images: RwSignal::new(Vec::new()),
            prices: RwSignal::new(Vec::new()),
            presentations: RwSignal::new(Vec::new()),
            all_categories: RwSignal::new(Vec::new()),
            presentation_types: RwSignal::new(Vec::new()),
            record_name: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            validation_errors: RwSignal::new(Vec::new()),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    /// Categories and presentation types feed the selects in both modes.
    pub fn load_reference_data(&self) {
        let this = *self;
        spawn_local(async move {
            match model::fetch_categories().await {
                Ok(items) => this.all_categories.set(items),
                Err(e) => log::warn!("categories not loaded: {}", e),
            }
        });
        spawn_local(async move {
            match model::fetch_presentation_types().await {
                Ok(items) => this.presentation_types.set(items),
                Err(e) => log::warn!("presentation types not loaded: {}", e),
            }
        });
    }

    pub fn load(&self) {
        let Some(id) = self.id else {
            if self.mode == EditorMode::Presentation {
                self.presentations.set(vec![PresentationForm::blank()]);
            }
            return;
        };
        let this = *self;
        this.loading.set(true);
        this.error.set(None);
        spawn_local(async move {
            match model::fetch_form(this.mode, id).await {
                Ok((form, name)) => {
                    this.from_form(&form);
                    this.record_name.set(Some(name));
                }
                Err(e) => {
                    log::error!("{} {} not loaded: {}", this.mode.noun(), id, e);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    fn from_form(&self, form: &ProductForm) {
        let info = &form.basic_info;
        self.nombre.set(info.nombre.clone());
        self.codigo_producto.set(info.codigo_producto.clone());
        self.codigo_proveedor.set(info.codigo_proveedor.clone());
        self.stock_minimo.set(number_text(info.stock_minimo));
        self.precio_costo.set(number_text(info.precio_costo_actual));
        self.tipo_presentacion_id.set(
            info.tipo_presentacion_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        self.categorias.set(info.categorias.clone());
        self.descripcion.set(form.description.clone());
        self.images.set(form.images.clone());
        self.prices.set(form.prices.clone());
        self.presentations.set(form.presentations.clone());
    }

    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            basic_info: BasicInfo {
                nombre: self.nombre.get_untracked(),
                codigo_producto: self.codigo_producto.get_untracked(),
                codigo_proveedor: self.codigo_proveedor.get_untracked(),
                stock_minimo: number_or_zero(&self.stock_minimo.get_untracked()),
                precio_costo_actual: number_or_zero(&self.precio_costo.get_untracked()),
                categorias: self.categorias.get_untracked(),
                tipo_presentacion_id: self.tipo_presentacion_id.get_untracked().trim().parse().ok(),
            },
            description: self.descripcion.get_untracked(),
            images: self.images.get_untracked(),
            prices: self.prices.get_untracked(),
            presentations: self.presentations.get_untracked(),
        }
    }

    pub fn toggle_category(&self, id: i64) {
        self.categorias.update(|ids| {
            if let Some(pos) = ids.iter().position(|c| *c == id) {
                ids.remove(pos);
            } else {
                ids.push(id);
            }
        });
    }

    pub fn edit_prices(&self, edit: PriceEdit) {
        self.prices.update(|rows| apply_price_edit(rows, edit));
    }

    pub fn edit_presentation_prices(&self, index: usize, edit: PriceEdit) {
        self.presentations.update(|items| {
            if let Some(item) = items.get_mut(index) {
                apply_price_edit(&mut item.precios, edit);
            }
        });
    }

    pub fn update_presentation(&self, index: usize, apply: impl FnOnce(&mut PresentationForm)) {
        self.presentations.update(|items| {
            if let Some(item) = items.get_mut(index) {
                apply(item);
            }
        });
    }

    pub fn add_presentation(&self) {
        self.presentations.update(add_presentation);
    }

    pub fn remove_presentation(&self, index: usize) {
        self.presentations
            .update(|items| remove_presentation(items, index));
    }

    pub fn toggle_default(&self, index: usize) {
        self.presentations
            .update(|items| toggle_default_presentation(items, index));
    }

    /// Validates, submits and invalidates the affected queries. Every
    /// validation message is shown at once.
    pub fn save_command(
        &self,
        user_id: Option<i64>,
        toast: ToastService,
        cache: QueryCache,
        on_saved: Callback<()>,
    ) {
        let form = self.to_form();
        if let Err(errors) = validate_before_submit(&form, self.mode) {
            for message in &errors {
                toast.error(message.clone());
            }
            self.validation_errors.set(errors);
            return;
        }
        self.validation_errors.set(Vec::new());

        let Some(user_id) = user_id else {
            toast.error("No hay un usuario en sesión.");
            return;
        };

        let this = *self;
        let editing = this.is_edit_mode();
        this.saving.set(true);
        let pending = toast.loading(this.mode.pending_message(editing));
        spawn_local(async move {
            match model::submit(this.mode, this.id, &form, user_id).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, this.mode.success_message(editing));
                    cache.invalidate_all(&this.mode.keys_to_invalidate(this.id));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("{} not saved: {}", this.mode.noun(), e);
                    toast.resolve(pending, ToastKind::Error, e);
                }
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_product::PriceRole;

    #[test]
    fn test_apply_price_edit() {
        let mut rows = Vec::new();
        apply_price_edit(&mut rows, PriceEdit::Add);
        apply_price_edit(&mut rows, PriceEdit::Add);
        apply_price_edit(
            &mut rows,
            PriceEdit::Update(1, PriceRowChange::Role(Some(PriceRole::Promotion))),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].orden, 2);
        assert_eq!(rows[1].rol, Some(PriceRole::Promotion));

        apply_price_edit(&mut rows, PriceEdit::Remove(0));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rol, Some(PriceRole::Promotion));
    }

    #[test]
    fn test_number_helpers() {
        assert_eq!(number_or_zero("12.5"), 12.5);
        assert_eq!(number_or_zero("abc"), 0.0);
        assert_eq!(number_text(0.0), "");
        assert_eq!(number_text(3.0), "3");
    }
}
