pub mod aggregate;
pub mod mapping;
pub mod prices;
pub mod validation;

pub use aggregate::{
    BasicInfo, Category, EditorMode, ExistingImage, Paginated, PresentationDetail, PresentationForm,
    PresentationType, PriceDetail, PriceRow, ProductDetail, ProductForm, SubmitMethod,
    SubmitProductRequest, CATEGORIES_PATH, PRESENTATION_TYPES_PATH,
};
pub use prices::PriceRole;
pub use validation::validate_before_submit;
