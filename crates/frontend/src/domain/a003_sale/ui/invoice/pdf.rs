//! A4 receipt drawn with printpdf's built-in Helvetica.

use contracts::domain::a003_sale::receipt::THANK_YOU;
use contracts::domain::a003_sale::{Receipt, ReceiptCustomer};
use contracts::shared::money::format_quetzal;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use thiserror::Error;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_H: f32 = 7.0;
const TABLE_BOTTOM: f32 = 35.0;
const QTY_X: f32 = 120.0;
/// Characters of 9 pt Helvetica that fit between the product column start and
/// the quantity column (about 1.75 mm per character, rounded down).
const NAME_MAX_CHARS: usize = ((QTY_X - MARGIN - 2.0 - 3.0) / 1.75) as usize;

#[derive(Debug, Error)]
pub enum ReceiptPdfError {
    #[error("no se pudo generar el PDF: {0}")]
    Render(String),
}

fn render_err(e: impl std::fmt::Debug) -> ReceiptPdfError {
    ReceiptPdfError::Render(format!("{:?}", e))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Cuts `text` to `max_chars`, ending in `...` when something was dropped.
fn fit_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

fn quantity_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Closed rectangle outline from its lower-left and upper-right corners.
fn outline(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
            (Point::new(Mm(x1), Mm(y2)), false),
        ],
        is_closed: true,
    });
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_W - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn table_header(layer: &PdfLayerReference, fonts: &Fonts, y: f32) {
    layer.use_text("Producto", 10.0, Mm(MARGIN + 2.0), Mm(y), &fonts.bold);
    layer.use_text("Cant.", 10.0, Mm(QTY_X), Mm(y), &fonts.bold);
    layer.use_text("P. unitario", 10.0, Mm(140.0), Mm(y), &fonts.bold);
    layer.use_text("Subtotal", 10.0, Mm(172.0), Mm(y), &fonts.bold);
    rule(layer, y - 2.5);
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Contenido");
    doc.get_page(page).get_layer(layer)
}

/// Renders the receipt and returns the PDF bytes. Long product lists
/// continue on extra pages with the table header repeated.
pub fn render_receipt(receipt: &Receipt) -> Result<Vec<u8>, ReceiptPdfError> {
    let title = format!("Comprobante {}", receipt.sale_id);
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Contenido");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?,
    };
    let mut layer = doc.get_page(page).get_layer(layer);
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(0.5);

    // Header
    layer.use_text(&receipt.branch_name, 18.0, Mm(MARGIN), Mm(278.0), &fonts.bold);
    layer.use_text(
        format!("Comprobante #{}", receipt.sale_id),
        12.0,
        Mm(140.0),
        Mm(279.0),
        &fonts.bold,
    );
    rule(&layer, 272.0);

    // Branch and sale detail boxes
    outline(&layer, MARGIN, 242.0, 102.0, 268.0);
    layer.use_text("Sucursal", 10.0, Mm(MARGIN + 3.0), Mm(262.0), &fonts.bold);
    layer.use_text(
        format!("Dirección: {}", receipt.branch_address),
        9.0,
        Mm(MARGIN + 3.0),
        Mm(255.0),
        &fonts.regular,
    );
    layer.use_text(
        format!("Teléfono: {}", receipt.branch_phone),
        9.0,
        Mm(MARGIN + 3.0),
        Mm(249.0),
        &fonts.regular,
    );

    outline(&layer, 108.0, 242.0, PAGE_W - MARGIN, 268.0);
    layer.use_text("Detalle de la venta", 10.0, Mm(111.0), Mm(262.0), &fonts.bold);
    layer.use_text(
        format!("Fecha: {}", receipt.sold_at),
        9.0,
        Mm(111.0),
        Mm(255.0),
        &fonts.regular,
    );
    layer.use_text(
        format!("Método de pago: {}", receipt.payment_method),
        9.0,
        Mm(111.0),
        Mm(249.0),
        &fonts.regular,
    );

    // Customer box
    outline(&layer, MARGIN, 208.0, PAGE_W - MARGIN, 236.0);
    layer.use_text("Cliente", 10.0, Mm(MARGIN + 3.0), Mm(230.0), &fonts.bold);
    match &receipt.customer {
        ReceiptCustomer::Identified {
            name,
            phone,
            address,
            dpi,
            imei,
        } => {
            layer.use_text(format!("Nombre: {}", name), 9.0, Mm(MARGIN + 3.0), Mm(223.0), &fonts.regular);
            layer.use_text(format!("Teléfono: {}", phone), 9.0, Mm(MARGIN + 3.0), Mm(217.0), &fonts.regular);
            layer.use_text(format!("Dirección: {}", address), 9.0, Mm(MARGIN + 3.0), Mm(211.0), &fonts.regular);
            if let Some(dpi) = dpi {
                layer.use_text(format!("DPI: {}", dpi), 9.0, Mm(111.0), Mm(223.0), &fonts.regular);
            }
            if let Some(imei) = imei {
                layer.use_text(format!("IMEI: {}", imei), 9.0, Mm(111.0), Mm(217.0), &fonts.regular);
            }
        }
        ReceiptCustomer::WalkIn => {
            layer.use_text("Cliente Final", 9.0, Mm(MARGIN + 3.0), Mm(223.0), &fonts.regular);
        }
    }

    // Products table
    let mut y = 198.0;
    table_header(&layer, &fonts, y);
    y -= ROW_H + 1.0;
    for line in &receipt.lines {
        if y < TABLE_BOTTOM {
            layer = new_page(&doc);
            layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
            y = PAGE_H - 25.0;
            table_header(&layer, &fonts, y);
            y -= ROW_H + 1.0;
        }
        let name = match &line.description {
            Some(desc) => format!("{} ({})", line.name, desc),
            None => line.name.clone(),
        };
        layer.use_text(fit_text(&name, NAME_MAX_CHARS), 9.0, Mm(MARGIN + 2.0), Mm(y), &fonts.regular);
        layer.use_text(quantity_text(line.quantity), 9.0, Mm(QTY_X), Mm(y), &fonts.regular);
        layer.use_text(format_quetzal(line.unit_price), 9.0, Mm(140.0), Mm(y), &fonts.regular);
        layer.use_text(format_quetzal(line.subtotal), 9.0, Mm(172.0), Mm(y), &fonts.regular);
        y -= ROW_H;
    }

    // Total
    rule(&layer, y + 3.0);
    layer.use_text("Total", 12.0, Mm(140.0), Mm(y - 4.0), &fonts.bold);
    layer.use_text(format_quetzal(receipt.total), 12.0, Mm(172.0), Mm(y - 4.0), &fonts.bold);

    // Footer
    layer.use_text(THANK_YOU, 10.0, Mm(PAGE_W / 2.0 - 20.0), Mm(15.0), &fonts.regular);

    doc.save_to_bytes().map_err(render_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_sale::ReceiptLine;

    fn receipt(lines: usize) -> Receipt {
        Receipt {
            sale_id: 77,
            branch_name: "Nova Centro".to_string(),
            branch_address: "No disponible".to_string(),
            branch_phone: "No disponible".to_string(),
            sold_at: "1 de julio de 2024, 14:15".to_string(),
            payment_method: "CONTADO".to_string(),
            customer: ReceiptCustomer::WalkIn,
            lines: (0..lines)
                .map(|i| ReceiptLine {
                    name: format!("Producto {}", i),
                    description: None,
                    quantity: 1.0,
                    unit_price: 10.0,
                    subtotal: 10.0,
                })
                .collect(),
            total: lines as f64 * 10.0,
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_receipt(&receipt(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_receipt_spans_pages() {
        let bytes = render_receipt(&receipt(60)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_product_names_fit_the_column() {
        let long = "Cargador inalámbrico de carga rápida 15W (compatible con teléfonos y auriculares)";
        let fitted = fit_text(long, NAME_MAX_CHARS);
        assert!(fitted.chars().count() <= NAME_MAX_CHARS);
        assert!(fitted.ends_with("..."));
        assert!(fitted.starts_with("Cargador inalámbrico"));
        assert_eq!(fit_text("Mica templada", NAME_MAX_CHARS), "Mica templada");

        let mut r = receipt(1);
        r.lines[0].name = long.to_string();
        r.lines[0].description = Some("Color negro, empaque original".to_string());
        let bytes = render_receipt(&r).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_quantity_text() {
        assert_eq!(quantity_text(2.0), "2");
        assert_eq!(quantity_text(1.5), "1.50");
    }
}
