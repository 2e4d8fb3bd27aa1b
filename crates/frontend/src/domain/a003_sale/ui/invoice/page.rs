use super::model;
use super::pdf::render_receipt;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::clock::local_offset;
use crate::shared::components::status::{ErrorBlock, LoadingBlock};
use crate::shared::download::{bytes_to_blob, download_url, object_url, revoke_url, PDF_MIME};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DOCUMENT;
use crate::shared::toast::use_toast;
use contracts::domain::a003_sale::receipt::{receipt_file_name, THANK_YOU};
use contracts::domain::a003_sale::{Receipt, ReceiptCustomer};
use contracts::shared::money::format_quetzal;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn pdf_url(receipt: &Receipt) -> Result<String, String> {
    let bytes = render_receipt(receipt).map_err(|e| e.to_string())?;
    let blob = bytes_to_blob(&bytes, PDF_MIME)?;
    object_url(&blob)
}

#[component]
pub fn InvoicePage(
    sale_id: i64,
    tab_key: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();

    let receipt = RwSignal::new(None::<Receipt>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);
    let pdf = RwSignal::new(None::<String>);
    let tab_key = StoredValue::new(tab_key);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match model::fetch_sale(sale_id).await {
                Ok(sale) => {
                    let built = Receipt::from_sale(&sale, local_offset());
                    let title = detail_tab_label("Comprobante", &format!("#{}", built.sale_id));
                    tab_key.with_value(|key| tabs_store.update_tab_title(key, &title));
                    match pdf_url(&built) {
                        Ok(url) => {
                            if let Some(old) = pdf.get_untracked() {
                                revoke_url(&old);
                            }
                            pdf.set(Some(url));
                        }
                        Err(e) => log::error!("receipt {} PDF not generated: {}", sale_id, e),
                    }
                    receipt.set(Some(built));
                }
                Err(e) => {
                    log::error!("sale {} not loaded: {}", sale_id, e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };
    load();

    on_cleanup(move || {
        if let Some(url) = pdf.get_untracked() {
            revoke_url(&url);
        }
    });

    let download = move |_| {
        let Some(url) = pdf.get_untracked() else {
            toast.warning("El PDF aún no está disponible");
            return;
        };
        if let Err(e) = download_url(&url, &receipt_file_name(sale_id)) {
            log::error!("download failed: {}", e);
            toast.error("No se pudo descargar el comprobante");
        }
    };

    view! {
        <PageFrame page_id="a003_sale--document" category=PAGE_CAT_DOCUMENT>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("receipt")}
                    <h2>{format!("Comprobante #{}", sale_id)}</h2>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=download
                        disabled=Signal::derive(move || pdf.get().is_none())
                    >
                        {icon("download")}
                        "Descargar PDF"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cerrar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if loading.get() {
                        return view! { <LoadingBlock label="Generando comprobante..." /> }.into_any();
                    }
                    if let Some(err) = error.get() {
                        return view! {
                            <ErrorBlock
                                message=format!("No se pudo cargar la venta: {}", err)
                                on_retry=Callback::new(move |_| load())
                            />
                        }.into_any();
                    }
                    match (pdf.get(), receipt.get()) {
                        (Some(url), _) => view! {
                            <iframe class="document-viewer" src=url title="Comprobante"></iframe>
                        }.into_any(),
                        (None, Some(r)) => view! { <ReceiptPreview receipt=r /> }.into_any(),
                        (None, None) => view! { <div>"Sin datos"</div> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

/// HTML rendition of the receipt, shown when the PDF could not be built.
#[component]
fn ReceiptPreview(receipt: Receipt) -> impl IntoView {
    let customer = match receipt.customer {
        ReceiptCustomer::Identified {
            name,
            phone,
            address,
            dpi,
            imei,
        } => view! {
            <div><strong>"Nombre: "</strong>{name}</div>
            <div><strong>"Teléfono: "</strong>{phone}</div>
            <div><strong>"Dirección: "</strong>{address}</div>
            {dpi.map(|d| view! { <div><strong>"DPI: "</strong>{d}</div> })}
            {imei.map(|i| view! { <div><strong>"IMEI: "</strong>{i}</div> })}
        }
        .into_any(),
        ReceiptCustomer::WalkIn => view! { <div>"Cliente Final"</div> }.into_any(),
    };

    view! {
        <div class="receipt">
            <div class="receipt__header">
                <h3>{receipt.branch_name}</h3>
                <span>{format!("Comprobante #{}", receipt.sale_id)}</span>
            </div>
            <div class="receipt__boxes">
                <div class="receipt__box">
                    <h4>"Sucursal"</h4>
                    <div>{format!("Dirección: {}", receipt.branch_address)}</div>
                    <div>{format!("Teléfono: {}", receipt.branch_phone)}</div>
                </div>
                <div class="receipt__box">
                    <h4>"Detalle de la venta"</h4>
                    <div>{format!("Fecha: {}", receipt.sold_at)}</div>
                    <div>{format!("Método de pago: {}", receipt.payment_method)}</div>
                </div>
            </div>
            <div class="receipt__box">
                <h4>"Cliente"</h4>
                {customer}
            </div>
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th class="text-right">"Cant."</th>
                        <th class="text-right">"P. unitario"</th>
                        <th class="text-right">"Subtotal"</th>
                    </tr>
                </thead>
                <tbody>
                    {receipt.lines.into_iter().map(|line| view! {
                        <tr>
                            <td>
                                {line.name}
                                {line.description.map(|d| view! { <div class="text-muted">{d}</div> })}
                            </td>
                            <td class="text-right">{line.quantity.to_string()}</td>
                            <td class="text-right">{format_quetzal(line.unit_price)}</td>
                            <td class="text-right">{format_quetzal(line.subtotal)}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            <div class="receipt__total">
                <span>"Total"</span>
                <strong>{format_quetzal(receipt.total)}</strong>
            </div>
            <div class="receipt__footer">{THANK_YOU}</div>
        </div>
    }
}
