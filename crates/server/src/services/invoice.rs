//! Invoice PDF rendering.
//!
//! Split into two stages: [`InvoiceDocument`] is the pure layout model
//! built from an order (testable without touching PDF machinery), and
//! [`render`] turns it into PDF bytes with the builtin Helvetica/Courier
//! fonts. Amounts are taken verbatim from the stored price snapshots, so
//! an invoice regenerated years later shows the same numbers.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use iceshopz_core::{Cents, OrderId};

use super::orders::OrderForInvoice;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;

/// Points-to-millimetres conversion factor.
const PT_TO_MM: f32 = 0.352_778;

/// Courier glyph advance as a fraction of the font size. Used to
/// right-align amounts; the builtin fonts carry no metrics at runtime and
/// Courier is fixed-pitch.
const COURIER_ADVANCE: f32 = 0.6;

/// Errors that can occur while rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// PDF generation failed.
    #[error("pdf rendering failed: {0}")]
    Render(String),
}

/// One line on the invoice: item name, quantity, and line amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub name: String,
    pub qty: i32,
    pub amount: Cents,
}

/// The pure layout model for an invoice, independent of the PDF backend.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
    pub total: Cents,
}

impl InvoiceDocument {
    /// Build the layout model from a loaded order.
    #[must_use]
    pub fn from_order(source: &OrderForInvoice) -> Self {
        let lines = source
            .items
            .iter()
            .map(|item| InvoiceLine {
                name: item.name.clone(),
                qty: item.qty,
                amount: item.price_cents.times(i64::from(item.qty)),
            })
            .collect();

        Self {
            order_id: source.order.id,
            customer_name: source.customer_name.clone(),
            customer_email: source.customer_email.clone(),
            created_at: source.order.created_at,
            lines,
            total: source.order.total_cents,
        }
    }

    /// The download filename for this invoice.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("CJICE_Order_{}.pdf", self.order_id)
    }

    /// The PDF document title.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Invoice for Order #{}", self.order_id)
    }
}

/// Render an invoice to PDF bytes.
///
/// # Errors
///
/// Returns `InvoiceError::Render` if the PDF backend fails.
pub fn render(invoice: &InvoiceDocument) -> Result<Vec<u8>, InvoiceError> {
    let (doc, page, layer) = PdfDocument::new(
        invoice.title(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "invoice",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;
    let mono = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(render_err)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    current.use_text("CJ ICE SHOPZ", 20.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= LINE_HEIGHT_MM * 1.5;

    current.use_text(invoice.title(), 14.0, Mm(MARGIN_MM), Mm(y), &regular);
    y -= LINE_HEIGHT_MM;

    current.use_text(
        format!(
            "Customer: {} ({})",
            invoice.customer_name, invoice.customer_email
        ),
        11.0,
        Mm(MARGIN_MM),
        Mm(y),
        &regular,
    );
    y -= LINE_HEIGHT_MM;

    current.use_text(
        format!("Date: {}", invoice.created_at.format("%d %b %Y, %H:%M UTC")),
        11.0,
        Mm(MARGIN_MM),
        Mm(y),
        &regular,
    );
    y -= LINE_HEIGHT_MM * 2.0;

    for line in &invoice.lines {
        if y < MARGIN_MM + LINE_HEIGHT_MM {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "invoice");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        current.use_text(
            format!("{} x{}", line.name, line.qty),
            11.0,
            Mm(MARGIN_MM),
            Mm(y),
            &regular,
        );

        let amount = pdf_amount(line.amount);
        current.use_text(
            amount.clone(),
            11.0,
            Mm(right_aligned_x(&amount, 11.0)),
            Mm(y),
            &mono,
        );
        y -= LINE_HEIGHT_MM;
    }

    y -= LINE_HEIGHT_MM;
    if y < MARGIN_MM + LINE_HEIGHT_MM {
        let (next_page, next_layer) =
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "invoice");
        current = doc.get_page(next_page).get_layer(next_layer);
        y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    current.use_text("Total:", 13.0, Mm(MARGIN_MM), Mm(y), &bold);
    let total = pdf_amount(invoice.total);
    current.use_text(
        total.clone(),
        13.0,
        Mm(right_aligned_x(&total, 13.0)),
        Mm(y),
        &mono,
    );

    doc.save_to_bytes().map_err(render_err)
}

/// Format an amount for the PDF. The builtin PDF fonts only cover the
/// WinAnsi character set, which has no rupee sign, so invoices spell it
/// out as `Rs.`.
fn pdf_amount(amount: Cents) -> String {
    let formatted = amount.format_inr();
    match formatted.strip_prefix('₹') {
        Some(rest) => format!("Rs. {rest}"),
        None => formatted.replace('₹', "Rs. "),
    }
}

/// X position that right-aligns a Courier string against the page margin.
#[allow(clippy::cast_precision_loss)] // amounts are short strings
fn right_aligned_x(text: &str, font_size: f32) -> f32 {
    let width = text.chars().count() as f32 * COURIER_ADVANCE * font_size * PT_TO_MM;
    PAGE_WIDTH_MM - MARGIN_MM - width
}

fn render_err(e: impl std::fmt::Display) -> InvoiceError {
    InvoiceError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{ORDER_STATUS_PAID, Order, OrderItemDetail};
    use iceshopz_core::{OrderItemId, ProductId, UserId};

    fn sample_order() -> OrderForInvoice {
        let order = Order {
            id: OrderId::new(7),
            user_id: UserId::new(3),
            total_cents: Cents::new(25_000),
            status: ORDER_STATUS_PAID.to_string(),
            created_at: Utc::now(),
        };
        let items = vec![
            OrderItemDetail {
                id: OrderItemId::new(1),
                order_id: order.id,
                product_id: ProductId::new(1),
                qty: 2,
                price_cents: Cents::new(8000),
                name: "Rainbow Cone".to_string(),
                image_url: None,
            },
            OrderItemDetail {
                id: OrderItemId::new(2),
                order_id: order.id,
                product_id: ProductId::new(2),
                qty: 1,
                price_cents: Cents::new(9000),
                name: "Choco Blast Cup".to_string(),
                image_url: None,
            },
        ];

        OrderForInvoice {
            order,
            items,
            customer_name: "Asha".to_string(),
            customer_email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn test_document_layout_from_order() {
        let doc = InvoiceDocument::from_order(&sample_order());

        assert_eq!(doc.filename(), "CJICE_Order_7.pdf");
        assert_eq!(doc.title(), "Invoice for Order #7");
        assert_eq!(doc.lines.len(), 2);
        // Line amounts come from the snapshots, qty applied
        assert_eq!(
            doc.lines[0],
            InvoiceLine {
                name: "Rainbow Cone".to_string(),
                qty: 2,
                amount: Cents::new(16_000),
            }
        );
        assert_eq!(doc.total, Cents::new(25_000));
    }

    #[test]
    fn test_pdf_amount_spells_out_currency() {
        assert_eq!(pdf_amount(Cents::new(16_000)), "Rs. 160.00");
        assert_eq!(pdf_amount(Cents::new(12_345_678)), "Rs. 1,23,456.78");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let doc = InvoiceDocument::from_order(&sample_order());
        let bytes = render(&doc).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_paginates_long_orders() {
        let mut source = sample_order();
        let template = source.items[0].clone();
        source.items = (0..80)
            .map(|i| {
                let mut item = template.clone();
                item.id = OrderItemId::new(i);
                item
            })
            .collect();

        let doc = InvoiceDocument::from_order(&source);
        let bytes = render(&doc).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
