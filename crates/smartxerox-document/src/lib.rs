// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// smartxerox-document: Invoice generation for the Smart Xerox client.
//
// Builds the invoice figures from an order and the signed-in customer, lays
// them out on an A4 page and serialises the PDF. Saving the file is left to
// the platform bridge.

pub mod invoice;
pub mod pdf;
pub mod raster;

pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use pdf::writer::PdfWriter;
pub use raster::RasterSettings;

use smartxerox_core::error::Result;
use smartxerox_core::{Order, ShopIdentity, UserProfile};
use tracing::{debug, info, instrument};

/// A rendered invoice ready to be saved as a download.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub invoice: Invoice,
    pub bytes: Vec<u8>,
}

/// Turns orders into invoice PDFs for one shop.
pub struct InvoiceRenderer {
    shop: ShopIdentity,
    writer: PdfWriter,
    logo: Option<Vec<u8>>,
}

impl InvoiceRenderer {
    pub fn new(shop: ShopIdentity) -> Self {
        Self {
            shop,
            writer: PdfWriter::a4(),
            logo: None,
        }
    }

    pub fn with_margin_in(mut self, margin_in: f32) -> Self {
        self.writer.set_margin_in(margin_in);
        self
    }

    /// Embed a shop logo (PNG/JPEG/...) in the header.
    pub fn with_logo(mut self, logo: Vec<u8>) -> Self {
        self.logo = Some(logo);
        self
    }

    #[instrument(skip_all, fields(order_id = %order.order_id))]
    pub fn render(&self, order: &Order, user: &UserProfile) -> Result<RenderedInvoice> {
        let invoice = Invoice::build(order, user, &self.shop);
        debug!(text = %invoice.to_text(), "invoice figures");
        let bytes = self.writer.render_invoice(&invoice, self.logo.as_deref())?;
        info!(
            invoice = %invoice.number,
            status = invoice.status.label(),
            bytes = bytes.len(),
            "invoice rendered"
        );
        Ok(RenderedInvoice {
            file_name: invoice.file_name(),
            invoice,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Map;

    fn order() -> Order {
        Order {
            order_id: "9c1d2e3f-aaaa-4bbb-8ccc-dddddddddddd".into(),
            print_type: "Colour Print (single-sided)".into(),
            file_names: vec!["poster.png".into()],
            pages: 3,
            copies: 4,
            amount_total: 60.0,
            amount_paid: 30.0,
            instructions: Some("Glossy paper".into()),
            date: Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    fn customer() -> UserProfile {
        UserProfile {
            id: "42".into(),
            name: "Kiran".into(),
            mobile: "9123456780".into(),
            extra: Map::new(),
        }
    }

    #[test]
    fn renders_a_pdf_named_after_the_order() {
        let rendered = InvoiceRenderer::new(ShopIdentity::default())
            .render(&order(), &customer())
            .expect("render");
        assert_eq!(rendered.file_name, "Invoice_9c1d2e3f-aaaa-4bbb-8ccc-dddddddddddd.pdf");
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(rendered.invoice.amount_due, 30.0);
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = InvoiceRenderer::new(ShopIdentity::default());
        let a = renderer.render(&order(), &customer()).expect("render");
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let b = renderer.render(&order(), &customer()).expect("render");
        assert_eq!(a.invoice, b.invoice);
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn rendering_with_a_logo_is_deterministic() {
        let renderer = InvoiceRenderer::new(ShopIdentity::default())
            .with_logo(raster::sample_png(40, 20));
        let a = renderer.render(&order(), &customer()).expect("render");
        let b = renderer.render(&order(), &customer()).expect("render");
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn document_identity_comes_from_the_order() {
        let rendered = InvoiceRenderer::new(ShopIdentity::default())
            .render(&order(), &customer())
            .expect("render");
        let id = pdf::writer::document_id(&order().order_id);
        assert!(contains(&rendered.bytes, format!("({id})({id})").as_bytes()));
        assert!(contains(&rendered.bytes, b"D:20260501090000"));
        assert!(!contains(&rendered.bytes, b"D:19700101"));
    }

    #[test]
    fn logo_is_embedded() {
        let plain = InvoiceRenderer::new(ShopIdentity::default())
            .render(&order(), &customer())
            .expect("render");
        let with_logo = InvoiceRenderer::new(ShopIdentity::default())
            .with_logo(raster::sample_png(120, 60))
            .render(&order(), &customer())
            .expect("render");
        assert!(with_logo.bytes.len() > plain.bytes.len());
    }

    #[test]
    fn undecodable_logo_fails_render() {
        let result = InvoiceRenderer::new(ShopIdentity::default())
            .with_logo(b"nope".to_vec())
            .render(&order(), &customer());
        assert!(result.is_err());
    }
}
