// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: lay an invoice out on a single page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Coordinates start bottom-left; the layout below works
// top-down and converts.
//
// The same invoice always serialises to the same bytes: metadata dates come
// from the order and every generated identifier is derived from the order id.

use chrono::{DateTime, Datelike, Timelike, Utc};
use printpdf::date::{Date as PdfDate, DateTime as PdfDateTime, Offset, Time as PdfTime};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, Rgb, TextItem, XObject, XObjectId, XObjectTransform,
};
use smartxerox_core::error::ShopError;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::invoice::{Invoice, rupees};
use crate::raster::{RasterSettings, prepare_image};

const INCH_PT: f32 = 72.0;

/// A4 portrait, millimetres.
const A4_MM: (f32, f32) = (210.0, 297.0);

/// Resource name of the header logo.
const LOGO_XOBJECT: &str = "Logo";

/// Page margin of the generated invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub margin_in: f32,
}

impl Default for PageFormat {
    fn default() -> Self {
        Self { margin_in: 0.5 }
    }
}

impl PageFormat {
    fn dimensions(&self) -> (Mm, Mm) {
        (Mm(A4_MM.0), Mm(A4_MM.1))
    }
}

/// Creates invoice PDFs.
pub struct PdfWriter {
    format: PageFormat,
    raster: RasterSettings,
}

impl PdfWriter {
    pub fn new(format: PageFormat, raster: RasterSettings) -> Self {
        Self { format, raster }
    }

    /// A4 portrait with a half-inch margin.
    pub fn a4() -> Self {
        Self::new(PageFormat::default(), RasterSettings::default())
    }

    pub fn set_margin_in(&mut self, margin_in: f32) {
        self.format.margin_in = margin_in;
    }

    /// Lay out `invoice` and serialise it. `logo` is any image format the
    /// `image` crate decodes; it is rasterised per the writer's settings.
    #[instrument(skip(self, invoice, logo), fields(invoice = %invoice.number))]
    pub fn render_invoice(
        &self,
        invoice: &Invoice,
        logo: Option<&[u8]>,
    ) -> Result<Vec<u8>, ShopError> {
        let (page_w, page_h) = self.format.dimensions();
        let title = format!("Invoice {}", invoice.number);

        info!(%title, "Creating invoice PDF");

        let mut doc = PdfDocument::new(&title);
        stamp_metadata(&mut doc, invoice);
        let mut canvas = Canvas::new(page_w.into_pt().0, page_h.into_pt().0, self.format.margin_in);

        canvas.watermark(&invoice.shop.name.to_uppercase());

        // Header: optional logo, shop identity on the left, invoice id on the right.
        let mut text_left = 0.0;
        if let Some(bytes) = logo {
            let prepared = prepare_image(bytes, 0.75, &self.raster)?;
            let (w, h) = (prepared.width_pt(), prepared.height_pt());
            let id = XObjectId(LOGO_XOBJECT.to_owned());
            doc.resources
                .xobjects
                .map
                .insert(id.clone(), XObject::Image(prepared.raw));
            canvas.ops.push(Op::UseXobject {
                id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(canvas.left)),
                    translate_y: Some(Pt(canvas.top - h)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(prepared.dpi),
                    rotate: None,
                },
            });
            text_left = w + 10.0;
            debug!(w, h, "logo placed");
        }

        let header_top = canvas.cursor;
        canvas.text_at(text_left, 24.0, Font::Bold, YELLOW, &invoice.shop.name);
        canvas.advance(16.0);
        canvas.text_at(text_left, 10.0, Font::Regular, DARK, &invoice.shop.address);
        canvas.advance(14.0);
        canvas.text_at(text_left, 10.0, Font::Regular, DARK, &invoice.shop.phone);
        let header_bottom = canvas.cursor;

        canvas.cursor = header_top;
        canvas.text_right(18.0, Font::Bold, GREY, "INVOICE");
        canvas.advance(20.0);
        canvas.text_right(11.0, Font::Bold, DARK, &format!("#{}", invoice.number));
        canvas.advance(14.0);
        canvas.text_right(11.0, Font::Regular, DARK, &invoice.date);
        canvas.cursor = canvas.cursor.max(header_bottom);

        canvas.advance(20.0);
        canvas.rule(LIGHT_RULE, 2.0);

        // Bill to
        canvas.advance(30.0);
        canvas.text_at(0.0, 9.0, Font::Regular, GREY, "BILL TO");
        canvas.advance(18.0);
        canvas.text_at(0.0, 14.0, Font::Bold, DARK, &invoice.bill_to_name);
        canvas.advance(16.0);
        canvas.text_at(0.0, 11.0, Font::Regular, DARK, &invoice.bill_to_mobile);

        // Line item table
        let qty_x = canvas.width() * 0.6;
        canvas.advance(30.0);
        canvas.text_at(0.0, 10.0, Font::Bold, DARK, "Item / Description");
        canvas.text_at(qty_x, 10.0, Font::Bold, DARK, "Qty");
        canvas.text_right(10.0, Font::Bold, DARK, "Price");
        canvas.advance(8.0);
        canvas.rule(TABLE_RULE, 1.0);

        canvas.advance(18.0);
        canvas.text_at(0.0, 11.0, Font::Bold, DARK, &invoice.item.description);
        canvas.text_at(qty_x, 11.0, Font::Regular, DARK, &invoice.item.quantity);
        canvas.text_right(11.0, Font::Regular, DARK, &rupees(invoice.item.amount));
        let max_chars = (qty_x / char_width(9.0, Font::Regular)) as usize;
        for line in wrap_text(&invoice.item.files, max_chars.saturating_sub(2).max(8)) {
            canvas.advance(12.0);
            canvas.text_at(0.0, 9.0, Font::Regular, GREY, &line);
        }
        canvas.advance(10.0);
        canvas.rule(LIGHT_RULE, 1.0);

        // Totals
        canvas.advance(24.0);
        canvas.text_right(11.0, Font::Regular, DARK, &format!("Subtotal: {}", rupees(invoice.subtotal)));
        canvas.advance(16.0);
        canvas.text_right(
            11.0,
            Font::Regular,
            DARK,
            &format!("Advance Paid: -{}", rupees(invoice.advance_paid)),
        );
        canvas.advance(24.0);
        canvas.text_right(14.0, Font::Bold, BLUE, &format!("Total Due: {}", rupees(invoice.amount_due)));

        // Footer
        canvas.advance(50.0);
        canvas.rule(LIGHT_RULE, 1.0);
        canvas.advance(20.0);
        canvas.text_centered(9.0, Font::Regular, GREY, &format!("Thank you for choosing {}!", invoice.shop.name));
        canvas.advance(13.0);
        canvas.text_centered(
            9.0,
            Font::Regular,
            GREY,
            &format!("For any queries, contact support at {}", invoice.shop.phone),
        );
        canvas.advance(18.0);
        let (r, g, b) = invoice.status.color();
        canvas.text_centered(10.0, Font::Bold, (r, g, b), &format!("STATUS: {}", invoice.status.label()));

        debug!(ops = canvas.ops.len(), "Invoice layout complete");

        doc.with_pages(vec![PdfPage::new(page_w, page_h, canvas.ops)]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let mut output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }

        let pinned = pin_trailer_id(&mut output, document_id(&invoice.order_id).as_bytes());
        if pinned != 2 {
            warn!(pinned, "trailer /ID not found where expected");
        }

        Ok(output)
    }

}

// -- Document identity --------------------------------------------------------

/// Info dictionary: issue date of the order, order id as identifier.
fn stamp_metadata(doc: &mut PdfDocument, invoice: &Invoice) {
    let issued = pdf_date(&invoice.issued_at);
    let info = &mut doc.metadata.info;
    info.creation_date = issued;
    info.modification_date = issued;
    info.metadata_date = issued;
    info.identifier = invoice.order_id.clone();
    info.subject = format!("Invoice for order {}", invoice.order_id);
    info.creator = invoice.shop.name.clone();
}

fn pdf_date(at: &DateTime<Utc>) -> PdfDateTime {
    PdfDateTime::new_in_offset(
        PdfDate {
            year: at.year(),
            month: at.month() as u8,
            day: at.day() as u8,
        },
        PdfTime {
            hour: at.hour() as u8,
            minute: at.minute() as u8,
            second: at.second() as u8,
            millisecond: 0,
        },
        Offset {
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
        },
    )
}

/// 32 uppercase hex digits naming the document of `order_id`.
pub fn document_id(order_id: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, order_id.as_bytes())
        .simple()
        .to_string()
        .to_uppercase()
}

/// Overwrite both strings of the trailer `/ID` array with `id`.
///
/// printpdf fills them with random characters on every save. Only strings of
/// exactly `id.len()` bytes are replaced, so no offset in the file moves.
/// Returns how many were replaced.
fn pin_trailer_id(pdf: &mut [u8], id: &[u8]) -> usize {
    let Some(mut pos) = pdf.windows(3).rposition(|w| w == b"/ID") else {
        return 0;
    };
    let mut pinned = 0;
    while pinned < 2 {
        let Some(open) = pdf[pos..].iter().position(|&b| b == b'(').map(|i| pos + i) else {
            break;
        };
        let close = open + 1 + id.len();
        if pdf.get(close) != Some(&b')') {
            break;
        }
        pdf[open + 1..close].copy_from_slice(id);
        pinned += 1;
        pos = close + 1;
    }
    pinned
}

// -- Layout helpers -----------------------------------------------------------

type Rgb3 = (f32, f32, f32);

const DARK: Rgb3 = (0.2, 0.2, 0.2);
const GREY: Rgb3 = (0.53, 0.53, 0.53);
const YELLOW: Rgb3 = (1.0, 0.824, 0.247);
const BLUE: Rgb3 = (0.231, 0.510, 0.965);
const LIGHT_RULE: Rgb3 = (0.93, 0.93, 0.93);
const TABLE_RULE: Rgb3 = (0.87, 0.87, 0.87);
const WATERMARK: Rgb3 = (0.92, 0.92, 0.92);

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn builtin(self) -> BuiltinFont {
        match self {
            Self::Regular => BuiltinFont::Helvetica,
            Self::Bold => BuiltinFont::HelveticaBold,
        }
    }
}

/// Approximate Helvetica glyph width in pt.
fn char_width(size: f32, font: Font) -> f32 {
    match font {
        Font::Regular => 0.50 * size,
        Font::Bold => 0.55 * size,
    }
}

fn text_width(text: &str, size: f32, font: Font) -> f32 {
    text.chars().count() as f32 * char_width(size, font)
}

fn color((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

/// Operation list plus a top-down cursor inside the margins.
struct Canvas {
    ops: Vec<Op>,
    page_w: f32,
    page_h: f32,
    left: f32,
    right: f32,
    top: f32,
    /// Distance below `top` of the current baseline.
    cursor: f32,
}

impl Canvas {
    fn new(page_w: f32, page_h: f32, margin_in: f32) -> Self {
        let margin = margin_in * INCH_PT;
        // Inner padding so text does not sit on the margin line.
        let pad = 22.0;
        Self {
            ops: Vec::new(),
            page_w,
            page_h,
            left: margin + pad,
            right: page_w - margin - pad,
            top: page_h - margin - pad,
            cursor: 18.0,
        }
    }

    fn width(&self) -> f32 {
        self.right - self.left
    }

    fn advance(&mut self, pt: f32) {
        self.cursor += pt;
    }

    fn baseline(&self) -> f32 {
        self.top - self.cursor
    }

    fn text_abs(&mut self, x: f32, y: f32, size: f32, font: Font, rgb: Rgb3, text: &str) {
        self.ops.push(Op::SetFillColor { col: color(rgb) });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font: font.builtin(),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_owned())],
            font: font.builtin(),
        });
        self.ops.push(Op::EndTextSection);
    }

    fn text_at(&mut self, dx: f32, size: f32, font: Font, rgb: Rgb3, text: &str) {
        let (x, y) = (self.left + dx, self.baseline());
        self.text_abs(x, y, size, font, rgb, text);
    }

    fn text_right(&mut self, size: f32, font: Font, rgb: Rgb3, text: &str) {
        let x = self.right - text_width(text, size, font);
        let y = self.baseline();
        self.text_abs(x, y, size, font, rgb, text);
    }

    fn text_centered(&mut self, size: f32, font: Font, rgb: Rgb3, text: &str) {
        let x = (self.page_w - text_width(text, size, font)) / 2.0;
        let y = self.baseline();
        self.text_abs(x, y, size, font, rgb, text);
    }

    fn rule(&mut self, rgb: Rgb3, thickness: f32) {
        let y = self.baseline();
        self.ops.push(Op::SetOutlineColor { col: color(rgb) });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point { x: Pt(self.left), y: Pt(y) },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point { x: Pt(self.right), y: Pt(y) },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
    }

    /// Large pale shop name behind the content, about 40% down the page.
    fn watermark(&mut self, text: &str) {
        let size = 64.0;
        let x = (self.page_w - text_width(text, size, Font::Bold)) / 2.0;
        let y = self.page_h * 0.6;
        self.text_abs(x, y, size, Font::Bold, WATERMARK, text);
    }
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Words longer than `max_width` are force-broken on character
/// boundaries.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::with_capacity(max_width);
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                    current_len = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        result.push(chunk.iter().collect());
                    } else {
                        current_line = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_owned()));
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let lines = wrap_text("alpha.pdf, beta.pdf, gamma.pdf", 12);
        assert_eq!(lines, vec!["alpha.pdf,", "beta.pdf,", "gamma.pdf"]);
    }

    #[test]
    fn wrap_force_breaks_long_names() {
        let lines = wrap_text("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn default_format_is_a4_half_inch() {
        let format = PdfWriter::a4().format;
        let (w, h) = format.dimensions();
        assert_eq!((w.0, h.0), (210.0, 297.0));
        assert_eq!(format.margin_in, 0.5);
    }

    #[test]
    fn trailer_id_strings_are_replaced_in_place() {
        let mut pdf = b"xref\ntrailer\n<</Root 1 0 R/ID[(ABCD)(EFGH)]/Size 9>>\n%%EOF".to_vec();
        let len = pdf.len();
        assert_eq!(pin_trailer_id(&mut pdf, b"WXYZ"), 2);
        assert_eq!(pdf.len(), len);
        assert!(pdf.windows(17).any(|w| w == b"/ID[(WXYZ)(WXYZ)]"));
    }

    #[test]
    fn trailer_id_of_other_length_is_left_alone() {
        let mut pdf = b"trailer\n<</ID[(ABCDEF)(ABCDEF)]>>".to_vec();
        let before = pdf.clone();
        assert_eq!(pin_trailer_id(&mut pdf, b"WXYZ"), 0);
        assert_eq!(pdf, before);
        assert_eq!(pin_trailer_id(&mut b"no trailer".to_vec(), b"WXYZ"), 0);
    }

    #[test]
    fn document_id_is_stable_per_order() {
        let a = document_id("9c1d2e3f-aaaa-4bbb-8ccc-dddddddddddd");
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_eq!(a, document_id("9c1d2e3f-aaaa-4bbb-8ccc-dddddddddddd"));
        assert_ne!(a, document_id("0000"));
    }

    #[test]
    fn metadata_dates_follow_the_order() {
        use chrono::TimeZone;
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 15).unwrap();
        let d = pdf_date(&at);
        assert_eq!((d.date.year, d.date.month, d.date.day), (2026, 5, 1));
        assert_eq!((d.time.hour, d.time.minute, d.time.second), (9, 30, 15));
    }
}
