//! Fixed-layout invoice rendering.
//!
//! One US-letter page per invoice, absolute-coordinate text placement,
//! with continuation pages when the line-item table outgrows the first
//! page. Coordinates are millimetres from the bottom-left corner.

use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line,
    Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
};

use crate::error::InvoiceError;
use crate::model::Invoice;
use crate::money::fmt_money;

const PAGE_W: f32 = 215.9;
const PAGE_H: f32 = 279.4;

const MARGIN_L: f32 = 18.0;
const MARGIN_R: f32 = 197.9;
/// Below this the cursor wraps to a continuation page
const BOTTOM: f32 = 25.0;
const ROW_H: f32 = 6.0;

// Table column x positions
const X_TITLE: f32 = MARGIN_L;
const X_QTY: f32 = 126.0;
const X_UNIT: f32 = 146.0;
const X_NET: f32 = 174.0;

/// Static blocks drawn on every invoice: the selling company's name and
/// the remit-to mailing address. Both come from configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub company_name: String,
    pub remit_to: Vec<String>,
}

/// A decoded, white-composited logo ready for embedding
#[derive(Debug)]
pub struct Logo {
    rgb: Vec<u8>,
    width: u32,
    height: u32,
}

impl Logo {
    /// Load and decode the logo asset. A missing file is a `MissingAsset`
    /// configuration error, an undecodable one `BadAsset`; callers decide
    /// whether to degrade or fail.
    pub fn load(path: &Path) -> Result<Self, InvoiceError> {
        let bytes = std::fs::read(path).map_err(|source| InvoiceError::MissingAsset {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded =
            image::load_from_memory(&bytes).map_err(|source| InvoiceError::BadAsset {
                path: path.to_path_buf(),
                source,
            })?;

        // Composite any transparency against white so the PDF never shows
        // the page background through the logo.
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let image::Rgba([r, g, b, a]) = *pixel;
            let alpha = f32::from(a) / 255.0;
            for channel in [r, g, b] {
                rgb.push((f32::from(channel) * alpha + 255.0 * (1.0 - alpha)) as u8);
            }
        }

        Ok(Self { rgb, width, height })
    }

    /// Embed at the given top-left corner, scaled to `width_mm` wide.
    fn add_to_layer(&self, layer: &PdfLayerReference, x: f32, top_y: f32, width_mm: f32) {
        let aspect = self.height as f32 / self.width as f32;
        let height_mm = width_mm * aspect;
        let dpi = self.width as f32 / (width_mm / 25.4);

        let image = Image::from(ImageXObject {
            width: Px(self.width as usize),
            height: Px(self.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: self.rgb.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(top_y - height_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }
}

/// Renders assembled invoices into PDF bytes
pub struct InvoiceRenderer {
    options: RenderOptions,
}

struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
}

impl PageCursor {
    fn new(title: &str) -> Result<Self, InvoiceError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: PAGE_H - 18.0,
        })
    }

    fn text(&self, content: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(content, size, Mm(x), Mm(y), &self.font);
    }

    fn text_bold(&self, content: &str, size: f32, x: f32, y: f32) {
        self.layer
            .use_text(content, size, Mm(x), Mm(y), &self.font_bold);
    }

    fn rule(&self, y: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_L), Mm(y)), false),
                (Point::new(Mm(MARGIN_R), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    /// Start a continuation page and reset the cursor below its margin
    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H - 18.0;
    }

    fn finish(self) -> Result<Vec<u8>, InvoiceError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| InvoiceError::Render(e.to_string()))
    }
}

impl InvoiceRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render one invoice. `logo` is optional so a missing asset degrades
    /// the document instead of failing the export.
    pub fn render(&self, invoice: &Invoice, logo: Option<&Logo>) -> Result<Vec<u8>, InvoiceError> {
        let title = format!("Invoice {}", invoice.order_id);
        let mut cursor = PageCursor::new(&title)?;

        // Header: company name left, logo and title right
        cursor.text_bold(&self.options.company_name, 16.0, MARGIN_L, cursor.y);
        if let Some(logo) = logo {
            logo.add_to_layer(&cursor.layer, MARGIN_R - 36.0, cursor.y + 6.0, 36.0);
        }
        cursor.y -= 10.0;
        cursor.text_bold("INVOICE", 22.0, MARGIN_L, cursor.y);
        cursor.y -= 5.0;
        cursor.rule(cursor.y);
        cursor.y -= 9.0;

        // Order metadata block (left) and customer block (right)
        let block_top = cursor.y;
        cursor.text_bold("Order details", 11.0, MARGIN_L, cursor.y);
        cursor.y -= 6.0;
        cursor.text(&format!("Order: {}", invoice.order_id), 9.5, MARGIN_L, cursor.y);
        cursor.y -= 5.0;
        cursor.text(
            &format!("Placed: {}", invoice.placed_at.format("%Y-%m-%d %H:%M UTC")),
            9.5,
            MARGIN_L,
            cursor.y,
        );
        cursor.y -= 5.0;
        cursor.text(
            &format!("Invoice date: {}", invoice.invoice_date.format("%Y-%m-%d")),
            9.5,
            MARGIN_L,
            cursor.y,
        );
        cursor.y -= 5.0;
        cursor.text(
            &format!("Payment: {}", invoice.payment_status.label()),
            9.5,
            MARGIN_L,
            cursor.y,
        );

        let x_customer = 120.0;
        let mut right_y = block_top;
        cursor.text_bold("Bill to", 11.0, x_customer, right_y);
        right_y -= 6.0;
        cursor.text(&invoice.customer_name, 9.5, x_customer, right_y);
        right_y -= 5.0;
        cursor.text(invoice.customer_email.expose(), 9.5, x_customer, right_y);
        right_y -= 5.0;
        cursor.text(invoice.customer_phone.expose(), 9.5, x_customer, right_y);

        // Static remit-to mailing address
        cursor.y -= 10.0;
        cursor.text_bold("Remit to", 11.0, MARGIN_L, cursor.y);
        cursor.y -= 6.0;
        for line in &self.options.remit_to {
            cursor.text(line, 9.5, MARGIN_L, cursor.y);
            cursor.y -= 5.0;
        }

        // Line-item table
        cursor.y -= 8.0;
        self.table_header(&cursor);
        cursor.y -= ROW_H;

        for line in &invoice.lines {
            if cursor.y < BOTTOM {
                cursor.break_page();
                self.table_header(&cursor);
                cursor.y -= ROW_H;
            }
            cursor.text(&line.title, 9.5, X_TITLE, cursor.y);
            cursor.text(&line.quantity.to_string(), 9.5, X_QTY, cursor.y);
            cursor.text(&fmt_money(line.unit_price), 9.5, X_UNIT, cursor.y);
            cursor.text(&fmt_money(line.net_price), 9.5, X_NET, cursor.y);
            cursor.y -= ROW_H;
        }

        // Grand total, always after the final row
        if cursor.y - 10.0 < BOTTOM {
            cursor.break_page();
        }
        cursor.y -= 2.0;
        cursor.rule(cursor.y + 4.0);
        cursor.y -= 4.0;
        cursor.text_bold("Grand total", 11.0, X_UNIT, cursor.y);
        cursor.text_bold(&fmt_money(invoice.grand_total), 11.0, X_NET, cursor.y);

        cursor.finish()
    }

    fn table_header(&self, cursor: &PageCursor) {
        cursor.text_bold("Product", 10.0, X_TITLE, cursor.y);
        cursor.text_bold("Qty", 10.0, X_QTY, cursor.y);
        cursor.text_bold("Unit price", 10.0, X_UNIT, cursor.y);
        cursor.text_bold("Amount", 10.0, X_NET, cursor.y);
        cursor.rule(cursor.y - 2.0);
    }
}

/// The demo document served by the playground download route. Unrelated to
/// invoices; a single page saying hello, as the original endpoint did.
pub fn hello_document() -> Result<Vec<u8>, InvoiceError> {
    let cursor = PageCursor::new("Hello")?;
    cursor.text("Hello world.", 12.0, 35.3, 35.3);
    cursor.finish()
}
