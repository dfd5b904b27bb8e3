//! PDF emission: serializing laid-out pages with lopdf.
//!
//! Output documents use the built-in Type1 Helvetica fonts, matching
//! the approximate width model of the layout engine: no font
//! embedding, no glyph metrics, one byte per character.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use polyglot_core::PageRenderer;
use polyglot_core::layout::{Page, PlacedText};

use crate::PdfError;

const BODY_FONT: &str = "F1";
const HEADER_FONT: &str = "F2";

/// Assembles laid-out pages into serialized PDF bytes.
pub struct PdfWriter;

impl PdfWriter {
    pub fn write(&self, pages: &[Page]) -> Result<Vec<u8>, PdfError> {
        let mut doc = Document::with_version("1.5");

        // Reserved up front so every page can reference its parent.
        let pages_id = doc.new_object_id();

        let body_font_id = doc.add_object(builtin_font("Helvetica"));
        let header_font_id = doc.add_object(builtin_font("Helvetica-Bold"));

        let mut font_dict = Dictionary::new();
        font_dict.set(BODY_FONT, Object::Reference(body_font_id));
        font_dict.set(HEADER_FONT, Object::Reference(header_font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        let resources_id = doc.add_object(Object::Dictionary(resources));

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = page_content(page);
            let encoded = content
                .encode()
                .map_err(|e| PdfError::Emission(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set("Resources", Object::Reference(resources_id));
            page_dict.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page.width),
                    Object::Real(page.height),
                ]),
            );
            page_dict.set("Contents", Object::Reference(content_id));

            let page_id = doc.add_object(Object::Dictionary(page_dict));
            kids.push(Object::Reference(page_id));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(kids.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        doc.objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| PdfError::Emission(e.to_string()))?;

        debug!(pages = pages.len(), bytes = bytes.len(), "serialized pdf");
        Ok(bytes)
    }
}

impl PageRenderer for PdfWriter {
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>, String> {
        self.write(pages).map_err(|e| e.to_string())
    }
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    if let Some(header) = &page.header {
        draw_text(&mut operations, header, HEADER_FONT);
    }
    for line in &page.body {
        draw_text(&mut operations, line, BODY_FONT);
    }
    if let Some(footer) = &page.footer {
        draw_text(&mut operations, footer, BODY_FONT);
    }
    Content { operations }
}

fn draw_text(operations: &mut Vec<Operation>, placed: &PlacedText, font: &str) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![
            Object::Name(font.as_bytes().to_vec()),
            Object::Real(placed.font_size),
        ],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Real(placed.x), Object::Real(placed.y)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(
            encode_win_ansi(&placed.text),
            StringFormat::Literal,
        )],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Built-in fonts are limited to single-byte cp1252 codes. The
/// 0x80-0x9F window carries the Windows punctuation set (curly
/// quotes, dashes, ellipsis), which translated text uses heavily;
/// anything cp1252 cannot represent degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

fn builtin_font(base_font: &str) -> Object {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    Object::Dictionary(font)
}
