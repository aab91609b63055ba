//! PDF report renderer.
//!
//! Paginated A4 document built with the base-14 Helvetica fonts. Those
//! fonts only cover the Latin-1 subset, so every string is transliterated
//! first: text is never rejected, unsupported characters become `?`.

use crate::error::{Result, SimError};
use crate::types::IncidentReport;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 10.0;
const TOP_Y: f32 = PAGE_H - 20.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const HEADER_SIZE: f32 = 10.0;
const DESC_SIZE: f32 = 9.0;

const PT_TO_MM: f32 = 0.352_778;
// Average Helvetica glyph width relative to the font size. Good enough
// for wrapping and centering; exact metrics are not needed here.
const AVG_CHAR_EM: f32 = 0.5;

/// Render the report to `path`, overwriting any previous file there.
pub fn write_pdf(path: &Path, city: &str, report: &IncidentReport) -> Result<()> {
    let (doc, page, layer) =
        PdfDocument::new(format!("Reporte_{city}"), Mm(PAGE_W), Mm(PAGE_H), "Capa 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?;

    let mut cursor = Cursor { layer: doc.get_page(page).get_layer(layer), y: TOP_Y };

    let title = to_latin1(&format!("INFORME DE MOVILIDAD: {}", city.to_uppercase()));
    let title_x = ((PAGE_W - text_width(&title, TITLE_SIZE)) / 2.0).max(MARGIN);
    cursor.layer.use_text(title, TITLE_SIZE, Mm(title_x), Mm(cursor.y), &bold);
    cursor.y -= 12.0;

    for line in wrap(&to_latin1(&report.summary), BODY_SIZE) {
        cursor.line(&doc, &line, BODY_SIZE, &regular, 6.0);
    }
    cursor.y -= 4.0;

    for incident in &report.incidents {
        let header = to_latin1(&format!("- {} ({})", incident.address, incident.severity));
        cursor.line(&doc, &header, HEADER_SIZE, &bold, 6.0);
        for line in wrap(&to_latin1(&incident.description), DESC_SIZE) {
            cursor.line(&doc, &line, DESC_SIZE, &regular, 4.5);
        }
        cursor.y -= 3.0;
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(render_err)?;
    Ok(())
}

struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    /// Write one line and advance downward, breaking to a fresh page
    /// when the bottom margin is reached.
    fn line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        size: f32,
        font: &IndirectFontRef,
        advance: f32,
    ) {
        if self.y < MARGIN + advance {
            let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Capa 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= advance;
    }
}

/// Lossy transliteration into the Latin-1 subset the built-in fonts
/// encode. Accented letters fit; anything above U+00FF becomes `?`.
pub fn to_latin1(text: &str) -> String {
    text.chars().map(|c| if (c as u32) <= 0xFF { c } else { '?' }).collect()
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_CHAR_EM
}

/// Greedy word wrap against the usable page width.
fn wrap(text: &str, size: f32) -> Vec<String> {
    let max_chars = (((PAGE_W - 2.0 * MARGIN) / (size * PT_TO_MM * AVG_CHAR_EM)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = hard_split(word, max_chars, &mut lines, &mut current);
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Flush overlong words in `max_chars`-sized chunks, returning the tail.
fn hard_split<'a>(
    word: &'a str,
    max_chars: usize,
    lines: &mut Vec<String>,
    current: &mut String,
) -> &'a str {
    let mut word = word;
    while word.chars().count() > max_chars {
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
        let cut = word
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(word.len());
        lines.push(word[..cut].to_string());
        word = &word[cut..];
    }
    word
}

fn render_err(e: printpdf::Error) -> SimError {
    SimError::Render(e.to_string())
}
