//! Writes a [`Layout`] as a PDF document.
//!
//! Uses the base-14 Helvetica fonts with `WinAnsiEncoding`, so no font data
//! is embedded. Characters outside that encoding are printed as `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::Rgb;

use super::{
    TITLE,
    layout::{Font, Item, Layout, PAGE_HEIGHT, PAGE_WIDTH},
};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Renders every page of `layout` into a PDF file image.
pub fn render(layout: &Layout) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let pages_id = alloc.bump();
    let info_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = layout
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id).title(TextStr(TITLE));

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (page, (page_id, content_id)) in layout.pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        writer.parent(pages_id);
        writer.contents(*content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR, regular_id)
            .pair(BOLD, bold_id);
        writer.finish();

        let mut content = Content::new();
        for item in &page.items {
            draw(&mut content, item);
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

fn draw(content: &mut Content, item: &Item) {
    match item {
        Item::Text(text) => {
            let (r, g, b) = unit(text.color);
            let font = match text.font {
                Font::Regular => REGULAR,
                Font::Bold => BOLD,
            };
            content.set_fill_rgb(r, g, b);
            content.begin_text();
            content.set_font(font, text.size);
            content.next_line(text.x, text.y);
            content.show(Str(&win_ansi(&text.text)));
            content.end_text();
        }
        Item::Fill { x, y, w, h, color } => {
            let (r, g, b) = unit(*color);
            content.set_fill_rgb(r, g, b);
            content.rect(*x, *y, *w, *h);
            content.fill_nonzero();
        }
        Item::Stroke { x, y, w, h, color } => {
            let (r, g, b) = unit(*color);
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(0.5);
            content.rect(*x, *y, *w, *h);
            content.stroke();
        }
    }
}

fn unit(color: Rgb) -> (f32, f32, f32) {
    (
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
    )
}

/// Encodes `text` in `WinAnsiEncoding`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}
