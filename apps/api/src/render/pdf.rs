//! Serializes laid-out pages into a PDF 1.4 document with lopdf.
//!
//! Canvas coordinates are millimetres from the top-left corner; PDF user
//! space is points from the bottom-left, so every y is flipped against the
//! page height.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use uuid::Uuid;

use crate::layout::font_metrics::{FontStyle, PT_PER_MM};
use crate::layout::page::PageConfig;
use crate::render::canvas::{DrawOp, Page, Rgb};
use crate::render::normalize::REPLACEMENT_CHAR;
use crate::render::RenderError;

pub const DOCUMENT_TITLE: &str = "Resume";
const PRODUCER: &str = concat!("vitae ", env!("CARGO_PKG_VERSION"));

pub fn write_pdf(pages: &[Page], config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for style in FontStyle::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(config.width_mm * PT_PER_MM),
        Object::Real(config.height_mm * PT_PER_MM),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = write_page(&mut doc, page, config, pages_id, resources_id, &media_box)?;
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(DOCUMENT_TITLE),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%S+00'00'").to_string()),
    });

    let file_id = Object::String(Uuid::new_v4().as_bytes().to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(buf)
}

fn write_page(
    doc: &mut Document,
    page: &Page,
    config: &PageConfig,
    parent: ObjectId,
    resources: ObjectId,
    media_box: &[Object],
) -> Result<ObjectId, RenderError> {
    let flip = |y_mm: f32| (config.height_mm - y_mm) * PT_PER_MM;

    let mut operations = Vec::new();
    let mut annots = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x_mm,
                y_mm,
                w_mm,
                h_mm,
                color,
            } => {
                operations.push(Operation::new("rg", rgb_operands(*color)));
                operations.push(Operation::new(
                    "re",
                    vec![
                        pt(*x_mm),
                        Object::Real(flip(y_mm + h_mm)),
                        pt(*w_mm),
                        pt(*h_mm),
                    ],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Text {
                x_mm,
                baseline_mm,
                style,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(style.font.resource_name().as_bytes().to_vec()),
                        Object::Real(style.size_pt),
                    ],
                ));
                operations.push(Operation::new("rg", rgb_operands(style.color)));
                operations.push(Operation::new(
                    "Td",
                    vec![pt(*x_mm), Object::Real(flip(*baseline_mm))],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_text(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule {
                x1_mm,
                x2_mm,
                y_mm,
                width_mm,
                color,
            } => {
                operations.push(Operation::new("w", vec![pt(*width_mm)]));
                operations.push(Operation::new("RG", rgb_operands(*color)));
                operations.push(Operation::new("m", vec![pt(*x1_mm), Object::Real(flip(*y_mm))]));
                operations.push(Operation::new("l", vec![pt(*x2_mm), Object::Real(flip(*y_mm))]));
                operations.push(Operation::new("S", vec![]));
            }
            DrawOp::Link {
                x_mm,
                y_mm,
                w_mm,
                h_mm,
                uri,
            } => {
                let annot_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![
                        pt(*x_mm),
                        Object::Real(flip(y_mm + h_mm)),
                        pt(x_mm + w_mm),
                        Object::Real(flip(*y_mm)),
                    ],
                    "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
                    "A" => dictionary! {
                        "S" => "URI",
                        "URI" => Object::string_literal(uri.as_str()),
                    },
                });
                annots.push(Object::Reference(annot_id));
            }
        }
    }

    let content = Content { operations }
        .encode()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let mut page_dict = dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(parent),
        "MediaBox" => media_box.to_vec(),
        "Resources" => Object::Reference(resources),
        "Contents" => Object::Reference(content_id),
    };
    if !annots.is_empty() {
        page_dict.set("Annots", annots);
    }
    Ok(doc.add_object(page_dict))
}

fn pt(mm: f32) -> Object {
    Object::Real(mm * PT_PER_MM)
}

fn rgb_operands(Rgb(r, g, b): Rgb) -> Vec<Object> {
    [r, g, b]
        .into_iter()
        .map(|c| Object::Real(f32::from(c) / 255.0))
        .collect()
}

/// One byte per character. Normalized text never reaches the fallback.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT_CHAR as u8))
        .collect()
}
