//! PDF builders for tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Content stream claiming FlateDecode that does not inflate
const BROKEN_FLATE: &[u8] = &[0x78, 0x9c, 0xff, 0xfe, 0x00, 0x13, 0x37, 0x00];

/// Build a PDF with one page per entry; each line of an entry becomes a text
/// object, and an empty entry yields a page without text.
pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let pages: Vec<Option<&str>> = pages.iter().copied().map(Some).collect();
    build_pdf(&pages)
}

/// Like [`pdf_with_pages`], but `None` pages carry a corrupt compressed
/// content stream.
pub(crate) fn pdf_with_broken_pages(pages: &[Option<&str>]) -> Vec<u8> {
    build_pdf(pages)
}

fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let content_id = match page {
            Some(text) => doc.add_object(text_stream(text)),
            None => doc.add_object(Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                BROKEN_FLATE.to_vec(),
            )),
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
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
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn text_stream(text: &str) -> Stream {
    let mut operations = Vec::new();
    for (i, line) in text.lines().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        operations.push(Operation::new(
            "Td",
            vec![72.into(), (760 - 16 * i as i64).into()],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    Stream::new(dictionary! {}, content.encode().unwrap())
}
