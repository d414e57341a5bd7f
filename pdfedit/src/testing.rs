//! Fixture documents for unit tests.
//!
//! Each generated page draws `Page <letter>`, so tests can read back which
//! source page ended up where. `MediaBox` and `Resources` live on the page
//! tree root and are inherited by every page.

use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// Build a PDF with one page per entry of `letters`.
pub(crate) fn lettered_pdf_bytes(letters: &[&str]) -> Vec<u8> {
    save(lettered_document(letters))
}

/// Like [`lettered_pdf_bytes`], with an outline entry `Chapter <letter>`
/// for every page and an Info dictionary titled `Lettered`.
pub(crate) fn outlined_pdf_bytes(letters: &[&str]) -> Vec<u8> {
    let mut doc = lettered_document(letters);
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

    let root_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = pages.iter().map(|_| doc.new_object_id()).collect();
    for (i, (&item_id, &page_id)) in item_ids.iter().zip(&pages).enumerate() {
        let mut item = dictionary! {
            "Title" => literal(&format!("Chapter {}", letters[i])),
            "Parent" => root_id,
            "Dest" => vec![page_id.into(), "Fit".into()],
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if let Some(&next) = item_ids.get(i + 1) {
            item.set("Next", next);
        }
        doc.objects.insert(item_id, Object::Dictionary(item));
    }
    if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => first,
                "Last" => last,
                "Count" => item_ids.len() as i64,
            }),
        );
        set_catalog_entry(&mut doc, "Outlines", root_id);
    }

    let info_id = doc.add_object(dictionary! { "Title" => literal("Lettered") });
    doc.trailer.set("Info", info_id);

    save(doc)
}

/// Like [`lettered_pdf_bytes`], with a text annotation on the first page.
pub(crate) fn annotated_pdf_bytes(letters: &[&str]) -> Vec<u8> {
    let mut doc = lettered_document(letters);
    let Some(&page_id) = doc.get_pages().get(&1) else {
        return save(doc);
    };

    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Rect" => vec![72.into(), 72.into(), 96.into(), 96.into()],
        "Contents" => literal("note"),
        "P" => page_id,
    });
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set("Annots", vec![Object::Reference(annot_id)]);
    }

    save(doc)
}

fn lettered_document(letters: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = letters
        .iter()
        .map(|letter| {
            let content = format!("BT /F1 24 Tf 72 720 Td (Page {letter}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => letters.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn set_catalog_entry(doc: &mut Document, key: &str, id: ObjectId) {
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
        catalog.set(key, id);
    }
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// The letter drawn on each page of `doc`, in page order.
pub(crate) fn page_letters(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find("(Page ").unwrap() + "(Page ".len();
            let end = start + text[start..].find(')').unwrap();
            text[start..end].to_string()
        })
        .collect()
}

/// The outline of `doc` flattened in reading order, as
/// `(depth, title, 1-based page number)`.
pub(crate) fn outline_entries(doc: &Document) -> Vec<(usize, String, Option<u32>)> {
    let page_numbers: std::collections::HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();

    let mut entries = Vec::new();
    let first = doc
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").and_then(Object::as_reference).ok())
        .and_then(|root| doc.get_dictionary(root).ok())
        .and_then(|root| root.get(b"First").and_then(Object::as_reference).ok());
    collect_entries(doc, first, 0, &page_numbers, &mut entries);
    entries
}

fn collect_entries(
    doc: &Document,
    mut next: Option<ObjectId>,
    depth: usize,
    page_numbers: &std::collections::HashMap<ObjectId, u32>,
    entries: &mut Vec<(usize, String, Option<u32>)>,
) {
    while let Some(id) = next {
        let item = doc.get_dictionary(id).unwrap();
        let title = match item.get(b"Title").unwrap() {
            Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
            other => panic!("unexpected title {other:?}"),
        };
        let page = item
            .get(b"Dest")
            .and_then(Object::as_array)
            .ok()
            .and_then(|dest| dest.first())
            .and_then(|page| page.as_reference().ok())
            .and_then(|page| page_numbers.get(&page).copied());
        entries.push((depth, title, page));

        let child = item.get(b"First").and_then(Object::as_reference).ok();
        collect_entries(doc, child, depth + 1, page_numbers, entries);
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
}
