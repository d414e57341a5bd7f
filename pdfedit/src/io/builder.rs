//! Building new documents from pages of opened ones.
//!
//! [`LopdfBuilder`] deep-copies each appended page, and everything the page
//! references, into a fresh document with a flat page tree. Object ids are
//! remapped per source view, so pages from several documents never collide
//! and a resource shared by many pages of one source is copied once.
//!
//! The document information dictionary of the first source that has one is
//! carried over. Outlines are carried over on request, see
//! [`DocumentBuilder::import_outline`].

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashMap;
use std::io::Write;

use super::outline::{self, OutlineNode};
use super::{CodecError, CountingWriter, DocumentBuilder, LoadedPdf};
use crate::pages::PageIndex;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards the parent walk against cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

const DEFAULT_VERSION: &str = "1.5";

/// [`DocumentBuilder`] producing `lopdf` documents.
pub struct LopdfBuilder {
    document: Document,

    /// Id reserved for the page tree root.
    pages_id: ObjectId,

    /// Copied page objects in output order.
    kids: Vec<ObjectId>,

    /// (source view, source object id) -> destination object id.
    remap: HashMap<(u64, ObjectId), ObjectId>,

    /// Copied document information dictionary.
    info: Option<ObjectId>,

    /// Top-level outline entries, written out on serialize.
    outline: Vec<OutlineNode>,

    compress: bool,
}

impl LopdfBuilder {
    /// Create an empty builder.
    pub fn new(compress: bool) -> Self {
        let mut document = Document::with_version(DEFAULT_VERSION);
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            remap: HashMap::new(),
            info: None,
            outline: Vec::new(),
            compress,
        }
    }

    /// Copy `object` from `view` into the destination, remapping references.
    fn copy_object(&mut self, view: &LoadedPdf, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self
                .copy_reference(view, *id)
                .map_or(Object::Null, Object::Reference),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(view, dict)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(view, item))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.copy_dictionary(view, &stream.dict);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, view: &LoadedPdf, dict: &Dictionary) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            let value_copy = self.copy_object(view, value);
            // A reference that could not be carried over is dropped, not nulled.
            if matches!(value, Object::Reference(_)) && matches!(value_copy, Object::Null) {
                continue;
            }
            copied.set(key.clone(), value_copy);
        }
        copied
    }

    /// Copy the object behind `id`, returning its destination id.
    ///
    /// Page tree nodes are only reachable through pages already appended; a
    /// reference to any other page or `Pages` node yields `None`.
    fn copy_reference(&mut self, view: &LoadedPdf, id: ObjectId) -> Option<ObjectId> {
        let key = (view.source_id(), id);
        if let Some(&copied) = self.remap.get(&key) {
            return Some(copied);
        }

        let object = match view.document().get_object(id) {
            Ok(object) => object,
            Err(err) => {
                log::warn!(
                    "Dropping unresolvable reference {} {} R in {}: {}",
                    id.0,
                    id.1,
                    view.path().display(),
                    err
                );
                return None;
            }
        };

        if is_page_tree_node(object) {
            return None;
        }

        let new_id = self.document.new_object_id();
        self.remap.insert(key, new_id);
        let copied = self.copy_object(view, object);
        self.document.objects.insert(new_id, copied);
        Some(new_id)
    }

    /// Forget the copies of the annotations of `page`, so the next copy of
    /// the page gets annotations of its own whose `/P` points back at it.
    fn forget_annotations(&mut self, view: &LoadedPdf, page: &Dictionary) {
        let source = view.document();
        let source_id = view.source_id();

        let annots = match page.get(b"Annots") {
            Ok(Object::Reference(id)) => {
                self.remap.remove(&(source_id, *id));
                source.get_object(*id).and_then(Object::as_array)
            }
            Ok(other) => other.as_array(),
            Err(err) => Err(err),
        };
        let Ok(annots) = annots else {
            return;
        };

        for id in annots.iter().filter_map(|annot| annot.as_reference().ok()) {
            self.remap.remove(&(source_id, id));
            if let Ok(popup) = source
                .get_dictionary(id)
                .and_then(|annot| annot.get(b"Popup"))
                .and_then(Object::as_reference)
            {
                self.remap.remove(&(source_id, popup));
            }
        }
    }

    fn copy_info(&mut self, view: &LoadedPdf) {
        if self.info.is_some() {
            return;
        }

        self.info = match view.document().trailer.get(b"Info") {
            Ok(Object::Reference(id)) => self.copy_reference(view, *id),
            Ok(Object::Dictionary(dict)) => {
                let copied = self.copy_dictionary(view, dict);
                Some(self.document.add_object(copied))
            }
            _ => None,
        };
    }

    fn note_version(&mut self, version: &str) {
        if version > self.document.version.as_str() {
            self.document.version = version.to_string();
        }
    }
}

impl DocumentBuilder for LopdfBuilder {
    type View = LoadedPdf;

    fn append(&mut self, view: &LoadedPdf, index: PageIndex) -> Result<(), CodecError> {
        let page_id = view.page_id(index)?;
        let source = view.document();

        let mut page = source
            .get_dictionary(page_id)
            .map_err(|e| {
                CodecError::Structure(format!(
                    "page {} is not a dictionary: {e}",
                    index.page_number()
                ))
            })?
            .clone();

        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, &page, key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        page.remove(b"Parent");

        // Register the copy first so annotations pointing back at this page
        // resolve to it instead of being dropped.
        let new_id = self.document.new_object_id();
        if self
            .remap
            .insert((view.source_id(), page_id), new_id)
            .is_some()
        {
            self.forget_annotations(view, &page);
        }

        let mut copied = self.copy_dictionary(view, &page);
        copied.set("Parent", Object::Reference(self.pages_id));
        self.document
            .objects
            .insert(new_id, Object::Dictionary(copied));
        self.kids.push(new_id);
        self.note_version(view.version());
        self.copy_info(view);

        log::trace!(
            "Appended page {} of {} as output page {}",
            index.page_number(),
            view.path().display(),
            self.kids.len()
        );

        Ok(())
    }

    fn import_outline(
        &mut self,
        view: &LoadedPdf,
        heading: Option<(&str, PageIndex)>,
    ) -> Result<(), CodecError> {
        let source_id = view.source_id();
        let kids = &self.kids;
        let remap = &self.remap;
        let items = outline::read_outline(view.document(), |page| {
            remap
                .get(&(source_id, page))
                .copied()
                .filter(|copied| kids.contains(copied))
        });

        log::debug!(
            "Imported {} top-level outline item(s) from {}",
            items.len(),
            view.path().display()
        );

        match heading {
            Some((title, first)) => {
                let page = *self.kids.get(first.get()).ok_or(CodecError::PageOutOfRange {
                    index: first.get(),
                    page_count: self.kids.len(),
                })?;
                self.outline.push(OutlineNode::heading(title, page, items));
            }
            None => self.outline.extend(items),
        }

        Ok(())
    }

    fn page_count(&self) -> usize {
        self.kids.len()
    }

    fn serialize<W: Write>(mut self, sink: &mut W) -> Result<u64, CodecError> {
        if self.kids.is_empty() {
            return Err(CodecError::Structure("document has no pages".to_string()));
        }

        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.kids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        if let Some(outlines) = outline::write_outline(&mut self.document, &self.outline) {
            catalog.set("Outlines", outlines);
        }
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", catalog_id);
        if let Some(info) = self.info {
            self.document.trailer.set("Info", info);
        }

        if self.compress {
            self.document.compress();
        }

        let mut counter = CountingWriter::new(sink);
        self.document.save_to(&mut counter)?;
        counter.flush()?;
        Ok(counter.written())
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page" || name == b"Pages")
}

/// Look `key` up on the ancestors of `page`, nearest first.
fn inherited_attribute<'a>(
    source: &'a Document,
    page: &Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = source.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
