//! Document outlines (bookmarks).
//!
//! An outline is read out of a source document into a tree of
//! [`OutlineNode`]s whose destinations already point at pages of the
//! destination document, and written back as a fresh `/Outlines` tree when
//! the destination is serialized.
//!
//! Only explicit destinations (`/Dest [page ...]` or a `/GoTo` action with
//! one) are followed. An entry whose page was not copied keeps its place
//! only if it still has children to hold.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use std::collections::HashSet;

/// Guards against outlines nested absurdly deep.
const MAX_OUTLINE_DEPTH: usize = 64;

/// One outline entry, ready to be written into the destination.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OutlineNode {
    pub title: Object,
    /// Destination array whose first element is a destination page.
    pub dest: Option<Vec<Object>>,
    pub children: Vec<OutlineNode>,
    /// Children shown expanded.
    pub open: bool,
}

impl OutlineNode {
    /// An expanded entry titled `title` that opens `page` at the top.
    pub fn heading(title: &str, page: ObjectId, children: Vec<OutlineNode>) -> Self {
        Self {
            title: text_string(title),
            dest: Some(vec![
                Object::Reference(page),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ]),
            children,
            open: true,
        }
    }
}

/// Read the outline of `source`.
///
/// `resolve_page` maps a source page id to its destination copy, or `None`
/// when the page was not copied.
pub(crate) fn read_outline<F>(source: &Document, mut resolve_page: F) -> Vec<OutlineNode>
where
    F: FnMut(ObjectId) -> Option<ObjectId>,
{
    let first = source
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|outlines| resolve(source, outlines).as_dict().ok())
        .and_then(|outlines| outlines.get(b"First").and_then(Object::as_reference).ok());

    match first {
        Some(first) => {
            let mut visited = HashSet::new();
            read_siblings(source, first, 0, &mut visited, &mut resolve_page)
        }
        None => Vec::new(),
    }
}

fn read_siblings<F>(
    source: &Document,
    first: ObjectId,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    resolve_page: &mut F,
) -> Vec<OutlineNode>
where
    F: FnMut(ObjectId) -> Option<ObjectId>,
{
    let mut nodes = Vec::new();
    if depth >= MAX_OUTLINE_DEPTH {
        log::warn!("Outline nested deeper than {MAX_OUTLINE_DEPTH} levels, truncating");
        return nodes;
    }

    let mut next = Some(first);
    while let Some(id) = next {
        if !visited.insert(id) {
            log::warn!("Outline item {} {} R is linked twice, stopping", id.0, id.1);
            break;
        }
        let Ok(item) = source.get_dictionary(id) else {
            break;
        };
        next = item.get(b"Next").and_then(Object::as_reference).ok();

        let children = match item.get(b"First").and_then(Object::as_reference) {
            Ok(child) => read_siblings(source, child, depth + 1, visited, resolve_page),
            Err(_) => Vec::new(),
        };
        let dest = explicit_destination(source, item)
            .and_then(|dest| remap_destination(dest, &mut *resolve_page));

        if dest.is_none() && children.is_empty() {
            continue;
        }

        nodes.push(OutlineNode {
            title: item
                .get(b"Title")
                .map(|title| resolve(source, title).clone())
                .unwrap_or_else(|_| text_string("")),
            dest,
            children,
            open: item
                .get(b"Count")
                .and_then(Object::as_i64)
                .is_ok_and(|count| count > 0),
        });
    }

    nodes
}

/// `/Dest`, or the `/D` of a `/GoTo` action, when it is an array.
fn explicit_destination<'a>(source: &'a Document, item: &'a Dictionary) -> Option<&'a [Object]> {
    if let Ok(dest) = item.get(b"Dest") {
        return resolve(source, dest).as_array().ok().map(Vec::as_slice);
    }

    let action = resolve(source, item.get(b"A").ok()?).as_dict().ok()?;
    if action.get(b"S").and_then(Object::as_name).ok()? != b"GoTo" {
        return None;
    }
    resolve(source, action.get(b"D").ok()?)
        .as_array()
        .ok()
        .map(Vec::as_slice)
}

fn remap_destination<F>(dest: &[Object], resolve_page: &mut F) -> Option<Vec<Object>>
where
    F: FnMut(ObjectId) -> Option<ObjectId>,
{
    let (page, rest) = dest.split_first()?;
    let page = resolve_page(page.as_reference().ok()?)?;

    let mut remapped = vec![Object::Reference(page)];
    remapped.extend(rest.iter().map(|arg| match arg {
        Object::Reference(_) => Object::Null,
        other => other.clone(),
    }));
    Some(remapped)
}

/// Write `nodes` into `doc` as a new outline tree, returning its root.
pub(crate) fn write_outline(doc: &mut Document, nodes: &[OutlineNode]) -> Option<ObjectId> {
    if nodes.is_empty() {
        return None;
    }

    let root_id = doc.new_object_id();
    let (first, last, visible) = write_level(doc, nodes, root_id);
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => visible,
        }),
    );
    Some(root_id)
}

/// Write one sibling list under `parent`. `nodes` must not be empty.
///
/// Returns the first and last item ids and the number of items visible
/// below `parent` when it is open.
fn write_level(doc: &mut Document, nodes: &[OutlineNode], parent: ObjectId) -> (ObjectId, ObjectId, i64) {
    let ids: Vec<ObjectId> = nodes.iter().map(|_| doc.new_object_id()).collect();
    let mut visible = ids.len() as i64;

    for (i, (node, &id)) in nodes.iter().zip(&ids).enumerate() {
        let mut item = dictionary! {
            "Title" => node.title.clone(),
            "Parent" => parent,
        };
        if i > 0 {
            item.set("Prev", ids[i - 1]);
        }
        if let Some(&next) = ids.get(i + 1) {
            item.set("Next", next);
        }
        if let Some(dest) = &node.dest {
            item.set("Dest", dest.clone());
        }

        if !node.children.is_empty() {
            let (first, last, descendants) = write_level(doc, &node.children, id);
            item.set("First", first);
            item.set("Last", last);
            if node.open {
                item.set("Count", descendants);
                visible += descendants;
            } else {
                item.set("Count", -descendants);
            }
        }

        doc.objects.insert(id, Object::Dictionary(item));
    }

    (ids[0], ids[ids.len() - 1], visible)
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte order mark
/// otherwise.
pub(crate) fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn resolve<'a>(source: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => source.get_object(*id).unwrap_or(object),
        other => other,
    }
}
