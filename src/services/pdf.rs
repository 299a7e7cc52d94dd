//! lopdf helpers shared by the page renderer and the stamp writer.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::DocumentError;

/// Page size used when neither a page nor its ancestors carry a MediaBox.
pub const FALLBACK_PAGE_SIZE: (f64, f64) = (595.0, 842.0);

/// Parse a PDF from memory.
pub fn load(bytes: &[u8]) -> Result<Document, DocumentError> {
    Document::load_mem(bytes).map_err(|e| DocumentError::InvalidDocument(e.to_string()))
}

/// Page object ids in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// A page's MediaBox, normalised so `origin` is the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub origin: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl PageBox {
    fn fallback() -> Self {
        Self {
            origin: (0.0, 0.0),
            width: FALLBACK_PAGE_SIZE.0,
            height: FALLBACK_PAGE_SIZE.1,
        }
    }
}

/// Width and height of a page in points.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f64, f64), DocumentError> {
    let page_box = page_box(doc, page_id)?;
    Ok((page_box.width, page_box.height))
}

/// The page's MediaBox.
///
/// The MediaBox is inherited through `Parent`; A4 at the origin is assumed
/// when it is missing everywhere.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox, DocumentError> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc
            .get_object(id)
            .and_then(|o| o.as_dict())
            .map_err(|e| DocumentError::InvalidDocument(format!("page {id:?}: {e}")))?;
        if let Some(page_box) = media_box(doc, dict) {
            return Ok(page_box);
        }
        current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    tracing::debug!(?page_id, "Page has no MediaBox, assuming A4");
    Ok(PageBox::fallback())
}

fn media_box(doc: &Document, dict: &Dictionary) -> Option<PageBox> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let llx = number(&arr[0])?;
    let lly = number(&arr[1])?;
    let urx = number(&arr[2])?;
    let ury = number(&arr[3])?;
    let (width, height) = ((urx - llx).abs(), (ury - lly).abs());
    (width > 0.0 && height > 0.0).then_some(PageBox {
        origin: (llx.min(urx), lly.min(ury)),
        width,
        height,
    })
}

pub fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some((*f).into()),
        _ => None,
    }
}

/// The Resources dictionary that applies to a page, own or inherited,
/// resolved to a value the page can own.
pub fn effective_resources(doc: &Document, page_id: ObjectId) -> Option<Object> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc.get_object(id).and_then(|o| o.as_dict()).ok()?;
        if let Ok(res) = dict.get(b"Resources") {
            return Some(res.clone());
        }
        current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    None
}


#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_page_sizes_in_order() {
        let doc = load(&fixtures::pdf_with_pages(&[(612, 792), (842, 595)])).unwrap();
        let ids = page_ids(&doc);
        assert_eq!(ids.len(), 2);
        assert_eq!(page_size(&doc, ids[0]).unwrap(), (612.0, 792.0));
        assert_eq!(page_size(&doc, ids[1]).unwrap(), (842.0, 595.0));
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => 1,
                "Kids" => vec![Object::Reference(page_id)],
                "MediaBox" => vec![0.into(), 0.into(), Object::Real(300.5), 400.into()],
            }),
        );
        assert_eq!(page_size(&doc, page_id).unwrap(), (300.5, 400.0));
    }

    #[test]
    fn test_page_box_keeps_lower_left_corner() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![612.into(), 792.into(), 100.into(), 200.into()],
        });
        let page_box = page_box(&doc, page_id).unwrap();
        assert_eq!(page_box.origin, (100.0, 200.0));
        assert_eq!((page_box.width, page_box.height), (512.0, 592.0));
        assert_eq!(page_size(&doc, page_id).unwrap(), (512.0, 592.0));
    }

    #[test]
    fn test_missing_media_box_falls_back() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(dictionary! { "Type" => "Page" });
        assert_eq!(page_size(&doc, page_id).unwrap(), FALLBACK_PAGE_SIZE);
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(
            load(b"definitely not a pdf"),
            Err(DocumentError::InvalidDocument(_))
        ));
    }
}
