//! Test documents and signature images.

use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use sig_composite::RasterImage;

/// US Letter in points
pub const LETTER: (i64, i64) = (612, 792);

/// A4 in points
pub const A4: (i64, i64) = (595, 842);

/// A PDF whose pages have the given MediaBox sizes.
pub fn pdf_with_pages(sizes: &[(i64, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let kids = sizes
        .iter()
        .map(|&(w, h)| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), w.into(), h.into()],
            }))
        })
        .collect::<Vec<_>>();
    finish(doc, pages_id, kids, lopdf::Dictionary::new())
}

/// A one-page letter PDF with text drawn in a font that is declared on the
/// page tree root and inherited by the page.
pub fn letter_with_inherited_font() -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(
        lopdf::Dictionary::new(),
        b"BT /F1 12 Tf 72 720 Td (Please sign below) Tj ET".to_vec(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), LETTER.0.into(), LETTER.1.into()],
        "Contents" => content_id,
    });
    finish(
        doc,
        pages_id,
        vec![Object::Reference(page_id)],
        dictionary! {
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        },
    )
}

fn finish(
    mut doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    extra: lopdf::Dictionary,
) -> Vec<u8> {
    let mut pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    for (key, value) in extra.iter() {
        pages.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A scanned-looking signature: white paper with a black stroke band
/// across the middle third.
pub fn signature_raster(width: u32, height: u32) -> RasterImage {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for _ in 0..width {
            let ink = y >= height / 3 && y < 2 * height / 3;
            let v = if ink { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RasterImage::from_rgba(width, height, pixels)
}

/// [`signature_raster`] encoded as PNG.
pub fn signature_png(width: u32, height: u32) -> Vec<u8> {
    signature_raster(width, height).to_png().unwrap()
}

/// Names of the XObjects registered on a page.
pub fn xobject_names(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = match page.get(b"Resources") {
        Ok(Object::Reference(id)) => doc.get_object(*id).unwrap().as_dict().unwrap(),
        Ok(Object::Dictionary(dict)) => dict,
        _ => return Vec::new(),
    };
    match resources.get(b"XObject") {
        Ok(Object::Dictionary(xobjects)) => xobjects
            .iter()
            .map(|(k, _)| String::from_utf8_lossy(k).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Page ids of a document in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}
