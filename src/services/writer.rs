use async_trait::async_trait;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use sig_composite::DrawInstruction;

use crate::error::DocumentError;
use crate::services::pdf;

/// Applies a draw instruction to a source document
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Return a new document with the stamp drawn on the instruction's
    /// page. The source is never modified; on error nothing is produced.
    async fn write(
        &self,
        document: &[u8],
        instruction: &DrawInstruction,
    ) -> Result<Vec<u8>, DocumentError>;
}

/// Embeds the stamp as an image XObject with a soft mask for its alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfStampWriter;

impl PdfStampWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_blocking(
        &self,
        document: &[u8],
        instruction: &DrawInstruction,
    ) -> Result<Vec<u8>, DocumentError> {
        check_instruction(instruction)?;

        let stamp = image::load_from_memory(&instruction.image_bytes)
            .map_err(|e| DocumentError::UnsupportedImageFormat(e.to_string()))?
            .to_rgba8();
        let (img_w, img_h) = stamp.dimensions();

        let mut doc = pdf::load(document)?;
        let ids = pdf::page_ids(&doc);
        let page_id = *ids
            .get(instruction.page_index)
            .ok_or(DocumentError::MissingPage {
                index: instruction.page_index,
                count: ids.len(),
            })?;

        let pixels = img_w as usize * img_h as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for pixel in stamp.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel[3]);
        }

        let smask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => img_w as i64,
                "Height" => img_h as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        ));
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => img_w as i64,
                "Height" => img_h as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            rgb,
        ));

        let name = attach_xobject(&mut doc, page_id, image_id)?;

        // Instructions are relative to the MediaBox's lower-left corner
        let (llx, lly) = pdf::page_box(&doc, page_id)?.origin;
        let [a, b, c, d, e, f] = instruction.matrix();
        let (e, f) = (e + llx + 0.0, f + lly + 0.0);
        let content = format!("q {a:.4} {b:.4} {c:.4} {d:.4} {e:.4} {f:.4} cm /{name} Do Q\n");
        append_isolated(&mut doc, page_id, content.into_bytes())?;

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| DocumentError::Write(e.to_string()))?;

        tracing::info!(
            page = instruction.page_index,
            xobject = %name,
            bytes = output.len(),
            "Stamped document"
        );
        Ok(output)
    }
}

#[async_trait]
impl DocumentWriter for PdfStampWriter {
    async fn write(
        &self,
        document: &[u8],
        instruction: &DrawInstruction,
    ) -> Result<Vec<u8>, DocumentError> {
        let writer = *self;
        let document = document.to_vec();
        let instruction = instruction.clone();
        tokio::task::spawn_blocking(move || writer.write_blocking(&document, &instruction))
            .await
            .map_err(|e| DocumentError::Task(e.to_string()))?
    }
}

fn check_instruction(instruction: &DrawInstruction) -> Result<(), DocumentError> {
    let numbers = [
        instruction.x,
        instruction.y,
        instruction.width,
        instruction.height,
        instruction.rotation,
    ];
    if numbers.iter().any(|v| !v.is_finite()) {
        return Err(DocumentError::InvalidInstruction(
            "non-finite coordinate".to_string(),
        ));
    }
    if instruction.width <= 0.0 || instruction.height <= 0.0 {
        return Err(DocumentError::InvalidInstruction(format!(
            "stamp size {}x{}",
            instruction.width, instruction.height
        )));
    }
    Ok(())
}

/// Register `image_id` in the page's XObject resources under an unused
/// name and return that name.
///
/// Inherited resources are copied onto the page first so the page keeps
/// seeing its fonts and images.
fn attach_xobject(
    doc: &mut Document,
    page_id: ObjectId,
    image_id: ObjectId,
) -> Result<String, DocumentError> {
    let invalid = |what: &str| DocumentError::InvalidDocument(format!("{what} is not a dictionary"));

    let resources = pdf::effective_resources(doc, page_id)
        .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

    let (mut res_dict, res_ref) = match resources {
        Object::Reference(id) => {
            let dict = doc
                .get_object(id)
                .and_then(|o| o.as_dict())
                .map_err(|_| invalid("page resources"))?
                .clone();
            (dict, Some(id))
        }
        Object::Dictionary(dict) => (dict, None),
        _ => return Err(invalid("page resources")),
    };

    let mut xobjects = match res_dict.get(b"XObject") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc
            .get_object(*id)
            .and_then(|o| o.as_dict())
            .map_err(|_| invalid("XObject resources"))?
            .clone(),
        Ok(_) => return Err(invalid("XObject resources")),
        Err(_) => Dictionary::new(),
    };

    let name = fresh_name(&xobjects);
    xobjects.set(name.clone(), image_id);
    res_dict.set("XObject", Object::Dictionary(xobjects));

    let page_resources = match res_ref {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(res_dict));
            Object::Reference(id)
        }
        None => Object::Dictionary(res_dict),
    };

    doc.get_object_mut(page_id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|_| invalid("page"))?
        .set("Resources", page_resources);

    Ok(name)
}

/// Append `stamp` to the page contents after wrapping the existing
/// contents in `q`/`Q`, so graphics state the page leaves behind does not
/// reach the stamp.
fn append_isolated(
    doc: &mut Document,
    page_id: ObjectId,
    stamp: Vec<u8>,
) -> Result<(), DocumentError> {
    let existing: Vec<Object> = {
        let page = doc
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| DocumentError::InvalidDocument(format!("page {page_id:?}: {e}")))?;
        match page.get(b"Contents") {
            Ok(Object::Reference(id)) => match doc.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    };

    let mut contents = Vec::with_capacity(existing.len() + 3);
    if !existing.is_empty() {
        let save = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let restore = doc.add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));
        contents.push(Object::Reference(save));
        contents.extend(existing);
        contents.push(Object::Reference(restore));
    }
    contents.push(Object::Reference(
        doc.add_object(Stream::new(Dictionary::new(), stamp)),
    ));

    doc.get_object_mut(page_id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|e| DocumentError::InvalidDocument(format!("page {page_id:?}: {e}")))?
        .set("Contents", contents);
    Ok(())
}

fn fresh_name(xobjects: &Dictionary) -> String {
    let mut n = 1;
    loop {
        let name = format!("InkSeal{n}");
        if !xobjects.has(name.as_bytes()) {
            return name;
        }
        n += 1;
    }
}
