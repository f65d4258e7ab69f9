//! Highlight annotation construction.
//!
//! Builds text-markup annotation dictionaries (ISO 32000-1, 12.5.6.10)
//! and attaches them to a page's `/Annots` array. The color goes in the
//! `/C` entry — the stroke color a viewer tints the highlight with.

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::color::HighlightColor;
use crate::error::{Error, Result};
use crate::search::Region;

/// Print flag: the annotation is rendered when the page is printed.
const FLAG_PRINT: i64 = 4;

/// Add a highlight annotation over `region` on the given page.
pub fn add_highlight(
    doc: &mut LopdfDocument,
    page_id: ObjectId,
    region: &Region,
    color: HighlightColor,
) -> Result<()> {
    let annot_id = doc.add_object(Object::Dictionary(highlight_dict(region, color)));
    attach_to_page(doc, page_id, annot_id)
}

/// Build the annotation dictionary for one region.
fn highlight_dict(region: &Region, color: HighlightColor) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Annot".to_vec()));
    dict.set("Subtype", Object::Name(b"Highlight".to_vec()));
    dict.set(
        "Rect",
        Object::Array(vec![
            Object::Real(region.x0),
            Object::Real(region.y0),
            Object::Real(region.x1),
            Object::Real(region.y1),
        ]),
    );
    // One quad, corners ordered upper-left, upper-right, lower-left,
    // lower-right.
    dict.set(
        "QuadPoints",
        Object::Array(vec![
            Object::Real(region.x0),
            Object::Real(region.y1),
            Object::Real(region.x1),
            Object::Real(region.y1),
            Object::Real(region.x0),
            Object::Real(region.y0),
            Object::Real(region.x1),
            Object::Real(region.y0),
        ]),
    );
    dict.set(
        "C",
        Object::Array(
            color
                .channels()
                .iter()
                .map(|&v| Object::Real(v))
                .collect(),
        ),
    );
    dict.set("F", Object::Integer(FLAG_PRINT));
    dict
}

/// Append an annotation reference to the page's `/Annots` array, creating
/// the array if the page has none. `/Annots` may be stored inline or as a
/// reference to a separate array object.
fn attach_to_page(doc: &mut LopdfDocument, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
    // Work out where the array lives before taking a mutable borrow.
    let annots_ref = {
        let page_dict = doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Annotate(e.to_string()))?;
        match page_dict.get(b"Annots") {
            Ok(Object::Reference(r)) => Some(*r),
            _ => None,
        }
    };

    if let Some(array_id) = annots_ref {
        let array = doc
            .get_object_mut(array_id)
            .and_then(Object::as_array_mut)
            .map_err(|e| Error::Annotate(e.to_string()))?;
        array.push(Object::Reference(annot_id));
        return Ok(());
    }

    let page_dict = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| Error::Annotate(e.to_string()))?;
    match page_dict.get_mut(b"Annots") {
        Ok(Object::Array(array)) => {
            array.push(Object::Reference(annot_id));
        }
        _ => {
            page_dict.set("Annots", Object::Array(vec![Object::Reference(annot_id)]));
        }
    }
    Ok(())
}
