//! Record outlines for rendered reports.
//!
//! `genpdf` writes no outline tree, so the finished bytes are reopened
//! with `lopdf` and one outline entry per rendered record is linked into
//! the document catalog, each with a `/Dest [page /Fit]` destination
//! pointing at the page the record's section starts on.

use std::fmt;
use std::io;

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::model::LabRecord;

/// Errors raised while patching an outline tree into rendered bytes.
#[derive(Debug)]
pub enum BookmarkError {
    /// The rendered bytes could not be parsed back as a PDF.
    InvalidPdf(lopdf::Error),
    /// The document catalog is missing or not a dictionary.
    CatalogUnavailable,
    /// A record was anchored to a page the document does not contain.
    PageOutOfRange {
        /// Index of the record with the unresolvable destination.
        record_index: usize,
        /// The requested (1-indexed) page number.
        page_number: usize,
    },
    /// Serializing the patched document failed.
    Write(io::Error),
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::InvalidPdf(err)
    }
}

impl From<io::Error> for BookmarkError {
    fn from(err: io::Error) -> Self {
        Self::Write(err)
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPdf(err) => {
                write!(f, "rendered bytes could not be parsed as a PDF: {err}")
            }
            Self::CatalogUnavailable => write!(f, "document catalog is missing or malformed"),
            Self::PageOutOfRange {
                record_index,
                page_number,
            } => write!(
                f,
                "record {} is anchored to page {}, which the document does not contain",
                record_index, page_number
            ),
            Self::Write(err) => write!(f, "failed to serialize the patched document: {err}"),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPdf(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::CatalogUnavailable | Self::PageOutOfRange { .. } => None,
        }
    }
}

/// Adds a flat outline tree mapping records to their starting pages.
///
/// `record_pages` pairs up with `records`; a `None` page means the
/// record never rendered and it is skipped.  When nothing was rendered
/// the input bytes are returned unchanged.
pub fn apply_record_bookmarks(
    pdf_bytes: &[u8],
    records: &[LabRecord],
    record_pages: &[Option<usize>],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let page_ids = document.get_pages();

    // Destination page object per rendered record, in report order.
    let mut targets: Vec<(&str, ObjectId)> = Vec::new();
    for (index, (record, page)) in records.iter().zip(record_pages).enumerate() {
        let Some(page_number) = *page else {
            continue;
        };
        let page_id = page_ids.get(&(page_number as u32)).copied().ok_or(
            BookmarkError::PageOutOfRange {
                record_index: index,
                page_number,
            },
        )?;
        targets.push((record.title(), page_id));
    }

    if targets.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let root_id = document.new_object_id();
    let entry_ids: Vec<ObjectId> = targets.iter().map(|_| document.new_object_id()).collect();

    for (index, ((title, page_id), entry_id)) in targets.iter().zip(&entry_ids).enumerate() {
        let mut entry = dictionary! {
            "Title" => Object::string_literal(*title),
            "Dest" => vec![Object::Reference(*page_id), "Fit".into()],
            "Parent" => Object::Reference(root_id),
        };
        if index > 0 {
            entry.set("Prev", Object::Reference(entry_ids[index - 1]));
        }
        if let Some(next_id) = entry_ids.get(index + 1) {
            entry.set("Next", Object::Reference(*next_id));
        }
        document.objects.insert(*entry_id, Object::Dictionary(entry));
    }

    let root = dictionary! {
        "Type" => "Outlines",
        "Count" => entry_ids.len() as i64,
        "First" => Object::Reference(entry_ids[0]),
        "Last" => Object::Reference(entry_ids[entry_ids.len() - 1]),
    };
    document.objects.insert(root_id, Object::Dictionary(root));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .ok()
        .and_then(|object| object.as_reference().ok())
        .ok_or(BookmarkError::CatalogUnavailable)?;
    document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::CatalogUnavailable)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::CatalogUnavailable)?
        .set("Outlines", Object::Reference(root_id));

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::{apply_record_bookmarks, BookmarkError};
    use crate::model::LabRecord;
    use lopdf::{dictionary, Document, Object};

    fn minimal_pdf(page_count: usize) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let kids: Vec<Object> = (0..page_count)
            .map(|_| {
                let page_id = document.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => Object::Reference(pages_id),
                });
                Object::Reference(page_id)
            })
            .collect();

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => page_count as i64,
                "Kids" => kids,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        document.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("serialize minimal pdf");
        bytes
    }

    fn record(title: &str) -> LabRecord {
        LabRecord::new(title, "int main(){return 0;}", "$ ./demo")
    }

    #[test]
    fn outline_entries_link_titles_to_pages() {
        let bytes = minimal_pdf(2);
        let records = [record("1. First"), record("2. Second")];
        let pages = [Some(1), Some(2)];

        let patched = apply_record_bookmarks(&bytes, &records, &pages).expect("apply bookmarks");
        let document = Document::load_mem(&patched).expect("parse patched pdf");

        let outlines_id = document
            .catalog()
            .expect("catalog")
            .get(b"Outlines")
            .expect("outlines entry")
            .as_reference()
            .expect("outlines reference");
        let outlines = document
            .get_object(outlines_id)
            .expect("outlines object")
            .as_dict()
            .expect("outlines dictionary");
        assert_eq!(outlines.get(b"Count").unwrap().as_i64().unwrap(), 2);

        let first_id = outlines.get(b"First").unwrap().as_reference().unwrap();
        let first = document.get_object(first_id).unwrap().as_dict().unwrap();
        assert_eq!(
            first.get(b"Title").unwrap().as_str().unwrap(),
            b"1. First"
        );
    }

    #[test]
    fn unrendered_records_leave_bytes_untouched() {
        let bytes = minimal_pdf(1);
        let records = [record("1. Never rendered")];

        let patched = apply_record_bookmarks(&bytes, &records, &[None]).expect("apply bookmarks");
        assert_eq!(patched, bytes);
    }

    #[test]
    fn out_of_range_page_is_reported() {
        let bytes = minimal_pdf(1);
        let records = [record("1. Lost")];

        let err = apply_record_bookmarks(&bytes, &records, &[Some(5)]).unwrap_err();
        assert!(matches!(
            err,
            BookmarkError::PageOutOfRange {
                record_index: 0,
                page_number: 5,
            }
        ));
    }
}
