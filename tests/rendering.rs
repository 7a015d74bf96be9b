use os_lab_report::labs;
use os_lab_report::model::LabRecord;
use os_lab_report::report::ReportBuilder;
use sha2::{Digest, Sha256};

fn report_builder() -> ReportBuilder {
    ReportBuilder::new(labs::BANNER).add_records(labs::builtin_records())
}

fn render_report_pdf() -> Option<Vec<u8>> {
    if !os_lab_report::fonts::fonts_available() {
        return None;
    }

    let bytes = report_builder().render().expect("render report pdf").bytes;
    Some(bytes)
}

macro_rules! skip_without_fonts {
    ($name:literal) => {
        match render_report_pdf() {
            Some(bytes) => bytes,
            None => {
                eprintln!(
                    "Skipping {}: bundled fonts missing. Set OS_LAB_REPORT_FONTS_DIR or copy assets/fonts next to the binary.",
                    $name
                );
                return;
            }
        }
    };
}

/// Zeroes the byte ranges that change between runs (trailer timestamps,
/// document ids, producer, and the matching fields of the XMP metadata
/// stream) so renders can be compared.
fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() && data[cursor] != terminator {
                    if !matches!(data[cursor], b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], element: &[u8]) {
        let open = [b"<".as_slice(), element, b">".as_slice()].concat();
        let close = [b"</".as_slice(), element, b">".as_slice()].concat();

        let mut offset = 0;
        while let Some(open_pos) = find(&data[offset..], &open) {
            let value_start = offset + open_pos + open.len();
            let Some(close_pos) = find(&data[value_start..], &close) else {
                break;
            };
            for byte in &mut data[value_start..value_start + close_pos] {
                if byte.is_ascii_alphanumeric() || matches!(*byte, b':' | b'-' | b'+' | b'.') {
                    *byte = b'0';
                }
            }
            offset = value_start + close_pos + close.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"xmp:CreateDate");
    scrub_xml(&mut normalized, b"xmp:ModifyDate");
    scrub_xml(&mut normalized, b"xmp:MetadataDate");
    scrub_xml(&mut normalized, b"xmpMM:DocumentID");
    scrub_xml(&mut normalized, b"xmpMM:InstanceID");
    scrub_xml(&mut normalized, b"xmpMM:VersionID");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(scrub_pdf(bytes));
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let bytes = skip_without_fonts!("renders_non_empty_output");
    assert!(
        !bytes.is_empty(),
        "rendered PDF should contain at least the banner page"
    );
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF document");
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = skip_without_fonts!("rendering_is_deterministic");
    let bytes_b = skip_without_fonts!("rendering_is_deterministic");

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn report_has_at_least_one_page() {
    let bytes = skip_without_fonts!("report_has_at_least_one_page");
    let document = lopdf::Document::load_mem(&bytes).expect("parse rendered PDF");
    assert!(!document.get_pages().is_empty());
}

#[test]
fn empty_output_still_renders_a_block() {
    if !os_lab_report::fonts::fonts_available() {
        eprintln!("Skipping empty_output_still_renders_a_block: bundled fonts missing.");
        return;
    }

    let pdf = ReportBuilder::new(labs::BANNER)
        .add_record(LabRecord::new("5. Silent Program", "int main(){return 0;}", ""))
        .render()
        .expect("render record with empty output");
    assert!(!pdf.bytes.is_empty());
}

#[test]
fn save_to_missing_directory_fails() {
    if !os_lab_report::fonts::fonts_available() {
        eprintln!("Skipping save_to_missing_directory_fails: bundled fonts missing.");
        return;
    }

    let result = report_builder().render_to_file("does-not-exist/OS_Lab_Codes_Output.pdf");
    assert!(result.is_err(), "writing into a missing directory must fail");
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_follow_record_order() {
    if !os_lab_report::fonts::fonts_available() {
        eprintln!("Skipping bookmarks_follow_record_order: bundled fonts missing.");
        return;
    }

    let pdf = report_builder()
        .render_with_bookmarks()
        .expect("render report with bookmarks");
    let document = lopdf::Document::load_mem(&pdf.bytes).expect("parse rendered PDF");

    let catalog = document.catalog().expect("document catalog");
    let outlines_id = catalog
        .get(b"Outlines")
        .expect("outlines entry")
        .as_reference()
        .expect("outlines reference");
    let outlines = document
        .get_object(outlines_id)
        .expect("outlines object")
        .as_dict()
        .expect("outlines dictionary");

    let page_numbers: std::collections::HashMap<_, _> = document
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();

    let mut titles = Vec::new();
    let mut destination_pages = Vec::new();
    let mut next = outlines
        .get(b"First")
        .ok()
        .map(|object| object.as_reference().expect("entry reference"));
    while let Some(entry_id) = next {
        let entry = document
            .get_object(entry_id)
            .expect("outline entry")
            .as_dict()
            .expect("outline entry dictionary");
        let title = entry.get(b"Title").expect("entry title");
        titles.push(String::from_utf8_lossy(title.as_str().expect("title bytes")).into_owned());

        let destination = entry
            .get(b"Dest")
            .expect("entry destination")
            .as_array()
            .expect("destination array");
        let page_ref = destination[0].as_reference().expect("destination page");
        destination_pages.push(*page_numbers.get(&page_ref).expect("destination page exists"));

        next = entry
            .get(b"Next")
            .ok()
            .map(|object| object.as_reference().expect("next reference"));
    }

    let expected: Vec<String> = labs::builtin_records()
        .iter()
        .map(|record| record.title().to_string())
        .collect();
    assert_eq!(titles, expected, "records must appear in report order");

    assert_eq!(destination_pages.first(), Some(&1));
    assert!(
        destination_pages.windows(2).all(|pair| pair[0] <= pair[1]),
        "section pages must not run backwards: {:?}",
        destination_pages
    );
    let page_count = page_numbers.len() as u32;
    assert!(destination_pages.iter().all(|page| *page <= page_count));
}
