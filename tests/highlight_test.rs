//! Integration tests for the highlight-and-filter pipeline.
//!
//! Each test builds a small synthetic PDF in memory, runs the marker, and
//! inspects the outcome report and the filtered output document.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use numark::{highlight_document, mark_bytes, Error, HighlightColor, SourceDocument};

/// One line of page text: (content, x, y).
type Line = (&'static str, f32, f32);

/// Build a PDF where each page shows the given lines in 12pt Helvetica.
fn build_pdf(pages: &[&[Line]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
        ];
        let mut prev = (0.0f32, 0.0f32);
        for (text, x, y) in *lines {
            // Td is relative to the previous line start
            operations.push(Operation::new(
                "Td",
                vec![(*x - prev.0).into(), (*y - prev.1).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            prev = (*x, *y);
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

fn targets(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_three_page_scenario() {
    let pdf = build_pdf(&[
        &[("Statement Summary", 72.0, 720.0)],
        &[("Nothing of interest here", 72.0, 720.0)],
        &[("UAN 12345 listed below", 72.0, 720.0)],
    ]);

    let (out, outcome) =
        mark_bytes(&pdf, &targets(&["12345", "99999"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 1);
    assert_eq!(outcome.found, vec!["12345"]);
    assert_eq!(outcome.not_found, vec!["99999"]);
    assert_eq!(outcome.kept_pages, vec![1, 3]);

    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 2);
}

#[test]
fn test_single_page_no_match() {
    let pdf = build_pdf(&[&[("hello world", 72.0, 720.0)]]);

    let (out, outcome) = mark_bytes(&pdf, &targets(&["111"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 0);
    assert!(outcome.found.is_empty());
    assert_eq!(outcome.not_found, vec!["111"]);
    assert_eq!(outcome.kept_pages, vec![1]);

    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 1);
}

#[test]
fn test_empty_targets_keep_first_page_only() {
    let pdf = build_pdf(&[
        &[("page one", 72.0, 720.0)],
        &[("page two", 72.0, 720.0)],
        &[("page three", 72.0, 720.0)],
    ]);

    let (out, outcome) = mark_bytes(&pdf, &[], HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 0);
    assert!(outcome.found.is_empty());
    assert!(outcome.not_found.is_empty());
    assert_eq!(outcome.kept_pages, vec![1]);

    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 1);
}

#[test]
fn test_found_and_not_found_partition() {
    let pdf = build_pdf(&[&[("numbers 4512 and 778899", 72.0, 720.0)]]);
    let list = targets(&["4512", "778899", "111", "4512"]);

    let (_, outcome) = mark_bytes(&pdf, &list, HighlightColor::default()).unwrap();

    assert_eq!(outcome.found, vec!["4512", "778899"]);
    assert_eq!(outcome.not_found, vec!["111"]);
    // Partition of the deduplicated target set: sorted, disjoint, complete
    assert!(outcome.found.iter().all(|t| !outcome.not_found.contains(t)));
    assert_eq!(outcome.distinct_targets(), 3);
}

#[test]
fn test_duplicate_targets_count_once() {
    let pdf = build_pdf(&[&[("value 4512 once", 72.0, 720.0)]]);

    let (_, outcome) =
        mark_bytes(&pdf, &targets(&["4512", "4512"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 1);
    assert_eq!(outcome.found, vec!["4512"]);
}

#[test]
fn test_match_on_first_page_no_duplication() {
    let pdf = build_pdf(&[
        &[("target 4512 here", 72.0, 720.0)],
        &[("blank", 72.0, 720.0)],
    ]);

    let (out, outcome) = mark_bytes(&pdf, &targets(&["4512"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.kept_pages, vec![1]);
    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 1);
    assert_eq!(outcome.total_matches, 1);
}

#[test]
fn test_multiple_occurrences_on_one_line() {
    let pdf = build_pdf(&[&[("12345 then again 12345", 72.0, 720.0)]]);

    let (_, outcome) = mark_bytes(&pdf, &targets(&["12345"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 2);
    assert_eq!(outcome.found, vec!["12345"]);
}

#[test]
fn test_occurrences_on_multiple_pages() {
    let pdf = build_pdf(&[
        &[("intro", 72.0, 720.0)],
        &[("12345", 72.0, 720.0)],
        &[("no hit", 72.0, 720.0)],
        &[("12345", 72.0, 700.0), ("12345", 72.0, 650.0)],
    ]);

    let (out, outcome) = mark_bytes(&pdf, &targets(&["12345"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 3);
    assert_eq!(outcome.kept_pages, vec![1, 2, 4]);
    assert_eq!(outcome.page_matches.get(&2), Some(&1));
    assert_eq!(outcome.page_matches.get(&4), Some(&2));

    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 3);
}

#[test]
fn test_split_token_is_not_a_match() {
    // "12345" split across two text-show operations never renders as one
    // token, so the target stays unmatched and the page is dropped.
    let pdf = build_pdf(&[
        &[("first page", 72.0, 720.0)],
        &[("123", 72.0, 700.0), ("45", 90.0, 700.0)],
    ]);

    let (out, outcome) = mark_bytes(&pdf, &targets(&["12345"]), HighlightColor::default()).unwrap();

    assert_eq!(outcome.total_matches, 0);
    assert_eq!(outcome.not_found, vec!["12345"]);
    assert_eq!(outcome.kept_pages, vec![1]);

    let filtered = Document::load_mem(&out).unwrap();
    assert_eq!(filtered.get_pages().len(), 1);
}

#[test]
fn test_yellow_annotation_stroke_color() {
    let pdf = build_pdf(&[&[("pay 12345 now", 72.0, 720.0)]]);

    let (out, outcome) = mark_bytes(&pdf, &targets(&["12345"]), HighlightColor::YELLOW).unwrap();
    assert_eq!(outcome.total_matches, 1);

    let filtered = Document::load_mem(&out).unwrap();
    let pages = filtered.get_pages();
    let page_id = *pages.get(&1).unwrap();
    let page_dict = filtered.get_dictionary(page_id).unwrap();

    let annots = page_dict.get(b"Annots").unwrap().as_array().unwrap();
    assert_eq!(annots.len(), 1);

    let annot_id = annots[0].as_reference().unwrap();
    let annot = filtered.get_dictionary(annot_id).unwrap();
    assert_eq!(annot.get(b"Subtype").unwrap().as_name_str().unwrap(), "Highlight");

    let channels: Vec<f32> = annot
        .get(b"C")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_float().unwrap())
        .collect();
    assert_eq!(channels, vec![1.0, 1.0, 0.0]);

    let quads = annot.get(b"QuadPoints").unwrap().as_array().unwrap();
    assert_eq!(quads.len(), 8);
}

#[test]
fn test_determinism() {
    let pdf = build_pdf(&[
        &[("alpha 4512", 72.0, 720.0)],
        &[("beta", 72.0, 720.0)],
        &[("gamma 4512 4512", 72.0, 720.0)],
    ]);
    let list = targets(&["4512", "777"]);

    let (out_a, outcome_a) = mark_bytes(&pdf, &list, HighlightColor::GREEN).unwrap();
    let (out_b, outcome_b) = mark_bytes(&pdf, &list, HighlightColor::GREEN).unwrap();

    assert_eq!(outcome_a, outcome_b);
    assert_eq!(out_a, out_b);
}

#[test]
fn test_empty_document_is_rejected() {
    let pdf = build_pdf(&[]);
    let mut doc = SourceDocument::from_bytes(&pdf).unwrap();
    let result = highlight_document(&mut doc, &targets(&["1"]), HighlightColor::default());
    assert!(matches!(result, Err(Error::EmptyDocument)));
}

#[test]
fn test_mark_file_round_trip() {
    let pdf = build_pdf(&[
        &[("cover", 72.0, 720.0)],
        &[("member 100234567890", 72.0, 720.0)],
    ]);

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.pdf");
    let output = dir.path().join("statement_highlighted.pdf");
    std::fs::write(&input, &pdf).unwrap();

    let outcome = numark::mark_file(
        &input,
        &output,
        &targets(&["100234567890"]),
        HighlightColor::LIGHT_BLUE,
    )
    .unwrap();

    assert_eq!(outcome.found, vec!["100234567890"]);
    assert_eq!(outcome.kept_pages, vec![1, 2]);

    let reopened = SourceDocument::open(&output).unwrap();
    assert_eq!(reopened.page_count(), 2);
}

#[test]
fn test_not_a_pdf_fails_cleanly() {
    let result = mark_bytes(b"just some text", &[], HighlightColor::default());
    assert!(matches!(result, Err(Error::UnknownFormat)));
}
