//! Integration tests for OCR reconstruction.

use relayout::{
    reconstruct_from_ocr, Error, ListKind, OcrLine, ReconstructOptions, StructuralNode,
};

fn reconstruct(pages: &[Vec<OcrLine>]) -> Vec<StructuralNode> {
    reconstruct_from_ocr(pages, &ReconstructOptions::default())
        .unwrap()
        .nodes
}

#[test]
fn test_section_heading_scenario() {
    let page = vec![
        OcrLine::new("SECTION ONE", 100.0, 120.0),
        OcrLine::new("Some lowercase body text that runs on.", 180.0, 200.0),
    ];

    assert_eq!(
        reconstruct(&[page]),
        vec![
            StructuralNode::heading(1, "SECTION ONE"),
            StructuralNode::paragraph("Some lowercase body text that runs on."),
        ]
    );
}

#[test]
fn test_lines_cluster_into_paragraphs() {
    let page = vec![
        OcrLine::new("The first paragraph starts here", 100.0, 120.0),
        OcrLine::new("and continues on this line.", 123.0, 143.0),
        OcrLine::new("A second paragraph after a gap", 180.0, 200.0),
        OcrLine::new("also spans two lines.", 202.0, 222.0),
    ];

    assert_eq!(
        reconstruct(&[page]),
        vec![
            StructuralNode::paragraph(
                "The first paragraph starts here and continues on this line."
            ),
            StructuralNode::paragraph("A second paragraph after a gap also spans two lines."),
        ]
    );
}

#[test]
fn test_boxes_are_sorted_by_top() {
    let page = vec![
        OcrLine::new("later text", 200.0, 220.0),
        OcrLine::new("earlier text", 100.0, 120.0),
    ];

    assert_eq!(
        reconstruct(&[page]),
        vec![
            StructuralNode::paragraph("earlier text"),
            StructuralNode::paragraph("later text"),
        ]
    );
}

#[test]
fn test_colon_heading_and_list() {
    let page = vec![
        OcrLine::new("Key findings:", 100.0, 120.0),
        OcrLine::new("- revenue grew", 150.0, 170.0),
        OcrLine::new("- costs fell", 172.0, 192.0),
    ];

    assert_eq!(
        reconstruct(&[page]),
        vec![
            StructuralNode::heading(2, "Key findings:"),
            StructuralNode::list_item(ListKind::Bullet, "revenue grew"),
            StructuralNode::list_item(ListKind::Bullet, "costs fell"),
        ]
    );
}

#[test]
fn test_long_uppercase_text_is_paragraph() {
    let shouting = "THIS WHOLE LINE IS UPPERCASE BUT FAR TOO LONG TO BE A HEADING OF ANY KIND";
    let page = vec![OcrLine::new(shouting, 100.0, 120.0)];

    assert_eq!(reconstruct(&[page]), vec![StructuralNode::paragraph(shouting)]);
}

#[test]
fn test_no_tables_from_ocr() {
    let page = vec![
        OcrLine::new("Name          Qty", 100.0, 120.0),
        OcrLine::new("Apple          3", 150.0, 170.0),
        OcrLine::new("Pear           7", 200.0, 220.0),
    ];

    let nodes = reconstruct(&[page]);
    assert!(nodes.iter().all(|n| !n.is_table()));
}

#[test]
fn test_blank_page_contributes_nothing() {
    let pages = vec![
        vec![OcrLine::new("Page one text", 10.0, 30.0)],
        vec![OcrLine::new("   ", 10.0, 30.0)],
        vec![OcrLine::new("Page three text", 10.0, 30.0)],
    ];

    let doc = reconstruct_from_ocr(&pages, &ReconstructOptions::default()).unwrap();
    assert_eq!(
        doc.nodes,
        vec![
            StructuralNode::paragraph("Page one text"),
            StructuralNode::PageBreak,
            StructuralNode::paragraph("Page three text"),
        ]
    );
    assert!(!doc.needs_ocr());
}

#[test]
fn test_inverted_box_lenient() {
    let pages = vec![
        vec![OcrLine::new("Good page", 10.0, 30.0)],
        vec![OcrLine::new("Broken", 50.0, 30.0)],
    ];

    let doc = reconstruct_from_ocr(&pages, &ReconstructOptions::default()).unwrap();
    assert_eq!(
        doc.nodes,
        vec![
            StructuralNode::paragraph("Good page"),
            StructuralNode::PageBreak,
            StructuralNode::scan_warning(2),
        ]
    );
    assert_eq!(doc.summary.malformed_pages, vec![2]);
}

#[test]
fn test_inverted_box_strict() {
    let pages = vec![vec![OcrLine::new("Broken", 50.0, 30.0)]];
    let options = ReconstructOptions::new().strict();

    let err = reconstruct_from_ocr(&pages, &options).unwrap_err();
    assert!(matches!(err, Error::InputShape { page: 1, .. }));
}
