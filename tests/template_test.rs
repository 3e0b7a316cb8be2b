//! Integration tests for JSON templates.

use rtfcraft::template::{Block, DocumentTemplate};
use rtfcraft::{from_template_file, Error, PaperSize, RtfCraft};

const REPORT: &str = r##"{
    "info": {"title": "Inventory", "keywords": ["stock", "q3"]},
    "options": {"paper": "a5", "landscape": true, "default_font_size": 9},
    "footers": [{"blocks": [{"type": "text", "text": "<pagenum>", "par": {"alignment": "center"}}]}],
    "sections": [{
        "blocks": [
            {"type": "text", "text": "Stock <b>levels</b>", "font": {"size": 14, "family": "Verdana", "color": "#336699"}},
            {"type": "table", "columns": [5.0, 2.0], "alignment": "center",
             "rows": [
                {"cells": [
                    {"blocks": [{"type": "text", "text": "Item"}], "background": "#EEEEEE"},
                    {"blocks": [{"type": "text", "text": "Qty"}], "alignment": "right"}
                ]},
                {"cells": [
                    {"blocks": [
                        {"type": "text", "text": "Bolts"},
                        {"type": "table", "columns": [2.0], "rows": [{"cells": [{"blocks": [{"type": "text", "text": "M6"}]}]}]}
                    ]},
                    {"blocks": [{"type": "rtf", "code": "{\\b 120}"}]}
                ]}
             ]},
            {"type": "hyperlink", "url": "https://example.com/stock", "par": {"alignment": "left"}},
            {"type": "empty_paragraph"},
            {"type": "endnote", "text": "Counted on site."}
        ]
    }]
}"##;

#[test]
fn test_report_template() {
    let template = DocumentTemplate::from_json(REPORT).unwrap();
    assert_eq!(template.options.paper, PaperSize::A5);
    assert_eq!(template.sections[0].blocks.len(), 5);
    assert!(matches!(template.sections[0].blocks[1], Block::Table(_)));

    let rtf = template.build().unwrap().to_rtf_string().unwrap();
    assert!(rtf.contains("{\\keywords stock q3}"));
    assert!(rtf.contains("\\paperw11907\\paperh8392"));
    assert!(rtf.contains("\\landscape"));
    assert!(rtf.contains("{\\fs28\\f1\\cf2 Stock \\b levels\\b0 }"));
    assert!(rtf.contains("\\clcbpat3"));
    assert!(rtf.contains("\\pard \\intbl\\itap2 \\ql M6\\nestcell "));
    assert!(rtf.contains("{\\b 120}\\cell "));
    assert!(rtf.contains("HYPERLINK \"https://example.com/stock\""));
    assert!(rtf.contains("{\\fldrslt {https://example.com/stock}}"));
    assert!(rtf.contains("{\\footnote\\ftnalt"));
}

#[test]
fn test_template_round_trips_through_json() {
    let template = DocumentTemplate::from_json(REPORT).unwrap();
    let json = template.to_json().unwrap();
    let reparsed = DocumentTemplate::from_json(&json).unwrap();
    assert_eq!(template, reparsed);
}

#[test]
fn test_template_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, REPORT).unwrap();

    let doc = from_template_file(&path).unwrap();
    assert_eq!(doc.info().title.as_deref(), Some("Inventory"));

    let doc = RtfCraft::new()
        .with_paper(PaperSize::Letter)
        .with_landscape(false)
        .with_author("Warehouse")
        .load(&path)
        .unwrap();
    assert_eq!(doc.options().paper, PaperSize::Letter);
    assert!(!doc.options().landscape);
    assert_eq!(doc.info().author.as_deref(), Some("Warehouse"));

    let out = dir.path().join("report.rtf");
    let stats = doc.save(&out).unwrap();
    assert_eq!(stats.table_count, 2);
    assert_eq!(stats.note_count, 1);
}

#[test]
fn test_template_errors() {
    assert!(matches!(
        DocumentTemplate::from_json(r#"{"options": {"paper": "a0"}}"#),
        Err(Error::Template(_))
    ));
    assert!(matches!(
        DocumentTemplate::from_json(r##"{"sections": [{"blocks": [
            {"type": "text", "text": "x", "font": {"color": "#GG0000"}}
        ]}]}"##),
        Err(Error::Template(_))
    ));

    let bad_merge = DocumentTemplate::from_json(
        r#"{"sections": [{"blocks": [{"type": "table", "columns": [1.0, 1.0],
            "rows": [{"cells": []}], "merges": [{"from": [1, 2], "to": [1, 1]}]}]}]}"#,
    )
    .unwrap();
    assert!(matches!(bad_merge.build(), Err(Error::InvalidMergeRange(_))));

    let missing_image = DocumentTemplate::from_json(
        r#"{"sections": [{"blocks": [{"type": "image", "path": "/nonexistent/logo.png"}]}]}"#,
    )
    .unwrap();
    assert!(matches!(missing_image.build(), Err(Error::Io(_))));
}
