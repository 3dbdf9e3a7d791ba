//! End-to-end rendering: realistic API response bodies through each format.

use serde_json::json;

use s2cli::formatters::{self, EntityKind, OutputFormat};

fn search_response() -> serde_json::Value {
    json!({
        "total": 2,
        "offset": 0,
        "data": [
            {
                "paperId": "649def34f8be52c8b66281af98ae884c09aef38b",
                "title": "Attention Is All You Need",
                "year": 2017,
                "citationCount": 100_000,
                "venue": "Neural Information Processing Systems",
                "authors": [{"authorId": "1", "name": "Ashish Vaswani"}]
            },
            {
                "paperId": "df2b0e26d0599ce3e70df8a9da02e51594e0e992",
                "title": "BERT: Pre-training of Deep Bidirectional Transformers",
                "year": 2019,
                "citationCount": 80_000,
                "venue": "NAACL",
                "authors": [{"authorId": "2", "name": "Jacob Devlin"}]
            }
        ]
    })
}

#[test]
fn test_search_response_as_table() {
    let out = formatters::render(&search_response(), OutputFormat::Table, true, EntityKind::Paper)
        .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Title"));
    assert!(lines[1].contains("Attention Is All You Need"));
    assert!(lines[1].contains("2017"));
    assert!(lines[2].contains("NAACL"));
}

#[test]
fn test_search_response_as_piped_json_is_lossless() {
    let response = search_response();
    let out =
        formatters::render(&response, OutputFormat::Json, false, EntityKind::Paper).unwrap();

    assert!(!out.contains('\n'));
    let round: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(round, response);
}

#[test]
fn test_batch_response_as_bibtex() {
    let response = json!([
        {
            "paperId": "a",
            "title": "Attention Is All You Need",
            "year": 2017,
            "venue": "Neural Information Processing Systems Conference",
            "authors": [{"name": "Ashish Vaswani"}],
            "externalIds": {"ArXiv": "1706.03762"}
        },
        null,
        {
            "paperId": "b",
            "title": "The Art of Programming",
            "year": 2020,
            "authors": [{"name": "John Doe"}]
        }
    ]);

    let out =
        formatters::render(&response, OutputFormat::Bibtex, false, EntityKind::Paper).unwrap();

    assert!(out.contains("@inproceedings{vaswani2017attention,"));
    assert!(out.contains("eprint = {1706.03762}"));
    assert!(out.contains("@article{doe2020art,"));
    // The null batch miss produces no entry.
    assert_eq!(out.matches('@').count(), 2);
}

#[test]
fn test_citation_response_as_table_unwraps_wrappers() {
    let response = json!({
        "data": [
            {"citingPaper": {"paperId": "c", "title": "A Survey", "year": 2021}}
        ]
    });

    let out =
        formatters::render(&response, OutputFormat::Table, true, EntityKind::Paper).unwrap();
    assert!(out.contains("A Survey"));
}

#[test]
fn test_author_search_as_table() {
    let response = json!({
        "total": 1,
        "data": [{
            "authorId": "1741101",
            "name": "Geoffrey Hinton",
            "paperCount": 500,
            "citationCount": 400_000,
            "hIndex": 160
        }]
    });

    let out =
        formatters::render(&response, OutputFormat::Table, true, EntityKind::Author).unwrap();
    assert!(out.lines().next().unwrap().contains("h-index"));
    assert!(out.contains("Geoffrey Hinton"));
    assert!(out.contains("160"));
}

#[test]
fn test_table_rejects_non_paper_payload() {
    // A shape that cannot decode into papers surfaces a parse error instead
    // of an empty table.
    let response = json!({"data": [{"authors": "not-a-list"}]});
    assert!(
        formatters::render(&response, OutputFormat::Table, true, EntityKind::Paper).is_err()
    );
}
