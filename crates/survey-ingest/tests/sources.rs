use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use survey_ingest::{IngestError, read_sample, read_source};
use survey_model::{DocumentKind, SourceFormat, TabularKind};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_csv_and_drops_short_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "survey.csv",
        "Age,Region,Score\n25,North,4\n\n34,South\n41,East,5\n",
    );
    let table = read_source(&path, None).expect("read csv");

    assert_eq!(table.format(), SourceFormat::CSV);
    assert_eq!(table.headers(), &["Age", "Region", "Score"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.skipped_count(), 1);
    assert_eq!(table.input_row_count(), 3);
}

#[test]
fn reads_tsv_by_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "survey.tsv", "age\tgender\n30\tF\n");
    let table = read_source(&path, None).expect("read tsv");
    assert_eq!(table.format(), SourceFormat::TSV);
    assert_eq!(table.rows()[0], vec!["30", "F"]);
}

#[test]
fn declared_format_overrides_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "export.dat", "age;region\n30;North\n");
    assert!(read_source(&path, None).is_err());

    let table = read_source(
        &path,
        Some(SourceFormat::Document(DocumentKind::Text)),
    )
    .expect("read as text");
    assert_eq!(table.headers(), &["age", "region"]);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn header_only_file_yields_zero_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "empty_rows.csv", "age,region,score\n");
    let table = read_source(&path, None).expect("read header-only");
    assert_eq!(table.headers().len(), 3);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn empty_file_is_a_format_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "blank.csv", "  \n\n");
    let err = read_source(&path, None).unwrap_err();
    assert!(matches!(err, IngestError::EmptyFile { .. }));
}

#[test]
fn missing_file_is_not_found() {
    let err = read_source(Path::new("/nonexistent/survey.csv"), None).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn document_fragments_become_rows() {
    let dir = TempDir::new().expect("temp dir");
    let text = "\
Customer survey export

Response 1
Age: 34
Region: North
Overall rating: 4
Loved the quick delivery.

Response 2
Gender = F
The packaging was damaged.
Comments: would not order again
-----
Just a note without labels
";
    let path = temp_file(&dir, "export.txt", text);
    let table = read_source(&path, None).expect("read document");

    assert_eq!(table.format(), SourceFormat::Document(DocumentKind::Text));
    assert_eq!(
        table.headers(),
        &["age", "gender", "region", "satisfaction", "comment"]
    );
    assert_eq!(table.row_count(), 4);

    let rows = table.rows();
    assert_eq!(rows[0], vec!["", "", "", "", "Customer survey export"]);
    assert_eq!(rows[1], vec!["34", "", "North", "4", "Loved the quick delivery."]);
    assert_eq!(
        rows[2],
        vec![
            "",
            "F",
            "",
            "",
            "The packaging was damaged. would not order again"
        ]
    );
    assert_eq!(rows[3], vec!["", "", "", "", "Just a note without labels"]);
}

#[test]
fn document_with_embedded_table_uses_tabular_rules() {
    let dir = TempDir::new().expect("temp dir");
    let text = "| Age | Region | Score |\n|---|---|---|\n| 25 | North | 4 |\n| 34 | South | 3 |\n";
    let path = temp_file(&dir, "table.md", text);
    let table = read_source(&path, None).expect("read markdown table");
    assert_eq!(table.headers(), &["Age", "Region", "Score"]);
    assert_eq!(table.rows()[1], vec!["34", "South", "3"]);
}

#[test]
fn titled_document_table_skips_the_title() {
    let dir = TempDir::new().expect("temp dir");
    let text = "Customer Survey Export\nage,region,satisfaction\n25,North,4\n34,South,3\n41,East,5\n";
    let path = temp_file(&dir, "export.txt", text);
    let table = read_source(&path, None).expect("read titled table");

    assert_eq!(table.headers(), &["age", "region", "satisfaction"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows()[0], vec!["25", "North", "4"]);
    assert_eq!(table.rows()[2], vec!["41", "East", "5"]);
}

#[test]
fn comma_separated_prose_stays_in_the_comment() {
    let dir = TempDir::new().expect("temp dir");
    let text = "Great product, fast shipping\nService was slow, but friendly staff\nLove it, will buy again\n";
    let path = temp_file(&dir, "feedback.txt", text);
    let table = read_source(&path, None).expect("read prose");

    assert_eq!(table.headers(), &["comment"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(
        table.rows()[0],
        vec![
            "Great product, fast shipping Service was slow, but friendly staff \
             Love it, will buy again"
        ]
    );
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn reads_first_worksheet_with_dates() {
    let path = fixture("responses.xlsx");
    let table = read_source(&path, None).expect("read workbook");

    assert_eq!(table.format(), SourceFormat::Tabular(TabularKind::Workbook));
    assert_eq!(table.headers(), &["age", "region", "satisfaction", "submitted_on"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0], vec!["25", "North", "4", "2024-01-15"]);
    assert_eq!(table.rows()[1], vec!["34", "South", "", ""]);

    // The header sits on sheet row 2; the row with an extra value is row 5.
    assert_eq!(table.skipped_count(), 1);
    let skipped = &table.skipped()[0];
    assert_eq!(skipped.line, 5);
    assert_eq!(skipped.expected_fields, 4);
    assert_eq!(skipped.found_fields, 5);
}

fn write_pdf(path: &Path, lines: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let mut operations = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        operations.push(Operation::new("Td", vec![72.into(), (760 - 16 * idx as i64).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save pdf");
}

#[test]
fn reads_pdf_text_layer_as_fragments() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("responses.pdf");
    write_pdf(
        &path,
        &[
            "Response 1",
            "Age: 34",
            "Region: North",
            "Rating: 4",
            "Fast delivery",
            "Response 2",
            "Age: 52",
            "Region: South",
            "Slow support",
        ],
    );
    let table = read_source(&path, None).expect("read pdf");

    assert_eq!(table.format(), SourceFormat::Document(DocumentKind::Pdf));
    assert_eq!(table.headers(), &["age", "region", "satisfaction", "comment"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0], vec!["34", "North", "4", "Fast delivery"]);
    assert_eq!(table.rows()[1], vec!["52", "South", "", "Slow support"]);
}

#[test]
fn bundled_sample_is_readable() {
    let table = read_sample().expect("sample");
    assert!(table.row_count() > 100);
    assert!(table.headers().iter().any(|h| h == "likelihood_to_recommend"));
}
