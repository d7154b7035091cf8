//! Integration tests for batch decoding over files, CSV sheet exports,
//! configuration files and the concurrent path.

use disaster_decoder::batch::{BatchDecoder, ItemState, Sheet, SheetOptions};
use disaster_decoder::cli::discovery::FileDiscovery;
use disaster_decoder::{DataRecord, DecoderConfig, DecoderError, Language};
use std::fs;
use tempfile::TempDir;

const SAMPLE_ID: &str = "110105000000202401151030000011301001";
const OTHER_ID: &str = "440305000000202312312359590021401002";

#[test]
fn test_file_name_batch_over_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(format!("{}.jpg", SAMPLE_ID)), b"").unwrap();
    fs::write(root.join(format!("scan_{}_v2.pdf", OTHER_ID)), b"").unwrap();
    fs::write(root.join("readme.txt"), b"").unwrap();

    let files = FileDiscovery::new(root.to_path_buf()).discover().unwrap();
    let outcome = BatchDecoder::default().decode_file_names(&files).unwrap();

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 1);

    let failed = outcome.failures().next().unwrap();
    assert!(failed.input.ends_with("readme.txt"));
    assert_eq!(failed.state, ItemState::ExtractionFailed);
}

#[test]
fn test_sheet_from_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("灾情汇总.csv");
    let csv_text = format!(
        "序号,描述,灾情标识\n1,东城区房屋,{}\n2,无编码,\n3,道路中断,ID-{}\n",
        SAMPLE_ID, OTHER_ID
    );
    fs::write(&path, csv_text).unwrap();

    let sheet = Sheet::from_csv_path(&path).unwrap();
    assert_eq!(sheet.name, "灾情汇总");

    let options = SheetOptions::default().with_description_column(1);
    let report = BatchDecoder::new(Language::En)
        .decode_sheet(&sheet, &options)
        .unwrap();

    assert_eq!(report.id_column, 2);
    assert!(report.column_detected);
    assert_eq!(report.outcome.total, 3);
    assert_eq!(report.outcome.succeeded, 2);

    let rows: Vec<usize> = report.outcome.successes().map(|row| row.row_number).collect();
    assert_eq!(rows, vec![2, 4]);

    let first = report.outcome.successes().next().unwrap();
    assert_eq!(first.description.as_deref(), Some("东城区房屋"));
    assert_eq!(first.decoded.disaster_category_name, "Building damage");
}

#[test]
fn test_missing_sheet_file_is_io_error() {
    let err = Sheet::from_csv_path(std::path::Path::new("/nonexistent/sheet.csv")).unwrap_err();
    assert!(matches!(err, DecoderError::Io(_)));
}

#[test]
fn test_records_batch_counts() {
    let records = vec![
        DataRecord::default().with_disaster_id(SAMPLE_ID),
        DataRecord::default().with_content("未附编码的文字报告"),
        DataRecord::default().with_record_id(OTHER_ID),
    ];

    let outcome = BatchDecoder::default().process_records(records).unwrap();
    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 1);
}

#[test]
fn test_config_file_drives_batch_language() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"language": "en", "workers": 2}"#).unwrap();

    let config = DecoderConfig::from_file(&path).unwrap();
    let outcome = BatchDecoder::from_config(config)
        .decode_ids(&[SAMPLE_ID])
        .unwrap();

    let decoded = outcome.successes().next().unwrap();
    assert!(decoded.description.contains("Carrier: Image"));
}

#[tokio::test]
async fn test_concurrent_batch_preserves_order() {
    let config = DecoderConfig::default()
        .with_workers(3)
        .with_concurrency_threshold(10);
    let batch = BatchDecoder::from_config(config);

    let ids: Vec<String> = (0..50)
        .map(|i| {
            if i % 5 == 0 {
                format!("broken-{}", i)
            } else if i % 2 == 0 {
                SAMPLE_ID.to_string()
            } else {
                OTHER_ID.to_string()
            }
        })
        .collect();

    let outcome = batch.decode_ids_concurrent(ids.clone()).await.unwrap();

    assert_eq!(outcome.total, 50);
    assert_eq!(outcome.failed, 10);
    for (position, item) in outcome.items.iter().enumerate() {
        assert_eq!(item.index, position);
        assert_eq!(item.input, ids[position]);
    }
}
