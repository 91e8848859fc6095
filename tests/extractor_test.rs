//! Integration tests for extractor module

#[path = "common/mod.rs"]
mod common;

use common::*;
use ip2location_downloader::errors::AppError;
use ip2location_downloader::extractor;
use std::path::Path;
use tempfile::TempDir;
use zip::CompressionMethod;

#[test]
fn test_extracts_only_data_files() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&output_dir).unwrap();
    create_test_zip(&zip_path, &[("DB1.BIN", "binary"), ("readme.txt", "docs")]);

    let extracted = extractor::unzip_database(&zip_path, Some(output_dir.as_path())).unwrap();

    assert_eq!(extracted.path, output_dir.join("DB1.BIN"));
    assert_eq!(extracted.extracted, vec![output_dir.join("DB1.BIN")]);
    assert_eq!(list_dir(&output_dir), vec!["DB1.BIN".to_string()]);
    assert_eq!(
        std::fs::read_to_string(output_dir.join("DB1.BIN")).unwrap(),
        "binary"
    );
}

#[test]
fn test_no_data_member_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&output_dir).unwrap();
    create_test_zip(
        &zip_path,
        &[("README_LITE.TXT", "docs"), ("LICENSE_LITE.TXT", "license")],
    );

    let err = extractor::unzip_database(&zip_path, Some(output_dir.as_path())).unwrap_err();

    match err {
        AppError::NoExtractableMemberFound { path } => assert_eq!(path, zip_path),
        other => panic!("Expected NoExtractableMemberFound, got {other:?}"),
    }
    assert!(list_dir(&output_dir).is_empty());
}

#[test]
fn test_lowercase_suffix_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    create_test_zip(&zip_path, &[("db1.bin", "binary")]);

    let err = extractor::unzip_database(&zip_path, Some(temp_dir.path())).unwrap_err();
    assert!(matches!(err, AppError::NoExtractableMemberFound { .. }));
}

#[test]
fn test_last_data_member_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1LITECSV.zip");
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&output_dir).unwrap();
    create_test_zip(
        &zip_path,
        &[
            ("IP2LOCATION-LITE-DB1.CSV", SAMPLE_CSV),
            ("README_LITE.TXT", "docs"),
            ("IP2LOCATION-LITE-DB1.IPV6.CSV", SAMPLE_CSV),
        ],
    );

    let extracted = extractor::unzip_database(&zip_path, Some(output_dir.as_path())).unwrap();

    assert_eq!(
        extracted.path,
        output_dir.join("IP2LOCATION-LITE-DB1.IPV6.CSV")
    );
    assert_eq!(extracted.extracted.len(), 2);
    assert_eq!(
        list_dir(&output_dir),
        vec![
            "IP2LOCATION-LITE-DB1.CSV".to_string(),
            "IP2LOCATION-LITE-DB1.IPV6.CSV".to_string(),
        ]
    );
}

#[test]
fn test_nested_member_keeps_stored_path() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("PX2BIN.zip");
    create_test_zip(&zip_path, &[("data/IP2PROXY-PX2.BIN", "proxy")]);

    let extracted = extractor::unzip_database(&zip_path, Some(temp_dir.path())).unwrap();

    let expected = temp_dir.path().join("data/IP2PROXY-PX2.BIN");
    assert_eq!(extracted.path, expected);
    assert_eq!(std::fs::read_to_string(expected).unwrap(), "proxy");
}

#[test]
fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    std::fs::write(temp_dir.path().join("DB1.BIN"), "stale and much longer").unwrap();
    create_test_zip(&zip_path, &[("DB1.BIN", "fresh")]);

    extractor::unzip_database(&zip_path, Some(temp_dir.path())).unwrap();

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("DB1.BIN")).unwrap(),
        "fresh"
    );
}

#[test]
fn test_corrupt_archive_is_an_extraction_error() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    std::fs::write(&zip_path, "invalid").unwrap();

    let err = extractor::unzip_database(&zip_path, Some(temp_dir.path())).unwrap_err();

    match err {
        AppError::ExtractionError { path, reason } => {
            assert_eq!(path, zip_path);
            assert!(reason.contains("Failed to read ZIP archive"));
        }
        other => panic!("Expected ExtractionError, got {other:?}"),
    }
}

#[test]
fn test_deflated_member_matches_stored_size() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    let payload = SAMPLE_BIN.repeat(64);
    std::fs::write(
        &zip_path,
        zip_bytes(&[("DB1.BIN", payload.as_slice())], CompressionMethod::Deflated),
    )
    .unwrap();

    let extracted = extractor::unzip_database(&zip_path, Some(temp_dir.path())).unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&zip_path).unwrap()).unwrap();
    let stored_size = archive.by_name("DB1.BIN").unwrap().size();
    assert_eq!(
        std::fs::metadata(&extracted.path).unwrap().len(),
        stored_size
    );
}

#[test]
fn test_defaults_to_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    create_test_zip(&zip_path, &[("DB1.BIN", "binary")]);

    let extracted =
        extractor::unzip_database_relative_to(&zip_path, None, temp_dir.path()).unwrap();

    assert_eq!(extracted.path, temp_dir.path().join("DB1.BIN"));
    assert!(temp_dir.path().join("DB1.BIN").exists());
}

#[test]
fn test_relative_output_dir_resolves_against_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("DB1.zip");
    std::fs::create_dir(temp_dir.path().join("data")).unwrap();
    create_test_zip(&zip_path, &[("DB1.CSV", SAMPLE_CSV)]);

    let extracted = extractor::unzip_database_relative_to(
        &zip_path,
        Some(Path::new("data")),
        temp_dir.path(),
    )
    .unwrap();

    assert_eq!(extracted.path, temp_dir.path().join("data/DB1.CSV"));
    assert_eq!(std::fs::read_to_string(&extracted.path).unwrap(), SAMPLE_CSV);
}
