//! Common test utilities for integration tests

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds an in-memory ZIP archive with the given members
#[allow(dead_code)]
pub fn zip_bytes(files: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(method);

    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Helper function to create a test ZIP file with specified files
#[allow(dead_code)]
pub fn create_test_zip(zip_path: &Path, files: &[(&str, &str)]) {
    let members: Vec<(&str, &[u8])> = files
        .iter()
        .map(|(name, content)| (*name, content.as_bytes()))
        .collect();
    fs::write(zip_path, zip_bytes(&members, CompressionMethod::Stored)).unwrap();
}

/// Lists the file names directly inside a directory, sorted
#[allow(dead_code)]
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Sample database payload standing in for a vendor BIN file
#[allow(dead_code)]
pub const SAMPLE_BIN: &[u8] = b"\x01\x02IP2LOCATION-SAMPLE-BIN\x00\x00\x00\x10\x20\x30";

/// Sample CSV rows in the vendor's DB1 layout
#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "\"0\",\"16777215\",\"-\",\"-\"\n\"16777216\",\"16777471\",\"US\",\"United States of America\"\n";

/// Body the vendor sends once the daily quota is used up
#[allow(dead_code)]
pub const LIMIT_BODY: &str =
    "THIS FILE CAN ONLY BE DOWNLOADED 5 TIMES PER HOUR. PLEASE TRY AGAIN LATER.";
