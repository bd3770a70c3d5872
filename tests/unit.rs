use chrono::{Local, TimeZone};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use textcat::filter::{dir_excluded, dir_included, extension_allowed, extension_of};
use textcat::output::ReportWriter;
use textcat::sniff::{SNIFF_LEN, classify, looks_binary};
use textcat::{BinaryDetection, DEFAULT_MAX_FILE_SIZE, ScanBuilder, ScanConfig, split_list};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of(Path::new("src/main.GO")), ".go");
    assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
    assert_eq!(extension_of(Path::new("home/.bashrc")), ".bashrc");
    assert_eq!(extension_of(Path::new("Makefile")), "");
    assert_eq!(extension_of(Path::new("dir.d/README")), "");
}

#[test]
fn test_extension_allowed_lists() {
    let go = Path::new("a.go");
    assert!(extension_allowed(go, &[], &[]));
    assert!(extension_allowed(go, &list(&[".go", ".md"]), &[]));
    assert!(!extension_allowed(Path::new("a.rs"), &list(&[".go"]), &[]));
    assert!(!extension_allowed(go, &[], &list(&[".go"])));
    assert!(extension_allowed(Path::new("A.GO"), &list(&[".go"]), &list(&[".exe"])));
}

#[test]
fn test_exclude_extension_wins() {
    let both = list(&[".go"]);
    assert!(!extension_allowed(Path::new("main.go"), &both, &both));
}

#[test]
fn test_extensionless_file_with_include_list() {
    assert!(!extension_allowed(Path::new("LICENSE"), &list(&[".txt"]), &[]));
    assert!(extension_allowed(Path::new("LICENSE"), &[], &list(&[".txt"])));
}

#[test]
fn test_dir_predicates_case_insensitive() {
    let names = list(&["node_modules", "vendor"]);
    assert!(dir_excluded("Vendor", &names));
    assert!(dir_excluded("NODE_MODULES", &names));
    assert!(!dir_excluded("vendored", &names));
    assert!(!dir_excluded("vendor", &[]));
    assert!(dir_included("VENDOR", &names));
    assert!(!dir_included("src", &names));
}

#[test]
fn test_classify_prefix_window() {
    let mut data = vec![b'a'; SNIFF_LEN + 100];
    assert!(!classify(&data, BinaryDetection::Simple));
    data[SNIFF_LEN] = 0;
    assert!(!classify(&data, BinaryDetection::Simple));
    data[SNIFF_LEN - 1] = 0;
    assert!(classify(&data, BinaryDetection::Simple));
    assert!(!classify(&data, BinaryDetection::None));
}

#[test]
fn test_classify_accurate_mode() {
    let utf16 = b"\xFF\xFEh\x00i\x00";
    assert!(classify(utf16, BinaryDetection::Simple));
    assert!(!classify(utf16, BinaryDetection::Accurate));
    assert!(classify(b"%PDF-1.5\nstream", BinaryDetection::Accurate));
    assert!(!classify(b"%PDF-1.5\nstream", BinaryDetection::Simple));
}

#[test]
fn test_looks_binary_files() {
    let dir = tempdir().unwrap();
    let text = dir.path().join("text.txt");
    let early_nul = dir.path().join("early.dat");
    let late_nul = dir.path().join("late.dat");
    fs::write(&text, "plain text\n").unwrap();
    let mut bytes = vec![b'x'; 1024];
    bytes[10] = 0;
    fs::write(&early_nul, &bytes).unwrap();
    let mut bytes = vec![b'x'; 1024];
    bytes[700] = 0;
    fs::write(&late_nul, &bytes).unwrap();

    assert!(!looks_binary(&text));
    assert!(looks_binary(&early_nul));
    assert!(!looks_binary(&late_nul));
}

#[test]
fn test_looks_binary_unreadable_is_text() {
    let dir = tempdir().unwrap();
    assert!(!looks_binary(&dir.path().join("missing.bin")));
}

#[test]
fn test_report_writer_format() {
    let ts = Local.with_ymd_and_hms(2024, 3, 9, 12, 30, 5).unwrap();
    let mut writer = ReportWriter::new(Vec::new(), "memory");
    writer.write_header(Path::new("/src"), &ts).unwrap();
    writer.write_entry(Path::new("/src/a.go"), b"package a").unwrap();
    writer.write_footer(1, &ts).unwrap();
    let out = String::from_utf8(writer.finish().unwrap()).unwrap();

    let rule = "=".repeat(50);
    let sep = "-".repeat(50);
    let expected = format!(
        "File Content Extraction Report\nGenerated: 2024-03-09 12:30:05\nSource Directory: /src\n{rule}\n\n\
         /src/a.go\n\npackage a\n\n{sep}\n\n\
         \nExtraction Summary\nFiles processed: 1\nCompleted: 2024-03-09 12:30:05\n"
    );
    assert_eq!(out, expected);
}

#[test]
fn test_report_writer_keeps_raw_bytes() {
    let ts = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
    let content = b"caf\xE9 \xFF\r\n";
    let mut writer = ReportWriter::new(Vec::new(), "memory");
    writer.write_entry(Path::new("latin1.txt"), content).unwrap();
    writer.write_footer(1, &ts).unwrap();
    let out = writer.finish().unwrap();
    assert!(out.windows(content.len()).any(|w| w == content));
}

#[test]
fn test_report_writer_create_fails_for_missing_dir() {
    let dir = tempdir().unwrap();
    let result = ReportWriter::create(dir.path().join("no/such/dir/out.txt"));
    assert!(matches!(result, Err(textcat::TextcatError::Output { .. })));
}

#[test]
fn test_split_list() {
    assert_eq!(split_list(" .go, ,.md ,"), list(&[".go", ".md"]));
    assert!(split_list("").is_empty());
    assert!(split_list(" , ").is_empty());
}

#[test]
fn test_builder_normalizes_lists() {
    let config = ScanBuilder::new("root")
        .include_extensions(["GO", " .Md ", ""])
        .exclude_extensions([".EXE"])
        .include_dirs(["Src"])
        .exclude_dirs(["  Vendor", ""])
        .build();
    assert_eq!(config.include_extensions, list(&[".go", ".md"]));
    assert_eq!(config.exclude_extensions, list(&[".exe"]));
    assert_eq!(config.include_dirs, list(&["src"]));
    assert_eq!(config.exclude_dirs, list(&["vendor"]));
}

#[test]
fn test_default_config() {
    let config = ScanConfig::default();
    assert_eq!(config.root, Path::new("."));
    assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    assert_eq!(config.max_file_size, 10_485_760);
    assert!(!config.follow_symlinks);
    assert!(!config.verbose);
    assert_eq!(config.binary_detection, BinaryDetection::Simple);
    let name = config.output.to_string_lossy().into_owned();
    assert!(name.starts_with("extracted_content_"));
    assert!(name.ends_with(".txt"));
}

#[test]
fn test_default_output_path_format() {
    let ts = Local.with_ymd_and_hms(2025, 11, 2, 8, 7, 6).unwrap();
    assert_eq!(
        textcat::default_output_path(ts),
        Path::new("extracted_content_20251102_080706.txt")
    );
}

#[test]
fn test_config_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("textcat.json");
    fs::write(
        &path,
        r#"{
            "root": "project",
            "output": "out.txt",
            "include_extensions": ["GO", ".md"],
            "exclude_dirs": ["Vendor"],
            "max_file_size": 2048,
            "binary_detection": "accurate"
        }"#,
    )
    .unwrap();
    let config = ScanConfig::from_json_file(&path).unwrap();
    assert_eq!(config.root, Path::new("project"));
    assert_eq!(config.output, Path::new("out.txt"));
    assert_eq!(config.include_extensions, list(&[".go", ".md"]));
    assert_eq!(config.exclude_dirs, list(&["vendor"]));
    assert_eq!(config.max_file_size, 2048);
    assert_eq!(config.binary_detection, BinaryDetection::Accurate);
    assert!(!config.follow_symlinks);
}

#[test]
fn test_config_from_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = ScanConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, textcat::TextcatError::Config { .. }));
}
