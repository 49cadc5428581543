mod common;

use lcovrs::{parse_file, LcovError, ParseOptions};

#[test]
fn parse_file_from_disk() {
    let (_dir, path) = common::write_report(
        "coverage.info",
        b"TN:test\nSF:/src/main.rs\nDA:1,5\nDA:2,5\nDA:3,0\nLF:3\nLH:2\nend_of_record\n",
    );

    let report = parse_file(&path, &ParseOptions::default()).unwrap();
    assert_eq!(report.len(), 1);

    let record = report.get("/src/main.rs").unwrap();
    assert_eq!(record.test.as_deref(), Some("test"));
    assert_eq!(record.lines_found(), 3);
    assert_eq!(record.lines_hit(), 2);
    assert_eq!(record.totals.lines_found, 3);
}

#[test]
fn parse_sample_fixture() {
    let report = parse_file(common::fixture("sample.info"), &ParseOptions::default()).unwrap();

    assert_eq!(report.filenames().collect::<Vec<_>>(), vec!["/src/lib.rs", "/src/util.rs"]);

    let sets = report.executed_line_sets();
    assert_eq!(sets["/src/lib.rs"].iter().copied().collect::<Vec<_>>(), vec![1, 2, 5]);
    assert_eq!(sets["/src/util.rs"].iter().copied().collect::<Vec<_>>(), vec![9]);
}

#[test]
fn parse_without_end_of_record() {
    let report =
        parse_file(common::fixture("no_end_of_record.info"), &ParseOptions::default()).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.get("/src/main.rs").unwrap().lines.len(), 2);
}

#[test]
fn parse_test_name_only() {
    let report = parse_file(common::fixture("empty.info"), &ParseOptions::default()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn parse_empty_file() {
    let (_dir, path) = common::write_report("empty.info", b"");
    let report = parse_file(&path, &ParseOptions::default()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn bad_counts_rejected_unless_ignored() {
    let path = common::fixture("bad_counts.info");

    let err = parse_file(&path, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, LcovError::CountMismatch { directive: "FNH", declared: 2, actual: 1 }));
    assert_eq!(err.to_string(), "Unexpected FNH count (actual: 1; expected: 2)");

    let lenient = ParseOptions::new().with_ignore_incorrect_counts(true);
    let report = parse_file(&path, &lenient).unwrap();
    let record = report.get("/src/lib.rs").unwrap();
    assert_eq!(record.functions["foo"].executions, Some(3));
    assert_eq!(record.totals.lines_found, 3);
    assert_eq!(record.lines_found(), 2);
}

#[test]
fn duplicate_lines_rejected_unless_merged() {
    let path = common::fixture("duplicate_lines.info");

    let err = parse_file(&path, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, LcovError::DuplicateLine(10)));

    let merge = ParseOptions::new().with_merge_duplicate_line_hit_counts(true);
    let report = parse_file(&path, &merge).unwrap();
    let record = report.get("/src/gen.rs").unwrap();
    assert_eq!(record.lines[&10], 7);
    assert_eq!(record.lines[&11], 0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("missing.info"), &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, LcovError::Io(_)));
}

#[test]
fn unrecognized_directive_echoes_line() {
    let (_dir, path) = common::write_report("odd.info", b"SF:/src/lib.rs\nVER:2\nend_of_record\n");
    let err = parse_file(&path, &ParseOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized directive in record: VER:2");
}
