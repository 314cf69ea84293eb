//! Integration tests for the rmprep pipeline
//!
//! These tests build small RapidMiner-style trees in temporary directories
//! and run the complete unzip -> convert -> cleanup sweep over them.

use rmprep::config::PipelineConfig;
use rmprep::pipeline::{run, PipelineError, Stage};
use rmprep::relocate::RelocateError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const REGRESSION_DAT: &str = "@relation All-regression\n\
@attribute a real\n\
@attribute b real\n\
@attribute c real\n\
@inputs a, b\n\
@outputs c\n\
@data\n\
1,2,3\n\
4,5,6\n";

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// All regular files below `root`, relative and sorted
fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Typical KEEL download: one zip per dataset, with fold files next to the canonical one
fn build_keel_tree(root: &Path) {
    write_zip(
        &root.join("regression/abalone.zip"),
        &[
            (
                "abalone/abalone.dat",
                "@relation abalone\n@inputs Sex, Length\n@outputs Rings\n@data\nM, 0.455, 15\n",
            ),
            ("abalone/abalone-5-1tra.dat", "@inputs x\n@outputs y\nignored\n"),
        ],
    );
    write_file(&root.join("All-regression/All-regression.dat"), REGRESSION_DAT);
    write_file(&root.join("All-regression/notes.txt"), "not data");
    write_file(&root.join("classification/iris/iris.dat"), "@relation iris\n5.1,3.5,Iris-setosa\n");
    fs::create_dir_all(root.join("empty/deeper/still")).unwrap();
}

#[test]
fn test_regression_example_converts_exactly() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("All-regression/All-regression.dat"),
        "@inputs a, b\n@outputs c\n1,2,3\n4,5,6\n",
    );

    let report = run(PipelineConfig::new(dir.path())).unwrap();

    assert_eq!(report.datasets_converted, 1);
    let csv = fs::read_to_string(dir.path().join("All-regression/All-regression.csv")).unwrap();
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["a, b, c", "1,2,3", "4,5,6"]);
}

#[test]
fn test_full_tree_in_place() {
    let dir = tempdir().unwrap();
    build_keel_tree(dir.path());

    let report = run(PipelineConfig::new(dir.path())).unwrap();

    assert!(!report.has_failures(), "{}", report);
    assert_eq!(report.archives_found, 1);
    assert_eq!(report.archives_extracted, 1);
    assert_eq!(report.datasets_found, 3);
    assert_eq!(report.datasets_converted, 3);
    assert_eq!(report.directories_pruned, 3);

    let files = list_files(dir.path());
    assert!(files.contains(&PathBuf::from("regression/abalone/abalone.csv")));
    assert!(files.contains(&PathBuf::from("classification/iris/iris.csv")));
    // fold files are not canonical and are not converted
    assert!(!files.contains(&PathBuf::from("regression/abalone/abalone-5-1tra.csv")));
    assert!(!dir.path().join("empty").exists());

    let abalone = fs::read_to_string(dir.path().join("regression/abalone/abalone.csv")).unwrap();
    assert_eq!(abalone, "Sex, Length, Rings\nM, 0.455, 15\n");
    let iris = fs::read_to_string(dir.path().join("classification/iris/iris.csv")).unwrap();
    assert_eq!(iris, "5.1,3.5,Iris-setosa\n");
}

#[test]
fn test_purge_leaves_only_csv() {
    let dir = tempdir().unwrap();
    build_keel_tree(dir.path());

    let report = run(PipelineConfig::new(dir.path()).with_delete_non_csv(true)).unwrap();

    assert!(!report.has_failures(), "{}", report);
    // zip, 2 extracted .dat, 2 original .dat, notes.txt
    assert_eq!(report.files_purged, 6);

    let files = list_files(dir.path());
    assert_eq!(
        files,
        vec![
            PathBuf::from("All-regression/All-regression.csv"),
            PathBuf::from("classification/iris/iris.csv"),
            PathBuf::from("regression/abalone/abalone.csv"),
        ]
    );
}

#[test]
fn test_move_files_collects_flat_output() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");
    let out = dir.path().join("out");
    build_keel_tree(&root);

    let report = run(
        PipelineConfig::new(&root)
            .with_delete_non_csv(true)
            .with_output_directory(&out),
    )
    .unwrap();

    assert_eq!(report.files_relocated, 3);
    assert_eq!(
        list_files(&out),
        vec![
            PathBuf::from("All-regression.csv"),
            PathBuf::from("abalone.csv"),
            PathBuf::from("iris.csv"),
        ]
    );
    // every source directory was emptied and pruned, the root stays
    assert!(root.is_dir());
    assert!(list_files(&root).is_empty());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn test_move_onto_existing_file_aborts() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");
    let out = dir.path().join("out");
    write_file(&root.join("iris/iris.dat"), "1\n");
    write_file(&out.join("iris.csv"), "keep me");

    let err = run(PipelineConfig::new(&root).with_output_directory(&out)).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Relocate(RelocateError::DestinationExists { .. })
    ));
    assert_eq!(fs::read_to_string(out.join("iris.csv")).unwrap(), "keep me");
    assert!(root.join("iris/iris.csv").exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempdir().unwrap();
    build_keel_tree(dir.path());
    let config = PipelineConfig::new(dir.path());

    run(config.clone()).unwrap();
    let first: Vec<(PathBuf, String)> = list_files(dir.path())
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "csv"))
        .map(|p| {
            let text = fs::read_to_string(dir.path().join(&p)).unwrap();
            (p, text)
        })
        .collect();

    let report = run(config).unwrap();
    let second: Vec<(PathBuf, String)> = list_files(dir.path())
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "csv"))
        .map(|p| {
            let text = fs::read_to_string(dir.path().join(&p)).unwrap();
            (p, text)
        })
        .collect();

    assert_eq!(first, second);
    assert_eq!(report.archives_skipped, 1);
    assert!(!report.has_failures(), "{}", report);
}

#[test]
fn test_ambiguous_dataset_reported_and_rest_converted() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("twice/twice.dat"),
        "@inputs a\n@outputs b\n@outputs c\n1,2\n",
    );
    write_file(&dir.path().join("fine/fine.dat"), "@inputs a\n@outputs b\n1,2\n");

    let report = run(PipelineConfig::new(dir.path())).unwrap();

    assert_eq!(report.datasets_converted, 1);
    let failures: Vec<_> = report.failures_in(Stage::Convert).collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("@outputs"));
    assert!(failures[0].message.contains("2 lines"));
    assert!(!dir.path().join("twice/twice.csv").exists());
    assert!(dir.path().join("fine/fine.csv").exists());
}

#[test]
fn test_tree_without_zips_has_no_extraction() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("set/set.dat"), "1\n");

    let report = run(PipelineConfig::new(dir.path())).unwrap();

    assert_eq!(report.archives_found, 0);
    assert_eq!(report.archives_extracted, 0);
    assert_eq!(report.archives_skipped, 0);
    assert_eq!(list_files(dir.path()).len(), 2);
}

#[test]
fn test_missing_root_fails_before_any_work() {
    let dir = tempdir().unwrap();
    let err = run(PipelineConfig::new(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}
