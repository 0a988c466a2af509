//! Integration tests for dataset loading

use cutoffs_foundation::{Category, ErrorKind, RecordKey};
use cutoffs_runtime::{DatasetLoader, IgnoredColumn};

use crate::sample_path;

#[test]
fn loads_sample_file() {
    let mut loader = DatasetLoader::new();
    assert_eq!(loader.add_file(&sample_path()).unwrap(), 5);
    let dataset = loader.finish().unwrap();

    assert_eq!(dataset.store.len(), 5);
    assert_eq!(dataset.store.categories_present().len(), 7);
    assert_eq!(
        dataset.ignored_columns,
        vec![IgnoredColumn {
            source: sample_path().display().to_string(),
            column: "Year".into()
        }]
    );

    let ec = dataset.store.find(&RecordKey::new("1", "EC")).unwrap();
    assert_eq!(ec.cutoff(Category::Oc), Some("198.75"));
    assert_eq!(ec.cutoff(Category::Sca), None);

    let psg = dataset.store.find(&RecordKey::new("2006", "CS")).unwrap();
    assert_eq!(psg.cutoff(Category::St), None);
}

#[test]
fn combining_files_with_overlapping_keys_fails() {
    let mut loader = DatasetLoader::new();
    loader.add_file(&sample_path()).unwrap();
    let err = loader.add_file(&sample_path()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateRecord(_)));
    let shown = err.to_string();
    assert!(shown.contains("1/CS"));
    assert!(shown.contains(&sample_path().display().to_string()));
}

#[test]
fn missing_file_error_names_the_path() {
    let mut loader = DatasetLoader::new();
    let path = sample_path().with_file_name("absent.json");
    let err = loader.add_file(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn combining_disjoint_sources() {
    let mut loader = DatasetLoader::new();
    loader.add_file(&sample_path()).unwrap();
    loader
        .add_str(
            r#"[{"College Code": "3001", "Branch Code": "CS", "OC": "170"}]"#,
            "extra",
        )
        .unwrap();
    let dataset = loader.finish().unwrap();
    assert_eq!(dataset.store.len(), 6);
    assert_eq!(dataset.sources.len(), 2);
    assert_eq!(dataset.sources[1].records, 1);
}

#[test]
fn top_level_must_be_an_array() {
    let mut loader = DatasetLoader::new();
    let err = loader
        .add_str(r#"{"College Code": "1"}"#, "object.json")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Parse { .. }));
}
