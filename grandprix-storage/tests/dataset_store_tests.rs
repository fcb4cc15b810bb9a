use grandprix_core::{CoreError, Dataset, Value, TARGET_COLUMN};
use grandprix_storage::{read_dataset, write_dataset, DatasetStore, Split};
use tempfile::TempDir;

#[test]
fn path_convention_matches_task_and_split() {
    let store = DatasetStore::new("/data");
    assert!(store
        .path_for(2, Split::Train)
        .ends_with("task2_train.csv"));
    assert!(store.path_for(0, Split::Test).ends_with("task0_test.csv"));
}

#[test]
fn missing_file_is_data_not_found() {
    let dir = TempDir::new().unwrap();
    let store = DatasetStore::new(dir.path());
    let err = store.load(1, Split::Train).unwrap_err();
    assert!(matches!(err, CoreError::DataNotFound(_)), "got {:?}", err);
}

#[test]
fn load_classifies_cells() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("task1_train.csv"),
        "x,city,target\n1.5,utrecht,3\n,delft,4\n2.5,,5\n",
    )
    .unwrap();

    let ds = DatasetStore::new(dir.path()).load(1, Split::Train).unwrap();

    assert_eq!(ds.columns, vec!["x", "city", "target"]);
    assert_eq!(ds.n_rows(), 3);
    assert_eq!(ds.rows[0][0], Value::Number(1.5));
    assert_eq!(ds.rows[0][1], Value::Text("utrecht".to_string()));
    assert_eq!(ds.rows[1][0], Value::Null);
    assert_eq!(ds.rows[2][1], Value::Null);
    assert!(ds.has_column(TARGET_COLUMN));
}

#[test]
fn write_then_read_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    let ds = Dataset::new(
        vec!["a".into(), "b".into()],
        vec![
            vec![Value::Number(1.0), Value::Text("x".into())],
            vec![Value::Null, Value::Text("y".into())],
        ],
    )
    .unwrap();

    write_dataset(&path, &ds).unwrap();
    let back = read_dataset(&path).unwrap();

    assert_eq!(back.columns, ds.columns);
    assert_eq!(back.rows[0][0], Value::Number(1.0));
    assert_eq!(back.rows[1][0], Value::Null);
}

#[test]
fn loads_are_never_cached() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("task0_train.csv");
    let store = DatasetStore::new(dir.path());

    std::fs::write(&path, "a\n1\n").unwrap();
    assert_eq!(store.load(0, Split::Train).unwrap().n_rows(), 1);

    // Regenerated data must be visible on the next load.
    std::fs::write(&path, "a\n1\n2\n").unwrap();
    assert_eq!(store.load(0, Split::Train).unwrap().n_rows(), 2);
}
