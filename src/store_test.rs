use super::*;

fn temp_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("nested").join("store.json")
}

#[test]
fn missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(temp_path(&dir)).unwrap();
    assert_eq!(store.keys().count(), 0);
    assert!(!store.is_dirty());
}

#[test]
fn writes_are_buffered_until_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir);
    let mut store = FileStore::open(&path).unwrap();
    store.set("progress_calm-1", "42");
    assert!(store.is_dirty());
    assert!(!path.exists());

    store.flush().unwrap();
    assert!(!store.is_dirty());
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("progress_calm-1").as_deref(), Some("42"));
}

#[test]
fn removing_an_absent_key_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(temp_path(&dir)).unwrap();
    store.remove("nothing");
    assert!(!store.is_dirty());
}

#[test]
fn remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir);
    let mut store = FileStore::open(&path).unwrap();
    store.set("a", "1");
    store.set("b", "2");
    store.flush().unwrap();

    let mut store = FileStore::open(&path).unwrap();
    store.remove("a");
    store.flush().unwrap();
    let keys = FileStore::open(&path).unwrap().keys().map(str::to_owned).collect::<Vec<_>>();
    assert_eq!(keys, vec!["b"]);
}

#[test]
fn empty_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "  \n").unwrap();
    assert_eq!(FileStore::open(&path).unwrap().keys().count(), 0);
}

#[test]
fn garbage_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "[1, 2").unwrap();
    assert!(matches!(FileStore::open(&path), Err(CliError::InvalidJson(_))));
}

#[test]
fn boxed_store_flushes_through_the_trait() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir);
    let mut boxed: Box<dyn KeyValueStore> = Box::new(FileStore::open(&path).unwrap());
    boxed.set("k", "v");
    boxed.flush().unwrap();
    assert_eq!(FileStore::open(&path).unwrap().get("k").as_deref(), Some("v"));
}
