use shelfkeep_core::{read_books, write_books, Book, StorageError};
use std::fs;

fn sample_books() -> Vec<Book> {
    let mut issued = Book::new("Neuromancer", "William Gibson", "222").unwrap();
    issued.issue();
    vec![
        Book::new("Dune", "Frank Herbert", "111").unwrap(),
        issued,
        Book::new("Solaris", "Stanislaw Lem", "333").unwrap(),
    ]
}

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = read_books(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn write_then_read_preserves_records_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");

    for count in 0..=3 {
        let books = sample_books().into_iter().take(count).collect::<Vec<_>>();
        write_books(&path, &books).unwrap();
        assert_eq!(read_books(&path).unwrap(), Some(books));
    }
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("books.json");

    write_books(&path, &sample_books()).unwrap();
    assert!(path.is_file());
}

#[test]
fn write_leaves_no_staging_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    write_books(&path, &sample_books()).unwrap();
    write_books(&path, &[]).unwrap();

    let names = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![std::ffi::OsString::from("books.json")]);
}

#[test]
fn reader_accepts_any_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(
        &path,
        r#"[{"title":"Dune","author":"Frank Herbert","isbn":"111","status":"available"},
            {  "isbn" : "222", "status" : "issued", "title" : "Neuromancer", "author" : "William Gibson" }]"#,
    )
    .unwrap();

    let books = read_books(&path).unwrap().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1].isbn, "222");
    assert!(!books[1].is_available());
}

#[test]
fn invalid_json_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(&path, "{ not json").unwrap();

    let err = read_books(&path).unwrap_err();
    assert!(matches!(err, StorageError::Malformed { .. }), "unexpected: {err}");
}

#[test]
fn top_level_object_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(&path, r#"{"title":"Dune"}"#).unwrap();

    assert!(matches!(
        read_books(&path).unwrap_err(),
        StorageError::Malformed { .. }
    ));
}

#[test]
fn one_bad_entry_rejects_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(
        &path,
        r#"[
            {"title":"Dune","author":"Frank Herbert","isbn":"111","status":"available"},
            {"title":"Neuromancer","author":"William Gibson","isbn":"222"}
        ]"#,
    )
    .unwrap();

    let err = read_books(&path).unwrap_err();
    match err {
        StorageError::InvalidEntry { index, message, .. } => {
            assert_eq!(index, 1);
            assert!(message.contains("status"), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_title_entry_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(
        &path,
        r#"[{"title":"","author":"x","isbn":"1","status":"available"}]"#,
    )
    .unwrap();

    assert!(matches!(
        read_books(&path).unwrap_err(),
        StorageError::InvalidEntry { index: 0, .. }
    ));
}

#[cfg(unix)]
#[test]
fn rewrite_keeps_existing_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    write_books(&path, &sample_books()).unwrap();

    for mode in [0o644, 0o640] {
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        write_books(&path, &sample_books()).unwrap();
        let after = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(after, mode);
    }
}

#[cfg(unix)]
#[test]
fn new_file_gets_the_same_mode_as_a_plain_create() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.json");
    fs::write(&plain, "[]").unwrap();
    let path = dir.path().join("books.json");

    write_books(&path, &sample_books()).unwrap();

    let expected = fs::metadata(&plain).unwrap().permissions().mode() & 0o777;
    let actual = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(actual, expected);
}
