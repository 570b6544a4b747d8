//! Coverage for token persistence.

use aerodesk::session::TokenStore;

fn temp_store() -> (tempfile::TempDir, TokenStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("nested").join("token"));
    (dir, store)
}

#[test]
fn save_creates_parent_directories() {
    let (_dir, store) = temp_store();
    store.save("abc.def.ghi").expect("token saved");
    assert_eq!(store.read().as_deref(), Some("abc.def.ghi"));
}

#[test]
fn read_trims_and_treats_blank_as_absent() {
    let (_dir, store) = temp_store();
    store.save("  padded-token  \n").expect("token saved");
    assert_eq!(store.read().as_deref(), Some("padded-token"));

    store.save("   \n").expect("token saved");
    assert_eq!(store.read(), None);
}

#[test]
fn clear_is_idempotent() {
    let (_dir, store) = temp_store();
    store.clear().expect("clearing a missing token is fine");
    store.save("t.t.t").expect("token saved");
    store.clear().expect("token cleared");
    store.clear().expect("second clear is fine");
    assert_eq!(store.read(), None);
}

#[cfg(unix)]
#[test]
fn token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    let store = TokenStore::new(path.clone());
    store.save("secret.token.here").expect("token saved");

    let mode = std::fs::metadata(&path)
        .expect("token file exists")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
