//! Integration test: register → authenticate → encrypt-and-stage → hand-off
//!
//! Exercises the whole upload path against real temp-dir filesystem state,
//! with the transfer step disabled (the default), so the terminal outcome is
//! the distinct `Skipped` state.

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use tempfile::TempDir;

use qdrop_core::config::QdropConfig;
use qdrop_core::TransferOutcome;
use qdrop_engine::{load_key, run_upload};
use qdrop_users::{NewUser, Session, UserStore};

fn test_config(tmp: &TempDir) -> QdropConfig {
    let mut config = QdropConfig::default();
    config.store.users_file = tmp.path().join("users.jsonl");
    config.staging.dir = tmp.path().join("uploads");
    config.staging.key_file = tmp.path().join("upload.key");
    config
}

fn write_test_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}

fn login(store: &UserStore, config: &QdropConfig, username: &str, password: &str) -> Session {
    let authenticated = store
        .authenticate(username, &SecretString::from(password.to_owned()))
        .expect("authenticate should not error");
    assert!(authenticated, "registered user must authenticate");
    Session::open(username, Duration::from_secs(config.store.session_ttl_secs))
}

#[tokio::test]
async fn secure_upload_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let store = UserStore::new(&config.store.users_file);
    store
        .register(NewUser {
            username: "alice".into(),
            password: SecretString::from("p@ss1"),
            email: "a@x.com".into(),
            mobile: "555-0001".into(),
        })
        .expect("registration should succeed");

    let session = login(&store, &config, "alice", "p@ss1");

    let source = write_test_file(tmp.path(), "notes.txt", b"hello");
    let (artifact, outcome) = run_upload(&config, &session, &source)
        .await
        .expect("upload should succeed");

    // Transfer disabled by default: skipped, not collapsed into failure
    assert_eq!(outcome, TransferOutcome::Skipped);

    // Staging directory holds <basename>.enc, non-equal to the plaintext
    assert_eq!(artifact.source_name, "notes.txt");
    assert_eq!(
        artifact.ciphertext_path,
        config.staging.dir.join("notes.txt.enc")
    );
    let sealed = std::fs::read(&artifact.ciphertext_path).unwrap();
    assert_ne!(sealed, b"hello");

    // Key file holds exactly the key used for this upload
    let retained = load_key(&config.staging.key_file).expect("key file must exist");
    let opened = qdrop_crypto::open_bytes(&retained, "notes.txt", &sealed)
        .expect("retained key must open the staged blob");
    assert_eq!(opened, b"hello");
}

#[tokio::test]
async fn second_upload_replaces_retained_key() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let store = UserStore::new(&config.store.users_file);
    store
        .register(NewUser {
            username: "alice".into(),
            password: SecretString::from("p@ss1"),
            email: "a@x.com".into(),
            mobile: "555-0001".into(),
        })
        .unwrap();
    let session = login(&store, &config, "alice", "p@ss1");

    let first = write_test_file(tmp.path(), "first.txt", b"first contents");
    let second = write_test_file(tmp.path(), "second.txt", b"second contents");

    let (first_artifact, _) = run_upload(&config, &session, &first).await.unwrap();
    let (second_artifact, _) = run_upload(&config, &session, &second).await.unwrap();

    let retained = load_key(&config.staging.key_file).unwrap();

    let second_sealed = std::fs::read(&second_artifact.ciphertext_path).unwrap();
    assert!(
        qdrop_crypto::open_bytes(&retained, "second.txt", &second_sealed).is_ok(),
        "latest artifact must open with the retained key"
    );

    let first_sealed = std::fs::read(&first_artifact.ciphertext_path).unwrap();
    assert!(
        qdrop_crypto::open_bytes(&retained, "first.txt", &first_sealed).is_err(),
        "earlier artifact must not open once its key was overwritten"
    );
}

#[tokio::test]
async fn upload_missing_source_reports_not_found() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let store = UserStore::new(&config.store.users_file);
    store
        .register(NewUser {
            username: "alice".into(),
            password: SecretString::from("p@ss1"),
            email: "a@x.com".into(),
            mobile: "555-0001".into(),
        })
        .unwrap();
    let session = login(&store, &config, "alice", "p@ss1");

    let result = run_upload(&config, &session, &tmp.path().join("missing.txt")).await;
    assert!(matches!(
        result,
        Err(qdrop_core::QdropError::FileNotFound(_))
    ));

    // Staging dir exists (created at startup) but contains nothing
    let staged: Vec<_> = std::fs::read_dir(&config.staging.dir).unwrap().collect();
    assert!(staged.is_empty());
}

#[tokio::test]
async fn wrong_password_never_reaches_pipeline() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let store = UserStore::new(&config.store.users_file);
    store
        .register(NewUser {
            username: "alice".into(),
            password: SecretString::from("p@ss1"),
            email: "a@x.com".into(),
            mobile: "555-0001".into(),
        })
        .unwrap();

    let authenticated = store
        .authenticate("alice", &SecretString::from("not-the-password"))
        .unwrap();
    assert!(!authenticated, "mismatch reports false, not an error");
}
