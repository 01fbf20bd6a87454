mod common;

use common::dir_entries;
use vidsum_core::{FileGate, ValidationError, VidsumError};

#[tokio::test]
async fn given_valid_upload_when_admitted_then_file_is_stored_under_unique_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path().join("uploads"));

    let video = gate
        .admit("../secret/My Talk.MP4", &b"video bytes"[..])
        .await
        .unwrap();

    assert_eq!(video.original_filename, "../secret/My Talk.MP4");
    assert_eq!(video.size_bytes, 11);
    assert_eq!(video.stored_path.parent(), Some(gate.work_dir()));
    let name = video.stored_path.file_name().unwrap().to_string_lossy();
    assert!(name.ends_with("_My_Talk.MP4"), "unexpected name {name}");
    assert_eq!(std::fs::read(&video.stored_path).unwrap(), b"video bytes");
}

#[tokio::test]
async fn given_same_name_twice_when_admitted_then_paths_differ() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path());

    let first = gate.admit_bytes("clip.mkv", b"a").await.unwrap();
    let second = gate.admit_bytes("clip.mkv", b"b").await.unwrap();

    assert_ne!(first.stored_path, second.stored_path);
    assert_eq!(dir_entries(dir.path()).len(), 2);
}

#[tokio::test]
async fn given_unsupported_extension_when_admitted_then_nothing_is_written() {
    let dir = tempfile::TempDir::new().unwrap();
    let work_dir = dir.path().join("uploads");
    let gate = FileGate::new(&work_dir);

    let result = gate.admit("notes.txt", &b"hello"[..]).await;

    assert!(matches!(
        result,
        Err(VidsumError::Validation(
            ValidationError::UnsupportedExtension { .. }
        ))
    ));
    assert!(!work_dir.exists());
}

#[tokio::test]
async fn given_empty_filename_when_admitted_then_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path());

    let result = gate.admit_bytes("", b"data").await;

    assert!(matches!(
        result,
        Err(VidsumError::Validation(ValidationError::EmptyFilename))
    ));
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn given_oversized_stream_when_admitted_then_rejected_without_write() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path()).with_max_upload_bytes(8);

    let result = gate.admit("big.avi", &[0u8; 9][..]).await;

    assert!(matches!(
        result,
        Err(VidsumError::Validation(ValidationError::TooLarge {
            limit_bytes: 8
        }))
    ));
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn given_upload_exactly_at_cap_when_admitted_then_accepted() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path()).with_max_upload_bytes(8);

    let video = gate.admit("edge.mov", &[1u8; 8][..]).await.unwrap();

    assert_eq!(video.size_bytes, 8);
}

#[tokio::test]
async fn given_name_without_usable_characters_when_admitted_then_generic_name_is_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let gate = FileGate::new(dir.path());

    let video = gate.admit_bytes("видео.mp4", b"x").await.unwrap();

    let name = video.stored_path.file_name().unwrap().to_string_lossy();
    assert!(name.ends_with("_video.mp4"), "unexpected name {name}");
}
