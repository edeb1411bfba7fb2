// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn load_without_file_is_none() {
    let temp = TempDir::new().unwrap();
    let store = SessionIdStore::in_dir(temp.path());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn save_creates_directory_and_roundtrips() {
    let temp = TempDir::new().unwrap();
    let store = SessionIdStore::in_dir(&temp.path().join("state").join("desk"));
    let id = SessionId::new("4a7d1ed4-14c4-4d0f-a1a7-2b3a52c9d8e1").unwrap();

    store.save(&id).unwrap();
    assert_eq!(store.load().unwrap(), Some(id));
}

#[test]
fn blank_file_is_none() {
    let temp = TempDir::new().unwrap();
    let store = SessionIdStore::in_dir(temp.path());
    fs::write(store.path(), "  \n").unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn trailing_newline_is_trimmed() {
    let temp = TempDir::new().unwrap();
    let store = SessionIdStore::in_dir(temp.path());
    fs::write(store.path(), "s1\n").unwrap();
    assert_eq!(store.load().unwrap().unwrap().as_str(), "s1");
}

#[test]
fn clear_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = SessionIdStore::in_dir(temp.path());
    store.clear().unwrap();
    store.save(&SessionId::new("s1").unwrap()).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}
