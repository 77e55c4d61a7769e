use super::*;
use rand::RngCore;
use std::fs;

/// S6 scenario: protect a 10 KB random file, then restore; the
/// integrity verifier reports "identical" and no `.tmp.huff` or
/// `.tmp.desc` file remains.
#[test]
fn test_s6_scenario_protect_restore_round_trip_and_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original.dat");
    let protected = dir.path().join("protected.sec");
    let restored = dir.path().join("restored.dat");

    let mut data = vec![0u8; 10 * 1024];
    rand::thread_rng().fill_bytes(&mut data);
    fs::write(&original, &data).unwrap();

    protect(&original, &protected, "UNCOPYRIGHTABLE").unwrap();
    restore(&protected, &restored, "UNCOPYRIGHTABLE").unwrap();

    match verify(&original, &restored).unwrap() {
        Verification::Identical => {}
        other => panic!("expected identical, got {:?}", other),
    }

    let huff_tmp = protected.with_file_name("protected.sec.tmp.huff");
    let desc_tmp = restored.with_file_name("restored.dat.tmp.desc");
    assert!(!huff_tmp.exists(), "compression temp file was not cleaned up");
    assert!(!desc_tmp.exists(), "decryption temp file was not cleaned up");
}

#[test]
fn test_verify_reports_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"hello").unwrap();
    fs::write(&b, b"hello world").unwrap();
    assert_eq!(verify(&a, &b).unwrap(), Verification::SizeMismatch { left: 5, right: 11 });
}

#[test]
fn test_verify_reports_first_differing_offset() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"aaaaXaaaa").unwrap();
    fs::write(&b, b"aaaaYaaaa").unwrap();
    assert_eq!(verify(&a, &b).unwrap(), Verification::DifferAt { offset: 4 });
}

/// Universal property #7: round trip holds for any input with length
/// >= 1, small inputs included.
#[test]
fn test_round_trip_small_inputs() {
    let dir = tempfile::tempdir().unwrap();
    for (name, data) in [("one_byte", vec![0x42u8]), ("short", b"hi".to_vec()), ("text", b"the quick brown fox".to_vec())] {
        let original = dir.path().join(format!("{}.in", name));
        let protected = dir.path().join(format!("{}.sec", name));
        let restored = dir.path().join(format!("{}.out", name));
        fs::write(&original, &data).unwrap();

        protect(&original, &protected, "UNCOPYRIGHTABLE").unwrap();
        restore(&protected, &restored, "UNCOPYRIGHTABLE").unwrap();

        assert_eq!(verify(&original, &restored).unwrap(), Verification::Identical);
    }
}
