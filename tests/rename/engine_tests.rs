// Tests for the rename engine
// Scenarios run against temporary directories

use std::fs;
use std::path::{Path, PathBuf};

use renash::rename::{
    Algorithm, HashComputer, HashUtilityError, RenameConfig, RenameEngine, RenameEvent, RenameStats,
};
use tempfile::TempDir;

const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

fn run(config: RenameConfig) -> (RenameStats, Vec<RenameEvent>) {
    let mut events = Vec::new();
    let stats = RenameEngine::new(config)
        .run_with(|event| events.push(event.clone()))
        .unwrap();
    (stats, events)
}

#[cfg(unix)]
fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    false
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_renames_to_content_digest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, events) = run(config);

    let expected = format!("{}.jpg", HELLO_SHA256);
    assert_eq!(stats, RenameStats { processed: 1, skipped: 0, errors: 0 });
    assert_eq!(file_names(dir.path()), vec![expected.clone()]);
    assert_eq!(
        events,
        vec![RenameEvent::Renamed {
            from: PathBuf::from("photo.jpg"),
            to: PathBuf::from(&expected),
        }]
    );
    assert_eq!(fs::read(dir.path().join(&expected)).unwrap(), b"hello world");
}

#[test]
fn test_already_named_file_is_hashed_and_skipped() {
    let dir = TempDir::new().unwrap();
    let name = format!("{}.jpg", HELLO_SHA256);
    fs::write(dir.path().join(&name), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats { processed: 0, skipped: 1, errors: 0 });
    assert_eq!(events, vec![RenameEvent::AlreadyFormatted { path: PathBuf::from(&name) }]);
    assert_eq!(file_names(dir.path()), vec![name]);
}

#[test]
fn test_quick_run_skips_without_hashing() {
    let dir = TempDir::new().unwrap();
    // Shaped like a sha256 digest but not the digest of its content
    let name = format!("{}.bin", "0".repeat(64));
    fs::write(dir.path().join(&name), b"something else").unwrap();

    let quick = RenameConfig::builder(dir.path()).quick(true).build().unwrap();
    let (stats, events) = run(quick);
    assert_eq!(stats, RenameStats { processed: 0, skipped: 1, errors: 0 });
    assert_eq!(events, vec![RenameEvent::SkippedQuick { path: PathBuf::from(&name) }]);
    assert_eq!(file_names(dir.path()), vec![name]);

    // Without quick mode the same file is hashed and renamed
    let full = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, _) = run(full);
    assert_eq!(stats.processed, 1);
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), b"first").unwrap();
    fs::write(dir.path().join("b.txt"), b"second").unwrap();
    fs::write(dir.path().join("c.dat"), b"third").unwrap();

    let config = RenameConfig::builder(dir.path()).algorithm("MD5").build().unwrap();
    let (first, _) = run(config.clone());
    assert_eq!(first, RenameStats { processed: 3, skipped: 0, errors: 0 });
    let after_first = file_names(dir.path());

    let (second, events) = run(config);
    assert_eq!(second, RenameStats { processed: 0, skipped: 3, errors: 0 });
    assert!(events.iter().all(|e| matches!(e, RenameEvent::AlreadyFormatted { .. })));
    assert_eq!(file_names(dir.path()), after_first);
}

#[test]
fn test_unsupported_algorithm_touches_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    let result = RenameConfig::builder(dir.path()).algorithm("sha999").build();
    match result {
        Err(HashUtilityError::UnsupportedAlgorithm { algorithm }) => assert_eq!(algorithm, "sha999"),
        other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
    }
    assert_eq!(file_names(dir.path()), vec!["photo.jpg".to_string()]);
}

#[test]
fn test_dry_run_reports_without_renaming() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path()).dry_run(true).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats { processed: 1, skipped: 0, errors: 0 });
    assert_eq!(
        events,
        vec![RenameEvent::WouldRename {
            from: PathBuf::from("photo.jpg"),
            to: PathBuf::from(format!("{}.jpg", HELLO_SHA256)),
        }]
    );
    assert_eq!(file_names(dir.path()), vec!["photo.jpg".to_string()]);
}

#[test]
fn test_dry_run_on_readonly_file_is_an_error() {
    // access(2) grants root write access regardless of mode bits
    if running_as_root() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locked.txt");
    fs::write(&path, b"hello world").unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms).unwrap();

    let config = RenameConfig::builder(dir.path()).dry_run(true).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats { processed: 0, skipped: 0, errors: 1 });
    assert!(matches!(events[0], RenameEvent::NotWritable { .. }));
    assert_eq!(file_names(dir.path()), vec!["locked.txt".to_string()]);

    // Let TempDir clean up on every platform
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(false);
    fs::set_permissions(&path, perms).unwrap();
}

#[test]
fn test_dry_run_follows_effective_write_access() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path()).dry_run(true).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats { processed: 1, skipped: 0, errors: 0 });
    assert!(matches!(events[0], RenameEvent::WouldRename { .. }));
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_file_counts_as_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();
    // Regular file per stat(2), but reading it from offset 0 fails with EIO
    std::os::unix::fs::symlink("/proc/self/mem", dir.path().join("mem.bin")).unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats { processed: 1, skipped: 0, errors: 1 });
    assert!(events.iter().any(|e| matches!(
        e,
        RenameEvent::Unreadable { path, .. } if path == Path::new("mem.bin")
    )));
    assert!(dir.path().join("mem.bin").exists());
}

#[cfg(unix)]
#[test]
fn test_failed_rename_is_reported_but_not_counted() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    // A non-empty directory occupying the target name makes rename(2) fail
    let blocker = dir.path().join(format!("{}.jpg", HELLO_SHA256));
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats, RenameStats::default());
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], RenameEvent::RenameFailed { .. }));
    assert!(dir.path().join("photo.jpg").exists());
}

#[test]
fn test_recursive_descends_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("nested").join("deeper");
    fs::create_dir_all(&sub).unwrap();
    fs::write(dir.path().join("top.txt"), b"hello world").unwrap();
    fs::write(sub.join("low.txt"), b"hello world").unwrap();

    let flat = RenameConfig::builder(dir.path()).dry_run(true).build().unwrap();
    let (stats, _) = run(flat);
    assert_eq!(stats.processed, 1);

    let recursive = RenameConfig::builder(dir.path()).recursive(true).build().unwrap();
    let (stats, events) = run(recursive);
    assert_eq!(stats, RenameStats { processed: 2, skipped: 0, errors: 0 });

    let expected = format!("{}.txt", HELLO_SHA256);
    assert!(sub.join(&expected).exists());
    assert!(dir.path().join(&expected).exists());
    assert!(events.contains(&RenameEvent::Renamed {
        from: Path::new("nested").join("deeper").join("low.txt"),
        to: Path::new("nested").join("deeper").join(&expected),
    }));
}

#[test]
fn test_patterns_filter_candidates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.jpg"), b"jpg").unwrap();
    fs::write(dir.path().join("b.mp4"), b"mp4").unwrap();
    fs::write(dir.path().join("c.txt"), b"txt").unwrap();
    fs::write(dir.path().join("README"), b"readme").unwrap();

    let config = RenameConfig::builder(dir.path())
        .pattern_list("*.jpg, *.mp4")
        .build()
        .unwrap();
    let (stats, _) = run(config);

    assert_eq!(stats.processed, 2);
    let names = file_names(dir.path());
    assert!(names.contains(&"c.txt".to_string()));
    assert!(names.contains(&"README".to_string()));
    assert!(!names.contains(&"a.jpg".to_string()));
    assert!(!names.contains(&"b.mp4".to_string()));
}

#[test]
fn test_file_without_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path()).patterns(["*"]).build().unwrap();
    let (stats, _) = run(config);

    assert_eq!(stats.processed, 1);
    assert_eq!(file_names(dir.path()), vec![HELLO_SHA256.to_string()]);
}

#[test]
fn test_hidden_files_and_directories_are_not_candidates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".hidden.txt"), b"secret").unwrap();
    fs::create_dir(dir.path().join("folder.d")).unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, events) = run(config);

    assert_eq!(stats.total(), 0);
    assert!(events.is_empty());
    assert!(dir.path().join(".hidden.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_not_a_candidate() {
    let dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing.txt"), dir.path().join("link.txt")).unwrap();

    let config = RenameConfig::builder(dir.path()).build().unwrap();
    let (stats, _) = run(config);
    assert_eq!(stats.total(), 0);
}

#[test]
fn test_overlapping_patterns_evaluate_file_per_pattern() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    // The second pattern sees the already renamed file
    let config = RenameConfig::builder(dir.path())
        .patterns(["*.jpg", "*.*"])
        .build()
        .unwrap();
    let (stats, _) = run(config);

    assert_eq!(stats, RenameStats { processed: 1, skipped: 1, errors: 0 });
}

#[test]
fn test_variable_length_digest_size() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("clip.mp4"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path())
        .algorithm("blake2b")
        .digest_size(Some(16))
        .build()
        .unwrap();
    let (stats, _) = run(config.clone());
    assert_eq!(stats.processed, 1);

    let expected = HashComputer::new()
        .digest(b"hello world", Algorithm::Blake2b, Some(16))
        .unwrap();
    assert_eq!(expected.len(), 32);
    assert_eq!(file_names(dir.path()), vec![format!("{}.mp4", expected)]);

    // Quick mode recognizes the 16 byte name
    let quick = RenameConfig::builder(dir.path())
        .algorithm("blake2b")
        .digest_size(Some(16))
        .quick(true)
        .build()
        .unwrap();
    let (stats, events) = run(quick);
    assert_eq!(stats.skipped, 1);
    assert!(matches!(events[0], RenameEvent::SkippedQuick { .. }));
}

#[test]
fn test_base_directory_with_glob_characters() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("albums [2024]");
    fs::create_dir(&base).unwrap();
    fs::write(base.join("photo.jpg"), b"hello world").unwrap();

    let config = RenameConfig::builder(&base).build().unwrap();
    let (stats, _) = run(config);

    assert_eq!(stats.processed, 1);
    assert!(base.join(format!("{}.jpg", HELLO_SHA256)).exists());
}

#[test]
fn test_invalid_pattern_is_skipped() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"hello world").unwrap();

    let config = RenameConfig::builder(dir.path())
        .patterns(["[", "*.jpg"])
        .build()
        .unwrap();
    let (stats, _) = run(config);
    assert_eq!(stats.processed, 1);
}

#[test]
fn test_event_messages() {
    let renamed = RenameEvent::Renamed {
        from: PathBuf::from("a.txt"),
        to: PathBuf::from("b.txt"),
    };
    assert_eq!(renamed.to_string(), "Renamed a.txt to b.txt");
    assert!(!renamed.is_verbose_only());
    assert!(!renamed.is_failure());

    let skipped = RenameEvent::AlreadyFormatted { path: PathBuf::from("b.txt") };
    assert_eq!(skipped.to_string(), "File name b.txt is already properly formatted. Skipping");
    assert!(skipped.is_verbose_only());

    let quick = RenameEvent::SkippedQuick { path: PathBuf::from("b.txt") };
    assert!(quick.to_string().starts_with("Quick: File name b.txt"));

    let denied = RenameEvent::NotWritable {
        from: PathBuf::from("a.txt"),
        to: PathBuf::from("b.txt"),
    };
    assert_eq!(denied.to_string(), "Could not rename a.txt to b.txt");
    assert!(denied.is_failure());
}

#[test]
fn test_run_reports_missing_base_directory() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("gone");
    fs::create_dir(&base).unwrap();
    let config = RenameConfig::builder(&base).build().unwrap();
    fs::remove_dir(&base).unwrap();

    let result = RenameEngine::new(config).run_with(|_| {});
    assert!(matches!(result, Err(HashUtilityError::DirectoryNotFound { .. })));
}
