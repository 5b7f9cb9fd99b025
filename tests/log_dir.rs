use multilog::{Call, Level, LogError, WriterKind, get_logger, set_log_level};
use std::fs;
use std::path::{Path, PathBuf};

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn quiet(name: &str) -> std::sync::Arc<multilog::Logger> {
    let logger = get_logger(Some(name));
    logger.set_writer(WriterKind::Console, None);
    logger.set_writer(WriterKind::Stream, None);
    logger
}

#[test]
fn lines_round_trip_in_order() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let logger = quiet("roundtrip");

    logger.set_log_dir(Some(dir.path()), true).unwrap();
    assert!(logger.is_file_bound());
    for idx in 0..25 {
        logger.info(&[&"line", &idx], Call::new());
    }

    let file: PathBuf = dir.path().join(format!("roundtrip{}.log", today()));
    let lines = read_lines(&file);
    assert_eq!(lines.len(), 25);
    for (idx, line) in lines.iter().enumerate() {
        assert!(line.starts_with("[INFO] "), "unexpected line {line}");
        assert!(line.ends_with(&format!("line {idx}")), "out of order: {line}");
    }
}

#[test]
fn regular_file_is_rejected_and_binding_kept() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("plain.txt");
    fs::write(&not_a_dir, "occupied").unwrap();
    let logger = quiet("rejected");

    logger.set_log_dir(Some(dir.path()), true).unwrap();
    let result = logger.set_log_dir(Some(&not_a_dir), true);
    assert!(matches!(result, Err(LogError::NotADirectory(ref p)) if p == &not_a_dir));

    assert!(logger.is_file_bound());
    logger.info(&[&"still here"], Call::new());
    let lines = read_lines(&dir.path().join(format!("rejected{}.log", today())));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("still here"));
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "occupied");
}

#[test]
fn uncreatable_directory_keeps_binding() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    multilog::default_logger().set_writer(WriterKind::Console, None);
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();
    let logger = quiet("uncreatable");

    logger.set_log_dir(Some(dir.path()), true).unwrap();
    let result = logger.set_log_dir(Some(&blocker.join("sub")), true);
    assert!(matches!(result, Err(LogError::DirectoryCreate { .. })));

    assert!(logger.is_file_bound());
    logger.info(&[&"after failure"], Call::new());
    let lines = read_lines(&dir.path().join(format!("uncreatable{}.log", today())));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("after failure"));
}

#[test]
fn shared_daily_file_collects_every_logger() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let api = quiet("api");
    let db = quiet("db");

    api.set_log_dir(Some(dir.path()), false).unwrap();
    db.set_log_dir(Some(dir.path()), false).unwrap();
    api.info(&[&"request"], Call::new());
    db.warn(&[&"slow query"], Call::new());

    let lines = read_lines(&dir.path().join(format!("{}.log", today())));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("request"));
    assert!(lines[1].starts_with("[WARNING] ") && lines[1].ends_with("slow query"));
    assert!(!dir.path().join(format!("api{}.log", today())).exists());
}

#[test]
fn missing_directory_is_created() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    multilog::default_logger().set_writer(WriterKind::Console, None);
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("var").join("log");
    let logger = quiet("nested");

    logger.set_log_dir(Some(&nested), true).unwrap();
    assert!(nested.is_dir());
    logger.ok(&[&"created"], Call::new());
    let lines = read_lines(&nested.join(format!("nested{}.log", today())));
    assert!(lines[0].starts_with("[OK] "));
}

#[test]
fn empty_path_unbinds() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let logger = quiet("unbind");

    logger.set_log_dir(Some(dir.path()), true).unwrap();
    logger.set_log_dir(Some(Path::new("")), true).unwrap();
    assert!(!logger.is_file_bound());
    logger.set_log_dir(Some(dir.path()), true).unwrap();
    logger.set_log_dir(None, true).unwrap();
    assert!(!logger.is_file_bound());
}

#[test]
fn error_threshold_keeps_only_errors() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let logger = quiet("strict");
    logger.set_log_dir(Some(dir.path()), true).unwrap();

    set_log_level(Level::Error);
    logger.info(&[&"x"], Call::new());
    logger.warn(&[&"y"], Call::new());
    logger.err("boom", Call::new());

    let lines = read_lines(&dir.path().join(format!("strict{}.log", today())));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[ERROR] ") && lines[0].ends_with("boom"));
    multilog::hidden::reset_for_test();
}

#[test]
fn json_dir_writes_one_object_per_line() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let logger = quiet("structured");

    logger.set_json_log_dir(Some(dir.path()), true).unwrap();
    logger.info(&[&"first"], Call::new());
    logger.err("second", Call::new());

    let lines = read_lines(&dir.path().join(format!("structured{}.jsonl", today())));
    assert_eq!(lines.len(), 2);
    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["logger"], "structured");
    assert_eq!(second["level"], "ERROR");
    assert_eq!(second["message"], "second");
}

#[test]
fn text_files_are_logged_verbatim() {
    let _guard = multilog::hidden::test_guard();
    multilog::hidden::reset_for_test();
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "alpha\nbeta\n").unwrap();
    let logs = dir.path().join("logs");
    let logger = quiet("dump");
    fs::create_dir(&logs).unwrap();
    logger.set_log_dir(Some(&logs), true).unwrap();

    logger.log_txt_file(&notes).unwrap();
    assert!(matches!(
        logger.log_txt_file(dir.path().join("missing.txt")),
        Err(LogError::ReadFile { .. })
    ));

    let lines = read_lines(&logs.join(format!("dump{}.log", today())));
    assert_eq!(lines, vec!["alpha", "beta"]);
}
