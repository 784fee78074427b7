use std::sync::{Arc, Mutex};

use datalab::analysis::load_options;
use datalab::ingestion::{
    load_from_path, DataFormat, LoadContext, LoadJournal, LoadObserver, LoadOptions, LoadSeverity,
    LoadStats,
};
use datalab::Config;
use datalab::DataLabError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &DataLabError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &DataLabError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions::default().with_observer(obs.clone());

    load_from_path("tests/fixtures/people.csv", &opts).unwrap();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![LoadStats { rows: 3, fields: 4 }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        format: Some(DataFormat::Csv),
        observers: vec![obs.clone() as Arc<dyn LoadObserver>],
        alert_at_or_above: LoadSeverity::Critical,
    };

    // Missing file -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_format_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions::default().with_observer(obs.clone());

    // Format error -> Error severity (not Critical) -> no alert
    let _ = load_from_path("tests/fixtures/ragged.csv", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn every_attached_observer_hears_each_load() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let opts = LoadOptions::default()
        .with_observer(first.clone())
        .with_observer(second.clone());

    load_from_path("tests/fixtures/people.json", &opts).unwrap();
    let _ = load_from_path("tests/fixtures/does_not_exist.json", &opts).unwrap_err();

    for obs in [&first, &second] {
        assert_eq!(obs.successes.lock().unwrap().len(), 1);
        assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
        assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    }
}

#[test]
fn journal_records_one_line_per_load() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("load.log");
    let journal = Arc::new(LoadJournal::open(&log_path).unwrap());
    assert_eq!(journal.path(), log_path.as_path());
    let opts = LoadOptions::default().with_observer(journal);

    load_from_path("tests/fixtures/people.json", &opts).unwrap();
    let _ = load_from_path("tests/fixtures/not_objects.json", &opts).unwrap_err();
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    // The missing file is Critical and alerts, but the journal still gets a single line for it.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("loaded json"));
    assert!(lines[0].ends_with("3 records, 4 fields"));
    assert!(lines[1].contains("failed json"));
    assert!(lines[1].contains("[error]: format error:"));
    assert!(lines[2].contains("failed csv"));
    assert!(lines[2].contains("[critical]: file not found:"));
}

#[test]
fn journal_appends_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("load.log");
    for _ in 0..2 {
        let journal = LoadJournal::open(&log_path).unwrap();
        let opts = LoadOptions::default().with_observer(Arc::new(journal));
        load_from_path("tests/fixtures/people.csv", &opts).unwrap();
    }
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().filter(|l| l.contains("loaded csv")).count(), 2);
}

#[test]
fn journal_in_missing_directory_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = LoadJournal::open(dir.path().join("no/such/dir/load.log")).unwrap_err();
    assert!(matches!(err, DataLabError::FileNotFound { .. }));
}

#[test]
fn config_load_log_attaches_a_journal() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("journal.log");

    assert_eq!(load_options(&Config::default()).unwrap().observers.len(), 1);

    let opts = load_options(&Config::default().with_load_log(&log_path)).unwrap();
    assert_eq!(opts.observers.len(), 2);
    load_from_path("tests/fixtures/people.csv", &opts).unwrap();
    assert!(std::fs::read_to_string(&log_path).unwrap().contains("loaded csv"));
}
