use datalab::ingestion::{load_from_path, LoadOptions};
use datalab::report::Reporter;
use datalab::types::StatValue;
use datalab::{analyze_csv_data, analyze_json_data, Config};

#[test]
fn analyze_csv_data_reads_bundled_people() {
    let stats = analyze_csv_data().unwrap();
    assert_eq!(stats.count("records"), Some(8));
    assert_eq!(stats.number("mean_age"), Some(34.875));
    assert_eq!(stats.number("mean_salary"), Some(51750.0));
    assert_eq!(stats.number("min_salary"), Some(38000.0));
    assert_eq!(stats.number("max_salary"), Some(67000.0));
    match stats.get("group_count_city") {
        Some(StatValue::Groups(groups)) => {
            assert_eq!(groups[0], ("Stockholm".to_string(), 3));
            assert_eq!(groups.iter().map(|(_, n)| n).sum::<usize>(), 8);
        }
        other => panic!("unexpected city distribution: {other:?}"),
    }
}

#[test]
fn analyze_json_data_reads_bundled_people() {
    let stats = analyze_json_data().unwrap();
    assert_eq!(stats.count("records"), Some(5));
    let mean_age = stats.number("mean_age").unwrap();
    assert!((mean_age - 32.4).abs() < 1e-9);
}

#[test]
fn bundled_files_share_field_names() {
    let config = Config::default();
    let csv = load_from_path(config.csv_path(), &LoadOptions::default()).unwrap();
    let json = load_from_path(config.json_path(), &LoadOptions::default()).unwrap();
    for field in ["name", "age", "city"] {
        assert!(csv.schema.index_of(field).is_some());
        assert!(json.schema.index_of(field).is_some());
    }
}

#[test]
fn run_prints_both_reports() {
    let config = Config::default();
    let mut reporter = Reporter::new(Vec::new(), &config);
    datalab::analysis::run(&config, &LoadOptions::default(), &mut reporter).unwrap();
    let out = String::from_utf8(reporter.into_inner()).unwrap();

    assert!(out.starts_with("[DataLab] Welcome to DataLab"));
    assert!(out.contains("[DataLab] Analysis of data.json"));
    assert!(out.contains("[DataLab] Analysis of people.csv"));
    assert!(out.contains("[DataLab] Salary range: 38000 - 67000 SEK"));
    assert!(out.trim_end().ends_with("[DataLab] Analysis complete!"));
}
