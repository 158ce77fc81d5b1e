use std::fs;
use std::path::Path;

use explore_fixtures_analysis::analyzer::analyze_log_dir;
use explore_fixtures_analysis::files::{
    merge_into_fixture_file, validate_fixture_file, write_fixture,
};
use explore_fixtures_core::{
    FieldContext, FixtureDocument, FixtureResolver, Priority, Resolution, ValueSource,
    generate_fixture,
};
use tempfile::TempDir;

fn write_log(dir: &Path, name: &str, steps: serde_json::Value) {
    let log = serde_json::json!({ "sessionId": name, "steps": steps });
    fs::write(dir.join(name), log.to_string()).unwrap();
}

fn typed(field: &str, value: &str, source: &str) -> serde_json::Value {
    serde_json::json!({
        "action": {
            "type": "type",
            "elementId": field,
            "value": value,
            "valueSource": { "type": source }
        },
        "screenType": "signup"
    })
}

#[test]
fn analyze_log_dir_skips_bad_files_and_counts_steps() {
    let dir = TempDir::new().unwrap();
    write_log(
        dir.path(),
        "a.json",
        serde_json::json!([
            typed("zipCode", "94105", "fallback"),
            typed("firstName", "Ada", "aiGenerated"),
            { "action": { "type": "scroll" } },
            { "action": "not an object" }
        ]),
    );
    write_log(
        dir.path(),
        "b.json",
        serde_json::json!([typed("firstName", "Grace", "aiGenerated")]),
    );
    fs::write(dir.path().join("c.json"), "[1, 2, 3]").unwrap();
    fs::write(dir.path().join("d.json"), r#"{"session": "no steps"}"#).unwrap();
    fs::write(dir.path().join("e.json"), "{").unwrap();

    let report = analyze_log_dir(dir.path(), 0.7).unwrap();

    assert_eq!(report.files_analyzed, 2);
    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|s| Path::new(&s.path).file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(skipped, vec!["c.json", "d.json", "e.json"]);
    assert_eq!(report.steps_examined, 3);
    assert_eq!(report.steps_ignored, 2);

    assert_eq!(report.suggestions.len(), 2);
    assert_eq!(report.suggestions[0].field_id, "zipCode");
    assert_eq!(report.suggestions[0].priority, Priority::High);
    assert_eq!(report.suggestions[1].field_id, "firstName");
    assert_eq!(report.suggestions[1].frequency, 2);
    assert_eq!(report.suggestions[1].value, "Ada");
    assert_eq!(report.total_occurrences(), 3);
}

#[test]
fn generated_fixture_roundtrips_through_disk_and_resolver() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    write_log(
        &logs,
        "run.json",
        serde_json::json!([
            typed("billingZip", "10001", "fallback"),
            typed("confirmPassword", "s3cret!", "aiGenerated"),
            typed("email", "known@example.com", "fixtureExact")
        ]),
    );

    let report = analyze_log_dir(&logs, 0.7).unwrap();
    let fixture = generate_fixture(&report.suggestions, "signup");
    let path = dir.path().join("signup.json");
    write_fixture(&fixture, &path).unwrap();

    let result = validate_fixture_file(&path, false);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let resolver = FixtureResolver::new(&fixture).unwrap();
    assert_eq!(
        resolver.resolve(&FieldContext::new("confirmPassword")),
        Resolution::Resolved {
            value: "s3cret!".to_string(),
            source: ValueSource::FixtureExact,
            matched_key: "confirmPassword".to_string(),
        }
    );
    match resolver.resolve(&FieldContext::new("shippingZip")) {
        Resolution::Resolved { value, source, .. } => {
            assert_eq!(value, "10001");
            assert_eq!(source, ValueSource::FixtureSemantic);
        }
        other => panic!("expected a semantic match, got {other:?}"),
    }
}

#[test]
fn merge_into_fixture_file_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    write_log(
        dir.path(),
        "run.json",
        serde_json::json!([typed("city", "Lyon", "fallback")]),
    );
    let path = dir.path().join("fixture.out");
    write_fixture(
        &FixtureDocument::new("base").with_pattern("promo", "SAVE5"),
        &path,
    )
    .unwrap();

    let report = analyze_log_dir(dir.path(), 0.7).unwrap();
    let once = merge_into_fixture_file(&report.suggestions, &path).unwrap();
    write_fixture(&once, &path).unwrap();
    let twice = merge_into_fixture_file(&report.suggestions, &path).unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.patterns["promo"], "SAVE5");
    assert_eq!(twice.patterns["semantic:city"], "Lyon");
}
