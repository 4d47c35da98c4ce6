//! Record-or-verify workflow tests against a temporary schema directory

#![cfg(feature = "schema-validation")]

use std::fs;

use serde_json::{Value, json};
use shapecheck_core::contract::{CheckOutcome, ContractChecker, ContractConfig};
use shapecheck_core::inference::InferenceConfig;
use shapecheck_core::storage::SchemaStore;
use tempfile::TempDir;

fn response() -> Value {
    json!({
        "total": 2,
        "items": [
            {
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "email": "a@example.com",
                "createdAt": "2024-07-25T13:36:08.365Z",
                "nickname": null
            },
            {
                "id": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
                "email": "b@example.com",
                "createdAt": "2024-07-26T08:00:00+02:00",
                "nickname": "bee"
            }
        ]
    })
}

fn checker(temp: &TempDir) -> ContractChecker {
    ContractChecker::new(ContractConfig::new().with_schema_dir(temp.path().join("__schemas__")))
}

#[test]
fn test_record_then_pass() {
    let temp = TempDir::new().unwrap();
    let checker = checker(&temp);

    let outcome = checker.check("api/users", &response()).unwrap();
    let CheckOutcome::Recorded { path } = outcome else {
        panic!("expected Recorded, got {:?}", outcome);
    };
    assert!(path.ends_with("__schemas__/api/users.schema.json"));

    let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(
        stored["properties"]["items"]["items"]["properties"]["createdAt"]["format"],
        "date-time"
    );
    assert_eq!(
        stored["properties"]["items"]["items"]["required"],
        json!(["createdAt", "email", "id"])
    );

    assert_eq!(
        checker.check("api/users", &response()).unwrap(),
        CheckOutcome::Passed
    );
}

#[test]
fn test_drift_reports_each_mismatch() {
    let temp = TempDir::new().unwrap();
    let checker = checker(&temp);
    checker.check("users", &response()).unwrap();

    let drifted = json!({
        "total": "2",
        "items": [
            {
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "createdAt": "2024-07-25T13:36:08.365Z"
            }
        ]
    });

    let outcome = checker.check("users", &drifted).unwrap();
    let CheckOutcome::Failed { diagnostics } = outcome else {
        panic!("expected Failed, got {:?}", outcome);
    };

    let mut lines: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            r#"/items/0/email: expected string, got undefined"#.to_string(),
            r#"/total: expected number, got "2""#.to_string(),
        ]
    );
}

#[test]
fn test_optional_fields_may_be_absent_or_null() {
    let temp = TempDir::new().unwrap();
    let checker = checker(&temp);
    checker.check("users", &response()).unwrap();

    let mut sparse = response();
    sparse["items"][1]["nickname"] = Value::Null;
    if let Some(item) = sparse["items"][0].as_object_mut() {
        item.remove("nickname");
    }

    assert_eq!(checker.check("users", &sparse).unwrap(), CheckOutcome::Passed);
}

#[test]
fn test_format_checks_follow_config() {
    let temp = TempDir::new().unwrap();
    checker(&temp).check("users", &response()).unwrap();

    let mut bad_email = response();
    bad_email["items"][0]["email"] = json!("not an email");

    let strict = checker(&temp).check("users", &bad_email).unwrap();
    assert!(strict.is_failure());

    let lenient = ContractChecker::new(
        ContractConfig::new()
            .with_schema_dir(temp.path().join("__schemas__"))
            .with_format_checks(false),
    );
    assert_eq!(
        lenient.check("users", &bad_email).unwrap(),
        CheckOutcome::Passed
    );
}

#[test]
fn test_update_rerecords() {
    let temp = TempDir::new().unwrap();
    checker(&temp).check("users", &response()).unwrap();

    let reshaped = json!({"users": []});
    let updating = ContractChecker::new(
        ContractConfig::new()
            .with_schema_dir(temp.path().join("__schemas__"))
            .with_update(true),
    );
    assert!(matches!(
        updating.check("users", &reshaped).unwrap(),
        CheckOutcome::Updated { .. }
    ));
    assert_eq!(
        checker(&temp).check("users", &reshaped).unwrap(),
        CheckOutcome::Passed
    );
}

#[test]
fn test_config_from_toml_drives_checker() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("shapecheck.toml");
    fs::write(
        &config_path,
        format!(
            "schema_dir = {:?}\n\n[inference]\ndetectFormats = false\n",
            temp.path().join("snapshots").display().to_string()
        ),
    )
    .unwrap();

    let config = ContractConfig::load(&config_path).unwrap();
    assert_eq!(config.inference, InferenceConfig::builder().detect_formats(false).build());

    let checker = ContractChecker::new(config);
    checker.check("users", &response()).unwrap();

    let stored = SchemaStore::new(temp.path().join("snapshots"))
        .load("users")
        .unwrap()
        .unwrap();
    let item = &stored["properties"]["items"]["items"]["properties"];
    assert!(item["email"].get("format").is_none());
}

#[test]
fn test_recorded_schema_accepts_its_own_document() {
    let temp = TempDir::new().unwrap();
    let checker = checker(&temp);

    let shapes = [
        ("no_offset", json!({"at": "2024-01-15T10:30:00"})),
        ("space_separator", json!({"at": "2024-01-15 10:30:00Z"})),
        ("compact_offset", json!({"at": "2024-01-15T10:30:00+0530"})),
        ("bare_time", json!({"at": "10:30:00"})),
        ("nested", json!({"events": [{"at": "2024-01-15T10:30:00"}, {"at": "2024-01-16T08:00:00"}]})),
    ];

    for (name, document) in &shapes {
        assert!(matches!(
            checker.check(name, document).unwrap(),
            CheckOutcome::Recorded { .. }
        ));
        assert_eq!(
            checker.check(name, document).unwrap(),
            CheckOutcome::Passed,
            "{} should pass against its own schema",
            name
        );
    }
}

#[test]
fn test_accepted_formats_are_kept() {
    let temp = TempDir::new().unwrap();
    let checker = checker(&temp);
    checker
        .check("event", &json!({"at": "2024-01-15T10:30:00Z", "on": "2024-01-15"}))
        .unwrap();

    let stored = checker.store().load("event").unwrap().unwrap();
    assert_eq!(stored["properties"]["at"]["format"], "date-time");
    assert_eq!(stored["properties"]["on"]["format"], "date");
}
