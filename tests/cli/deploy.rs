//! End-to-end deployment against the fake gcloud.

use crate::support::*;

#[test]
fn test_full_deployment_sequence() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.deploy();
    assert_success(&output);
    assert_stdout_contains(&output, "https://prometheus-abc123-uc.a.run.app");

    let calls = t.gcloud_calls();
    let expected_prefixes = [
        "services enable run.googleapis.com cloudbuild.googleapis.com secretmanager.googleapis.com --project acme-prod",
        "secrets describe EMAIL_SENDER",
        "secrets create EMAIL_SENDER --replication-policy=automatic --project acme-prod",
        "secrets versions add EMAIL_SENDER --data-file=- --project acme-prod",
        "secrets describe EMAIL_PASSWORD",
        "secrets create EMAIL_PASSWORD",
        "secrets versions add EMAIL_PASSWORD",
        "secrets describe EMAIL_RECEIVER",
        "secrets create EMAIL_RECEIVER",
        "secrets versions add EMAIL_RECEIVER",
        "secrets describe TIMEZONE",
        "secrets create TIMEZONE",
        "secrets versions add TIMEZONE",
        "builds submit . --tag gcr.io/acme-prod/prometheus --project acme-prod",
        "run deploy prometheus --image gcr.io/acme-prod/prometheus --platform managed --region us-central1 --project acme-prod --allow-unauthenticated",
        "run services update prometheus --no-cpu-throttling",
        "run services describe prometheus",
    ];

    assert_eq!(calls.len(), expected_prefixes.len(), "calls: {:#?}", calls);
    for (call, prefix) in calls.iter().zip(expected_prefixes) {
        assert!(call.starts_with(prefix), "expected '{}', got '{}'", prefix, call);
    }

    let deploy = &calls[14];
    assert!(deploy.contains(
        "--set-secrets EMAIL_SENDER=EMAIL_SENDER:latest,EMAIL_PASSWORD=EMAIL_PASSWORD:latest,\
         EMAIL_RECEIVER=EMAIL_RECEIVER:latest,TIMEZONE=TIMEZONE:latest"
    ));
    assert!(deploy.ends_with("--min-instances 1"));
}

#[test]
fn test_stage_progress_printed() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.deploy();
    assert_success(&output);

    let out = stdout(&output);
    let stages = [
        "Enabling platform APIs",
        "Syncing secrets",
        "Building container image",
        "Deploying service",
        "Switching CPU to always allocated",
        "Fetching service URL",
    ];
    let mut last = 0;
    for stage in stages {
        let pos = out.find(stage).unwrap_or_else(|| panic!("missing '{}': {}", stage, out));
        assert!(pos >= last, "'{}' out of order", stage);
        last = pos;
    }
    assert_stdout_contains(&output, "EMAIL_SENDER (created)");
}

#[test]
fn test_secret_values_never_printed() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.cmd().arg("--verbose").args(TARGET).output().unwrap();
    assert_success(&output);
    assert_output_excludes(&output, "app-password-123");
    assert!(!t.gcloud_calls().iter().any(|c| c.contains("app-password-123")));
}

#[test]
fn test_first_failure_stops_pipeline() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.deploy_failing("builds submit", 1);
    assert_failure(&output);
    assert_stderr_contains(&output, "simulated failure");

    let calls = t.gcloud_calls();
    assert!(calls.last().unwrap().starts_with("builds submit"));
    assert!(!calls.iter().any(|c| c.starts_with("run ")));
}

#[test]
fn test_exit_code_of_failing_call_propagates() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.deploy_failing("run deploy", 42);
    assert_exit_code(&output, 42);
    assert!(!t
        .gcloud_calls()
        .iter()
        .any(|c| c.starts_with("run services")));
}

#[test]
fn test_patch_failure_skips_url_report() {
    let t = Test::with_secrets_file(FULL_SECRETS);

    let output = t.deploy_failing("--no-cpu-throttling", 2);
    assert_exit_code(&output, 2);
    assert!(!t
        .gcloud_calls()
        .iter()
        .any(|c| c.starts_with("run services describe")));
}

#[test]
fn test_json_report() {
    let t = Test::with_secrets_file(FULL_SECRETS);
    t.seed_secret("TIMEZONE", &["UTC"]);

    let output = t.cmd().arg("--json").args(TARGET).output().unwrap();
    assert_success(&output);

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["url"], "https://prometheus-abc123-uc.a.run.app");
    assert_eq!(report["image"], "gcr.io/acme-prod/prometheus");
    assert_eq!(report["secrets"]["updated"], serde_json::json!(["TIMEZONE"]));
    assert_eq!(report["secrets"]["created"].as_array().unwrap().len(), 3);
}

#[test]
fn test_custom_source_and_secrets_file() {
    let t = Test::new();
    t.write("prod.env", FULL_SECRETS);

    let output = t
        .cmd()
        .args(["--secrets-file", "prod.env", "--source", "./service"])
        .args(TARGET)
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t
        .gcloud_calls()
        .iter()
        .any(|c| c.starts_with("builds submit ./service --tag")));
}

#[test]
fn test_missing_bound_secret_warns() {
    let t = Test::with_secrets_file(EXAMPLE_SECRETS);
    t.seed_secret("TIMEZONE", &["UTC"]);

    let output = t.deploy();
    assert_success(&output);
    assert_stdout_contains(&output, "EMAIL_RECEIVER is bound to secret EMAIL_RECEIVER which does not exist");
}
