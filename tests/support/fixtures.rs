//! Test fixtures and constants.

/// Positional arguments used by most tests.
pub const TARGET: [&str; 3] = ["acme-prod", "us-central1", "prometheus"];

/// The secrets file from the documentation example.
pub const EXAMPLE_SECRETS: &str =
    "# comment\nEMAIL_SENDER=alice@example.com\nEMAIL_PASSWORD = s3cr3t\n";

/// A secrets file covering all four bound secrets.
pub const FULL_SECRETS: &str = r#"
# Mail account used by the service
EMAIL_SENDER=alice@example.com
EMAIL_PASSWORD=app-password-123
EMAIL_RECEIVER=ops@example.com

# Reports are stamped in this zone
TIMEZONE=Asia/Kolkata
"#;

/// Fake gcloud.
///
/// - Appends its arguments to `$FAKE_GCLOUD_DIR/calls.log`
/// - Keeps one file per secret under `$FAKE_GCLOUD_DIR/secrets`, one version per line
/// - Fails with `$FAKE_GCLOUD_FAIL_CODE` when its arguments contain `$FAKE_GCLOUD_FAIL`
pub const FAKE_GCLOUD: &str = r#"#!/bin/sh
dir="$FAKE_GCLOUD_DIR"
echo "$*" >> "$dir/calls.log"

if [ -n "$FAKE_GCLOUD_FAIL" ]; then
  case "$*" in
    *"$FAKE_GCLOUD_FAIL"*)
      echo "ERROR: (gcloud) simulated failure" >&2
      exit "${FAKE_GCLOUD_FAIL_CODE:-1}"
      ;;
  esac
fi

case "$1 $2" in
  "secrets describe")
    if [ -f "$dir/secrets/$3" ]; then echo "projects/p/secrets/$3"; exit 0; fi
    echo "ERROR: NOT_FOUND" >&2
    exit 1
    ;;
  "secrets create")
    if [ -f "$dir/secrets/$3" ]; then echo "ERROR: ALREADY_EXISTS" >&2; exit 1; fi
    : > "$dir/secrets/$3"
    ;;
  "secrets versions")
    { cat; echo; } >> "$dir/secrets/$4"
    ;;
  "run services")
    if [ "$3" = "describe" ]; then echo "https://$4-abc123-uc.a.run.app"; fi
    ;;
esac
exit 0
"#;
