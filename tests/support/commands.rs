//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a cloudship command wired to the fake gcloud.
    ///
    /// Returns a Command configured with:
    /// - CLOUDSHIP_GCLOUD pointing at the fake gcloud script
    /// - FAKE_GCLOUD_DIR set to the fake's state directory
    /// - NO_COLOR so output can be matched verbatim
    /// - Current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cloudship").expect("failed to find cloudship binary");
        cmd.env("CLOUDSHIP_GCLOUD", self.gcloud_bin());
        cmd.env("FAKE_GCLOUD_DIR", self.gcloud.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CLOUDSHIP_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `cloudship <project> <region> <service>`.
    pub fn deploy(&self) -> Output {
        self.cmd()
            .args(super::fixtures::TARGET)
            .output()
            .expect("failed to run cloudship")
    }

    /// Deploy with the fake gcloud failing on calls containing `pattern`.
    pub fn deploy_failing(&self, pattern: &str, code: i32) -> Output {
        self.cmd()
            .args(super::fixtures::TARGET)
            .env("FAKE_GCLOUD_FAIL", pattern)
            .env("FAKE_GCLOUD_FAIL_CODE", code.to_string())
            .output()
            .expect("failed to run cloudship")
    }

    /// Shortcut for `cloudship --dry-run <project> <region> <service>`.
    pub fn dry_run(&self) -> Output {
        self.cmd()
            .arg("--dry-run")
            .args(super::fixtures::TARGET)
            .output()
            .expect("failed to run cloudship --dry-run")
    }
}
