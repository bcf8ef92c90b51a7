//! Command helper methods for Test.

use super::fixtures::{
    AWS_ACCESS_KEY_ID, AWS_KEY_ARN, AWS_SECRET_ACCESS_KEY, CONFIG, GCP_KEY,
    GCP_SERVICE_ACCOUNT_KEY,
};
use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a cloudkey command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test working directory
    /// - No ambient cloud credentials and an unreachable GCP metadata server
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cloudkey").expect("failed to find cloudkey binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in [
            "CLOUDKEY_LOG",
            "GOOGLE_APPLICATION_CREDENTIALS",
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_SESSION_TOKEN",
            "AWS_PROFILE",
            "AWS_SHARED_CREDENTIALS_FILE",
            "AWS_CONFIG_FILE",
            "CLOUDSDK_CONFIG",
        ] {
            cmd.env_remove(var);
        }
        // GCP falls back to the metadata server without local credentials;
        // point it at a closed port so that lookup fails fast.
        cmd.env("GCE_METADATA_HOST", "127.0.0.1:9");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run cloudkey with `args` and capture its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run cloudkey")
    }

    /// Shortcut for `cloudkey config gcp gcloud-account`.
    pub fn config_gcloud_account(&self) -> Output {
        let [project, location, keyring, key] = GCP_KEY;
        self.run(&[
            "config", "gcp", "gcloud-account", CONFIG, "-p", project, "-l", location, "-r",
            keyring, "-k", key,
        ])
    }

    /// Shortcut for `cloudkey config gcp service-account`.
    pub fn config_service_account(&self, key_file: &str) -> Output {
        let [project, location, keyring, key] = GCP_KEY;
        self.run(&[
            "config", "gcp", "service-account", CONFIG, "-p", project, "-l", location, "-r",
            keyring, "-k", key, "-s", key_file,
        ])
    }

    /// Write a well-formed service account key and configure it.
    pub fn config_valid_service_account(&self) -> Output {
        self.write("sa.json", GCP_SERVICE_ACCOUNT_KEY.as_bytes());
        self.config_service_account("sa.json")
    }

    /// Shortcut for `cloudkey config aws static-creds` with example keys.
    pub fn config_static_creds(&self) -> Output {
        self.run(&[
            "config",
            "aws",
            "static-creds",
            CONFIG,
            "-a",
            AWS_ACCESS_KEY_ID,
            "-s",
            AWS_SECRET_ACCESS_KEY,
            "-r",
            "us-east-1",
            "-k",
            AWS_KEY_ARN,
        ])
    }

    /// Shortcut for `cloudkey config aws shared-creds`.
    pub fn config_shared_creds(&self, cred_file: &str, profile: &str) -> Output {
        self.run(&[
            "config",
            "aws",
            "shared-creds",
            CONFIG,
            "-f",
            cred_file,
            "-p",
            profile,
            "-r",
            "us-east-1",
            "-k",
            AWS_KEY_ARN,
        ])
    }

    /// Contents of the config file as a string.
    pub fn config_contents(&self) -> String {
        std::fs::read_to_string(self.path(CONFIG)).expect("failed to read config")
    }
}
