//! Credential resolution against real profile files and environment maps

use serial_test::serial;
use skyvault_aws::credentials::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY};
use skyvault_aws::{AwsSettings, CredentialResolver, CredentialStrategy, EnvConfig, Error};
use std::io::Write;
use tempfile::NamedTempFile;

const SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";
const CONFIG_FILE: &str = "AWS_CONFIG_FILE";

/// Point the SDK profile loader at temporary files for the duration of a test
struct ProfileFiles {
    _credentials: NamedTempFile,
    _config: NamedTempFile,
    previous: Vec<(&'static str, Option<String>)>,
}

impl ProfileFiles {
    fn new(credentials: &str) -> Self {
        let mut creds_file = NamedTempFile::new().unwrap();
        creds_file.write_all(credentials.as_bytes()).unwrap();
        let config_file = NamedTempFile::new().unwrap();

        let previous = [SHARED_CREDENTIALS_FILE, CONFIG_FILE]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();

        std::env::set_var(SHARED_CREDENTIALS_FILE, creds_file.path());
        std::env::set_var(CONFIG_FILE, config_file.path());

        Self {
            _credentials: creds_file,
            _config: config_file,
            previous,
        }
    }
}

impl Drop for ProfileFiles {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn profile_settings(name: &str) -> AwsSettings {
    AwsSettings {
        profile_name: Some(name.to_string()),
        // Both lower-priority strategies are enabled; the profile must still win
        web_identity: true,
        static_keys: true,
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
async fn test_profile_credentials_loaded_from_file() {
    let _files = ProfileFiles::new(
        "[skyvault-test]\naws_access_key_id = AKIAPROFILE00001\naws_secret_access_key = profile-secret\n",
    );

    let settings = profile_settings("skyvault-test");
    let env = EnvConfig::from_map(Vec::<(String, String)>::new());
    let resolver = CredentialResolver::from_settings(&settings, env);

    let credential = resolver.resolve().await.unwrap().unwrap();
    assert_eq!(credential.access_key_id(), "AKIAPROFILE00001");
    assert_eq!(credential.secret_access_key(), "profile-secret");
    assert_eq!(
        credential.strategy(),
        &CredentialStrategy::ExplicitProfile("skyvault-test".to_string())
    );
}

#[tokio::test]
#[serial]
async fn test_missing_profile_fails_without_fallback() {
    let _files = ProfileFiles::new(
        "[other]\naws_access_key_id = AKIAOTHER0000001\naws_secret_access_key = other-secret\n",
    );

    // Static keys are available but must not be used
    let env = EnvConfig::from_map([(AWS_ACCESS_KEY_ID, "test"), (AWS_SECRET_ACCESS_KEY, "test")]);
    let resolver = CredentialResolver::from_settings(&profile_settings("skyvault-test"), env);

    assert!(matches!(
        resolver.resolve().await,
        Err(Error::CredentialResolution { .. })
    ));
}

#[tokio::test]
async fn test_static_keys_resolve() {
    let settings = AwsSettings {
        static_keys: true,
        ..Default::default()
    };
    let env = EnvConfig::from_map([(AWS_ACCESS_KEY_ID, "test"), (AWS_SECRET_ACCESS_KEY, "test")]);

    let credential = CredentialResolver::from_settings(&settings, env)
        .resolve()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credential.access_key_id(), "test");
    assert_eq!(credential.strategy(), &CredentialStrategy::StaticKeys);
}

#[tokio::test]
async fn test_static_keys_missing_secret_fails() {
    let settings = AwsSettings {
        static_keys: true,
        ..Default::default()
    };
    let env = EnvConfig::from_map([(AWS_ACCESS_KEY_ID, "test")]);

    assert!(matches!(
        CredentialResolver::from_settings(&settings, env).resolve().await,
        Err(Error::CredentialResolution { .. })
    ));
}
