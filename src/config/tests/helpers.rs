//! Shared fixtures and helper functions for config tests.

use crate::config::BuildConfig;
use ortho_config::MergeComposer;
use rstest::fixture;
use std::sync::Arc;

/// Fixture providing a default `BuildConfig`.
#[fixture]
pub fn build_config() -> BuildConfig {
    BuildConfig::default()
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(BuildConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `BuildConfig`.
pub fn merge_config(
    composer: MergeComposer,
) -> Result<BuildConfig, Arc<ortho_config::OrthoError>> {
    BuildConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a merged config has default values, with the build
/// directory rebased under the default repository.
pub fn assert_config_has_defaults(config: &BuildConfig) {
    assert_eq!(
        config.build_dir.as_str(),
        "/work/build",
        "build_dir should be /work/build"
    );
    assert_eq!(config.build_type, "Release", "build_type should be Release");
    assert!(!config.clang_tidy, "clang_tidy should be false");
    assert!(!config.coverage, "coverage should be false");
    assert!(
        config.coveralls_repo_token.is_none(),
        "coveralls_repo_token should be None"
    );
    assert_eq!(config.cxx_compiler, "clang++", "cxx_compiler should be clang++");
    assert!(
        config.install_prefix.is_none(),
        "install_prefix should be None"
    );
    assert_eq!(config.jobs, 4, "jobs should be 4");
    assert_eq!(config.repo.as_str(), "/work", "repo should be /work");
    assert!(!config.test, "test should be false");
}
