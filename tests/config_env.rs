// tests/config_env.rs
//
// Environment-driven config loading. These tests mutate process env, so they are serialized.

use std::path::PathBuf;

use serial_test::serial;

use rubric_scorer::analyzers::Analyzers;
use rubric_scorer::config::analyzers::{AnalyzersConfig, ENV_ANALYZERS_CONFIG_PATH};
use rubric_scorer::rubric::ENV_RUBRIC_CONFIG_PATH;
use rubric_scorer::Rubric;

fn tmp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rubric_scorer_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn rubric_env_path_overrides_embedded() {
    let base = std::fs::read_to_string("config/rubric.toml").unwrap();
    let custom = base.replace(r#""um", "uh","#, r#""um", "uh", "erm","#);
    assert_ne!(base, custom, "fixture replacement should apply");
    let path = tmp_file("rubric_custom.toml", &custom);

    std::env::set_var(ENV_RUBRIC_CONFIG_PATH, &path);
    let rubric = Rubric::load().expect("custom rubric loads");
    std::env::remove_var(ENV_RUBRIC_CONFIG_PATH);

    assert!(rubric.filler_words().iter().any(|w| w == "erm"));
}

#[test]
#[serial]
fn rubric_missing_file_is_an_error() {
    std::env::set_var(ENV_RUBRIC_CONFIG_PATH, "/definitely/not/here/rubric.toml");
    let err = Rubric::load().err().expect("missing file must fail");
    std::env::remove_var(ENV_RUBRIC_CONFIG_PATH);

    assert!(err.to_string().contains("/definitely/not/here/rubric.toml"));
}

#[test]
#[serial]
fn rubric_unset_env_uses_embedded() {
    std::env::remove_var(ENV_RUBRIC_CONFIG_PATH);
    let rubric = Rubric::load().expect("embedded rubric");
    assert_eq!(rubric.criteria().len(), 10);
}

#[test]
#[serial]
fn analyzers_env_path_disables_providers() {
    let path = tmp_file(
        "analyzers_disabled.json",
        r#"{ "grammar": { "provider": " Disabled " }, "sentiment": { "provider": "none" } }"#,
    );
    std::env::set_var(ENV_ANALYZERS_CONFIG_PATH, &path);
    let cfg = AnalyzersConfig::load();
    std::env::remove_var(ENV_ANALYZERS_CONFIG_PATH);

    assert_eq!(cfg.grammar.provider, "disabled");
    assert_eq!(cfg.semantic.provider, "bag_of_words");

    let statuses = Analyzers::from_config(&cfg).statuses();
    assert!(!statuses[0].available);
    assert!(!statuses[1].available);
    assert!(statuses[1]
        .reason
        .as_deref()
        .is_some_and(|r| r.contains("none")));
    assert!(statuses[2].available);
}

#[test]
#[serial]
fn analyzers_bad_json_falls_back_to_defaults() {
    let path = tmp_file("analyzers_bad.json", "{ not json");
    std::env::set_var(ENV_ANALYZERS_CONFIG_PATH, &path);
    let cfg = AnalyzersConfig::load();
    std::env::remove_var(ENV_ANALYZERS_CONFIG_PATH);

    let d = AnalyzersConfig::default();
    assert_eq!(cfg.grammar.provider, d.grammar.provider);
    assert_eq!(cfg.sentiment.provider, d.sentiment.provider);
    assert_eq!(cfg.semantic.dimensions, d.semantic.dimensions);
}
