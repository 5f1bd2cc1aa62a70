//! End-to-end host tests: override and fixture files on disk.

use std::path::Path;

use scout::settings::{load_override, resolve_config, save_override};
use scout::{run_fixture_turn, HostError};
use scout_search::{ConfigOverride, ResearchError, TrustTier};

const FIXTURES: &str = r#"{
  "keyword": [
    { "id": "a", "url": "https://malware.zip/x", "title": "X", "sparseScore": 0.9 },
    { "id": "x", "url": "https://arxiv.org/paper1", "title": "T", "sparseScore": 0.8 },
    { "id": "w", "url": "https://intranet.corp/wiki", "title": "Wiki", "sparseScore": 0.4 }
  ],
  "dense": [
    { "id": "x", "url": "https://arxiv.org/paper1", "title": "T", "denseScore": 0.6 },
    { "url": "https://docs.rs/tokio", "title": "Tokio", "confidence": 0.5 }
  ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

#[tokio::test]
async fn fixture_turn_runs_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fixtures = write(dir.path(), "fixtures.json", FIXTURES);

    let out = run_fixture_turn("attention is all you need", &fixtures, None)
        .await
        .expect("turn succeeds");

    let ids: Vec<&str> = out.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(out.results.len(), 3);
    assert!(!ids.contains(&"a"));
    // Records without an id are keyed by url.
    assert!(ids.contains(&"https://docs.rs/tokio"));
    assert_eq!(out.metrics.blocked_count, 1);

    let arxiv = out
        .results
        .iter()
        .find(|r| r.id == "x")
        .expect("merged result present");
    assert_eq!(arxiv.trust_tier, TrustTier::Authoritative);
}

#[tokio::test]
async fn override_file_changes_trust_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fixtures = write(dir.path(), "fixtures.json", FIXTURES);
    let config = write(
        dir.path(),
        "config.toml",
        r#"
[trust_tiers]
authoritative = ["intranet.corp"]
"#,
    );

    let out = run_fixture_turn("wiki", &fixtures, Some(&config))
        .await
        .expect("turn succeeds");

    let wiki = out
        .results
        .iter()
        .find(|r| r.id == "w")
        .expect("wiki present");
    assert_eq!(wiki.trust_tier, TrustTier::Authoritative);
    // The list is replaced, so arxiv.org is no longer authoritative.
    let arxiv = out.results.iter().find(|r| r.id == "x").expect("arxiv present");
    assert_eq!(arxiv.trust_tier, TrustTier::OpenWeb);
}

#[tokio::test]
async fn invalid_override_is_rejected_before_the_turn() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fixtures = write(dir.path(), "fixtures.json", FIXTURES);
    let config = write(dir.path(), "config.toml", "max_results_per_action = 0\n");

    let err = run_fixture_turn("q", &fixtures, Some(&config))
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::Research(ResearchError::Config(_))));
    assert!(err.to_string().contains("max_results_per_action"));
}

#[tokio::test]
async fn missing_fixture_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = run_fixture_turn("q", &dir.path().join("absent.json"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::Io(_)));
}

#[test]
fn override_save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let overrides = ConfigOverride {
        max_per_domain: Some(2),
        content_types: Some(vec!["html".into(), "pdf".into()]),
        ..Default::default()
    };
    save_override(&overrides, &path).expect("saves");
    let loaded = load_override(&path).expect("loads");
    assert_eq!(loaded, overrides);

    let config = resolve_config(Some(&path)).expect("valid");
    assert_eq!(config.max_per_domain, 2);
    assert_eq!(config.content_types, vec!["html", "pdf"]);
}
