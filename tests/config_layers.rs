//! Config layering feeding the merger end to end.

use navclass::config::ConfigOrigin;
use navclass::input::load_options;
use navclass::{Attributes, ConfigError, EffectiveConfig, ElementKind, NodePosition};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_host_file_then_cli_precedence() {
    let mut host = NamedTempFile::new().unwrap();
    writeln!(host, "[unescape]").unwrap();
    writeln!(host, "patterns = [\"___\", \"--\"]").unwrap();
    writeln!(host, "replacements = [\":\", \"/\"]").unwrap();

    let from_host = EffectiveConfig::build(Some(host.path()), None).unwrap();
    assert_eq!(from_host.rules().apply("sm___w-1--3"), "sm:w-1/3");

    let cli = serde_json::json!({"unescape": {"patterns": ["~", "___"], "replacements": null}});
    let layered = EffectiveConfig::build(Some(host.path()), Some(cli)).unwrap();

    // CLI patterns replace the host list; host replacements still apply pairwise
    assert_eq!(layered.rules().rules().len(), 2);
    assert_eq!(layered.rules().apply("a~b___c"), "a:b/c");
    let origins: Vec<ConfigOrigin> = layered.sources.iter().map(|s| s.origin).collect();
    assert_eq!(
        origins,
        vec![ConfigOrigin::Builtin, ConfigOrigin::Host, ConfigOrigin::Cli]
    );
}

#[test]
fn test_surplus_replacements_in_host_file_ignored() {
    let mut host = NamedTempFile::new().unwrap();
    writeln!(host, "[unescape]").unwrap();
    writeln!(host, "patterns = [\"___\"]").unwrap();
    writeln!(host, "replacements = [\":\", \"/\", \"-\"]").unwrap();

    let config = EffectiveConfig::build(Some(host.path()), None).unwrap();
    assert_eq!(config.rules().rules().len(), 1);
    assert_eq!(config.rules().apply("a___b"), "a:b");
}

#[test]
fn test_scalar_replacement_in_host_file_is_shared() {
    let mut host = NamedTempFile::new().unwrap();
    writeln!(host, "[unescape]").unwrap();
    writeln!(host, "patterns = [\"___\", \"~\"]").unwrap();
    writeln!(host, "replacements = \":\"").unwrap();

    let shared = EffectiveConfig::build(Some(host.path()), None).unwrap();
    assert_eq!(shared.rules().apply("a___b~c"), "a:b:c");

    let paired = serde_json::json!({"unescape": {"replacements": [":"]}});
    let layered = EffectiveConfig::build(Some(host.path()), Some(paired)).unwrap();
    assert_eq!(layered.rules().apply("a___b~c"), "a:bc");
}

#[test]
fn test_invalid_pattern_in_host_file() {
    let mut host = NamedTempFile::new().unwrap();
    writeln!(host, "[unescape]").unwrap();
    writeln!(host, "patterns = [\"(\"]").unwrap();

    let err = EffectiveConfig::build(Some(host.path()), None).unwrap_err();
    assert!(matches!(err, ConfigError::Rules(_)));
}

#[test]
fn test_fixture_options_through_configured_merger() {
    let config = EffectiveConfig::build(Some(fixture("navclass.toml").as_path()), None).unwrap();
    let options = load_options(&fixture("primary_menu.toml")).unwrap();
    let merger = config.merger();

    let link = merger.merge(
        ElementKind::Link,
        [("href", "/docs")].into_iter().collect::<Attributes>(),
        &options,
        NodePosition::new(1, Some(0)),
    );
    assert_eq!(link.class(), "text-sm hover:underline w-1/2");
    assert_eq!(link.get("target"), Some("_self"));
    assert_eq!(link.get("href"), Some("/docs"));

    let submenu = merger.submenu_classes(vec!["sub-menu".to_string()], &options, 0);
    assert_eq!(submenu, vec!["sub-menu", "md:absolute"]);
}
