//! Loading configuration files from disk.

use std::io::Write;
use tempfile::NamedTempFile;
use ultimate_engine::{DepthPolicy, Strategy};
use ultimate_tictactoe::{AppConfig, PlayerKind};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
        [player_x]
        kind = "minimax"
        depth = { static = 4 }
        randomize_opening = true

        [player_o]
        kind = "expectimax"
        depth = "dynamic"

        [heuristic]
        center = 50
        scale_edge = 0.1
        "#,
    );

    let config = AppConfig::from_file(file.path()).expect("valid config");
    let x = config.player_x().search_config().expect("x searches");
    assert_eq!(x.strategy, Strategy::AlphaBeta);
    assert_eq!(x.depth, DepthPolicy::Static(4));
    assert!(x.randomize_opening);

    let o = config.player_o().search_config().expect("o searches");
    assert_eq!(o.strategy, Strategy::Expectimax);
    assert_eq!(o.depth, DepthPolicy::Dynamic);

    assert_eq!(config.heuristic().center, 50);
    assert_eq!(config.heuristic().scale_edge, 0.1);
    assert_eq!(config.heuristic().corner, 16);
}

#[test]
fn test_missing_file_reports_location() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = write_config("[player_x\nkind = ");
    assert!(AppConfig::from_file(file.path()).is_err());
}

#[test]
fn test_no_path_means_defaults() {
    let config = AppConfig::load(None).expect("defaults");
    assert_eq!(*config.player_x().kind(), PlayerKind::Minimax);
    assert_eq!(*config.player_o().depth(), DepthPolicy::Dynamic);
}
