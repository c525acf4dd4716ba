//! Shared test helpers for driver integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use outfitter_cli::config::Config;
use outfitter_cli::observer::TracingObserver;
use outfitter_cli::runner::run_script;
use outfitter_cli::state::AppState;
use tempfile::TempDir;

const ITEMS_YAML: &str = r"
items:
  - id: straw_hat
    display_name: Straw Hat
    category: head
  - id: iron_helm
    display_name: Iron Helm
    category: head
  - id: linen_shirt
    display_name: Linen Shirt
    category: body
    starting_amount: 1
  - id: apple
    display_name: Apple
    starting_amount: 3
  - id: torch
    display_name: Torch
    starting_amount: 1
";

const TAILOR_YAML: &str = r"
id: tailor
display_name: Tailor
entries:
  - item: straw_hat
    buy_price: 10
    sell_price: 5
  - item: apple
    buy_price: 2
    sell_price: 1
";

/// A content directory and save file living in a temporary directory.
pub struct TestEnv {
    /// Keeps the directory alive for the test's duration.
    pub dir: TempDir,
    /// Configuration pointing into `dir`.
    pub config: Config,
}

/// Build a test environment with the fixture content and `coins` to spend.
pub fn test_env(coins: u32) -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let content_dir = dir.path().join("content");
    fs::create_dir_all(content_dir.join("shops")).unwrap();
    fs::write(content_dir.join("items.yaml"), ITEMS_YAML).unwrap();
    fs::write(content_dir.join("shops").join("tailor.yaml"), TAILOR_YAML).unwrap();

    let config = Config {
        content_dir,
        save_file: dir.path().join("save.json"),
        starting_coins: coins,
    };
    TestEnv { dir, config }
}

/// Run `script` in a fresh session and return the parsed responses.
pub fn run(env: &TestEnv, script: &str) -> Vec<serde_json::Value> {
    let mut state = AppState::load(&env.config).unwrap();
    let mut output = Vec::new();
    run_script(
        &mut state,
        script.as_bytes(),
        &mut output,
        &mut TracingObserver::new(),
    )
    .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Read the save file as a JSON object.
pub fn saved_counts(env: &TestEnv) -> serde_json::Value {
    let contents = fs::read_to_string(&env.config.save_file).unwrap();
    serde_json::from_str(&contents).unwrap()
}

/// The content directory shipped with the repository.
pub fn shipped_content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content")
}
