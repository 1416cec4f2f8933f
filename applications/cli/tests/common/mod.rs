//! Shared helpers for CLI integration tests
#![allow(dead_code)]

use clap::Parser;
use songbox_cli::{execute, open_player, Command, Report, Settings};
use songbox_core::LibraryState;
use songbox_storage::JsonFileStore;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// A library living in its own temp directory
pub struct TestLibrary {
    pub dir: TempDir,
    pub settings: Settings,
}

impl TestLibrary {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.storage.state_path = dir.path().join("state.json");
        Self { dir, settings }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run one command line in a fresh process-like player
    pub fn run(&self, args: &[&str]) -> songbox_cli::Result<Report> {
        self.run_with(args, false)
    }

    pub fn dry_run(&self, args: &[&str]) -> songbox_cli::Result<Report> {
        self.run_with(args, true)
    }

    fn run_with(&self, args: &[&str], dry_run: bool) -> songbox_cli::Result<Report> {
        let parsed = Args::try_parse_from(std::iter::once("songbox").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("bad test arguments {:?}: {}", args, e));
        let mut player = open_player(&self.settings, dry_run)?;
        execute(&mut player, parsed.command)
    }

    /// Run and return the printed lines, panicking on error
    pub fn lines(&self, args: &[&str]) -> Vec<String> {
        self.run(args).unwrap().lines
    }

    /// Add a song and return its ID
    pub fn add(&self, title: &str) -> String {
        let url = format!("https://example.com/{}.mp3", title.to_lowercase());
        self.lines(&["add", "--title", title, "--url", url.as_str()])
            .remove(0)
    }

    pub fn saved(&self) -> Option<LibraryState> {
        JsonFileStore::new(&self.settings.storage.state_path)
            .read()
            .unwrap()
    }
}
