#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use dirtrack::TrackerContext;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a tree to track, a store and a config file
pub struct TestTree {
    pub temp_dir: TempDir,
    pub ctx: TrackerContext,
}

impl TestTree {
    /// Create an empty `tree/` next to a fresh store and config
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("tree"))?;

        let ctx = TrackerContext::new_explicit(
            temp_dir.path().join("store"),
            temp_dir.path().join("config.toml"),
        )?;

        Ok(Self { temp_dir, ctx })
    }

    /// Root of the tracked tree
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("tree")
    }

    /// Absolute path of `rel` inside the tree
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Rename `from` to `to` within the tree, creating parent directories
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        let target = self.path(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(self.path(from), target)?;
        Ok(())
    }

    pub fn store_path(&self) -> &Path {
        &self.ctx.store_path
    }

    /// `track` binary wired to this fixture's config and store
    pub fn cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("track")?;
        cmd.env("HOME", self.temp_dir.path())
            .env("DIRTRACK_CONFIG_PATH", &self.ctx.config_path)
            .env("DIRTRACK_STORE_PATH", &self.ctx.store_path)
            .env_remove("DIRTRACK_LOG")
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}
