use anyhow::Result;
use dirtrack::config::{Config, KEYS};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_malformed_toml_configs() -> Result<()> {
    let dir = tempdir()?;

    let malformed_configs = [
        ("invalid_syntax.toml", "invalid toml content {{ broken"),
        ("unclosed_brackets.toml", "[core\nstore_path = \"test\""),
        ("invalid_quotes.toml", "[core]\nstore_path = \"unclosed string"),
        ("negative_compression.toml", "[core]\ncompression_level = -1"),
        ("huge_compression.toml", "[core]\ncompression_level = 999"),
        ("string_compression.toml", "[core]\ncompression_level = \"high\""),
        ("array_store_path.toml", "[core]\nstore_path = [\"a\", \"b\"]"),
        ("empty_store_path.toml", "[core]\nstore_path = \"\""),
        ("string_bool.toml", "[tracking]\nfollow_symlinks = \"yes\""),
    ];

    for (filename, content) in malformed_configs {
        let config_path = dir.path().join(filename);
        fs::write(&config_path, content)?;

        assert!(Config::load(&config_path).is_err(), "{filename} should be rejected");
        // A rejected file is left as the user wrote it
        assert_eq!(fs::read_to_string(&config_path)?, content);
    }
    Ok(())
}

#[test]
fn test_partial_configs_fill_defaults() -> Result<()> {
    let dir = tempdir()?;
    let defaults = Config::default();

    for (filename, content) in [
        ("empty.toml", ""),
        ("only_tracking.toml", "[tracking]\nfollow_symlinks = true"),
        ("only_output.toml", "[output]\nrelative_paths = false"),
    ] {
        let config_path = dir.path().join(filename);
        fs::write(&config_path, content)?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.core, defaults.core, "{filename}");
    }
    Ok(())
}

#[test]
fn test_missing_config_is_created() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("nested/dir/config.toml");

    let config = Config::load(&config_path)?;

    assert!(config_path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load(&config_path)?, config);
    Ok(())
}

#[test]
fn test_unicode_store_path_round_trips() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.set("core.store_path", "/srv/снимки/スナップ 🗂")?;
    config.save(&config_path)?;

    let loaded = Config::load(&config_path)?;
    assert_eq!(
        loaded.get("core.store_path").as_deref(),
        Some("/srv/снимки/スナップ 🗂")
    );
    Ok(())
}

#[test]
fn test_compression_level_limits() -> Result<()> {
    let mut config = Config::default();

    for valid in ["1", "22", "3"] {
        config.set("core.compression_level", valid)?;
        assert_eq!(config.get("core.compression_level").as_deref(), Some(valid));
    }
    for invalid in ["0", "23", "-5", "fast", ""] {
        assert!(config.set("core.compression_level", invalid).is_err(), "{invalid}");
    }
    assert_eq!(config.core.compression_level, 3);
    Ok(())
}

#[test]
fn test_every_key_can_be_read_and_reset() -> Result<()> {
    let defaults = Config::default();
    let mut config = Config::default();
    config.set("tracking.follow_symlinks", "true")?;
    config.set("output.relative_paths", "false")?;
    config.set("core.compression_level", "9")?;

    for key in KEYS {
        assert!(config.get(key).is_some(), "{key}");
        config.unset(key)?;
        assert_eq!(config.get(key), defaults.get(key), "{key}");
    }

    assert!(config.get("core.nope").is_none());
    assert!(config.set("nodot", "1").is_err());
    assert!(config.unset("tracking.nope").is_err());
    Ok(())
}

#[test]
fn test_tilde_store_path_expands_on_load() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[core]\nstore_path = \"~/.local/share/dirtrack\"")?;

    let config = Config::load(&config_path)?;

    let home = dirs::home_dir().expect("home directory");
    assert!(!config.core.store_path.starts_with("~"));
    assert_eq!(config.core.store_path, home.join(".local/share/dirtrack"));
    Ok(())
}

#[test]
fn test_bare_tilde_store_path_is_home() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[core]\nstore_path = \"~\"")?;

    let config = Config::load(&config_path)?;

    assert_eq!(Some(config.core.store_path), dirs::home_dir());
    Ok(())
}
