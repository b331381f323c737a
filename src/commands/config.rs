use crate::TrackerContext;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// Execute config command to get/set configuration values
///
/// # Errors
///
/// Returns an error if:
/// - Failed to set or unset configuration value
/// - Failed to save configuration
pub fn execute<W: Write>(
    ctx: &mut TrackerContext,
    key: Option<&str>,
    value: Option<&str>,
    unset: bool,
    list: bool,
    out: &mut W,
) -> Result<()> {
    let Some(key) = key.filter(|_| !list) else {
        return show_all_config(ctx, out);
    };

    if unset {
        ctx.config.unset(key)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Unset {key}"));
    } else if let Some(val) = value {
        ctx.config.set(key, val)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Set {key} = {val}"));
    } else if let Some(val) = ctx.config.get(key) {
        writeln!(out, "{val}")?;
    } else {
        output::warning(&format!("Unknown configuration key '{key}'"));
    }

    Ok(())
}

/// Show all configuration values grouped by section
fn show_all_config<W: Write>(ctx: &TrackerContext, out: &mut W) -> Result<()> {
    let mut current_section = "";

    for (key, value) in ctx.config.entries() {
        let Some((section, name)) = key.split_once('.') else {
            continue;
        };
        if section != current_section {
            if !current_section.is_empty() {
                writeln!(out)?;
            }
            writeln!(out, "{}", format!("[{section}]").bold())?;
            current_section = section;
        }
        writeln!(out, "  {name} = {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> TrackerContext {
        TrackerContext::new_explicit(temp.path().join("store"), temp.path().join("config.toml"))
            .unwrap()
    }

    #[test]
    fn test_set_persists() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);

        execute(&mut ctx, Some("tracking.follow_symlinks"), Some("true"), false, false, &mut Vec::new())
            .unwrap();

        let saved = Config::load(&ctx.config_path).unwrap();
        assert!(saved.tracking.follow_symlinks);
    }

    #[test]
    fn test_get_prints_value() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);
        let mut out = Vec::new();

        execute(&mut ctx, Some("core.compression_level"), None, false, false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "3\n");
    }

    #[test]
    fn test_list_shows_sections() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);
        let mut out = Vec::new();

        execute(&mut ctx, None, None, false, true, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[core]"));
        assert!(text.contains("  compression_level = 3"));
        assert!(text.contains("[output]"));
        assert!(text.contains("  relative_paths = true"));
    }

    #[test]
    fn test_invalid_value_not_saved() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);

        let result = execute(
            &mut ctx,
            Some("core.compression_level"),
            Some("99"),
            false,
            false,
            &mut Vec::new(),
        );

        assert!(result.is_err());
        assert_eq!(Config::load(&ctx.config_path).unwrap().core.compression_level, 3);
    }
}
