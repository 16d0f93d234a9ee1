use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::category::Category;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Auto,
    Architecture,
    Business,
    Payment,
}

impl ThemeChoice {
    /// The forced category, or `None` to detect one per diagram.
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Auto => None,
            Self::Architecture => Some(Category::Architecture),
            Self::Business => Some(Category::Business),
            Self::Payment => Some(Category::Payment),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Architecture => "architecture",
            Self::Business => "business",
            Self::Payment => "payment",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub dry_run: bool,
    pub check: bool,
    pub kind_aware: bool,
    pub perf: bool,
    pub verbose: bool,
    pub theme: Option<ThemeChoice>,
    pub docs_dir: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            dry_run: self.dry_run || other.dry_run,
            check: self.check || other.check,
            kind_aware: self.kind_aware || other.kind_aware,
            perf: self.perf || other.perf,
            verbose: self.verbose || other.verbose,
            theme: other.theme.or(self.theme),
            docs_dir: other.docs_dir.clone().or_else(|| self.docs_dir.clone()),
        }
    }

    /// `--check` never writes.
    pub const fn writes(&self) -> bool {
        !(self.dry_run || self.check)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mermaid-restyle").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mermaid-restyle")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mermaid-restyle").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("mermaid-restyle")
                .join("config");
        }
    }

    PathBuf::from(".restylerc")
}

pub fn local_override_path(root: &Path) -> PathBuf {
    root.join(".restylerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// `--docs-dir=<dir>` lines are one token so the path may contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    if line.starts_with("--docs-dir=") {
        return vec![line.to_string()];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# mermaid-restyle defaults (saved with --save)".to_string()];
    for (enabled, flag) in [
        (flags.dry_run, "--dry-run"),
        (flags.check, "--check"),
        (flags.kind_aware, "--kind-aware"),
        (flags.perf, "--perf"),
        (flags.verbose, "--verbose"),
    ] {
        if enabled {
            lines.push(flag.to_string());
        }
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(dir) = &flags.docs_dir {
        lines.push(format!("--docs-dir={}", dir.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens; unknown tokens and positionals are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--dry-run" => flags.dry_run = true,
            "--check" => flags.check = true,
            "--kind-aware" => flags.kind_aware = true,
            "--perf" => flags.perf = true,
            "--verbose" | "-v" => flags.verbose = true,
            "--theme" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.theme = parse_theme(next);
                    i += 1;
                }
            }
            "--docs-dir" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.docs_dir = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--theme=") {
                    flags.theme = parse_theme(value);
                } else if let Some(value) = token.strip_prefix("--docs-dir=") {
                    flags.docs_dir = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeChoice> {
    if s == "auto" {
        return Some(ThemeChoice::Auto);
    }
    Category::parse(s).map(|category| match category {
        Category::Architecture => ThemeChoice::Architecture,
        Category::Business => ThemeChoice::Business,
        Category::Payment => ThemeChoice::Payment,
    })
}
