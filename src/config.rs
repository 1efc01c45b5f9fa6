use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dialects: DialectConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_flag")]
    pub flag: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            flag: default_flag(),
        }
    }
}

fn default_program() -> String {
    "/bin/sh".into()
}

fn default_flag() -> String {
    "-c".into()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    /// Append a record of every invocation to `path`.
    #[serde(default)]
    pub execution_log: bool,
    /// Execution log location; `~` is expanded.
    #[serde(default)]
    pub path: String,
}

/// Command names mapped to non-default dialects.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct DialectConfig {
    #[serde(default)]
    pub fabric: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    shell: ShellOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
    #[serde(default)]
    dialects: DialectsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct ShellOverlay {
    program: Option<String>,
    flag: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    execution_log: Option<bool>,
    path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct DialectsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    fabric: Vec<String>,
    #[serde(default)]
    remove_fabric: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/clom/config.toml (if exists)
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/clom/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/clom/config.toml");
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.shell;
        if let Some(v) = s.program {
            self.shell.program = v;
        }
        if let Some(v) = s.flag {
            self.shell.flag = v;
        }

        let l = overlay.logging;
        if let Some(v) = l.execution_log {
            self.logging.execution_log = v;
        }
        if let Some(v) = l.path {
            self.logging.path = v;
        }

        let d = overlay.dialects;
        merge_list(
            &mut self.dialects.fabric,
            d.fabric,
            &d.remove_fabric,
            d.replace,
        );
    }

    /// The merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
