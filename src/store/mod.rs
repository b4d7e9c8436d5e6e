//! A directory of UCI config files.
//!
//! Each file in the directory is one config, named after the file. Configs
//! are parsed on first use and cached; mutations stay in memory until
//! [`UciStore::commit`] writes every tainted config back with an atomic
//! replace.
//!
//! The store is single-threaded: every method takes `&mut self` or `&self`
//! and callers serialize access.

mod address;


pub use address::Address;

use crate::error::{Result, UciError};
use crate::fs::atomic_write_file;
use crate::parser;
use crate::tree::{Config, OptionType, Section, UciOption, placeholder_name};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory used when nothing else is configured.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/config";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "UCI_CONFIG_DIR";

/// Values accepted as `true` by [`UciStore::get_bool`].
const TRUE_VALUES: &[&str] = &["1", "on", "true", "yes", "enabled"];

#[derive(Debug)]
pub struct UciStore {
    dir: PathBuf,
    configs: BTreeMap<String, Config>,
}

impl UciStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            configs: BTreeMap::new(),
        }
    }

    /// Use `$UCI_CONFIG_DIR` when set and non-empty, else `/etc/config`.
    pub fn from_env() -> Self {
        let dir = env::var_os(CONFIG_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR), PathBuf::from);
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing config `name`.
    pub fn config_path(&self, name: &str) -> Result<PathBuf> {
        validate_config_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Names of the config files in the directory, sorted.
    pub fn config_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            UciError::io(
                format!("failed to list config directory '{}'", self.dir.display()),
                e,
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                UciError::io(
                    format!("failed to list config directory '{}'", self.dir.display()),
                    e,
                )
            })?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && !name.starts_with('.')
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// A config that has already been loaded, if any.
    pub fn loaded(&self, name: &str) -> Option<&Config> {
        self.configs.get(name)
    }

    /// Load (or return the cached) config `name`.
    ///
    /// A missing file is [`UciError::NotFound`].
    pub fn load_config(&mut self, name: &str) -> Result<&mut Config> {
        let path = self.config_path(name)?;
        match self.configs.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let config = read_config(&path, name)?;
                Ok(entry.insert(config))
            }
        }
    }

    /// Like [`UciStore::load_config`], but starts an empty config when the
    /// file does not exist yet.
    pub fn ensure_config(&mut self, name: &str) -> Result<&mut Config> {
        let path = self.config_path(name)?;
        match self.configs.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let config = match read_config(&path, name) {
                    Err(UciError::NotFound(_)) => {
                        tracing::debug!(config = name, "starting new config");
                        Config::new(name)
                    }
                    other => other?,
                };
                Ok(entry.insert(config))
            }
        }
    }

    /// Values of `config.section.option`. `Ok(None)` when the section or
    /// option does not exist.
    pub fn get(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
    ) -> Result<Option<Vec<String>>> {
        let cfg = self.load_config(config)?;
        Ok(cfg
            .try_get(section)?
            .and_then(|sec| sec.option_values(option))
            .map(<[String]>::to_vec))
    }

    /// Last value of `config.section.option`.
    pub fn get_last(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
    ) -> Result<Option<String>> {
        let cfg = self.load_config(config)?;
        Ok(cfg
            .try_get(section)?
            .and_then(|sec| sec.option_last_value(option))
            .map(str::to_string))
    }

    /// Last value of `config.section.option` read as a boolean.
    pub fn get_bool(&mut self, config: &str, section: &str, option: &str) -> Result<Option<bool>> {
        Ok(self
            .get_last(config, section, option)?
            .map(|value| TRUE_VALUES.contains(&value.to_lowercase().as_str())))
    }

    /// Replace `config.section.option`. The section must exist.
    pub fn set<I, V>(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
        option_type: OptionType,
        values: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let sec = self.section_mut(config, section)?;
        sec.set(option, option_type, values);
        Ok(())
    }

    /// Append `value` to the list `config.section.option` unless already present.
    pub fn add_list(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
        value: &str,
    ) -> Result<()> {
        let sec = self.section_mut(config, section)?;
        if let Some(existing) = sec.get_mut(option) {
            existing.option_type = OptionType::List;
        }
        sec.merge(UciOption::new(option, OptionType::List, [value]));
        Ok(())
    }

    /// Add a section, creating the config when needed. Returns the name the
    /// section can be addressed by: `name`, or the synthetic `@type[index]`.
    ///
    /// Adding a named section that already exists with the same type is a
    /// no-op; with a different type it fails.
    pub fn add_section(
        &mut self,
        config: &str,
        section_type: &str,
        name: Option<&str>,
    ) -> Result<String> {
        if section_type.is_empty() {
            return Err(UciError::UserError("section type cannot be empty".to_string()));
        }
        let cfg = self.ensure_config(config)?;

        let Some(name) = name else {
            let index = cfg.count(section_type);
            cfg.add(Section::new(section_type, ""));
            return Ok(placeholder_name(section_type, index));
        };

        if name.is_empty() || name.starts_with('@') {
            return Err(UciError::UserError(format!("invalid section name '{name}'")));
        }
        if let Some(existing) = cfg.get_named(name) {
            if existing.section_type != section_type {
                return Err(UciError::UserError(format!(
                    "section '{config}.{name}' already exists with type '{}'",
                    existing.section_type
                )));
            }
            return Ok(name.to_string());
        }
        cfg.add(Section::new(section_type, name));
        Ok(name.to_string())
    }

    /// Remove a section by name or selector. Returns whether it existed.
    pub fn del_section(&mut self, config: &str, section: &str) -> Result<bool> {
        Ok(self.load_config(config)?.del(section))
    }

    /// Remove an option. Returns whether it existed.
    pub fn del_option(&mut self, config: &str, section: &str, option: &str) -> Result<bool> {
        let cfg = self.load_config(config)?;
        let exists = cfg
            .try_get(section)?
            .is_some_and(|sec| sec.get(option).is_some());
        if !exists {
            return Ok(false);
        }
        Ok(cfg.get_mut(section).is_some_and(|sec| sec.del(option)))
    }

    /// Write every tainted config back to disk.
    pub fn commit(&mut self) -> Result<()> {
        for (name, config) in self.configs.iter_mut().filter(|(_, c)| c.is_tainted()) {
            let path = self.dir.join(name);
            atomic_write_file(&path, &config.to_string())?;
            config.mark_clean();
            tracing::info!(config = %name, path = %path.display(), "committed config");
        }
        Ok(())
    }

    /// Drop cached changes to `name`; the next access re-reads the file.
    pub fn revert(&mut self, name: &str) -> bool {
        let dropped = self.configs.remove(name).is_some();
        if dropped {
            tracing::debug!(config = name, "reverted config");
        }
        dropped
    }

    fn section_mut(&mut self, config: &str, section: &str) -> Result<&mut Section> {
        self.load_config(config)?
            .try_get_mut(section)?
            .ok_or_else(|| UciError::NotFound(format!("section '{config}.{section}'")))
    }
}

fn validate_config_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(UciError::UserError(format!("invalid config name '{name}'")));
    }
    Ok(())
}

fn read_config(path: &Path, name: &str) -> Result<Config> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(UciError::NotFound(format!("config '{name}'")));
        }
        Err(e) => {
            return Err(UciError::io(
                format!("failed to read config file '{}'", path.display()),
                e,
            ));
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    parser::parse(name, &text)
}
