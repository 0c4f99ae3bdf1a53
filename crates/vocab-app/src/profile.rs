use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vocab_config::Config;

pub const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Where profile configs and profile data live
pub struct ProfileDirs {
    config_root: PathBuf,
    data_root: PathBuf,
}

impl ProfileDirs {
    /// Platform config and data dirs, e.g. `~/.config/vocab` and `~/.local/share/vocab`
    pub fn from_platform() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("dev", "vocab", "vocab")
            .context("Cannot resolve platform config directories")?;

        Ok(Self::new(dirs.config_dir(), dirs.data_local_dir()))
    }

    pub fn new(config_root: impl Into<PathBuf>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
            data_root: data_root.into(),
        }
    }

    fn profiles_dir(&self) -> PathBuf {
        self.config_root.join("profiles")
    }

    fn profile_file(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Initialize user config folders and main profile if missing
    pub fn init_user_config(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir()).with_context(|| {
            format!("Creating profiles directory {}", self.profiles_dir().display())
        })?;

        let main_profile = self.profile_file(MAIN_PROFILE);
        if !main_profile.exists() {
            write_profile(&main_profile, MAIN_PROFILE, &Config::default())?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a user profile by name. A missing profile is created from main.
    /// Environment overrides are applied on top.
    pub fn load_user_profile(&self, name: &str) -> anyhow::Result<Config> {
        validate_name(name)?;

        let profile_file = self.profile_file(name);
        let mut config = if profile_file.exists() {
            read_profile(&profile_file)?
        } else {
            tracing::warn!("Profile {name} not found, creating it from the main profile");
            self.add_profile_from_default(name)?;
            read_profile(&profile_file)?
        };

        config.apply_env();
        Ok(config)
    }

    /// Add a new profile cloned from main (or defaults if main is missing)
    pub fn add_profile_from_default(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        validate_name(new_name)?;

        let main_file = self.profile_file(MAIN_PROFILE);
        let base = if main_file.exists() {
            read_profile(&main_file)?
        } else {
            Config::default()
        };

        fs::create_dir_all(self.profiles_dir())?;
        let file = self.profile_file(new_name);
        write_profile(&file, new_name, &base)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }

    /// Directory holding the profile's history, bookmarks and theme
    pub fn data_dir(&self, name: &str, config: &Config) -> PathBuf {
        match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => self.data_root.join("profiles").join(name),
        }
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Reading profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Parsing profile {}", path.display()))?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, config: &Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value: config.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)
        .with_context(|| format!("Writing profile {}", path.display()))?;
    Ok(())
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        anyhow::bail!("Invalid profile name '{name}': use letters, digits, '-' or '_'");
    }
    Ok(())
}
