use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::calendar;
use crate::domain::Profile;

/// Save hook the edit path signals after every accepted value change.
pub trait ProfileStore {
    fn save_profile(&mut self, profile: &Profile) -> Result<(), String>;
}

/// All profiles live in one JSON file; saving a profile upserts it into the
/// roster by name and rewrites the file atomically.
pub struct JsonProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl JsonProfileStore {
    pub fn open(path: PathBuf) -> Self {
        let profiles = load_profiles(&path);
        Self { path, profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn profile_at(&self, index: usize) -> Option<Profile> {
        self.profiles.get(index).cloned()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }
}

impl ProfileStore for JsonProfileStore {
    fn save_profile(&mut self, profile: &Profile) -> Result<(), String> {
        match self.position(&profile.name) {
            Some(i) => self.profiles[i] = profile.clone(),
            None => self.profiles.push(profile.clone()),
        }
        save_profiles(&self.path, &self.profiles)
    }
}

pub fn load_profiles(path: &Path) -> Vec<Profile> {
    if !path.exists() {
        return vec![default_profile()];
    }

    match read_json::<Vec<Profile>>(path) {
        Ok(profiles) if profiles.is_empty() => vec![default_profile()],
        Ok(profiles) => profiles,
        Err(e) => {
            eprintln!("Warning: Could not read profiles file: {}", e);
            vec![default_profile()]
        }
    }
}

pub fn save_profiles(path: &Path, profiles: &[Profile]) -> Result<(), String> {
    write_json_atomic(path, &profiles)
}

pub fn serialize_profile(profile: &Profile) -> Result<String, String> {
    serde_json::to_string_pretty(profile).map_err(|e| e.to_string())
}

/// A fresh roster starts with one profile beginning on this week's Monday.
fn default_profile() -> Profile {
    let monday = calendar::week_start(Local::now().date_naive());
    Profile::new("default", monday)
}

pub fn get_data_dir() -> PathBuf {
    let local_profiles = Path::new("./profiles.json");
    if local_profiles.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "cadence", "cadence") {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_profiles_path() -> PathBuf {
    get_data_dir().join("profiles.json")
}

pub fn get_export_path(profile_name: &str) -> PathBuf {
    get_data_dir().join(format!("{}.export.json", profile_name))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    atomic_write(path, &json)
}

pub fn write_text_file(path: &Path, content: &str) -> Result<(), String> {
    atomic_write(path, content)
}

pub fn create_backup(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| e.to_string())?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| e.to_string())?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        while backups.len() > 10 {
            if let Some(oldest) = backups.first() {
                let _ = fs::remove_file(oldest.path());
                backups.remove(0);
            }
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| e.to_string())?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;
    tmp_file.sync_all().map_err(|e| e.to_string())?;
    fs::rename(&tmp_path, path).map_err(|e| e.to_string())?;
    Ok(())
}
