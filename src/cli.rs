use std::{io, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};

use crate::{calendar, domain::Profile, storage};

#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Calendar-aligned productivity bar chart", long_about = None)]
pub enum Cli {
    #[command(about = "List saved profiles")]
    Profiles,

    #[command(about = "Create a new profile")]
    New {
        #[arg(help = "Profile name")]
        name: String,

        #[arg(
            long,
            help = "First tracked day (YYYY-MM-DD, defaults to this week's Monday)"
        )]
        start: Option<NaiveDate>,
    },

    #[command(about = "Print or write a profile as JSON")]
    Export {
        #[arg(help = "Profile name (defaults to the first profile)")]
        profile: Option<String>,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

pub fn run(cli: Cli) -> Result<(), String> {
    match cli {
        Cli::Profiles => list_profiles(),
        Cli::New { name, start } => new_profile(name, start),
        Cli::Export { profile, out } => export_profile(profile, out),
        Cli::Completions { shell } => completions(&shell),
    }
}

fn list_profiles() -> Result<(), String> {
    let profiles = storage::load_profiles(&storage::get_profiles_path());
    for profile in &profiles {
        let tracked = profile.values.iter().filter(|v| v.is_some()).count();
        println!(
            "{:20} from {}  {} days, {} tracked",
            profile.name,
            profile.start_date,
            profile.values.len(),
            tracked
        );
    }
    Ok(())
}

fn new_profile(name: String, start: Option<NaiveDate>) -> Result<(), String> {
    let path = storage::get_profiles_path();
    let mut profiles = storage::load_profiles(&path);

    if profiles.iter().any(|p| p.name == name) {
        return Err(format!("Profile '{}' already exists", name));
    }

    let start = start.unwrap_or_else(|| calendar::week_start(Local::now().date_naive()));
    profiles.push(Profile::new(name.clone(), start));
    storage::save_profiles(&path, &profiles)?;

    println!("Created profile '{}' starting {}", name, start);
    Ok(())
}

fn export_profile(name: Option<String>, out: Option<PathBuf>) -> Result<(), String> {
    let profiles = storage::load_profiles(&storage::get_profiles_path());
    let profile = match name {
        Some(name) => profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| format!("Profile '{}' not found", name))?,
        None => profiles
            .first()
            .ok_or_else(|| "No profiles to export".to_string())?,
    };

    let json = storage::serialize_profile(profile)?;
    if let Some(path) = out {
        storage::write_text_file(&path, &json)?;
        println!("Exported to {}", path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn completions(shell: &str) -> Result<(), String> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        "bash" => generate(shells::Bash, &mut cmd, name, &mut io::stdout()),
        "zsh" => generate(shells::Zsh, &mut cmd, name, &mut io::stdout()),
        "fish" => generate(shells::Fish, &mut cmd, name, &mut io::stdout()),
        other => return Err(format!("Unsupported shell: {}", other)),
    }
    Ok(())
}
