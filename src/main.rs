//! Stackflow CLI
//!
//! Entry point for the `stackflow` command-line tool.

use clap::{Parser, Subcommand};
use stackflow::{AppConfig, ConfigLocator, Profile, RemoteEnv};
use stackflow_resolve::ProcessEnv;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "Deployment profile resolution for Compose stacks", version)]
struct Cli {
    /// Path to the stackflow config file
    /// (default: compose/stackflow.yml, or STACKFLOW_CONFIG_FILE)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Project name used in profile naming (default: working directory name)
    #[arg(long, short = 'p', global = true)]
    project_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or write merged deployment profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Show the loaded stackflow config
    Config {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show process-environment assignments for a deployment target
    Env {
        /// Target environment name
        #[arg(long, short = 'e')]
        environment: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Print the merged, rendered profile
    Show {
        /// Target environment name
        #[arg(long, short = 'e')]
        environment: String,

        /// Print per-path source attribution instead of the profile body
        #[arg(long)]
        sources: bool,

        /// Skip `${NAME}` rendering and print the raw merged document
        #[arg(long)]
        raw: bool,
    },

    /// Write the rendered profile file
    Write {
        /// Target environment name
        #[arg(long, short = 'e')]
        environment: String,

        /// Output directory (default: .stackflow/profiles)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let locator = match &cli.config {
        Some(path) => ConfigLocator::from_path(path),
        None => ConfigLocator::from_env(),
    };
    let project_name = cli.project_name.clone().unwrap_or_else(default_project_name);

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileCommands::Show {
                environment,
                sources,
                raw,
            } => {
                run_profile_show(&locator, &project_name, &environment, sources, raw);
            }
            ProfileCommands::Write { environment, out } => {
                run_profile_write(&locator, &project_name, &environment, out);
            }
        },
        Commands::Config { json } => {
            run_config_show(&locator, json);
        }
        Commands::Env { environment, json } => {
            run_env_show(&locator, &environment, json);
        }
    }
}

fn run_profile_show(
    locator: &ConfigLocator,
    project_name: &str,
    environment: &str,
    sources: bool,
    raw: bool,
) {
    let config = load_config(locator);
    let profile = assemble_profile(&config, project_name, environment);

    if sources {
        for (path, source) in profile.provenance_rows() {
            println!("{}  {}", path, source);
        }
        return;
    }

    let output = if raw {
        profile.to_yaml()
    } else {
        profile.rendered(&ProcessEnv)
    };

    match output {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error rendering profile: {}", e);
            process::exit(1);
        }
    }
}

fn run_profile_write(
    locator: &ConfigLocator,
    project_name: &str,
    environment: &str,
    out: Option<PathBuf>,
) {
    let config = load_config(locator);
    let profile = assemble_profile(&config, project_name, environment);
    let dir = out.unwrap_or_else(|| PathBuf::from(".stackflow/profiles"));

    match profile.write(&dir, &ProcessEnv) {
        Ok(path) => println!("Wrote profile: {}", path.display()),
        Err(e) => {
            eprintln!("Error writing profile: {}", e);
            process::exit(1);
        }
    }
}

fn run_config_show(locator: &ConfigLocator, json: bool) {
    let config = load_config(locator);

    if json {
        match serde_json::to_string_pretty(&config) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Configuration valid: {}", locator.path().display());
    println!();
    if !config.profiles.is_empty() {
        println!("  Profiles:");
        for (name, files) in &config.profiles {
            println!("    {} ({} files)", name, files.len());
        }
    }
    if !config.remotes.is_empty() {
        println!("  Remotes:");
        for (name, remote) in &config.remotes {
            match &remote.docker_host {
                Some(host) => println!("    {} -> {}", name, host),
                None => println!("    {} (no docker_host)", name),
            }
        }
    }
}

fn run_env_show(locator: &ConfigLocator, environment: &str, json: bool) {
    let config = load_config(locator);
    let remote_env = RemoteEnv::for_environment(&config, environment);

    if json {
        let assignments: serde_json::Map<String, serde_json::Value> = remote_env
            .assignments
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
            .collect();
        let out = serde_json::json!({
            "environment": environment,
            "assignments": assignments,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if remote_env.is_empty() {
        println!("No remote configured for environment '{}'.", environment);
        return;
    }
    for (key, value) in &remote_env.assignments {
        println!("{}={}", key, value);
    }
}

fn load_config(locator: &ConfigLocator) -> AppConfig {
    match AppConfig::load(locator) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: config file not found: {}", locator.path().display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

fn assemble_profile(config: &AppConfig, project_name: &str, environment: &str) -> Profile {
    let files = match config.profile_files(environment) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match Profile::assemble(environment, project_name, files) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error assembling profile: {}", e);
            process::exit(1);
        }
    }
}

fn default_project_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().to_string()))
        .unwrap_or_else(|| "project".to_string())
}
