//! # Document Provider Host Daemon
//!
//! Main entry point for the provider host.

use log::{error, info};
use providerd::{ConfigLoader, HostRuntime, ProviderConfig};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

/// Command line options; each one overrides the configuration file
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    root_id: Option<String>,
    root_alias: Option<String>,
    title: Option<String>,
    script: Option<PathBuf>,
}

fn main() {
    // Replies go to stdout, so logs stay on stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let config = build_config(&options).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    info!(
        "starting provider for root {} at {}",
        config.root_id,
        config.base_dir.display()
    );

    let mut runtime = HostRuntime::new(&config).unwrap_or_else(|e| {
        error!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let result = match &options.script {
        Some(path) => match File::open(path) {
            Ok(file) => runtime.run(BufReader::new(file), io::stdout().lock()),
            Err(e) => {
                error!("Failed to open script {}: {}", path.display(), e);
                runtime.shutdown();
                process::exit(1);
            }
        },
        None => runtime.run(io::stdin().lock(), io::stdout().lock()),
    };

    runtime.shutdown();
    info!("executed {} command(s)", runtime.executed());

    if let Err(e) = result {
        error!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            "--config" | "-c" | "--base-dir" | "--root-id" | "--alias" | "--title"
            | "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err(format!("Missing value for {}", flag));
                }
                let value = args[i].clone();
                match flag {
                    "--config" | "-c" => options.config = Some(PathBuf::from(value)),
                    "--base-dir" => options.base_dir = Some(PathBuf::from(value)),
                    "--root-id" => options.root_id = Some(value),
                    "--alias" => options.root_alias = Some(value),
                    "--title" => options.title = Some(value),
                    _ => options.script = Some(PathBuf::from(value)),
                }
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    if options.config.is_none() && (options.base_dir.is_none() || options.root_id.is_none()) {
        return Err("Either --config or both --base-dir and --root-id are required".to_string());
    }

    Ok(options)
}

fn build_config(options: &CliOptions) -> Result<ProviderConfig, String> {
    let mut config = match &options.config {
        Some(path) => ConfigLoader::load_from_path(path).map_err(|e| e.to_string())?,
        None => match (&options.base_dir, &options.root_id) {
            (Some(base_dir), Some(root_id)) => ProviderConfig::new(base_dir, root_id.as_str()),
            _ => return Err("Missing --base-dir or --root-id".to_string()),
        },
    };

    if let Some(base_dir) = &options.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(root_id) = &options.root_id {
        config.root_id = root_id.clone();
    }
    if let Some(alias) = &options.root_alias {
        config.root_alias = alias.clone();
    }
    if let Some(title) = &options.title {
        config.title = Some(title.clone());
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      Provider configuration (JSON)");
    eprintln!("  --base-dir <DIR>         Directory exposed as the tree");
    eprintln!("  --root-id <ID>           Root token of the tree");
    eprintln!("  --alias <NAME>           Display name of the root directory");
    eprintln!("  --title <TITLE>          Title shown for the root");
    eprintln!("  -s, --script <FILE>      Read commands from a file instead of stdin");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --config demos/provider.json", program);
    eprintln!(
        "  {} --base-dir /tmp/proxy --root-id com.example.files --script demos/tour.cmds",
        program
    );
}
