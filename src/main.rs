use log::{debug, info};
use quilldb::{DecoderOptions, GameData};
use std::env;
use std::fs;
use std::fs::File;
use std::io::prelude::*;

fn usage(program: &str) {
    println!("quill-dump - decode a Quill adventure database from a memory snapshot");
    println!();
    println!("Usage: {} [--toml] [--config options.toml] <image>", program);
    println!();
    println!("Options:");
    println!("  --toml              Export the decoded database as TOML");
    println!("  --config <file>     Read decoder options from a TOML file");
    println!("  -h, --help          Show this help message");
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Dump {
        as_toml: bool,
        config_path: Option<String>,
        image_path: String,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut as_toml = false;
    let mut config_path = None;
    let mut image_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--toml" => as_toml = true,
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => return Err("--config needs a file name".to_string()),
                }
            }
            "-h" | "--help" => return Ok(Command::Help),
            arg if !arg.starts_with('-') => {
                if let Some(first) = &image_path {
                    return Err(format!(
                        "Unexpected argument: {} (already dumping {})",
                        arg, first
                    ));
                }
                image_path = Some(arg.to_string());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    // No image given: print help and exit cleanly
    Ok(match image_path {
        Some(image_path) => Command::Dump {
            as_toml,
            config_path,
            image_path,
        },
        None => Command::Help,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("quill-dump");

    let (as_toml, config_path, image_path) = match parse_args(&args) {
        Ok(Command::Dump {
            as_toml,
            config_path,
            image_path,
        }) => (as_toml, config_path, image_path),
        Ok(Command::Help) => {
            usage(program);
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };

    let options = match config_path {
        Some(path) => {
            debug!("Reading decoder options from {}", path);
            DecoderOptions::from_toml_str(&fs::read_to_string(&path)?)?
        }
        None => DecoderOptions::default(),
    };

    let mut file = match File::open(&image_path) {
        Ok(file) => file,
        Err(e) => {
            match e.kind() {
                std::io::ErrorKind::NotFound => {
                    eprintln!("Error: Image file not found: {}", image_path);
                }
                std::io::ErrorKind::PermissionDenied => {
                    eprintln!("Error: Permission denied reading image: {}", image_path);
                }
                _ => {
                    eprintln!("Error: Cannot open image '{}': {}", image_path, e);
                }
            }
            std::process::exit(1);
        }
    };
    let mut memory = Vec::new();
    file.read_to_end(&mut memory)?;
    debug!("Loaded {} bytes from {}", memory.len(), image_path);

    let data = match GameData::from_image_with(&memory, &options) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}: {}", image_path, e);
            std::process::exit(1);
        }
    };
    info!(
        "Decoded {} locations and {} objects",
        data.locations.len(),
        data.objects.len()
    );

    if as_toml {
        print!("{}", data.to_toml()?);
    } else {
        print!("{}", data);
    }
    Ok(())
}
