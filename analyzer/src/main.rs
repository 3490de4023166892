use std::path::{Path, PathBuf};
use std::process;

use clap::{crate_version, App, AppSettings, Arg};
use walkdir::WalkDir;

use gifmeta::{sidecar, FileMetadata};

fn main() {
    env_logger::init();

    let matches = App::new("gifmeta analyzer")
        .version(crate_version!())
        .about("Displays structural metadata of GIF files.")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("PATH")
                .required(true)
                .help("GIF file, or directory to scan recursively"),
        )
        .arg(
            Arg::with_name("save")
                .long("save")
                .value_name("FILE")
                .help("Append each record to this text file"),
        )
        .get_matches();

    let path = Path::new(matches.value_of("PATH").unwrap());
    let save = matches.value_of("save");

    let mut failures = 0;
    for file in discover(path) {
        match FileMetadata::load_from_file(&file) {
            Ok(md) => {
                println!("{}:", file.display());
                let fields = md.fields();
                for (name, value) in &fields {
                    println!("  {}: {}", name, value);
                }
                if let Some(out) = save {
                    if let Err(e) = sidecar::append(out, &fields) {
                        eprintln!("cannot save record to {}: {}", out, e);
                        failures += 1;
                    }
                }
            }
            Err(e) => {
                eprintln!("cannot load metadata from {}: {}", file.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}

/// A single file is taken as-is; a directory is walked recursively, keeping
/// files with a `.gif` extension regardless of case.
fn discover(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_gif(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("gif"))
}
