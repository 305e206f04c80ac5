//! Match a BatchML recipe's required capabilities against candidate
//! equipment descriptions.
//!
//! Candidates can be standalone AAS documents (`--asset`), zip archives of
//! such documents (`--archive`), or packaged AASX containers (`--package`),
//! in any combination. The JSON match report goes to stdout; diagnostics go
//! to stderr with a non-zero exit on parse or container failures.

use anyhow::{Context, Result, bail};
use capmatch::{Candidate, asset, matching, package, recipe};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

struct Cli {
    recipe: PathBuf,
    assets: Vec<PathBuf>,
    archives: Vec<PathBuf>,
    packages: Vec<PathBuf>,
    pretty: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut recipe = None;
        let mut assets = Vec::new();
        let mut archives = Vec::new();
        let mut packages = Vec::new();
        let mut pretty = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--recipe" | "-r" => {
                    recipe = Some(PathBuf::from(required_value(&mut args, "--recipe")?));
                }
                "--asset" | "-a" => {
                    assets.push(PathBuf::from(required_value(&mut args, "--asset")?));
                }
                "--archive" => {
                    archives.push(PathBuf::from(required_value(&mut args, "--archive")?));
                }
                "--package" | "-p" => {
                    packages.push(PathBuf::from(required_value(&mut args, "--package")?));
                }
                "--pretty" => pretty = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument '{other}' (see --help)"),
            }
        }

        let Some(recipe) = recipe else { usage(1) };
        if assets.is_empty() && archives.is_empty() && packages.is_empty() {
            bail!("no candidate equipment given; pass --asset, --archive, or --package");
        }
        Ok(Self {
            recipe,
            assets,
            archives,
            packages,
            pretty,
        })
    }
}

fn required_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: capmatch --recipe <recipe.xml> [--asset <aas.xml>]... [--archive <aas.zip>]... [--package <file.aasx>]... [--pretty]\n\nMatches the capabilities a recipe requires against the capabilities the\ngiven equipment descriptions offer and prints the JSON match report.\n\nExamples:\n  capmatch --recipe grecipe.xml --asset filler.xml --asset sealer.xml\n  capmatch --recipe grecipe.xml --archive plant.zip --package filler.aasx --pretty"
    );
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;

    let recipe_xml = fs::read_to_string(&cli.recipe)
        .with_context(|| format!("reading recipe {}", cli.recipe.display()))?;
    let requirements = recipe::extract_requirements(&recipe_xml)
        .with_context(|| format!("extracting requirements from {}", cli.recipe.display()))?;

    let mut candidates = Vec::new();
    for path in &cli.assets {
        let xml =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let descriptor = asset::extract_descriptor(&xml)
            .with_context(|| format!("extracting capabilities from {}", path.display()))?;
        candidates.push(Candidate {
            label: display_label(path),
            descriptor,
        });
    }
    for path in &cli.archives {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let members = package::read_archive(&bytes)
            .with_context(|| format!("reading archive {}", path.display()))?;
        for (member, content) in members {
            let xml = String::from_utf8(content)
                .with_context(|| format!("'{member}' in {} is not UTF-8", path.display()))?;
            let descriptor = asset::extract_descriptor(&xml)
                .with_context(|| format!("extracting capabilities from '{member}'"))?;
            candidates.push(Candidate {
                label: member,
                descriptor,
            });
        }
    }
    for path in &cli.packages {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let descriptor = package::extract_packaged_descriptor(&bytes)
            .with_context(|| format!("unpacking {}", path.display()))?;
        candidates.push(Candidate {
            label: display_label(path),
            descriptor,
        });
    }

    let report = matching::match_requirements(&requirements.iris(), &candidates);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");
    Ok(())
}

fn display_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
