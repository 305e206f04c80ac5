//! Print the inspection view of one AAS document as JSON.
//!
//! By default the richer equipment-info projection (identity, capabilities,
//! properties, operations) is printed; `--descriptor` prints the compact
//! equipment descriptor the matching path consumes instead. `--package`
//! unpacks an AASX container before extraction.

use anyhow::{Context, Result, bail};
use capmatch::{asset, equipment_info, package};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

struct Cli {
    input: PathBuf,
    descriptor: bool,
    packaged: bool,
    pretty: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut input = None;
        let mut descriptor = false;
        let mut packaged = false;
        let mut pretty = false;

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--descriptor" | "-d" => descriptor = true,
                "--package" | "-p" => packaged = true,
                "--pretty" => pretty = true,
                "--help" | "-h" => usage(0),
                other if other.starts_with('-') => bail!("unknown argument '{other}' (see --help)"),
                other => {
                    if input.replace(PathBuf::from(other)).is_some() {
                        bail!("expected exactly one input file");
                    }
                }
            }
        }

        let Some(input) = input else { usage(1) };
        Ok(Self {
            input,
            descriptor,
            packaged,
            pretty,
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: asset-info [--descriptor] [--package] [--pretty] <file>\n\nPrints the equipment-info projection of an AAS document as JSON.\n\nOptions:\n  --descriptor, -d  Print the matching-path equipment descriptor instead.\n  --package, -p     Treat the input as a packaged AASX container.\n  --pretty          Indent the JSON output."
    );
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;

    let document = if cli.packaged {
        let bytes =
            fs::read(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
        package::unpack(&bytes)
            .with_context(|| format!("unpacking {}", cli.input.display()))?
            .document
    } else {
        fs::read_to_string(&cli.input)
            .with_context(|| format!("reading {}", cli.input.display()))?
    };

    let rendered = if cli.descriptor {
        let descriptor = asset::extract_descriptor(&document)
            .with_context(|| format!("extracting capabilities from {}", cli.input.display()))?;
        render(&descriptor, cli.pretty)?
    } else {
        let info = equipment_info::project_equipment_info(&document)
            .with_context(|| format!("projecting {}", cli.input.display()))?;
        render(&info, cli.pretty)?
    };
    println!("{rendered}");
    Ok(())
}

fn render<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
