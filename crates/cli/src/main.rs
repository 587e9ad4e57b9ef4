use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rnalayout_core::{LayoutOptions, LayoutResult, Rotation, SecStruct};

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Json,
    Tsv,
    Summary,
}

/// RNA secondary structure 2D layout
#[derive(Parser)]
#[command(name = "rnalayout", version)]
struct Cli {
    /// Dot-bracket structure notation
    #[arg(short, long)]
    structure: String,

    /// RNA sequence (e.g. GGGAAACCC), `&` marks a strand cut
    #[arg(short = 'q', long)]
    sequence: Option<String>,

    /// Also pair `{}`, `[]` and `<>` brackets (pseudoknots are not drawn)
    #[arg(short, long)]
    pseudoknots: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Distance between consecutive unpaired bases or stacked pairs
    #[arg(long, default_value_t = 45.0, value_parser = parse_spacing)]
    primary_space: f64,

    /// Distance between the two bases of a pair
    #[arg(long, default_value_t = 45.0, value_parser = parse_spacing)]
    pair_space: f64,

    /// Run the backbone counterclockwise around loops
    #[arg(long)]
    counterclockwise: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_spacing(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("spacing must be positive, got {v}"))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let opts = LayoutOptions {
        primary_space: cli.primary_space,
        pair_space: cli.pair_space,
        rotation: if cli.counterclockwise {
            Rotation::Counterclockwise
        } else {
            Rotation::Clockwise
        },
    };
    log::debug!("layout options: {opts:?}");

    let output = match cli.format {
        Format::Summary => summary(&cli.structure, cli.pseudoknots),
        Format::Json | Format::Tsv => rnalayout_core::layout_structure(
            &cli.structure,
            cli.sequence.as_deref(),
            cli.pseudoknots,
            &opts,
        )
        .map(|r| match cli.format {
            Format::Tsv => tsv(&r),
            _ => serde_json::to_string(&r).unwrap_or_default(),
        }),
    };

    let output = match output {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if let Some(path) = cli.output {
        if let Err(e) = std::fs::write(&path, &output) {
            eprintln!("error: failed to write {}: {e}", path.display());
            process::exit(1);
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = handle.write_all(output.as_bytes()) {
            eprintln!("error: write failed: {e}");
            process::exit(1);
        }
    }
}

/// One line per base: index, base, partner, x, y.
fn tsv(r: &LayoutResult) -> String {
    let bases: Vec<char> = r.sequence.as_deref().unwrap_or("").chars().collect();
    let mut out = String::from("index\tbase\tpartner\tx\ty\n");
    for (i, (x, y)) in r.coords.x.iter().zip(&r.coords.y).enumerate() {
        let base = bases.get(i).copied().unwrap_or('N');
        let _ = writeln!(out, "{i}\t{base}\t{}\t{x:.4}\t{y:.4}", r.pairs[i]);
    }
    out
}

fn summary(structure: &str, pseudoknots: bool) -> rnalayout_core::Result<String> {
    let ss = SecStruct::from_dot_bracket(structure, pseudoknots)?;
    let nested = ss.filter_for_pseudoknots()?;
    let knots = ss.only_pseudoknots()?;

    let mut out = String::new();
    let _ = writeln!(out, "structure\t{}", ss.to_pseudoknot_dot_bracket()?);
    let _ = writeln!(out, "length\t{}", ss.len());
    let _ = writeln!(out, "pairs\t{}", ss.num_pairs());
    let _ = writeln!(out, "pseudoknot_pairs\t{}", knots.num_pairs());
    let _ = writeln!(out, "nested\t{nested}");
    let _ = writeln!(out, "longest_stack\t{}", ss.longest_stack_length());
    for (k, stem) in ss.stems().iter().enumerate() {
        let bps: Vec<String> = stem.iter().map(|(i, j)| format!("{i}-{j}")).collect();
        let _ = writeln!(out, "stem{k}\t{}", bps.join(","));
    }
    Ok(out)
}
