use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use permcanon::{
    canonical_labeling, connectivity::orbits, parse_cycles, parse_permutation, CanonicalLabeling,
    Permutation,
};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "permcanon",
    about = "Print the canonical form of a tuple of permutations given in cycle notation."
)]
struct Cli {
    /// Permutations in cycle notation, e.g. "(0,1,2)(3,4)". The first one is the
    /// distinguished generator.
    #[arg(value_name = "PERM", num_args = 2.., required = true)]
    perms: Vec<String>,
    /// Size of the domain. Defaults to the largest point written plus one.
    #[arg(long, short = 'n', value_name = "N")]
    size: Option<usize>,
    /// Only start labelings from these points (may be repeated).
    #[arg(long = "from", value_name = "POINT")]
    candidates: Vec<usize>,
    /// Refuse tuples that do not act transitively, listing their orbits.
    #[arg(long)]
    check_transitive: bool,
    /// Run the labeling trials on all cores.
    #[cfg(feature = "parallel")]
    #[arg(long)]
    parallel: bool,
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let size = match cli.size {
        Some(size) => size,
        None => inferred_size(&cli.perms)?,
    };
    ensure!(size > 0, "the domain must contain at least one point");

    let tuple = cli
        .perms
        .iter()
        .map(|text| {
            parse_permutation(text, size).with_context(|| format!("invalid permutation {text:?}"))
        })
        .collect::<Result<Vec<Permutation>>>()?;

    if cli.check_transitive {
        let orbits = orbits(&tuple, size)?;
        if orbits.len() > 1 {
            bail!(
                "the permutations do not act transitively; orbits: {}",
                orbits
                    .iter()
                    .map(|orbit| format!("{orbit:?}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
    }

    let candidates = (!cli.candidates.is_empty()).then_some(cli.candidates.as_slice());
    let labeling = labeling(&cli, &tuple, candidates)?;
    println!("{labeling}");
    Ok(())
}

#[cfg(feature = "parallel")]
fn labeling(
    cli: &Cli,
    tuple: &[Permutation],
    candidates: Option<&[usize]>,
) -> Result<CanonicalLabeling> {
    let labeling = if cli.parallel {
        permcanon::canonical_labeling_par(tuple, candidates)
    } else {
        canonical_labeling(tuple, candidates)
    };
    labeling.context("canonical labeling failed")
}

#[cfg(not(feature = "parallel"))]
fn labeling(
    _cli: &Cli,
    tuple: &[Permutation],
    candidates: Option<&[usize]>,
) -> Result<CanonicalLabeling> {
    canonical_labeling(tuple, candidates).context("canonical labeling failed")
}

/// Largest domain `--size` may be left out for.
const MAX_INFERRED_SIZE: usize = 1 << 24;

/// Smallest domain containing every point written in `perms`.
fn inferred_size(perms: &[String]) -> Result<usize> {
    let mut size = 0;
    for text in perms {
        let cycles = parse_cycles(text).with_context(|| format!("invalid permutation {text:?}"))?;
        if let Some(&max) = cycles.iter().flatten().max() {
            let needed = max
                .checked_add(1)
                .filter(|&needed| needed <= MAX_INFERRED_SIZE)
                .with_context(|| {
                    format!(
                        "point {max} in {text:?} needs a domain larger than {MAX_INFERRED_SIZE}; \
                         pass --size explicitly"
                    )
                })?;
            size = size.max(needed);
        }
    }
    Ok(size)
}
