use std::path::PathBuf;

use clap::Parser;
use dicecast::{
    rules::damage::AttackProfile,
    statistics::{
        aggregate::{self, DamageBreakdown},
        hit_model::{DEFAULT_CRIT_CHANCE, HitModel},
        pmf::Pmf,
    },
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Attack profile JSON file path
    #[arg(short, long, default_value = "attack.json", value_name = "FILE")]
    attack: PathBuf,

    /// Critical-hit profile JSON file path; enables hit/crit blending
    #[arg(long, value_name = "FILE")]
    crit: Option<PathBuf>,

    /// Overall chance to hit, crits included
    #[arg(long, default_value_t = 1.0)]
    hit_chance: f64,

    /// Chance of a critical hit
    #[arg(long, default_value_t = DEFAULT_CRIT_CHANCE)]
    crit_chance: f64,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report {
    #[serde(flatten)]
    breakdown: DamageBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    blended: Option<Pmf>,
}

fn load_profile(path: &PathBuf) -> anyhow::Result<AttackProfile> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Loading attack profile from {}", args.attack.display());
    let profile = load_profile(&args.attack)?;
    let breakdown = aggregate::compose(&profile)?;
    log::info!(
        "Composed {} damage values, mean damage {:.2}",
        breakdown.all.len(),
        breakdown.all.mean()
    );

    let blended = match &args.crit {
        Some(crit_path) => {
            log::info!("Loading critical profile from {}", crit_path.display());
            let crit_profile = load_profile(crit_path)?;
            let crit_breakdown = aggregate::compose(&crit_profile)?;

            let model = HitModel::with_crit_chance(args.hit_chance, args.crit_chance);
            let blended = model.blend(&breakdown.all, &crit_breakdown.all);
            log::info!(
                "Blended with hit chance {:.2} and crit chance {:.2}: mean damage {:.2}",
                args.hit_chance,
                args.crit_chance,
                blended.mean()
            );
            Some(blended)
        }
        None => None,
    };

    let report = Report { breakdown, blended };
    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &report)?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
