use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a deterministic sample launch records CSV for the dashboard.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches to generate
    #[arg(long, default_value = "56")]
    launches: usize,

    /// PRNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// One CSV row, with the column names the dashboard expects plus the extra
/// columns of the published launch table.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "Mission Outcome")]
    mission_outcome: &'static str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// Booster generations in flight order: (category, landing success probability).
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.0),
    ("v1.1", 0.15),
    ("FT", 0.65),
    ("B4", 0.55),
    ("B5", 0.95),
];

/// Sites with a relative launch weight.
const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("VAFB SLC-4E", 0.18),
    ("KSC LC-39A", 0.24),
    ("CCAFS SLC-40", 0.13),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick_weighted<T: Copy>(&mut self, choices: &[(T, f64)]) -> T {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(choice, weight) in choices {
            if target < weight {
                return choice;
            }
            target -= weight;
        }
        choices[choices.len() - 1].0
    }
}

fn generate(args: &Args) -> Vec<LaunchRow> {
    let mut rng = SimpleRng::new(args.seed);

    (0..args.launches)
        .map(|i| {
            // Later flights use later booster generations and heavier payloads.
            let progress = i as f64 / args.launches.max(1) as f64;
            let generation = ((progress * BOOSTERS.len() as f64) as usize).min(BOOSTERS.len() - 1);
            let (category, success_rate) = BOOSTERS[generation];

            let launch_site = rng.pick_weighted(&SITES);
            let max_payload = 2000.0 + 8000.0 * progress;
            // Whole kilograms; the first demo flights carried no payload.
            let payload_mass_kg = if i < 2 { 0.0 } else { (rng.next_f64() * max_payload).round() };
            let class = u8::from(rng.next_f64() < success_rate);

            LaunchRow {
                flight_number: i + 1,
                launch_site,
                mission_outcome: "Success",
                class,
                payload_mass_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + i),
                booster_category: category,
            }
        })
        .collect()
}

/// Column names in file order; must match the `LaunchRow` serde renames.
const HEADER: [&str; 7] = [
    "Flight Number",
    "Launch Site",
    "Mission Outcome",
    "class",
    "Payload Mass (kg)",
    "Booster Version",
    "Booster Version Category",
];

/// Write the header explicitly, then the rows without serde's implicit header,
/// so the file always has a header line.
fn write_csv<W: std::io::Write>(sink: W, rows: &[LaunchRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(HEADER).context("writing CSV header")?;
    for row in rows {
        writer.serialize(row).context("writing launch row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.launches == 0 {
        bail!("--launches must be at least 1: the dashboard rejects a file without launches");
    }
    let rows = generate(&args);

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_csv(file, &rows)?;

    println!("Wrote {} launches to {}", rows.len(), args.output.display());
    Ok(())
}
