use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sandfire_core::{
    FireConfig, FireModel, HeightField, RiskZones, TerrainQuery, Vec2, DEFAULT_SEED,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Synthetic sand surfaces
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TerrainPreset {
    /// Level dry ground
    Flat,
    /// Single round hill in the middle
    Hill,
    /// Level ground with a water-filled pit north of the centre
    Lake,
    /// East-west ridge whose southern flank is a risk zone
    Ridge,
}

/// Headless sandbox fire demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "sandfire-demo")]
#[command(about = "Fire spread over a synthetic sandbox surface", long_about = None)]
struct Args {
    /// Terrain shape
    #[arg(long, value_enum, default_value_t = TerrainPreset::Hill)]
    terrain: TerrainPreset,

    /// Side length of the square region in cells
    #[arg(long, default_value_t = 200)]
    size: usize,

    /// Maximum number of ticks to run
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Wind speed (bands above 1, 4, 6 and 8 push harder)
    #[arg(short, long, default_value_t = 0.0)]
    wind_speed: f32,

    /// Wind direction in degrees (0 = +x, 90 = +y)
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f32,

    /// Ignition point as X,Y (defaults to the region centre)
    #[arg(short, long, value_parser = parse_point)]
    ignite: Option<Vec2>,

    /// Ignite on a random high-risk cell instead of a fixed point
    #[arg(long)]
    risk: bool,

    /// JSON engine configuration; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 25)]
    report_interval: u64,

    /// Print the final frame snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y '{y}': {e}"))?;
    Ok(Vec2::new(x, y))
}

fn build_terrain(preset: TerrainPreset, size: usize) -> HeightField {
    let samples = size.max(2) + 1;
    let extent = samples as f32 - 1.0;
    let centre = extent / 2.0;
    match preset {
        TerrainPreset::Flat => HeightField::flat(samples, samples, 10.0),
        TerrainPreset::Hill => HeightField::single_hill(samples, samples, 5.0, 80.0, extent / 4.0),
        TerrainPreset::Lake => HeightField::flat(samples, samples, 10.0).with_pit(
            Vec2::new(centre, centre * 0.6),
            extent / 8.0,
            -5.0,
        ),
        TerrainPreset::Ridge => HeightField::ridge(samples, samples, 5.0, 60.0, extent / 6.0),
    }
}

fn load_config(path: Option<&Path>) -> Result<FireConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(FireConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config: FireConfig = serde_json::from_str(&text)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== Sandbox Fire Demo ===\n");

    let config = load_config(args.config.as_deref())?;
    let terrain = build_terrain(args.terrain, args.size);
    let region = terrain.current_region();
    println!(
        "Terrain: {:?}, region {}, elevation {:.1}..{:.1}",
        args.terrain,
        region,
        terrain.min_elevation(),
        terrain.max_elevation()
    );

    let mut model = FireModel::with_config(terrain, ChaCha8Rng::seed_from_u64(args.seed), config)?;
    model.set_wind_speed(args.wind_speed);
    model.set_wind_direction(args.wind_direction);
    println!(
        "Wind: {:.1} towards {:.0} deg, seed {}\n",
        model.wind().speed(),
        model.wind().direction(),
        args.seed
    );

    let ignited = if args.risk {
        let ignited = model.ignite_in_risk_zone();
        let cells = model.risk_zones().map_or(0, RiskZones::len);
        println!("Risk zones: {cells} cells");
        ignited
    } else {
        let point = args.ignite.unwrap_or_else(|| region.center());
        model.ignite(point, None)
    };
    if !ignited {
        println!("Ignition rejected (water, outside the region, or no usable risk cell)");
        return Ok(());
    }

    println!("Tick  | Agents | Embers | Burned cells | Burned(%)");
    println!("------|--------|--------|--------------|----------");

    let interval = args.report_interval.max(1);
    for _ in 0..args.ticks {
        model.tick();
        let stats = model.stats();
        if stats.timestep % interval == 0 {
            println!(
                "{:5} | {:6} | {:6} | {:12} | {:8.1}",
                stats.timestep,
                stats.active_agents,
                stats.embers,
                stats.burned_cells,
                stats.percent_burned
            );
        }
        if !model.is_running() {
            break;
        }
    }

    let stats = model.stats();
    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", stats.timestep);
    println!("Cells burned: {}", stats.burned_cells);
    println!("{stats}");
    println!("Still running: {}", model.is_running());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&model.snapshot())?);
    }
    Ok(())
}
