use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use terrain_mapper::{FalloffMethod, MapConfig, MapError, PixelBuffer, ProceduralMap, Seed};

/// Procedural terrain map generator.
#[derive(Parser)]
#[command(name = "mapper-terrain-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map side length in cells.
    #[arg(long)]
    size: Option<usize>,

    /// Elevation seed (number or text). Defaults to the current time.
    #[arg(long)]
    elevation_seed: Option<String>,

    /// Moisture seed (number or text). Defaults to the elevation seed + 1.
    #[arg(long)]
    moisture_seed: Option<String>,

    /// Noise frequency multiplier.
    #[arg(long)]
    zoom: Option<f64>,

    /// Exponent applied to elevation.
    #[arg(long)]
    height_curve: Option<f64>,

    /// Island falloff metric.
    #[arg(long)]
    falloff: Option<FalloffArg>,

    /// Disable the island falloff.
    #[arg(long)]
    no_falloff: bool,

    /// Disable relief shading.
    #[arg(long)]
    no_shadows: bool,

    /// Render a debug view instead of biomes.
    #[arg(long)]
    view: Option<ViewArg>,

    /// Stretch elevation so the highest biomes always appear.
    #[arg(long)]
    always_mountains: bool,

    /// Output PNG path. Defaults to terrain_map_<timestamp>.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per map cell in the PNG.
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Print a colored preview to the terminal.
    #[arg(long)]
    preview: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FalloffArg {
    Euclidean,
    Manhattan,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Biomes,
    Elevation,
    Moisture,
}

fn parse_seed(raw: &str) -> Seed {
    match raw.parse::<f64>() {
        Ok(n) => Seed::Number(n),
        Err(_) => Seed::Text(raw.to_string()),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn build_config(cli: &Cli) -> Result<MapConfig, MapError> {
    let mut config = match &cli.config {
        Some(path) => MapConfig::from_json_file(path)?,
        None => {
            let seed = now_secs() as u32;
            MapConfig {
                elevation_seed: Seed::from(seed),
                moisture_seed: Seed::from(seed.wrapping_add(1)),
                ..Default::default()
            }
        }
    };

    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(raw) = &cli.elevation_seed {
        config.elevation_seed = parse_seed(raw);
        if cli.moisture_seed.is_none() {
            config.moisture_seed = match &config.elevation_seed {
                Seed::Number(n) => Seed::Number(n + 1.0),
                Seed::Text(s) => Seed::Text(format!("{}-moisture", s)),
            };
        }
    }
    if let Some(raw) = &cli.moisture_seed {
        config.moisture_seed = parse_seed(raw);
    }
    if let Some(zoom) = cli.zoom {
        config.zoom = zoom;
    }
    if let Some(curve) = cli.height_curve {
        config.height_curve = curve;
    }
    if let Some(method) = cli.falloff {
        config.falloff.method = match method {
            FalloffArg::Euclidean => FalloffMethod::Euclidean,
            FalloffArg::Manhattan => FalloffMethod::Manhattan,
        };
    }
    if cli.no_falloff {
        config.falloff.enabled = false;
    }
    if cli.no_shadows {
        config.show_shadows = false;
    }
    if cli.always_mountains {
        config.always_mountains = true;
    }
    if let Some(view) = cli.view {
        config.show_elevation = matches!(view, ViewArg::Elevation);
        config.show_moisture = matches!(view, ViewArg::Moisture);
    }
    Ok(config)
}

fn print_preview(pixels: &PixelBuffer) {
    // keep previews within a terminal line
    let step = (pixels.size() / 80).max(1);
    for y in (0..pixels.size()).step_by(step * 2) {
        for x in (0..pixels.size()).step_by(step) {
            if let Some([r, g, b, _]) = pixels.pixel(x, y) {
                print!("\x1b[48;2;{};{};{}m \x1b[0m", r, g, b);
            }
        }
        println!();
    }
}

fn print_distribution(map: &ProceduralMap) {
    let total = (map.size() * map.size()) as f64;
    println!("\n\x1b[1mBiome Distribution:\x1b[0m");
    for (label, count) in map.biome_distribution() {
        println!("  {:<28} {:>5.1}%", label, count as f64 / total * 100.0);
    }
}

fn run(cli: Cli) -> Result<(), MapError> {
    let config = build_config(&cli)?;
    info!(
        "generating {}x{} terrain (elevation seed {}, moisture seed {})",
        config.size, config.size, config.elevation_seed, config.moisture_seed
    );

    let mut map = ProceduralMap::new(config)?;
    map.generate_map()?;

    let Some(pixels) = map.generate_image() else {
        error!("map produced no image");
        return Ok(());
    };

    if cli.preview {
        print_preview(&pixels);
    }
    print_distribution(&map);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("terrain_map_{}.png", now_secs())));
    pixels.save_png(&output, cli.scale)?;
    info!("map saved as: {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), Seed::Number(42.0));
        assert_eq!(parse_seed("island"), Seed::Text("island".to_string()));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mapper-terrain-cli",
            "--size",
            "16",
            "--elevation-seed",
            "hills",
            "--falloff",
            "manhattan",
            "--no-shadows",
            "--view",
            "moisture",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.size, 16);
        assert_eq!(config.elevation_seed, Seed::from("hills"));
        assert_eq!(config.moisture_seed, Seed::from("hills-moisture"));
        assert_eq!(config.falloff.method, FalloffMethod::Manhattan);
        assert!(!config.show_shadows);
        assert!(config.show_moisture);
        assert!(!config.show_elevation);
    }

    #[test]
    fn test_numeric_seed_derives_moisture_seed() {
        let cli = Cli::parse_from(["mapper-terrain-cli", "--elevation-seed", "10"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.moisture_seed, Seed::Number(11.0));
    }
}
