//! LT24 Panel Preview Tool
//!
//! Runs the panel driver against a simulated LT24 and saves what the panel
//! would show as a PNG.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lt24_hw::colour::{parse_hex_colour, MAGNITUDE_MAX};
use lt24_hw::{
    make_colour, map_magnitude_to_colour, try_make_colour, GraphGeometry, Lt24, SimulatedPanel,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "lt24ctl")]
#[command(about = "Preview tool for the LT24 panel driver")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Where to save the panel image
    #[arg(short, long, default_value = "panel.png")]
    output: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clear the display to a solid color
    Clear {
        /// Color in hex format (e.g., #FF0000 for red)
        #[arg(long, default_value = "#000000")]
        color: String,
    },
    /// Draw the diagnostic test pattern
    Pattern,
    /// Plot a single pixel
    Pixel {
        x: u16,
        y: u16,

        /// Color in hex format
        #[arg(long, default_value = "#FFFFFF")]
        color: String,
    },
    /// Draw one frame of a column graph
    Graph {
        /// Graph configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the generated magnitudes
        #[arg(long, default_value = "0")]
        seed: u32,
    },
    /// Print the RGB565 word for an RGB colour
    Colour {
        r: u32,
        g: u32,
        b: u32,

        /// Reject channels above 255 instead of truncating
        #[arg(long)]
        strict: bool,
    },
    /// Print the heat map colour for a magnitude
    Magnitude {
        /// Magnitude (0-65535)
        mag: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    match cli.command {
        Commands::Colour { r, g, b, strict } => {
            let colour = if strict {
                try_make_colour(r, g, b)?
            } else {
                make_colour(r, g, b)
            };
            println!("{:#06X}", colour);
        }
        Commands::Magnitude { mag } => {
            println!("{:#06X}", map_magnitude_to_colour(mag));
        }
        Commands::Clear { color } => {
            let mut lcd = open_panel()?;
            lcd.clear_display(parse_colour(&color)?)?;
            info!("Display cleared to {}", color);
            save_png(lcd.interface(), &cli.output)?;
        }
        Commands::Pattern => {
            let mut lcd = open_panel()?;
            lcd.test_pattern()?;
            save_png(lcd.interface(), &cli.output)?;
        }
        Commands::Pixel { x, y, color } => {
            let mut lcd = open_panel()?;
            lcd.draw_pixel(parse_colour(&color)?, x, y)
                .with_context(|| format!("Failed to plot pixel at ({}, {})", x, y))?;
            save_png(lcd.interface(), &cli.output)?;
        }
        Commands::Graph { config, seed } => {
            let config = match config {
                Some(path) => {
                    let config = Config::load(&path)?;
                    info!("Loaded configuration from: {}", path.display());
                    config
                }
                None => Config::default(),
            };
            let mut lcd = open_panel()?;
            draw_graph(&mut lcd, &config, seed)?;
            save_png(lcd.interface(), &cli.output)?;
        }
    }

    Ok(())
}

/// Brings up a simulated panel.
fn open_panel() -> Result<Lt24<SimulatedPanel>> {
    let mut lcd = Lt24::new(SimulatedPanel::new());
    lcd.initialise().context("Failed to initialise LCD")?;
    Ok(lcd)
}

fn parse_colour(hex: &str) -> Result<u16> {
    match parse_hex_colour(hex) {
        Some(colour) => Ok(colour),
        None => bail!("Invalid color: {} (expected #RRGGBB)", hex),
    }
}

/// Draws a bar graph frame with generated levels.
fn draw_graph(lcd: &mut Lt24<SimulatedPanel>, config: &Config, seed: u32) -> Result<()> {
    let graph = &config.graph;
    lcd.init_geometries(graph.width, graph.height, graph.columns, graph.window_height)
        .context("Invalid graph geometry")?;
    let geometry = *lcd.geometry().context("Graph geometry missing")?;

    let background = parse_colour(&config.background)?;
    lcd.clear_display(background)?;

    let frame: Vec<Vec<u16>> = (0..geometry.columns())
        .map(|column| column_bands(&geometry, level(seed, column), background))
        .collect();
    lcd.draw_graph(&frame)?;

    info!(
        "Drew {} columns of {} bands",
        geometry.columns(),
        geometry.bands()
    );
    Ok(())
}

/// Generated column level for a frame, on the magnitude scale.
fn level(seed: u32, column: u16) -> u16 {
    let phase = seed as f64 * 0.7 + column as f64 * 0.9;
    let level = (phase.sin() * 0.5 + 0.5) * MAGNITUDE_MAX as f64;
    debug!("Column {} level {:.0}", column, level);
    level as u16
}

/// Band colours for a bar of the given level, top band first.
///
/// Lit bands fill from the bottom and take the heat colour of their height;
/// the rest show the background.
fn column_bands(geometry: &GraphGeometry, level: u16, background: u16) -> Vec<u16> {
    let bands = u32::from(geometry.bands());
    let lit = u32::from(level) * bands / u32::from(MAGNITUDE_MAX);

    (0..bands)
        .map(|band| {
            let height = bands - 1 - band;
            if height < lit {
                let mag = height * u32::from(MAGNITUDE_MAX) / (bands - 1).max(1);
                map_magnitude_to_colour(mag as u16)
            } else {
                background
            }
        })
        .collect()
}

/// Saves panel memory as an RGBA PNG.
fn save_png(panel: &SimulatedPanel, path: &Path) -> Result<()> {
    let framebuffer = panel.framebuffer();
    let rgba = framebuffer.to_rgba8();

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = png::Encoder::new(
        std::io::BufWriter::new(file),
        framebuffer.width().into(),
        framebuffer.height().into(),
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgba)?;
    writer.finish()?;

    info!("Saved panel image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt24_hw::colour::{BLUE, RED};

    #[test]
    fn test_column_bands_fill_from_bottom() {
        let geometry = GraphGeometry::new(240, 320, 4, 40).unwrap();
        let bands = column_bands(&geometry, MAGNITUDE_MAX / 2, 0);
        assert_eq!(bands.len(), 8);
        assert_eq!(&bands[..5], &[0; 5]);
        assert_ne!(bands[5], 0);
        assert_eq!(bands[7], BLUE);
    }

    #[test]
    fn test_column_bands_full_and_empty() {
        let geometry = GraphGeometry::new(240, 320, 4, 40).unwrap();
        let full = column_bands(&geometry, MAGNITUDE_MAX, 0);
        assert_eq!(full[0], RED);
        assert_eq!(full[7], BLUE);
        assert!(column_bands(&geometry, 0, 0).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_draw_graph_frame() {
        let mut lcd = open_panel().unwrap();
        draw_graph(&mut lcd, &Config::default(), 3).unwrap();
        assert_eq!(lcd.geometry().map(|g| g.columns()), Some(4));
    }

    #[test]
    fn test_parse_colour() {
        assert_eq!(parse_colour("#FF0000").unwrap(), RED);
        assert!(parse_colour("red").is_err());
    }
}
