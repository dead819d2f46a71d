mod input;
mod link;
mod station;

use anyhow::{Context, Result};
use clap::Parser;
use inky_core::{Config, MapMode, ModeConfig};
use inky_display::{render_error, Panel, PngPanel};
use inky_weather::{
    CitySlots, Coordinates, IpApiGeolocator, MapService, OpenMeteoProvider, OsmTileSource,
    StaticMapSource, WeatherCache,
};
use std::path::PathBuf;

use crate::input::StdinButtons;
use crate::link::{connect_with_splash, TcpProbe};
use crate::station::Station;

/// Location-aware weather dashboard for a 296x128 E-Ink panel.
///
/// Buttons are read from stdin: a = previous, b = next, c = home.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/inky-station/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw the current city once and exit
    #[arg(long)]
    once: bool,

    /// Start on this city slot in manual mode (0 = Auto)
    #[arg(long)]
    city: Option<usize>,

    /// PNG file to write the panel image to
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    inky_core::init()?;

    let config = Config::load_validated(cli.config.as_deref())?;
    let output = cli.output.unwrap_or_else(|| config.display.output_path.clone());
    let mut panel = PngPanel::new(output.clone());
    tracing::info!("Panel output: {}", panel.path().display());

    let probe = TcpProbe::new(
        config.network.probe_host.clone(),
        config.network.connect_deadline(),
    );
    connect_with_splash(&probe, &mut panel).await?;

    let slots = CitySlots::new(
        config.stations.cities.iter().map(|c| {
            (
                c.name.clone(),
                Coordinates::new(c.latitude, c.longitude),
            )
        }),
        &config.stations.home,
    )
    .context("Building city slots")?;
    let mode_config = ModeConfig::new(
        slots.len(),
        slots.home_index(),
        config.timing.manual_timeout(),
    )?;
    tracing::info!(
        "{} city slots, home is {}",
        slots.len(),
        config.stations.home
    );

    let geolocator = IpApiGeolocator::new(config.endpoints.geolocation_url.clone())?;
    let weather = OpenMeteoProvider::new(config.endpoints.weather_url.clone())?;
    let maps = match config.display.map_mode {
        MapMode::Tile => Some(MapService::Tiles(OsmTileSource::new(
            config.endpoints.tile_url.clone(),
            config.display.zoom,
        )?)),
        MapMode::Server => Some(MapService::Server(StaticMapSource::new(
            config.endpoints.map_server_url.clone(),
        )?)),
        MapMode::Outline => None,
    };

    let mut station = Station::new(
        WeatherCache::new(slots),
        geolocator,
        weather,
        maps,
        panel,
        mode_config,
        config.timing.refresh_interval(),
    );
    if let Some(index) = cli.city {
        station.select(index)?;
    }

    if cli.once {
        station.tick(None).await?;
        tracing::info!("Single frame written");
        return Ok(());
    }

    let mut buttons = StdinButtons::spawn();
    tokio::select! {
        result = station.run(&mut buttons, config.timing.tick()) => {
            if let Err(e) = &result {
                tracing::error!("Station stopped: {}", e);
                show_error(e.user_message(), output);
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}

/// Best effort: the station owns the main panel, so draw the error on a fresh one.
fn show_error(message: &str, output: PathBuf) {
    let mut panel = PngPanel::new(output);
    render_error(message, &mut panel).unwrap_or_else(|never| match never {});
    if let Err(e) = panel.update() {
        tracing::warn!("Could not draw error screen: {}", e);
    }
}
