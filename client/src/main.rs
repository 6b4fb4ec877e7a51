use std::error::Error;
use std::time::Duration;

use clap::{Parser, Subcommand};
use client::{ApiClient, PointSource, ViewScope, start_tour};
use shared::analytics::{ConsumptionPeriod, cost_distribution, energy_series, maintenance_series};
use shared::geo::parse_lon_lat;
use shared::viewport::FOCUS_DELAY;
use shared::{
    DashboardConfig, GeoPoint, StreetBasicInfo, Viewport, ViewportSequencer, interpolate,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal companion of the StreetSmart dashboard.
#[derive(Parser, Debug)]
#[command(name = "streetsmart", version)]
struct Cli {
    /// Street API base URL, overrides STREETSMART_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the sidebar summary of a street
    Street { id: u32 },
    /// Show the analytics dashboard of a street
    Dashboard {
        id: u32,
        #[arg(long)]
        monthly: bool,
    },
    /// Fetch a street, then the points between its endpoints
    Path {
        id: u32,
        /// Defaults to one point per light
        #[arg(long)]
        points: Option<usize>,
        /// Interpolate here instead of asking the API
        #[arg(long)]
        local: bool,
    },
    /// Interpolate between two "lon,lat" positions
    Interpolate {
        #[arg(long, value_parser = parse_point)]
        from: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        to: GeoPoint,
        #[arg(long, default_value_t = 10)]
        points: usize,
    },
    /// Sign a tile or style URL with STREETSMART_TILES_API_KEY
    Sign {
        url: String,
        #[arg(long)]
        resource_type: Option<String>,
    },
    /// Play the map's opening camera move
    Tour {
        #[arg(long, default_value_t = FOCUS_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
}

fn parse_point(value: &str) -> Result<GeoPoint, String> {
    parse_lon_lat(value).ok_or_else(|| format!("expected lon,lat but got {value:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streetsmart=info,client=info,shared=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = DashboardConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }

    match cli.command {
        Command::Street { id } => {
            let api = ApiClient::from_config(&config)?;
            print_street(&api.street_basic(id).await?);
        }
        Command::Dashboard { id, monthly } => {
            let api = ApiClient::from_config(&config)?;
            let info = api.street_detailed(id).await?;
            let period = if monthly {
                ConsumptionPeriod::Monthly
            } else {
                ConsumptionPeriod::Daily
            };

            println!("Total lights:        {}", info.lights_info.len());
            println!(
                "Monthly energy usage: {} kWh",
                info.energy_summary.total_monthly_consumption
            );
            println!(
                "Maintenance records: {}",
                info.maintenance_summary.total_maintenance_records
            );
            println!("\nCost distribution (total ₹{}):", info.cost_summary.total_cost);
            for slice in cost_distribution(&info) {
                println!("  {:<18} ₹{}", slice.name, slice.value);
            }
            println!(
                "\nWarranties: {} active, {} expiring soon",
                info.warranty_summary.active_warranties, info.warranty_summary.expiring_soon
            );
            println!("\n{} energy consumption:", period.label());
            for point in energy_series(&info, period) {
                println!("  {:<10} {:.2} kWh", point.label, point.value);
            }
            println!("\nMaintenance costs:");
            for point in maintenance_series(&info) {
                println!("  {}  {}", point.date, point.tooltip());
            }
        }
        Command::Path { id, points, local } => {
            let api = ApiClient::from_config(&config)?;
            let source = if local {
                PointSource::Local
            } else {
                PointSource::Remote
            };
            let path = api.street_path(id, points, source).await?;
            println!("{} ({} points)", path.street.street_name, path.points.len());
            for point in path.points {
                println!("{:.6},{:.6}", point.lon, point.lat);
            }
        }
        Command::Interpolate { from, to, points } => {
            for point in interpolate(from, to, points)? {
                println!("{:.6},{:.6}", point.lon, point.lat);
            }
        }
        Command::Sign { url, resource_type } => {
            if !config.serves_tiles(&url) {
                tracing::warn!(
                    tile_host = %config.tile_base_url,
                    "{url} is not on the configured tile host, the key may leak"
                );
            }
            let signed = config.tile_signer().sign(&url, resource_type.as_deref());
            println!("{}", signed.url);
        }
        Command::Tour { delay_ms } => {
            let sequencer = ViewportSequencer::new(
                Viewport::world(),
                Viewport::managed_area(),
                Duration::from_millis(delay_ms),
            );
            let mut scope = ViewScope::new("tour");
            let mut state = start_tour(&mut scope, sequencer);
            println!("initial: {:?}", state.borrow().viewport());
            state.changed().await?;
            println!("focused: {:?}", state.borrow().viewport());
        }
    }

    Ok(())
}

fn print_street(street: &StreetBasicInfo) {
    println!("{}", street.street_name);
    println!("  Ward:          {}", street.ward.as_deref().unwrap_or("N/A"));
    println!("  Total lights:  {}", street.total_lights);
    println!("  Power usage:   {:.1} kWh", street.total_power_consumption);
    println!("  Recent issues: {}", street.recent_issues);
    println!("  Operational status:");
    for (status, count) in &street.operational_summary {
        println!("    {status:<12} {count}");
    }
}
