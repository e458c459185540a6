use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrapulse_client::{ApiClient, DataGateway};
use terrapulse_common::{Config, CoolingType, ScenarioParameters, SizeMw};
use terrapulse_dashboard::{format_millions, Dashboard, STEPS};
use terrapulse_map::{HeadlessFactory, MapController};
use terrapulse_scoring::{compare_cooling, score};

#[derive(Parser)]
#[command(name = "terrapulse", about = "TerraPulse water-risk scenarios from the command line")]
struct Cli {
    /// API base URL (overrides TERRAPULSE_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a data center scenario at one project
    Score {
        #[arg(long)]
        project: String,
        /// Facility size in MW: 20, 50 or 100
        #[arg(long, default_value = "50", value_parser = parse_size)]
        size: SizeMw,
        /// air, hybrid or evaporative
        #[arg(long, default_value = "hybrid")]
        cooling: CoolingType,
        /// Ask the API to compute the score instead of scoring locally
        #[arg(long)]
        remote: bool,
    },
    /// Compare cooling types at one project
    Compare {
        #[arg(long)]
        project: String,
        #[arg(long, default_value = "50", value_parser = parse_size)]
        size: SizeMw,
        /// Cooling type to highlight
        #[arg(long, default_value = "hybrid")]
        cooling: CoolingType,
    },
    /// County projections for a scenario
    Counties {
        #[arg(long, default_value = "50", value_parser = parse_size)]
        size: SizeMw,
        #[arg(long, default_value = "hybrid")]
        cooling: CoolingType,
    },
    /// Walk through every demo step against a headless map
    Demo,
}

fn parse_size(raw: &str) -> Result<SizeMw, String> {
    let mw: u32 = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    SizeMw::try_from(mw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("terrapulse=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    let client = ApiClient::new(config.api_base_url.clone());

    match cli.command {
        Command::Score {
            project,
            size,
            cooling,
            remote,
        } => {
            let params = ScenarioParameters {
                size_mw: size,
                cooling_type: cooling,
            };
            let result = if remote {
                client.compute_score(&project, params).await?
            } else {
                score(&client.get_project(&project).await?, params)
            };
            println!("{project}: {} / {cooling}", size.label());
            println!("  Annual energy:  {:.0} kWh", result.annual_energy_kwh);
            println!("  Annual water:   {} liters", format_millions(result.annual_water_liters));
            println!("  Olympic pools:  {:.1}", result.olympic_pools);
            println!("  Impact score:   {} ({})", result.impact_score, result.tier);
            println!("  {}", result.assumptions.formula);
        }

        Command::Compare {
            project,
            size,
            cooling,
        } => {
            let project = client.get_project(&project).await?;
            println!("{} ({}) at {}", project.name, project.project_id, size.label());
            for bar in compare_cooling(&project, size, cooling) {
                let marker = if bar.selected { '*' } else { ' ' };
                println!(
                    "{marker} {:<12} {:<20} {:>8}L  impact {:>6.2} ({})",
                    bar.cooling_type.as_str(),
                    "#".repeat((bar.width_pct / 5.0).round() as usize),
                    format_millions(bar.annual_water_liters),
                    bar.impact_score,
                    bar.tier
                );
            }
        }

        Command::Counties { size, cooling } => {
            let params = ScenarioParameters {
                size_mw: size,
                cooling_type: cooling,
            };
            let counties = client.get_county_summary(params).await?;
            println!("County projections at {} / {cooling}", size.label());
            for c in counties {
                println!(
                    "  {:<16} {:>2} sites  stress {:.3}  water {:>9}L  impact {:>6.2} ({})",
                    c.county,
                    c.project_count,
                    c.avg_stress,
                    format_millions(c.projected_annual_water_liters),
                    c.projected_impact_score,
                    c.projected_tier
                );
            }
        }

        Command::Demo => run_demo(client, &config).await?,
    }

    Ok(())
}

async fn run_demo(client: ApiClient, config: &Config) -> Result<()> {
    let map = MapController::new(
        HeadlessFactory,
        config.map_token.clone(),
        config.water_stress_tile_url.clone(),
    );
    let mut dashboard = Dashboard::new(client, map);
    dashboard.start().await?;

    // A headless surface is ready as soon as it exists.
    if let Some(ticket) = dashboard.pending_map_ticket() {
        dashboard.map_ready(ticket).await?;
    }
    info!(status = ?dashboard.map_status(), "Demo map");

    if let Some(error) = &dashboard.state().error {
        println!("! {error}");
    }

    for index in 0..STEPS.len() {
        dashboard.go_to(index as i64).await?;
        println!("\n== {} ==", dashboard.demo_title());
        print!("{}", dashboard.scoring_panel());
    }

    dashboard.shutdown().await
}
