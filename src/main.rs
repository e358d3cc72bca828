use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecopack_dash::config::{Config, ConfigOverrides};
use ecopack_dash::dashboard::Dashboard;
use ecopack_dash::notice::StderrSink;
use ecopack_dash::output::csv::names_to_csv;
use ecopack_dash::output::json::render_json;
use ecopack_dash::output::table::{
    render_comparison_table, render_health_table, render_material_table, render_names_table,
};
use ecopack_dash::output::{adapter_for, OutputFormat};
use ecopack_dash::records::{Fragility, TopN};
use ecopack_dash::source::http::HttpBackend;
use ecopack_dash::source::{CompareRequest, RecommendRequest};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ecopack-dash",
    about = "Packaging material recommendations in the terminal"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    backend: Option<String>,
    #[arg(long, env = "ECOPACKAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Health,
    Categories,
    Materials,
    Material {
        name: String,
    },
    Recommend {
        #[arg(long)]
        category: String,
        #[arg(long)]
        weight: f64,
        #[arg(long = "top-n")]
        top_n: Option<TopN>,
        #[arg(long)]
        fragility: Option<Fragility>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long = "current-material")]
        current_material: Option<String>,
        #[arg(long = "no-chart")]
        no_chart: bool,
    },
    Compare {
        #[arg(long)]
        category: String,
        #[arg(long)]
        weight: f64,
        #[arg(long = "current-material")]
        current_material: String,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        backend_url: cli.backend.clone(),
        api_key: cli.api_key.clone(),
    });

    if let Commands::Config { init, show } = &cli.command {
        handle_config_command(*init, *show, &config, &config_path)?;
        return Ok(ExitCode::SUCCESS);
    }

    let backend = HttpBackend::new(&config.backend)
        .with_context(|| format!("cannot use backend {}", config.backend.url))?;
    info!("using backend {}", backend.base_url());
    let mut dashboard = Dashboard::new(
        Arc::new(backend),
        Box::new(StderrSink),
        config.display.chart_width,
    );

    let shown = match &cli.command {
        Commands::Health => match dashboard.health().await {
            Some(health) => {
                match cli.output {
                    OutputFormat::Table => println!("{}", render_health_table(&health)),
                    OutputFormat::Json => println!("{}", render_json(&health)?),
                    OutputFormat::Csv => {
                        warn!("CSV output for health not implemented, using JSON");
                        println!("{}", render_json(&health)?);
                    }
                }
                true
            }
            None => false,
        },
        Commands::Categories => {
            let categories = dashboard.load_categories().await.to_vec();
            print_names("Category", &categories, cli.output)?;
            !categories.is_empty()
        }
        Commands::Materials => {
            let materials = dashboard.load_materials().await.to_vec();
            print_names("Material", &materials, cli.output)?;
            !materials.is_empty()
        }
        Commands::Material { name } => match dashboard.material_details(name).await {
            Some(details) => {
                match cli.output {
                    OutputFormat::Table => println!("{}", render_material_table(&details)),
                    OutputFormat::Json => println!("{}", render_json(&details)?),
                    OutputFormat::Csv => {
                        warn!("CSV output for material details not implemented, using JSON");
                        println!("{}", render_json(&details)?);
                    }
                }
                true
            }
            None => false,
        },
        Commands::Recommend {
            category,
            weight,
            top_n,
            fragility,
            budget,
            current_material,
            no_chart,
        } => {
            let request = RecommendRequest {
                category: category.clone(),
                weight: *weight,
                top_n: top_n.unwrap_or(config.defaults.top_n),
                fragility_override: fragility.unwrap_or(config.defaults.fragility),
                budget_limit: *budget,
            };
            match dashboard
                .recommend(&request, current_material.as_deref())
                .await
            {
                Some(model) => {
                    println!("{}", adapter_for(cli.output).render(model)?);
                    let show_chart =
                        cli.output == OutputFormat::Table && config.display.chart && !no_chart;
                    if let (true, Some(chart)) = (show_chart, dashboard.chart()) {
                        println!("\n{}", chart.canvas());
                    }
                    true
                }
                None => false,
            }
        }
        Commands::Compare {
            category,
            weight,
            current_material,
        } => {
            let request = CompareRequest {
                category: category.clone(),
                weight: *weight,
                current_material: current_material.clone(),
            };
            match dashboard.compare(&request).await {
                Some(view) => {
                    match cli.output {
                        OutputFormat::Table => println!("{}", render_comparison_table(&view)),
                        OutputFormat::Json => println!("{}", render_json(&view)?),
                        OutputFormat::Csv => {
                            warn!("CSV output for compare not implemented, using JSON");
                            println!("{}", render_json(&view)?);
                        }
                    }
                    true
                }
                None => false,
            }
        }
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    };

    Ok(if shown {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &PathBuf,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(&config.redacted())?);
    }
    Ok(())
}

fn print_names(header: &str, names: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_names_table(header, names)),
        OutputFormat::Json => println!("{}", render_json(names)?),
        OutputFormat::Csv => print!("{}", names_to_csv(&header.to_ascii_lowercase(), names)?),
    }
    Ok(())
}
