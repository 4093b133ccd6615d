use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use core_types::{AnalysisPeriod, AnalysisRequest};
use engine::{AlphaBetaEngine, AnalysisOutput};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Jensen analytics application.
fn main() -> Result<()> {
    // Load environment variables from a .env file, if one exists.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Regression, risk and performance analytics for a portfolio against its benchmark.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the return series in a JSON request file.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the JSON analysis request.
    #[arg(long, short)]
    input: PathBuf,

    /// Path to a configuration file. Defaults to `config.toml` in the working directory.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Overrides the request's sampling period (monthly, quarterly or yearly).
    #[arg(long)]
    period: Option<AnalysisPeriod>,

    /// Overrides the request's annualized risk-free rate, in percent.
    #[arg(long, allow_hyphen_values = true)]
    risk_free_rate: Option<f64>,

    /// Print the raw JSON output instead of tables.
    #[arg(long)]
    json: bool,

    /// Market shock factors for a scenario grid (e.g. 0.8,1.0,1.2). Replaces the request's scenarios.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    grid_market: Vec<f64>,

    /// Correlation shocks for the scenario grid (e.g. -0.5,0,0.5). Defaults to 0.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    grid_correlation: Vec<f64>,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => configuration::load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => configuration::load_config().context("Failed to load configuration")?,
    };

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read request file {}", args.input.display()))?;
    let mut request: AnalysisRequest =
        serde_json::from_str(&raw).context("Failed to parse the analysis request")?;

    if let Some(period) = args.period {
        request.analysis_period = period;
    }
    if let Some(rate) = args.risk_free_rate {
        request.risk_free_rate = rate;
    }
    if !args.grid_market.is_empty() {
        let correlation = if args.grid_correlation.is_empty() {
            vec![0.0]
        } else {
            args.grid_correlation.clone()
        };
        request.stress_test_scenarios = Some(stress::scenario_grid(&args.grid_market, &correlation)?);
    }

    let engine = AlphaBetaEngine::new(config)?;
    let output = engine.analyze(&request).context("Analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&output);
    }
    Ok(())
}

fn print_report(output: &AnalysisOutput) {
    let r = &output.regression;
    let mut regression = metric_table();
    regression
        .add_row(vec!["Alpha (per period)".to_string(), format!("{:.4}%", r.alpha)])
        .add_row(vec!["Alpha (annualized)".to_string(), format!("{:.4}%", r.alpha_annualized)])
        .add_row(vec!["Beta".to_string(), format!("{:.4}", r.beta)])
        .add_row(vec!["R-squared".to_string(), format!("{:.4}", r.r_squared)])
        .add_row(vec!["Correlation".to_string(), format!("{:.4}", r.correlation)])
        .add_row(vec!["Standard error".to_string(), format!("{:.4}", r.standard_error)])
        .add_row(vec!["t-statistic".to_string(), format!("{:.4}", r.t_statistic)])
        .add_row(vec!["p-value".to_string(), format!("{:.4}", r.p_value)])
        .add_row(vec![
            format!("{}% confidence interval", r.confidence_level),
            format!(
                "[{:.4}, {:.4}]",
                r.confidence_interval.lower, r.confidence_interval.upper
            ),
        ]);
    println!("\n--- Regression ({} observations) ---\n{}", r.observations, regression);

    let k = &output.risk;
    let mut risk = metric_table();
    risk.add_row(vec!["Portfolio volatility".to_string(), format!("{:.4}%", k.portfolio_volatility)])
        .add_row(vec!["Benchmark volatility".to_string(), format!("{:.4}%", k.benchmark_volatility)])
        .add_row(vec!["Factor volatility".to_string(), format!("{:.4}%", k.factor_volatility)])
        .add_row(vec!["Tracking error".to_string(), format!("{:.4}%", k.tracking_error)])
        .add_row(vec!["Systematic risk".to_string(), format!("{:.4}", k.systematic_risk)])
        .add_row(vec!["Idiosyncratic risk".to_string(), format!("{:.4}", k.idiosyncratic_risk)])
        .add_row(vec!["Downside deviation".to_string(), format!("{:.4}%", k.downside_deviation)])
        .add_row(vec!["Max drawdown".to_string(), format!("{:.4}%", k.max_drawdown)])
        .add_row(vec!["Value at risk".to_string(), format!("{:.4}%", k.value_at_risk)]);
    println!("\n--- Risk ---\n{}", risk);

    let p = &output.performance;
    let mut performance = metric_table();
    performance
        .add_row(vec!["Sharpe".to_string(), format!("{:.4}", p.sharpe_ratio)])
        .add_row(vec!["Sortino".to_string(), format!("{:.4}", p.sortino_ratio)])
        .add_row(vec!["Treynor".to_string(), format!("{:.4}", p.treynor_ratio)])
        .add_row(vec!["Information".to_string(), format!("{:.4}", p.information_ratio)])
        .add_row(vec!["Calmar".to_string(), format!("{:.4}", p.calmar_ratio)])
        .add_row(vec!["Omega".to_string(), format!("{:.4}", p.omega_ratio)])
        .add_row(vec!["Up capture".to_string(), format!("{:.2}%", p.up_capture_ratio)])
        .add_row(vec!["Down capture".to_string(), format!("{:.2}%", p.down_capture_ratio)])
        .add_row(vec!["Total return".to_string(), format!("{:.4}%", p.total_return)])
        .add_row(vec!["Annualized return".to_string(), format!("{:.4}%", p.annualized_return)]);
    println!("\n--- Performance ---\n{}", performance);

    let mut rating = metric_table();
    rating
        .add_row(vec!["Alpha significance".to_string(), output.rating.alpha_significance.to_string()])
        .add_row(vec!["Performance".to_string(), output.rating.performance_rating.to_string()])
        .add_row(vec!["Risk".to_string(), output.rating.risk_rating.to_string()])
        .add_row(vec!["Recommendation".to_string(), output.rating.recommendation.to_string()])
        .add_row(vec!["Data quality".to_string(), format!("{:.0}", output.quality.data_quality)])
        .add_row(vec!["Model accuracy".to_string(), format!("{:.0}", output.quality.model_accuracy)])
        .add_row(vec!["Confidence".to_string(), format!("{:.0}", output.quality.confidence_score)]);
    println!("\n--- Rating ---\n{}", rating);

    if let Some(series) = &output.rolling {
        let mut rolling = Table::new();
        rolling
            .load_preset(UTF8_FULL)
            .set_header(vec!["Period", "Alpha", "Beta", "Sharpe"]);
        for point in &series.points {
            rolling.add_row(vec![
                point.period_index.to_string(),
                format!("{:.4}", point.alpha),
                format!("{:.4}", point.beta),
                format!("{:.4}", point.sharpe_ratio),
            ]);
        }
        println!("\n--- Rolling ({}-period window) ---\n{}", series.window, rolling);
    }

    let mut scenarios = Table::new();
    scenarios.load_preset(UTF8_FULL).set_header(vec![
        "Scenario",
        "Portfolio",
        "Benchmark",
        "Alpha",
        "Beta",
        "Sharpe",
        "Max DD",
    ]);
    for s in &output.scenarios {
        scenarios.add_row(vec![
            s.name.clone(),
            format!("{:.2}%", s.portfolio_return),
            format!("{:.2}%", s.benchmark_return),
            format!("{:.4}", s.alpha),
            format!("{:.4}", s.beta),
            format!("{:.4}", s.sharpe_ratio),
            format!("{:.2}%", s.max_drawdown),
        ]);
    }
    println!("\n--- Stress Scenarios ---\n{}", scenarios);

    if !output.advisories.is_empty() {
        println!("\n--- Advisories ---");
        for advisory in &output.advisories {
            println!("  - {}", advisory);
        }
    }
}

fn metric_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table
}
