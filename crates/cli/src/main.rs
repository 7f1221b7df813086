//! Command line interface for the marginscope risk engine.
//!
//! Loads position and flow snapshots exported from the indexer as JSON and
//! runs the engine over them: tier breakdown, price-shock scenario grid,
//! pool verdict, and the reconstructed daily liquidity series.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use marginscope_domain::{FlowEvent, MarginPosition, PositionId, RiskTier};
use marginscope_history::reconstruct;
use marginscope_risk::{
    PoolVerdict, ScenarioResult, TriggerDistance, classify_batch, default_shock_grid_pct,
    pool_nearest_trigger, simulate, simulate_grid, verdict,
};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marginscope")]
#[command(about = "Margin position risk and liquidation simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify positions, run the shock grid, and print the pool verdict
    Risk {
        /// Path to a JSON array of position records
        #[arg(short, long)]
        positions: PathBuf,

        /// Shock grid in percent, comma separated (defaults to the
        /// dashboard grid)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        grid: Option<Vec<Decimal>>,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Reconstruct the daily supply/borrow/utilization series
    History {
        /// Path to a JSON pool snapshot (current totals + flow events)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Days of history to reconstruct, ending today
        #[arg(short, long, default_value_t = 30)]
        days: i64,

        /// Emit the series as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Position record as exported by the indexer, validated into the domain
/// type before the engine sees it.
#[derive(Debug, Deserialize)]
struct PositionRecord {
    id: String,
    base_collateral_usd: Decimal,
    quote_collateral_usd: Decimal,
    base_debt_usd: Decimal,
    quote_debt_usd: Decimal,
    liquidation_threshold: Decimal,
}

impl PositionRecord {
    fn into_position(self) -> Result<MarginPosition> {
        let id = self.id.clone();
        MarginPosition::try_new(
            PositionId::new(self.id),
            self.base_collateral_usd,
            self.quote_collateral_usd,
            self.base_debt_usd,
            self.quote_debt_usd,
            self.liquidation_threshold,
        )
        .with_context(|| format!("invalid position record {id}"))
    }
}

/// Pool snapshot file for the history command.
#[derive(Debug, Deserialize)]
struct PoolSnapshot {
    current_supply_usd: Decimal,
    current_borrow_usd: Decimal,
    events: Vec<FlowEvent>,
}

/// Everything the risk command computes, for `--json` output.
#[derive(Debug, Serialize)]
struct RiskReport {
    total_positions: usize,
    tier_counts: Vec<(RiskTier, usize)>,
    scenarios: Vec<ScenarioResult>,
    nearest_trigger: TriggerDistance,
    verdict: PoolVerdict,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Risk {
            positions,
            grid,
            json,
        } => run_risk(&positions, grid, json),
        Commands::History {
            snapshot,
            days,
            json,
        } => run_history(&snapshot, days, json),
    }
}

fn run_risk(path: &PathBuf, grid: Option<Vec<Decimal>>, json: bool) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading positions from {}", path.display()))?;
    let records: Vec<PositionRecord> =
        serde_json::from_str(&raw).context("parsing position records")?;
    let positions = records
        .into_iter()
        .map(PositionRecord::into_position)
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(positions = positions.len(), "running risk pipeline");

    let grid = grid.unwrap_or_else(default_shock_grid_pct);
    let counts = classify_batch(&positions);
    let scenarios = simulate_grid(&positions, &grid);
    let zero_shock = simulate(&positions, Decimal::ZERO);
    let nearest = pool_nearest_trigger(&positions);
    let pool_verdict = verdict(&zero_shock, &nearest, positions.len());

    let report = RiskReport {
        total_positions: positions.len(),
        tier_counts: RiskTier::ALL.iter().map(|t| (*t, counts[t])).collect(),
        scenarios,
        nearest_trigger: nearest,
        verdict: pool_verdict,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut tiers = Table::new();
    tiers.add_row(row!["TIER", "POSITIONS"]);
    for (tier, count) in &report.tier_counts {
        tiers.add_row(row![tier, count]);
    }
    println!("Positions: {}", report.total_positions);
    tiers.printstd();

    let mut grid_table = Table::new();
    grid_table.add_row(row![
        "SHOCK %",
        "LIQUIDATABLE",
        "CRITICAL",
        "DEBT AT RISK (USD)",
        "NEWLY LIQUIDATED"
    ]);
    for scenario in &report.scenarios {
        grid_table.add_row(row![
            scenario.price_change_pct,
            scenario.liquidatable_count,
            scenario.critical_count,
            scenario.total_debt_at_risk_usd.round_dp(2),
            scenario.newly_liquidated.len()
        ]);
    }
    grid_table.printstd();

    let fmt_pct = |value: Option<Decimal>| match value {
        Some(pct) => format!("{}%", pct.round_dp(2)),
        None => "none".to_string(),
    };
    println!(
        "Nearest trigger: drop {} / rise {}",
        fmt_pct(report.nearest_trigger.drop_pct),
        fmt_pct(report.nearest_trigger.rise_pct)
    );
    println!(
        "Pool verdict: {} (nearest trigger {})",
        report.verdict.tier,
        fmt_pct(report.verdict.nearest_trigger_pct)
    );

    Ok(())
}

fn run_history(path: &PathBuf, days: i64, json: bool) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading pool snapshot from {}", path.display()))?;
    let snapshot: PoolSnapshot = serde_json::from_str(&raw).context("parsing pool snapshot")?;

    let today = Utc::now().date_naive();
    let start = today - Duration::days(days.max(1) - 1);

    tracing::info!(events = snapshot.events.len(), days, "reconstructing history");

    let series = reconstruct(
        snapshot.current_supply_usd,
        snapshot.current_borrow_usd,
        &snapshot.events,
        start,
        today,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["DATE", "SUPPLY (USD)", "BORROW (USD)", "UTILIZATION"]);
    for day in &series {
        table.add_row(row![
            day.date,
            day.supply_usd.round_dp(2),
            day.borrow_usd.round_dp(2),
            day.utilization().round_dp(4)
        ]);
    }
    table.printstd();

    Ok(())
}
