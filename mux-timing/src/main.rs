/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use mux_timing::config::{CollisionPolicy, TimingConfig};
use mux_timing::diagram::Diagram;
use mux_timing::report::render_document;
use mux_timing::schedule::ScheduleDeriver;

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollisionArg {
    Merge,
    LastWins,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Merge => CollisionPolicy::Merge,
            CollisionArg::LastWins => CollisionPolicy::LastWins,
        }
    }
}

/// CPU/bus multiplex timing generator.
///
/// Example:
///   mux-timing --config configs/cpu8_fb128.yaml --t-ads 45
#[derive(Debug, Parser)]
#[command(
    name = "mux-timing",
    about = "Derive bus tick offsets for a multiplexed CPU interface and print a WaveDrom diagram",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML timing configuration.  Built-in defaults are used when absent.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Processor clock rate in MHz.
    #[arg(long = "cpu-rate")]
    cpu_rate: Option<f64>,

    /// Bus clock rate in MHz.
    #[arg(long = "bus-rate")]
    bus_rate: Option<f64>,

    /// Address setup time in ns.
    #[arg(long = "t-ads")]
    t_ads: Option<f64>,

    /// Data hold after the phi1 edge, in ns.
    #[arg(long = "t-dhr-pre")]
    t_dhr_pre: Option<f64>,

    /// Data hold after the phi2 edge, in ns.
    #[arg(long = "t-dhr-post")]
    t_dhr_post: Option<f64>,

    /// Minimum data setup after phi2, in ns.
    #[arg(long = "t-mds")]
    t_mds: Option<f64>,

    /// Data strobe time before the end of the cycle, in ns.
    #[arg(long = "t-dsr")]
    t_dsr: Option<f64>,

    /// Chip select time before the end of the cycle, in ns.
    #[arg(long = "t-pcs")]
    t_pcs: Option<f64>,

    /// How to label ticks shared by several constraints.
    #[arg(long = "collision", value_enum)]
    collision: Option<CollisionArg>,

    /// Print only the diagram JSON.
    #[arg(long = "diagram-only", default_value_t = false)]
    diagram_only: bool,

    /// Pretty-print the diagram JSON.
    #[arg(long = "pretty", default_value_t = false)]
    pretty: bool,
}

impl Cli {
    /// Overlay command-line values on top of `config`.
    fn apply_overrides(&self, mut config: TimingConfig) -> TimingConfig {
        let r = &mut config.rates;
        let c = &mut config.constraints;

        let overrides = [
            (self.cpu_rate, &mut r.cpu_rate_mhz),
            (self.bus_rate, &mut r.bus_rate_mhz),
            (self.t_ads, &mut c.t_address_setup),
            (self.t_dhr_pre, &mut c.t_data_hold_pre),
            (self.t_dhr_post, &mut c.t_data_hold_post),
            (self.t_mds, &mut c.t_min_data_setup),
            (self.t_dsr, &mut c.t_data_strobe),
            (self.t_pcs, &mut c.t_chip_select),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }

        if let Some(policy) = self.collision {
            config.collision_policy = policy.into();
        }
        config
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<String> {
    let base = match &cli.config {
        Some(path) => TimingConfig::load_from_file(path)?,
        None => {
            warn!("No configuration file provided, using built-in reference values");
            TimingConfig::default()
        }
    };

    let config = cli.apply_overrides(base);
    config.validate().context("Invalid timing configuration")?;

    info!(
        cpu_rate_mhz = config.rates.cpu_rate_mhz,
        bus_rate_mhz = config.rates.bus_rate_mhz,
        collision_policy = ?config.collision_policy,
        "Configuration"
    );

    let schedule = ScheduleDeriver::new(config)
        .derive()
        .context("Failed to derive tick schedule")?;
    let diagram = Diagram::from_schedule(&schedule);

    if cli.diagram_only {
        let mut json = if cli.pretty {
            diagram.to_json_pretty()?
        } else {
            diagram.to_json()?
        };
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_document(&config, &schedule, &diagram, cli.pretty)?)
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the document.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(document) => print!("{document}"),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}
