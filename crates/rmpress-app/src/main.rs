// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rmpress -- virtual reMarkable printer application.
//
// Entry point. Initialises logging, builds the application context, and
// dispatches to the operator entry points. The `submit` subcommand drives
// the same hand-off path the hosting print framework invokes per spooled
// job; `login` and `doctor` manage the upload tool the hand-off depends on.

mod context;
mod doctor;

use std::path::PathBuf;
use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use rmpress_core::types::{JobTicket, DEVICE_URI_PREFIX};
use rmpress_driver::remarkable_driver;
use rmpress_handoff::process_job;

use context::AppContext;

#[derive(Parser)]
#[clap(
    name = "rmpress",
    version,
    about = "Virtual network printer that uploads print jobs to a reMarkable account"
)]
struct Cli {
    /// Path to a JSON configuration file.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hand one spooled document to the upload tool, as the print
    /// framework's job callback would.
    Submit {
        /// The spooled document file.
        file: PathBuf,
        /// Logical job name; the uploaded document is named after its
        /// final path component.
        #[clap(long)]
        job_name: Option<String>,
        /// Destination device URI (remarkable://host/folder). Defaults to
        /// the configured default folder.
        #[clap(long)]
        to: Option<String>,
    },
    /// Pair the upload tool with a reMarkable account (interactive).
    Login,
    /// Check that the upload tool is installed and holds a live session.
    Doctor,
    /// Show the driver capability record this application registers.
    Drivers,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let ctx = match AppContext::from_config_file(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "could not build application context");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Submit { file, job_name, to } => run_submit(&ctx, file, job_name, to),
        Commands::Login => run_login(&ctx),
        Commands::Doctor => run_doctor(&ctx),
        Commands::Drivers => run_drivers(&ctx),
    }
}

/// Drive the job hand-off for a single document.
fn run_submit(
    ctx: &AppContext,
    file: PathBuf,
    job_name: Option<String>,
    to: Option<String>,
) -> ExitCode {
    let job_name = job_name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into())
    });

    let device_uri = to.unwrap_or_else(|| {
        format!("{DEVICE_URI_PREFIX}cloud{}", ctx.config.default_folder)
    });

    let ticket = JobTicket::new(file, job_name, device_uri);

    if process_job(&ctx.config.upload_program, &ticket) {
        println!("uploaded: {}", ticket.job_name);
        ExitCode::SUCCESS
    } else {
        eprintln!("upload failed: {} (see log for details)", ticket.job_name);
        ExitCode::FAILURE
    }
}

/// Hand the terminal to the upload tool for account pairing. All
/// credential handling lives in the tool; rmpress only launches it.
fn run_login(ctx: &AppContext) -> ExitCode {
    let tool = &ctx.config.upload_program;
    info!(tool = %tool, "starting interactive account pairing");

    match Command::new(tool).status() {
        Ok(status) if status.success() => {
            println!("account paired -- print jobs will upload via {tool}");
            ExitCode::SUCCESS
        }
        Ok(status) => {
            error!(tool = %tool, %status, "upload tool exited with failure");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(tool = %tool, error = %e, "upload tool could not be started");
            eprintln!("{tool} is not installed or not on PATH");
            ExitCode::FAILURE
        }
    }
}

/// Print the diagnostic report.
fn run_doctor(ctx: &AppContext) -> ExitCode {
    let report = doctor::run_diagnostics(ctx);

    for step in &report.steps {
        let mark = if step.passed { "ok " } else { "FAIL" };
        println!("[{mark}] {}: {}", step.name, step.detail);
        if let Some(fix) = step.fix {
            println!("       fix: {fix}");
        }
    }
    println!("{}", report.summary);

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print the driver capability record.
fn run_drivers(ctx: &AppContext) -> ExitCode {
    let driver = remarkable_driver();

    println!(
        "system: {} (port {})",
        ctx.config.system_name, ctx.config.port
    );
    println!("driver: {} -- {}", driver.name, driver.make_and_model);
    println!("  formats: {}", driver.formats.join(", "));
    println!(
        "  media: {}",
        driver
            .media
            .iter()
            .map(|m| m.ipp_media_keyword())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  color: {}, duplex: {}", driver.color, driver.duplex);
    println!("  raster: {}", if driver.raster_supported { "yes" } else { "no" });

    ExitCode::SUCCESS
}
