// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use toast_queue::config;
use toast_queue::diagnostics::{generate_default_filename, BufferCapacity, DiagnosticsCollector};
use toast_queue::domain::{ToastLength, ToastRequest};
use toast_queue::paths;
use toast_queue::presenter::TerminalPresenter;
use toast_queue::scheduler::ToastScheduler;

const USAGE: &str = "\
Usage: toast-demo [OPTIONS] [MESSAGE...]

Shows each MESSAGE as a toast, one after the other.

Options:
  --short             Use short toasts (2s) instead of long ones (3.5s)
  --config-dir DIR    Read settings.toml from DIR
  --report            Write a JSON diagnostics report to the current directory
  --report-to FILE    Write the JSON diagnostics report to FILE
  -h, --help          Print this help";

/// Lifecycle events one toast can produce.
const EVENTS_PER_TOAST: usize = 6;

/// Shown instead of an empty message.
const PLACEHOLDER_MESSAGE: &str = "You need to set text to make a toast.";

struct Flags {
    short: bool,
    config_dir: Option<String>,
    report: Option<PathBuf>,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let short = args.contains("--short");
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let report = if args.contains("--report") {
        Some(PathBuf::from(generate_default_filename()))
    } else {
        args.opt_value_from_str("--report-to")?
    };
    let messages = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();

    Ok(Some(Flags {
        short,
        config_dir,
        report,
        messages,
    }))
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_override(flags.config_dir);
    let (config, warning) = config::load();
    if let Some(warning) = warning {
        eprintln!("[WARN] {warning}: using default style");
    }

    let mut messages = flags.messages;
    if messages.is_empty() {
        messages.push(String::new());
    }

    // Events are only drained once at the end, so the channel must hold them all.
    let mut collector = DiagnosticsCollector::with_channel_capacity(
        BufferCapacity::default(),
        messages.len() * EVENTS_PER_TOAST,
    );
    let toasts = match ToastScheduler::builder(TerminalPresenter::new())
        .style(config.style)
        .diagnostics(collector.handle())
        .build()
    {
        Ok(toasts) => toasts,
        Err(err) => {
            eprintln!("Failed to start scheduler: {err}");
            return ExitCode::FAILURE;
        }
    };

    let length = if flags.short {
        ToastLength::Short
    } else {
        ToastLength::Long
    };
    for message in messages {
        let message = if message.trim().is_empty() {
            PLACEHOLDER_MESSAGE.to_string()
        } else {
            message
        };
        toasts.submit(ToastRequest::new(message).length(length));
    }

    toasts.wait_idle().await;
    collector.process_pending();

    let summary = collector.summary();
    eprintln!(
        "{} queued, {} shown, {} dropped",
        summary.queued, summary.completed, summary.dropped
    );

    if let Some(path) = flags.report {
        if let Err(err) = collector.export_to_file(&path) {
            eprintln!("Failed to write report to {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("Report written to {}", path.display());
    }

    ExitCode::SUCCESS
}
