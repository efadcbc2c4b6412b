// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftbell serve`: run the reminder on a cron schedule until stopped.
//!
//! The cron expression is evaluated in the reminder time zone, so
//! `0 20 * * *` fires at 20:00 local time. A failed run is logged and the
//! loop waits for the next fire time. SIGINT or SIGTERM stops the loop.

use chrono::{DateTime, FixedOffset, Utc};
use croner::Cron;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use shiftbell_config::ShiftbellConfig;
use shiftbell_core::ShiftbellError;

use crate::app::App;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `general.log_level`. Output goes to
/// stderr so command output on stdout stays clean.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shiftbell={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

pub fn parse_cron(expr: &str) -> Result<Cron, ShiftbellError> {
    expr.parse::<Cron>()
        .map_err(|e| ShiftbellError::Config(format!("invalid schedule.cron `{expr}`: {e}")))
}

/// Next fire time strictly after `now`, evaluated in `tz`.
pub fn next_fire(
    cron: &Cron,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> Result<DateTime<Utc>, ShiftbellError> {
    cron.find_next_occurrence(&now.with_timezone(&tz), false)
        .map(|next| next.with_timezone(&Utc))
        .map_err(|e| ShiftbellError::Internal(format!("no upcoming cron occurrence: {e}")))
}

/// Cancelled on SIGINT (Ctrl+C) or, on unix, SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), stopping"),
                        _ = sigterm.recv() => info!("received SIGTERM, stopping"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), stopping");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, stopping");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

pub async fn run_serve(config: ShiftbellConfig) -> Result<(), ShiftbellError> {
    let cron = parse_cron(&config.schedule.cron)?;
    let app = App::open(config).await?;
    let reminder = app.reminder()?;
    let tz = reminder.settings().timezone;

    info!(
        cron = %app.config.schedule.cron,
        timezone = %tz,
        window = %reminder.settings().window,
        "starting shiftbell serve"
    );

    let cancel = install_signal_handler();

    loop {
        let now = Utc::now();
        let next = next_fire(&cron, now, tz)?;
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next = %next.with_timezone(&tz).to_rfc3339(), "next reminder run scheduled");

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }

        // Failures are logged inside the handler; keep the schedule going.
        let response = reminder.handle_scheduled().await;
        info!(status = response.status_code, message = %response.message, "reminder run finished");
    }

    app.shutdown().await?;
    info!("shiftbell serve stopped");
    Ok(())
}
