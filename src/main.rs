/*
 *  main.rs
 *
 *  ambient-indication
 *	(c) 2020-26 Stuart Hunter
 *
 *	Reads host events from stdin and drives the indication engine
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::time::Duration;
use log::{info, error, warn};
use env_logger::Env;
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(unix)] // Only compile this block on Unix-like systems
use tokio::signal::unix::{signal, SignalKind}; // Import specific Unix signals

use ambient_indication::config;
use ambient_indication::events::{self, Event};
use ambient_indication::indication::console::{logging_host, LogRenderer, PulseFlag};
use ambient_indication::indication::AmbientIndication;
use ambient_indication::timer::MonotonicClock;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for a SIGINT, SIGTERM, or SIGHUP signal.
#[cfg(unix)]
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

/// Sleep until the next ticker deadline, forever when nothing is scheduled
async fn ticker_wait(wait: Option<Duration>) {
    match wait {
        Some(d) => tokio::time::sleep(d).await,
        None => std::future::pending::<()>().await,
    }
}

fn dispatch(engine: &mut AmbientIndication, pulsing: &PulseFlag, event: Event) {
    if let Event::Pulse { pulsing: p, .. } = &event {
        pulsing.set(*p);
    }
    match event {
        Event::RendererReady => engine.attach_renderer(Box::new(LogRenderer::new())),
        other => other.apply(engine),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level())).init();
    info!("ambient-indication v{} (built {})", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let ticker = cfg.ticker_config();
    info!(
        "Ticker delay {:?}, marquee repeats {}, always-on {}, wake trigger {}",
        ticker.delay,
        ticker.marquee_repeat_limit,
        cfg.always_on(),
        cfg.wake_trigger()
    );

    let pulsing = PulseFlag::new();
    let host = logging_host(cfg.always_on(), cfg.wake_trigger(), pulsing.clone());
    let mut engine = AmbientIndication::new(host, ticker, Box::new(MonotonicClock::new()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        let wait = engine.time_until_next_timer();
        tokio::select! {
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("Signal handler failed: {}", e);
                }
                return Ok(());
            }
            _ = ticker_wait(wait) => {
                engine.fire_due_timers();
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => match events::parse_event(&line) {
                        Ok(Some(event)) => dispatch(&mut engine, &pulsing, event),
                        Ok(None) => {}
                        Err(e) => warn!("Ignoring event line {:?}: {}", line, e),
                    },
                    None => {
                        info!("Event stream closed");
                        break;
                    }
                }
            }
        }
    }

    // let a scheduled marquee land before exiting
    while let Some(wait) = engine.time_until_next_timer() {
        tokio::time::sleep(wait).await;
        engine.fire_due_timers();
    }
    Ok(())
}
