//! Foreground timer loop.
//!
//! One tokio interval drives `tick()` once per second; stdin lines carry
//! the user intents and Ctrl-C exits. All engine mutation happens inside
//! the single `select!` loop, so a pause or reset is in effect before any
//! later tick fires.

use std::io::Write as _;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use pomoclock_core::{AlertSink, Config, Event, NullAlert, TimerEngine};

#[derive(Args)]
pub struct RunArgs {
    /// Session length in minutes (overrides config)
    #[arg(long, value_name = "MIN", value_parser = clap::value_parser!(u64).range(1..=60))]
    session: Option<u64>,
    /// Break length in minutes (overrides config)
    #[arg(long = "break", value_name = "MIN", value_parser = clap::value_parser!(u64).range(1..=60))]
    break_length: Option<u64>,
    /// Start counting down immediately instead of paused
    #[arg(long)]
    start: bool,
    /// Advance the timer by N ticks without sleeping, print the emitted
    /// events and a final snapshot as JSON, then exit (implies --start)
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,
    /// Print events and snapshots as JSON instead of a status line
    #[arg(long)]
    json: bool,
}

/// Terminal-bell alert sink. There is nothing to rewind for the bell, so
/// `rewind` only needs to exist to satisfy the stop-and-rewind contract.
struct BellAlert {
    enabled: bool,
}

impl AlertSink for BellAlert {
    fn play(&mut self) {
        if self.enabled {
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
    }

    fn rewind(&mut self) {}
}

pub fn run(args: RunArgs) -> pomoclock_core::Result<()> {
    let config = Config::load_or_default();
    let session = args.session.unwrap_or(config.timer.session_length);
    let break_min = args.break_length.unwrap_or(config.timer.break_length);
    let mut engine = TimerEngine::with_lengths(session, break_min);

    if let Some(n) = args.ticks {
        engine.start();
        return simulate(&mut engine, n);
    }

    if args.start {
        engine.start();
    }
    // JSON mode keeps the stream clean of bell bytes.
    let alert: Box<dyn AlertSink> = if args.json {
        Box::new(NullAlert)
    } else {
        Box::new(BellAlert {
            enabled: config.notifications.enabled && config.notifications.bell,
        })
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(interactive(&mut engine, alert, args.json))
}

/// Drive the engine by `n` immediate ticks. Deterministic mode for
/// scripting and tests; no wall clock involved.
fn simulate(engine: &mut TimerEngine, n: u64) -> pomoclock_core::Result<()> {
    for _ in 0..n {
        if let Some(event) = engine.tick() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

async fn interactive(
    engine: &mut TimerEngine,
    mut alert: Box<dyn AlertSink>,
    json: bool,
) -> pomoclock_core::Result<()> {
    if !json {
        println!("commands: s start/pause, r reset, +s/-s/+b/-b adjust lengths, q quit");
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick resolves immediately; consume it so the
    // countdown starts a full second from now.
    interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(engine, json)?;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(event) = engine.tick() {
                    if event.is_alert() {
                        alert.play();
                    }
                    report(&event, json)?;
                }
                draw(engine, json)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // stdin closed
                };
                let event = match line.trim() {
                    "q" => break,
                    "s" | "" => engine.toggle(),
                    "r" => {
                        let event = engine.reset();
                        alert.rewind();
                        Some(event)
                    }
                    "+s" => engine.increment_session(),
                    "-s" => engine.decrement_session(),
                    "+b" => engine.increment_break(),
                    "-b" => engine.decrement_break(),
                    _ => None,
                };
                if let Some(event) = event {
                    report(&event, json)?;
                }
                draw(engine, json)?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if !json {
        println!();
    }
    Ok(())
}

fn report(event: &Event, json: bool) -> pomoclock_core::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::SessionCompleted { .. } => println!("\nsession complete, break starts"),
        Event::BreakCompleted { .. } => println!("\nbreak complete, next session ready"),
        Event::TimerReset { .. } => println!("\ntimer reset"),
        _ => {}
    }
    Ok(())
}

fn draw(engine: &TimerEngine, json: bool) -> pomoclock_core::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&engine.snapshot())?);
        return Ok(());
    }
    let marker = if engine.is_paused() { " (paused)" } else { "" };
    print!(
        "\r{:<7} {}{:<10}",
        engine.phase().label(),
        engine.display(),
        marker
    );
    std::io::stdout().flush()?;
    Ok(())
}
