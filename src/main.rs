//! Chessboard controller (default binary).
//!
//! `chessy console` takes squares typed as `e2`, `e4`; `chessy sim` treats each
//! typed square as lifting or placing a piece on a simulated sensor board and
//! gates play (and every reset) on the standard setup. Logs go to stderr (`RUST_LOG` filters).

use std::io::{self, BufReader};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chessy::core::{Board, DisplaySink, InputSource, MockSensor};
use chessy::engine::{parse_run_args, Config, Journal, Mode, RunSummary, Runner};
use chessy::input::{ConsoleInput, LineFeed, SimulatedBoard};
use chessy::term::{ColumnOrder, TermDisplay};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("chessy=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_run_args(&args, Config::from_env())?;
    tracing::info!(
        mode = config.mode.as_str(),
        mirrored = config.mirrored(),
        color = config.color,
        "chessy starting"
    );

    let order = if config.mirrored() {
        ColumnOrder::Mirrored
    } else {
        ColumnOrder::Normal
    };
    let display = TermDisplay::new(io::stdout())
        .with_order(order)
        .with_color(config.color);
    let feed = LineFeed::spawn(BufReader::new(io::stdin()));

    let summary = match config.mode {
        Mode::Console => {
            let input = ConsoleInput::new(feed).with_timeout(config.turn_timeout);
            build_runner(input, display, &config)?.run()?
        }
        Mode::Sim => {
            let sensor = MockSensor::new(Board::new().occupancy());
            let input = SimulatedBoard::new(feed, sensor).with_timeout(config.turn_timeout);
            build_runner(input, display, &config)?.run_with_setup()?
        }
    };

    report(&summary);
    Ok(())
}

fn build_runner<I, D>(input: I, display: D, config: &Config) -> Result<Runner<I, D>>
where
    I: InputSource,
    D: DisplaySink,
{
    let mut runner = Runner::new(input, display).with_config(config);
    if let Some(path) = &config.journal_path {
        runner = runner.with_journal(Journal::open(path)?);
        tracing::info!(path = %path.display(), "journaling moves");
    }
    Ok(runner)
}

fn report(summary: &RunSummary) {
    println!("Game over after {} move(s) ({:?})", summary.moves, summary.exit);
}
