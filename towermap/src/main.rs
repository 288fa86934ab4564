mod canvas;
mod options;
mod report;
mod session;

use anyhow::{anyhow, Error as AnyError};
use canvas::Canvas;
use clap::Parser;
use geo::Coord;
use linkplan::{Command, LinkSummary, Mode, Notice, Outcome, Planner, Response, TowerId};
use options::{Cli, Command as CliCmd, LatLon, Output};

fn main() -> Result<(), AnyError> {
    let Cli { segments, cmd } = Cli::parse();

    env_logger::init();

    let mut planner = Planner::new(Canvas::default()).segments(segments);

    match cmd {
        CliCmd::Session => {
            let stdin = std::io::stdin().lock();
            let mut stdout = std::io::stdout().lock();
            session::run(&mut planner, stdin, &mut stdout)
        }
        CliCmd::Link {
            start: LatLon(start),
            dest: LatLon(dest),
            freq,
            samples,
            out,
        } => {
            let summary = analyze(&mut planner, start, dest, freq)?;
            match out {
                Output::Summary => {
                    report::print_summary(&summary);
                    Ok(())
                }
                Output::Json => report::print_json(&summary, planner.surface()),
                Output::Geojson => report::print_geojson(planner.surface()),
                Output::Csv => report::print_csv(&summary, samples),
                Output::Plot => {
                    report::plot_ascii(&summary, samples);
                    Ok(())
                }
            }
        }
    }
}

/// Fails with the first error reported in `outcome`.
fn check(outcome: Outcome) -> Result<Outcome, AnyError> {
    if let Some(e) = outcome.errors().next() {
        return Err(e.clone().into());
    }
    Ok(outcome)
}

fn place(
    planner: &mut Planner<Canvas>,
    position: Coord<f64>,
    name: &str,
    frequency_ghz: f64,
) -> Result<TowerId, AnyError> {
    check(planner.handle(Command::PlaceTowerAt(position)))?;
    check(planner.handle(Command::Respond(Response::Placement {
        name: name.to_string(),
        frequency_ghz,
    })))?
    .notices
    .into_iter()
    .find_map(|notice| match notice {
        Notice::TowerAdded(id) => Some(id),
        _ => None,
    })
    .ok_or_else(|| anyhow!("{name} was not placed"))
}

/// Places towers at `start` and `dest`, links them and shows the
/// link's Fresnel zone.
fn analyze(
    planner: &mut Planner<Canvas>,
    start: Coord<f64>,
    dest: Coord<f64>,
    frequency_ghz: f64,
) -> Result<LinkSummary, AnyError> {
    let a = place(planner, start, "start", frequency_ghz)?;
    let b = place(planner, dest, "dest", frequency_ghz)?;

    planner.handle(Command::SetMode(Mode::PlacingLink));
    check(planner.handle(Command::ToggleTowerSelection(a)))?;
    let link = check(planner.handle(Command::ToggleTowerSelection(b)))?
        .notices
        .into_iter()
        .find_map(|notice| match notice {
            Notice::LinkCreated(id) => Some(id),
            _ => None,
        })
        .ok_or_else(|| anyhow!("towers were not linked"))?;

    check(planner.handle(Command::ActivateLink(link)))?
        .notices
        .into_iter()
        .find_map(|notice| match notice {
            Notice::ZoneActivated(summary) => Some(summary),
            _ => None,
        })
        .ok_or_else(|| anyhow!("no zone for {link}"))
}
