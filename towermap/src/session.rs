//! Line-oriented gesture input.
//!
//! Each line of input is one gesture, the planner's prompts and
//! notices are written to stdout.

use crate::{canvas::Canvas, options::LatLon, report};
use anyhow::{anyhow, bail, Error as AnyError};
use linkplan::{Command, LinkId, Mode, Planner, Response, TowerId};
use log::info;
use std::io::{BufRead, Write};

const HELP: &str = "\
gestures:
  mode tower|link        switch between placing towers and linking them
  click <lat>,<lon>      click the map
  tower <id>             click a tower
  link <id>              click a link (toggles its Fresnel zone)
  delete-tower <id>      delete a tower and its links
  delete-link <id>       delete a link
  freq <id> <ghz>        edit a tower's frequency
  place <ghz> <name>     fill in the new tower form
  yes | no | cancel      answer a confirmation
  list                   list towers and links
  geojson                print the map as GeoJSON
  help                   show this text";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Command(Command),
    List,
    GeoJson,
    Help,
    Blank,
}

fn parse_id(word: Option<&str>) -> Result<u32, AnyError> {
    let word = word.ok_or_else(|| anyhow!("missing id"))?;
    Ok(word.trim_start_matches('#').parse()?)
}

fn parse_ghz(word: Option<&str>) -> Result<f64, AnyError> {
    let word = word.ok_or_else(|| anyhow!("missing frequency"))?;
    Ok(word.trim_end_matches("GHz").parse()?)
}

pub fn parse_line(line: &str) -> Result<Gesture, AnyError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Gesture::Blank);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut words = rest.split_whitespace();
    let command = match verb {
        "mode" => match words.next() {
            Some("tower") => Command::SetMode(Mode::PlacingTower),
            Some("link") => Command::SetMode(Mode::PlacingLink),
            other => bail!("unknown mode {other:?}, expected tower or link"),
        },
        "click" => {
            let LatLon(position) = rest.parse()?;
            Command::PlaceTowerAt(position)
        }
        "tower" => Command::ToggleTowerSelection(TowerId::from(parse_id(words.next())?)),
        "link" => Command::ActivateLink(LinkId::from(parse_id(words.next())?)),
        "delete-tower" => Command::DeleteTower(TowerId::from(parse_id(words.next())?)),
        "delete-link" => Command::DeleteLink(LinkId::from(parse_id(words.next())?)),
        "freq" => Command::SetFrequency {
            tower: TowerId::from(parse_id(words.next())?),
            frequency_ghz: parse_ghz(words.next())?,
        },
        "place" => {
            let frequency_ghz = parse_ghz(words.next())?;
            let name = words.collect::<Vec<_>>().join(" ");
            Command::Respond(Response::Placement {
                name,
                frequency_ghz,
            })
        }
        "yes" | "y" => Command::Respond(Response::Confirm(true)),
        "no" | "n" => Command::Respond(Response::Confirm(false)),
        "cancel" => Command::Respond(Response::Cancel),
        "list" => return Ok(Gesture::List),
        "geojson" => return Ok(Gesture::GeoJson),
        "help" => return Ok(Gesture::Help),
        other => bail!("unknown gesture '{other}', try 'help'"),
    };
    Ok(Gesture::Command(command))
}

fn list(planner: &Planner<Canvas>, out: &mut impl Write) -> Result<(), AnyError> {
    let registry = planner.registry();
    for tower in registry.towers() {
        writeln!(
            out,
            "{}: '{}' at {:.5},{:.5} on {} GHz",
            tower.id, tower.name, tower.position.y, tower.position.x, tower.frequency_ghz
        )?;
    }
    for link in registry.links() {
        let active = if registry.active_zone() == Some(link.id) {
            " [zone shown]"
        } else {
            ""
        };
        match registry.summary(link.id) {
            Some(summary) => writeln!(
                out,
                "{}: {}{active}",
                link.id,
                report::summary_text(&summary)
            )?,
            None => writeln!(out, "{}{active}", link.id)?,
        }
    }
    Ok(())
}

/// Feeds every line of `input` to `planner`, writing responses to
/// `out`.
///
/// Unparseable lines are reported and skipped.
pub fn run(
    planner: &mut Planner<Canvas>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), AnyError> {
    for line in input.lines() {
        let line = line?;
        let gesture = match parse_line(&line) {
            Ok(gesture) => gesture,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        match gesture {
            Gesture::Blank => {}
            Gesture::Help => writeln!(out, "{HELP}")?,
            Gesture::List => list(planner, out)?,
            Gesture::GeoJson => writeln!(
                out,
                "{}",
                serde_json::to_string(&planner.surface().feature_collection())?
            )?,
            Gesture::Command(command) => {
                info!("{command:?}");
                let outcome = planner.handle(command);
                for notice in &outcome.notices {
                    writeln!(out, "{}", report::notice_text(notice, planner.registry()))?;
                }
                if let Some(prompt) = &outcome.prompt {
                    writeln!(out, "{}", report::prompt_text(prompt))?;
                }
            }
        }
    }
    Ok(())
}
