//! # Link Planning
//!
//! `linkplan` keeps track of radio towers placed on a map and the
//! point-to-point links between them, and drives a map surface in
//! response to user gestures.
//!
//! The [`Registry`] owns towers and links and enforces their
//! invariants. The [`Planner`] is the interaction state machine that
//! turns [`Command`]s into registry mutations and [`MapSurface`]
//! calls.

mod error;
mod link;
mod planner;
mod registry;
mod selection;
mod summary;
mod surface;
mod tower;

pub use crate::{
    error::LinkPlanError,
    link::{Link, LinkId},
    planner::{Command, Mode, Notice, Outcome, Planner, Prompt, Response},
    registry::{Registry, RemovedTower},
    selection::{Selection, Toggle},
    summary::LinkSummary,
    surface::{LineColor, MapSurface},
    tower::{Tower, TowerId},
};
pub use rfgeo;

/// Floating point type used for all positions and frequencies.
pub type C = f64;
