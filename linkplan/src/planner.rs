//! The interaction state machine.
//!
//! A [`Planner`] consumes [`Command`]s one at a time. Each command
//! runs to completion, mutating the [`Registry`], drawing on the
//! [`MapSurface`] and reporting [`Notice`]s, unless it needs the
//! user's input. In that case the command stops at a [`Prompt`],
//! which stays pending until a [`Command::Respond`] resolves it.

use crate::{
    registry::validate_frequency, LineColor, LinkId, LinkPlanError, LinkSummary, MapSurface,
    Registry, Selection, Toggle, TowerId, C,
};
use geo::Coord;
use log::{debug, info, warn};
use rfgeo::{DEFAULT_SEGMENTS, MIN_SEGMENTS};
use std::{collections::HashMap, fmt};

/// What a click on empty map does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Map clicks place towers.
    #[default]
    PlacingTower,

    /// Tower clicks pick pairs of towers to link.
    PlacingLink,
}

/// A user gesture, as delivered by the map or its surrounding UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetMode(Mode),

    /// Map clicked at a position.
    PlaceTowerAt(Coord<C>),

    /// Tower marker clicked.
    ToggleTowerSelection(TowerId),

    /// Link line clicked.
    ActivateLink(LinkId),

    DeleteTower(TowerId),

    DeleteLink(LinkId),

    /// Tower frequency edited.
    SetFrequency { tower: TowerId, frequency_ghz: C },

    /// Answer to the pending [`Prompt`].
    Respond(Response),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Filled in tower placement form.
    Placement { name: String, frequency_ghz: C },

    /// Answer to a yes/no confirmation.
    Confirm(bool),

    /// Form or dialog dismissed.
    Cancel,
}

/// Input the planner is waiting for.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Ask for a name and frequency for a tower at `position`.
    PlaceTower { position: Coord<C> },

    ConfirmDeleteTower {
        tower: TowerId,
        name: String,
        /// Number of links deleted along with the tower.
        links: usize,
    },

    ConfirmDeleteLink {
        link: LinkId,
        a_name: String,
        b_name: String,
    },

    /// Moving `tower` to `frequency_ghz` breaks `invalidated`.
    ConfirmFrequency {
        tower: TowerId,
        name: String,
        frequency_ghz: C,
        previous_ghz: C,
        invalidated: Vec<LinkId>,
    },
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::PlaceTower { position } => write!(
                f,
                "name and frequency (GHz) for a new tower at {:.5},{:.5}?",
                position.y, position.x
            ),
            Prompt::ConfirmDeleteTower { name, links, .. } => write!(
                f,
                "delete tower '{name}' and its {links} link(s)? this cannot be undone"
            ),
            Prompt::ConfirmDeleteLink { a_name, b_name, .. } => {
                write!(f, "delete the link between '{a_name}' and '{b_name}'?")
            }
            Prompt::ConfirmFrequency {
                name,
                frequency_ghz,
                invalidated,
                ..
            } => write!(
                f,
                "moving '{name}' to {frequency_ghz} GHz deletes {} link(s) on the old frequency, continue?",
                invalidated.len()
            ),
        }
    }
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A rejected operation; nothing changed.
    Error(LinkPlanError),

    TowerAdded(TowerId),

    TowerRemoved { tower: TowerId, links: Vec<LinkId> },

    LinkCreated(LinkId),

    LinkRemoved(LinkId),

    FrequencyChanged {
        tower: TowerId,
        frequency_ghz: C,
        removed: Vec<LinkId>,
    },

    /// An edit was rejected, any input showing the new value should
    /// go back to `frequency_ghz`.
    FrequencyReverted { tower: TowerId, frequency_ghz: C },

    ZoneActivated(LinkSummary),

    ZoneCleared(LinkId),
}

/// Result of handling one [`Command`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outcome {
    pub notices: Vec<Notice>,

    /// Set when the planner is waiting on the user.
    pub prompt: Option<Prompt>,
}

impl Outcome {
    pub fn errors(&self) -> impl Iterator<Item = &LinkPlanError> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::Error(e) => Some(e),
            _ => None,
        })
    }
}

pub struct Planner<M: MapSurface> {
    registry: Registry,
    surface: M,
    mode: Mode,
    selection: Selection,

    /// Prompt awaiting a response, blocks all other commands.
    pending: Option<Prompt>,

    /// Fresnel zone ellipse resolution.
    segments: usize,

    markers: HashMap<TowerId, M::Handle>,
    lines: HashMap<LinkId, M::Handle>,

    /// Active link and its zone polygon.
    zone: Option<(LinkId, M::Handle)>,
}

impl<M: MapSurface> Planner<M> {
    pub fn new(surface: M) -> Self {
        Self {
            registry: Registry::new(),
            surface,
            mode: Mode::default(),
            selection: Selection::default(),
            pending: None,
            segments: DEFAULT_SEGMENTS,
            markers: HashMap::new(),
            lines: HashMap::new(),
            zone: None,
        }
    }

    /// Number of vertices in Fresnel zone polygons (defaults to 64,
    /// never fewer than 3).
    #[must_use]
    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(MIN_SEGMENTS);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pending(&self) -> Option<&Prompt> {
        self.pending.as_ref()
    }

    /// Link whose Fresnel zone is shown, if any.
    pub fn active_zone(&self) -> Option<LinkId> {
        self.registry.active_zone()
    }

    /// Runs `command` to completion or to its next prompt.
    pub fn handle(&mut self, command: Command) -> Outcome {
        let mut out = Outcome::default();
        match (self.pending.take(), command) {
            (Some(prompt), Command::Respond(response)) => self.resolve(prompt, response, &mut out),
            (Some(prompt), command) => {
                warn!("ignoring {command:?} while waiting on: {prompt}");
                out.notices.push(Notice::Error(LinkPlanError::PromptPending));
                self.ask(prompt, &mut out);
            }
            (None, Command::Respond(response)) => {
                warn!("unsolicited response {response:?}");
                out.notices
                    .push(Notice::Error(LinkPlanError::UnexpectedResponse));
            }
            (None, Command::SetMode(mode)) => self.set_mode(mode),
            (None, Command::PlaceTowerAt(position)) => self.place_tower_at(position, &mut out),
            (None, Command::ToggleTowerSelection(tower)) => self.toggle_tower(tower, &mut out),
            (None, Command::ActivateLink(link)) => self.toggle_zone(link, &mut out),
            (None, Command::DeleteTower(tower)) => self.request_delete_tower(tower, &mut out),
            (None, Command::DeleteLink(link)) => self.request_delete_link(link, &mut out),
            (None, Command::SetFrequency {
                tower,
                frequency_ghz,
            }) => self.set_frequency(tower, frequency_ghz, &mut out),
        }
        out
    }
}

/// Private API.
impl<M: MapSurface> Planner<M> {
    fn ask(&mut self, prompt: Prompt, out: &mut Outcome) {
        debug!("prompting: {prompt}");
        out.prompt = Some(prompt.clone());
        self.pending = Some(prompt);
    }

    fn reject(err: LinkPlanError, out: &mut Outcome) {
        warn!("{err}");
        out.notices.push(Notice::Error(err));
    }

    fn resolve(&mut self, prompt: Prompt, response: Response, out: &mut Outcome) {
        match (prompt, response) {
            (
                Prompt::PlaceTower { position },
                Response::Placement {
                    name,
                    frequency_ghz,
                },
            ) => self.add_tower(position, &name, frequency_ghz, out),
            (Prompt::ConfirmDeleteTower { tower, .. }, Response::Confirm(true)) => {
                self.remove_tower(tower, out);
            }
            (Prompt::ConfirmDeleteLink { link, .. }, Response::Confirm(true)) => {
                self.remove_link(link, out);
            }
            (
                Prompt::ConfirmFrequency {
                    tower,
                    frequency_ghz,
                    ..
                },
                Response::Confirm(true),
            ) => self.apply_frequency(tower, frequency_ghz, out),
            (
                Prompt::ConfirmFrequency {
                    tower,
                    previous_ghz,
                    ..
                },
                Response::Confirm(false) | Response::Cancel,
            ) => {
                debug!("{tower} frequency edit abandoned");
                out.notices.push(Notice::FrequencyReverted {
                    tower,
                    frequency_ghz: previous_ghz,
                });
            }
            (
                prompt @ (Prompt::PlaceTower { .. }
                | Prompt::ConfirmDeleteTower { .. }
                | Prompt::ConfirmDeleteLink { .. }),
                Response::Confirm(false) | Response::Cancel,
            ) => debug!("cancelled: {prompt}"),
            (prompt, response) => {
                warn!("{response:?} does not answer: {prompt}");
                out.notices
                    .push(Notice::Error(LinkPlanError::UnexpectedResponse));
                self.ask(prompt, out);
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        self.clear_selection();
        if self.mode != mode {
            info!("mode {:?} -> {mode:?}", self.mode);
            self.mode = mode;
        }
    }

    fn place_tower_at(&mut self, position: Coord<C>, out: &mut Outcome) {
        if self.mode != Mode::PlacingTower {
            debug!("ignoring map click at {position:?} in {:?}", self.mode);
            return;
        }
        self.ask(Prompt::PlaceTower { position }, out);
    }

    fn add_tower(&mut self, position: Coord<C>, name: &str, frequency_ghz: C, out: &mut Outcome) {
        match self.registry.add_tower(position, name, frequency_ghz) {
            Ok(tower) => {
                let id = tower.id;
                let marker = self.surface.place_marker(tower.position, &tower.name);
                self.markers.insert(id, marker);
                out.notices.push(Notice::TowerAdded(id));
            }
            Err(e) => Self::reject(e, out),
        }
    }

    fn highlight(&mut self, tower: TowerId, selected: bool) {
        if let Some(marker) = self.markers.get(&tower) {
            self.surface.set_marker_selected(marker, selected);
        }
    }

    fn clear_selection(&mut self) {
        for tower in self.selection.clear() {
            self.highlight(tower, false);
        }
    }

    fn toggle_tower(&mut self, tower: TowerId, out: &mut Outcome) {
        if self.mode != Mode::PlacingLink {
            debug!("ignoring click on {tower} in {:?}", self.mode);
            return;
        }
        if self.registry.tower(tower).is_none() {
            debug!("ignoring click on unknown {tower}");
            return;
        }
        match self.selection.toggle(tower) {
            Toggle::Selected => self.highlight(tower, true),
            Toggle::Deselected => self.highlight(tower, false),
            Toggle::Pair(a, b) => {
                self.clear_selection();
                self.link(a, b, out);
            }
        }
    }

    fn link(&mut self, a: TowerId, b: TowerId, out: &mut Outcome) {
        let ends = match self.registry.create_link(a, b) {
            Ok(Some(link)) => (link.id, link.a, link.b),
            Ok(None) => return,
            Err(e) => return Self::reject(e, out),
        };
        let (id, a, b) = ends;
        if let (Some(a), Some(b)) = (self.registry.tower(a), self.registry.tower(b)) {
            let line = self.surface.draw_polyline([a.position, b.position]);
            self.lines.insert(id, line);
        }
        out.notices.push(Notice::LinkCreated(id));
    }

    fn toggle_zone(&mut self, link: LinkId, out: &mut Outcome) {
        let Some(summary) = self.registry.summary(link) else {
            debug!("ignoring click on unknown {link}");
            return;
        };
        let was_active = self.registry.active_zone() == Some(link);
        self.deactivate_zone(out);
        if was_active {
            return;
        }

        let points: Vec<Coord<C>> = summary
            .zone_ellipse()
            .segments(self.segments)
            .points(&self.surface)
            .collect();
        if !self.registry.set_active_zone(Some(link)) {
            return;
        }
        let polygon = self.surface.draw_polygon(&points);
        if let Some(line) = self.lines.get(&link) {
            self.surface.set_line_color(line, LineColor::Active);
        }
        self.zone = Some((link, polygon));
        info!(
            "showing zone of {link}: {:.3} km, {} GHz, radius {:.2} m",
            summary.distance_km, summary.frequency_ghz, summary.fresnel_radius_m
        );
        out.notices.push(Notice::ZoneActivated(summary));
    }

    fn deactivate_zone(&mut self, out: &mut Outcome) {
        self.registry.clear_active_zone();
        if let Some((link, polygon)) = self.zone.take() {
            self.surface.remove_layer(polygon);
            if let Some(line) = self.lines.get(&link) {
                self.surface.set_line_color(line, LineColor::Idle);
            }
            debug!("hid zone of {link}");
            out.notices.push(Notice::ZoneCleared(link));
        }
    }

    /// Removes the layers of an already deleted link.
    fn forget_link(&mut self, link: LinkId, out: &mut Outcome) {
        if let Some(line) = self.lines.remove(&link) {
            self.surface.remove_layer(line);
        }
        if matches!(self.zone, Some((active, _)) if active == link) {
            if let Some((_, polygon)) = self.zone.take() {
                self.surface.remove_layer(polygon);
            }
            out.notices.push(Notice::ZoneCleared(link));
        }
    }

    fn request_delete_tower(&mut self, tower: TowerId, out: &mut Outcome) {
        let Some(t) = self.registry.tower(tower) else {
            debug!("ignoring delete of unknown {tower}");
            return;
        };
        let prompt = Prompt::ConfirmDeleteTower {
            tower,
            name: t.name.clone(),
            links: self.registry.links_of(tower).count(),
        };
        self.ask(prompt, out);
    }

    fn remove_tower(&mut self, tower: TowerId, out: &mut Outcome) {
        let Some(removed) = self.registry.remove_tower(tower) else {
            return;
        };
        let links: Vec<LinkId> = removed.links.iter().map(|l| l.id).collect();
        for &link in &links {
            self.forget_link(link, out);
        }
        if self.selection.remove(tower) {
            debug!("dropped {tower} from selection");
        }
        if let Some(marker) = self.markers.remove(&tower) {
            self.surface.remove_layer(marker);
        }
        out.notices.push(Notice::TowerRemoved { tower, links });
    }

    fn request_delete_link(&mut self, link: LinkId, out: &mut Outcome) {
        let Some(summary) = self.registry.summary(link) else {
            debug!("ignoring delete of unknown {link}");
            return;
        };
        let prompt = Prompt::ConfirmDeleteLink {
            link,
            a_name: summary.a_name,
            b_name: summary.b_name,
        };
        self.ask(prompt, out);
    }

    fn remove_link(&mut self, link: LinkId, out: &mut Outcome) {
        if self.registry.remove_link(link).is_some() {
            self.forget_link(link, out);
            out.notices.push(Notice::LinkRemoved(link));
        }
    }

    #[allow(clippy::float_cmp)]
    fn set_frequency(&mut self, tower: TowerId, frequency_ghz: C, out: &mut Outcome) {
        let Some(t) = self.registry.tower(tower) else {
            debug!("ignoring frequency edit of unknown {tower}");
            return;
        };
        let (name, previous_ghz) = (t.name.clone(), t.frequency_ghz);
        if let Err(e) = validate_frequency(frequency_ghz) {
            Self::reject(e, out);
            out.notices.push(Notice::FrequencyReverted {
                tower,
                frequency_ghz: previous_ghz,
            });
            return;
        }
        if frequency_ghz == previous_ghz {
            debug!("{tower} already on {frequency_ghz} GHz");
            return;
        }
        let invalidated = self.registry.links_invalidated_by(tower, frequency_ghz);
        if invalidated.is_empty() {
            self.apply_frequency(tower, frequency_ghz, out);
        } else {
            let prompt = Prompt::ConfirmFrequency {
                tower,
                name,
                frequency_ghz,
                previous_ghz,
                invalidated,
            };
            self.ask(prompt, out);
        }
    }

    fn apply_frequency(&mut self, tower: TowerId, frequency_ghz: C, out: &mut Outcome) {
        match self.registry.set_tower_frequency(tower, frequency_ghz) {
            Ok(removed) => {
                let removed: Vec<LinkId> = removed.iter().map(|l| l.id).collect();
                for &link in &removed {
                    self.forget_link(link, out);
                }
                out.notices.push(Notice::FrequencyChanged {
                    tower,
                    frequency_ghz,
                    removed,
                });
            }
            Err(e) => Self::reject(e, out),
        }
    }
}
