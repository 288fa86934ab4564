//! Tower and link bookkeeping.
//!
//! After every mutation the registry guarantees that:
//!
//! - tower and link ids are unique and never reused,
//! - no two links join the same (unordered) pair of towers,
//! - every link's ends exist, and
//! - at most one link has its Fresnel zone active.

use crate::{LinkPlanError, Link, LinkId, LinkSummary, Tower, TowerId, C};
use geo::Coord;
use log::{debug, info};
use rfgeo::distance_km;

/// A tower together with the links its removal took down.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedTower {
    pub tower: Tower,
    pub links: Vec<Link>,
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    /// Towers, in placement order.
    towers: Vec<Tower>,

    /// Links, in creation order.
    links: Vec<Link>,

    /// Last assigned tower id.
    last_tower: u32,

    /// Last assigned link id.
    last_link: u32,

    /// Link whose Fresnel zone is currently shown.
    active_zone: Option<LinkId>,
}

/// Returns an error unless `frequency_ghz` is a positive, finite
/// number.
pub(crate) fn validate_frequency(frequency_ghz: C) -> Result<(), LinkPlanError> {
    if frequency_ghz.is_finite() && frequency_ghz > 0.0 {
        Ok(())
    } else {
        Err(LinkPlanError::Validation(format!(
            "frequency must be a positive number of GHz, got {frequency_ghz}"
        )))
    }
}

fn validate_position(Coord { x, y }: Coord<C>) -> Result<(), LinkPlanError> {
    if x.is_finite() && (-90.0..=90.0).contains(&y) {
        Ok(())
    } else {
        Err(LinkPlanError::Validation(format!(
            "invalid position (lat {y}, lon {x})"
        )))
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn tower(&self, id: TowerId) -> Option<&Tower> {
        self.towers.iter().find(|t| t.id == id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Returns every link with `tower` as one of its ends.
    pub fn links_of(&self, tower: TowerId) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |l| l.touches(tower))
    }

    /// Returns the link joining `a` and `b`, in either direction.
    pub fn link_between(&self, a: TowerId, b: TowerId) -> Option<&Link> {
        self.links.iter().find(|l| l.joins(a, b))
    }

    /// Link whose Fresnel zone is active, if any.
    pub fn active_zone(&self) -> Option<LinkId> {
        self.active_zone
    }

    /// Places a new tower.
    pub fn add_tower(
        &mut self,
        position: Coord<C>,
        name: &str,
        frequency_ghz: C,
    ) -> Result<&Tower, LinkPlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LinkPlanError::Validation(
                "tower name must not be empty".to_string(),
            ));
        }
        validate_frequency(frequency_ghz)?;
        validate_position(position)?;

        self.last_tower += 1;
        let id = TowerId(self.last_tower);
        info!("adding {id} '{name}' at {position:?} on {frequency_ghz} GHz");
        let idx = self.towers.len();
        self.towers.push(Tower {
            id,
            name: name.to_string(),
            frequency_ghz,
            position,
        });
        Ok(&self.towers[idx])
    }

    /// Removes a tower and every link touching it.
    ///
    /// Returns `None`, changing nothing, if there is no such tower.
    pub fn remove_tower(&mut self, id: TowerId) -> Option<RemovedTower> {
        let idx = self.towers.iter().position(|t| t.id == id)?;
        let doomed: Vec<LinkId> = self.links_of(id).map(|l| l.id).collect();
        let links = doomed
            .into_iter()
            .filter_map(|link| self.remove_link(link))
            .collect::<Vec<_>>();
        let tower = self.towers.remove(idx);
        info!(
            "removed {id} '{}' and {} link(s)",
            tower.name,
            links.len()
        );
        Some(RemovedTower { tower, links })
    }

    /// Links towers `a` and `b`.
    ///
    /// Frequencies must match exactly. Returns `Ok(None)`, changing
    /// nothing, if either tower is gone.
    #[allow(clippy::float_cmp)]
    pub fn create_link(
        &mut self,
        a: TowerId,
        b: TowerId,
    ) -> Result<Option<&Link>, LinkPlanError> {
        if a == b {
            return Err(LinkPlanError::Validation(format!(
                "cannot link {a} to itself"
            )));
        }
        let (Some(tower_a), Some(tower_b)) = (self.tower(a), self.tower(b)) else {
            debug!("not linking {a} and {b}, tower missing");
            return Ok(None);
        };
        if self.link_between(a, b).is_some() {
            return Err(LinkPlanError::DuplicateLink { a, b });
        }
        if tower_a.frequency_ghz != tower_b.frequency_ghz {
            return Err(LinkPlanError::FrequencyMismatch {
                a,
                a_ghz: tower_a.frequency_ghz,
                b,
                b_ghz: tower_b.frequency_ghz,
            });
        }

        let frequency_ghz = tower_a.frequency_ghz;
        let distance_km = distance_km(tower_a.position, tower_b.position);
        self.last_link += 1;
        let id = LinkId(self.last_link);
        info!("linking {a} and {b} as {id}, {distance_km:.3} km on {frequency_ghz} GHz");
        let idx = self.links.len();
        self.links.push(Link {
            id,
            a,
            b,
            frequency_ghz,
            distance_km,
        });
        Ok(Some(&self.links[idx]))
    }

    /// Removes a link, deactivating its Fresnel zone if shown.
    ///
    /// Returns `None`, changing nothing, if there is no such link.
    pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
        let idx = self.links.iter().position(|l| l.id == id)?;
        if self.active_zone == Some(id) {
            debug!("clearing active zone of {id}");
            self.active_zone = None;
        }
        let link = self.links.remove(idx);
        info!("removed {id}");
        Some(link)
    }

    /// Returns the links that would join towers on different
    /// frequencies if `tower` moved to `frequency_ghz`.
    #[allow(clippy::float_cmp)]
    pub fn links_invalidated_by(&self, tower: TowerId, frequency_ghz: C) -> Vec<LinkId> {
        self.links_of(tower)
            .filter(|link| {
                link.other_end(tower)
                    .and_then(|other| self.tower(other))
                    .map_or(true, |other| other.frequency_ghz != frequency_ghz)
            })
            .map(|link| link.id)
            .collect()
    }

    /// Moves `tower` to `frequency_ghz`, removing every link that
    /// [`Registry::links_invalidated_by`] reports.
    ///
    /// Returns the removed links, or none at all for an unknown tower.
    pub fn set_tower_frequency(
        &mut self,
        tower: TowerId,
        frequency_ghz: C,
    ) -> Result<Vec<Link>, LinkPlanError> {
        validate_frequency(frequency_ghz)?;
        if self.tower(tower).is_none() {
            debug!("not retuning unknown {tower}");
            return Ok(Vec::new());
        }
        let removed = self
            .links_invalidated_by(tower, frequency_ghz)
            .into_iter()
            .filter_map(|link| self.remove_link(link))
            .collect::<Vec<_>>();
        if let Some(t) = self.towers.iter_mut().find(|t| t.id == tower) {
            info!(
                "{tower} frequency {} -> {frequency_ghz} GHz, dropped {} link(s)",
                t.frequency_ghz,
                removed.len()
            );
            t.frequency_ghz = frequency_ghz;
        }
        Ok(removed)
    }

    /// Marks `link` as the one whose Fresnel zone is shown, or clears
    /// the mark with `None`.
    ///
    /// Returns `false`, changing nothing, if the link is gone.
    pub fn set_active_zone(&mut self, link: Option<LinkId>) -> bool {
        if let Some(id) = link {
            if self.link(id).is_none() {
                debug!("not showing zone of unknown {id}");
                return false;
            }
        }
        self.active_zone = link;
        true
    }

    /// Clears the active zone mark, returning the link that had it.
    pub fn clear_active_zone(&mut self) -> Option<LinkId> {
        self.active_zone.take()
    }

    /// Returns the details shown for `link`.
    pub fn summary(&self, link: LinkId) -> Option<LinkSummary> {
        let link = self.link(link)?;
        let a = self.tower(link.a)?;
        let b = self.tower(link.b)?;
        Some(LinkSummary::new(link, a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::{LinkId, LinkPlanError, TowerId};
    use approx::assert_relative_eq;
    use geo::coord;
    use std::collections::HashSet;

    /// Asserts the registry's documented invariants.
    fn assert_consistent(registry: &Registry) {
        let tower_ids: HashSet<_> = registry.towers().iter().map(|t| t.id).collect();
        assert_eq!(tower_ids.len(), registry.towers().len());
        let link_ids: HashSet<_> = registry.links().iter().map(|l| l.id).collect();
        assert_eq!(link_ids.len(), registry.links().len());
        let mut pairs = HashSet::new();
        for link in registry.links() {
            assert!(tower_ids.contains(&link.a));
            assert!(tower_ids.contains(&link.b));
            assert!(pairs.insert((link.a.min(link.b), link.a.max(link.b))));
        }
        if let Some(active) = registry.active_zone() {
            assert!(link_ids.contains(&active));
        }
    }

    fn three_towers() -> (Registry, TowerId, TowerId, TowerId) {
        let mut registry = Registry::new();
        let a = registry
            .add_tower(coord! { x: -71.30, y: 44.27 }, "Summit", 5.0)
            .unwrap()
            .id;
        let b = registry
            .add_tower(coord! { x: -71.06, y: 42.36 }, "Harbor", 5.0)
            .unwrap()
            .id;
        let c = registry
            .add_tower(coord! { x: -70.90, y: 42.50 }, "Point", 5.0)
            .unwrap()
            .id;
        (registry, a, b, c)
    }

    fn link(registry: &mut Registry, a: TowerId, b: TowerId) -> LinkId {
        registry.create_link(a, b).unwrap().unwrap().id
    }

    #[test]
    fn test_add_tower_assigns_increasing_ids() {
        let (registry, a, b, c) = three_towers();
        assert_eq!((a.get(), b.get(), c.get()), (1, 2, 3));
        let names: Vec<_> = registry.towers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Summit", "Harbor", "Point"]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (mut registry, _, _, c) = three_towers();
        registry.remove_tower(c).unwrap();
        let d = registry
            .add_tower(coord! { x: 0.0, y: 0.0 }, "Fresh", 2.4)
            .unwrap()
            .id;
        assert_eq!(d.get(), 4);
    }

    #[test]
    fn test_add_tower_validation() {
        let mut registry = Registry::new();
        let origin = coord! { x: 0.0, y: 0.0 };
        for (name, freq) in [("", 5.0), ("   ", 5.0), ("A", 0.0), ("A", -1.0), ("A", f64::NAN)] {
            assert!(matches!(
                registry.add_tower(origin, name, freq),
                Err(LinkPlanError::Validation(_))
            ));
        }
        assert!(matches!(
            registry.add_tower(coord! { x: 0.0, y: 91.0 }, "A", 5.0),
            Err(LinkPlanError::Validation(_))
        ));
        assert!(registry.towers().is_empty());
    }

    #[test]
    fn test_create_link_computes_distance() {
        let (mut registry, a, b, _) = three_towers();
        let link = registry.create_link(a, b).unwrap().unwrap().clone();
        assert_eq!(link.frequency_ghz, 5.0);
        let expected = rfgeo::distance_km(
            registry.tower(a).unwrap().position,
            registry.tower(b).unwrap().position,
        );
        assert_relative_eq!(link.distance_km, expected);
        assert_consistent(&registry);
    }

    #[test]
    fn test_frequency_mismatch() {
        let mut registry = Registry::new();
        let a = registry
            .add_tower(coord! { x: 0.0, y: 0.0 }, "A", 5.0)
            .unwrap()
            .id;
        let b = registry
            .add_tower(coord! { x: 0.1, y: 0.0 }, "B", 5.1)
            .unwrap()
            .id;
        assert!(matches!(
            registry.create_link(a, b),
            Err(LinkPlanError::FrequencyMismatch { .. })
        ));
        assert!(registry.links().is_empty());
    }

    #[test]
    fn test_duplicate_link_in_either_direction() {
        let (mut registry, a, b, _) = three_towers();
        link(&mut registry, a, b);
        assert_eq!(
            registry.create_link(a, b).unwrap_err(),
            LinkPlanError::DuplicateLink { a, b }
        );
        assert_eq!(
            registry.create_link(b, a).unwrap_err(),
            LinkPlanError::DuplicateLink { a: b, b: a }
        );
        assert_eq!(registry.links().len(), 1);
    }

    #[test]
    fn test_self_link_and_missing_tower() {
        let (mut registry, a, _, _) = three_towers();
        assert!(matches!(
            registry.create_link(a, a),
            Err(LinkPlanError::Validation(_))
        ));
        assert_eq!(registry.create_link(a, TowerId(42)), Ok(None));
        assert_eq!(registry.create_link(TowerId(42), a), Ok(None));
        assert!(registry.links().is_empty());
    }

    #[test]
    fn test_remove_tower_cascades() {
        let (mut registry, a, b, c) = three_towers();
        let ab = link(&mut registry, a, b);
        let ac = link(&mut registry, a, c);
        let bc = link(&mut registry, b, c);
        assert!(registry.set_active_zone(Some(ac)));

        let removed = registry.remove_tower(a).unwrap();
        assert_eq!(removed.tower.id, a);
        let mut gone: Vec<_> = removed.links.iter().map(|l| l.id).collect();
        gone.sort();
        assert_eq!(gone, [ab, ac]);
        assert_eq!(registry.links().len(), 1);
        assert_eq!(registry.links()[0].id, bc);
        assert_eq!(registry.active_zone(), None);
        assert_consistent(&registry);
    }

    #[test]
    fn test_removing_missing_ids_is_a_noop() {
        let (mut registry, a, b, _) = three_towers();
        link(&mut registry, a, b);
        assert!(registry.remove_tower(TowerId(99)).is_none());
        assert!(registry.remove_link(LinkId(99)).is_none());
        assert_eq!(registry.towers().len(), 3);
        assert_eq!(registry.links().len(), 1);
    }

    #[test]
    fn test_remove_link_clears_active_zone() {
        let (mut registry, a, b, c) = three_towers();
        let ab = link(&mut registry, a, b);
        let bc = link(&mut registry, b, c);
        assert!(registry.set_active_zone(Some(bc)));
        registry.remove_link(ab);
        assert_eq!(registry.active_zone(), Some(bc));
        registry.remove_link(bc);
        assert_eq!(registry.active_zone(), None);
    }

    #[test]
    fn test_active_zone_requires_link() {
        let (mut registry, a, b, _) = three_towers();
        let ab = link(&mut registry, a, b);
        assert!(registry.set_active_zone(Some(ab)));
        assert!(!registry.set_active_zone(Some(LinkId(99))));
        assert_eq!(registry.active_zone(), Some(ab));
        assert!(registry.set_active_zone(None));
        assert_eq!(registry.active_zone(), None);
    }

    #[test]
    fn test_links_invalidated_by() {
        let (mut registry, a, b, c) = three_towers();
        let ab = link(&mut registry, a, b);
        let ac = link(&mut registry, a, c);
        link(&mut registry, b, c);
        let mut invalidated = registry.links_invalidated_by(a, 2.4);
        invalidated.sort();
        assert_eq!(invalidated, [ab, ac]);
        assert!(registry.links_invalidated_by(a, 5.0).is_empty());
    }

    #[test]
    fn test_set_tower_frequency_cascades() {
        let (mut registry, a, b, c) = three_towers();
        link(&mut registry, a, b);
        let bc = link(&mut registry, b, c);
        let removed = registry.set_tower_frequency(a, 2.4).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(registry.tower(a).unwrap().frequency_ghz, 2.4);
        assert_eq!(registry.links().len(), 1);
        assert_eq!(registry.links()[0].id, bc);
        assert_consistent(&registry);
    }

    #[test]
    fn test_set_tower_frequency_rejects_bad_input() {
        let (mut registry, a, b, _) = three_towers();
        link(&mut registry, a, b);
        assert!(matches!(
            registry.set_tower_frequency(a, 0.0),
            Err(LinkPlanError::Validation(_))
        ));
        assert_eq!(registry.set_tower_frequency(TowerId(9), 1.0), Ok(Vec::new()));
        assert_eq!(registry.tower(a).unwrap().frequency_ghz, 5.0);
        assert_eq!(registry.links().len(), 1);
    }

    #[test]
    fn test_link_frequency_is_a_snapshot() {
        let (mut registry, a, b, _) = three_towers();
        let ab = link(&mut registry, a, b);
        registry.set_tower_frequency(a, 5.0).unwrap();
        assert_eq!(registry.link(ab).unwrap().frequency_ghz, 5.0);
    }
}
