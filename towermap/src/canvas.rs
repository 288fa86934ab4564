//! In-memory map surface.
//!
//! Keeps every drawn layer so a session can be exported as GeoJSON.

use geo::Coord;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use linkplan::{LineColor, MapSurface, C};
use log::{debug, warn};
use rfgeo::{Projection, WebMercator};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker {
        position: Coord<C>,
        label: String,
        selected: bool,
    },
    Line {
        ends: [Coord<C>; 2],
        color: LineColor,
    },
    Polygon(Vec<Coord<C>>),
}

#[derive(Debug, Default)]
pub struct Canvas {
    /// Last assigned layer handle.
    last: u64,

    /// Live layers, in drawing order.
    layers: BTreeMap<u64, Layer>,
}

fn position(Coord { x, y }: Coord<C>) -> Vec<f64> {
    vec![x, y]
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl Canvas {
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    fn insert(&mut self, layer: Layer) -> u64 {
        self.last += 1;
        debug!("layer {}: {layer:?}", self.last);
        self.layers.insert(self.last, layer);
        self.last
    }

    /// Returns every live layer as a GeoJSON feature.
    pub fn feature_collection(&self) -> FeatureCollection {
        let features = self
            .layers
            .values()
            .map(|layer| {
                let mut properties = JsonObject::new();
                match layer {
                    Layer::Marker {
                        position: coord,
                        label,
                        selected,
                    } => {
                        properties.insert("kind".into(), "tower".into());
                        properties.insert("name".into(), label.as_str().into());
                        properties.insert("selected".into(), (*selected).into());
                        feature(Value::Point(position(*coord)), properties)
                    }
                    Layer::Line { ends, color } => {
                        properties.insert("kind".into(), "link".into());
                        properties.insert("color".into(), color.hex().into());
                        let line = ends.iter().copied().map(position).collect();
                        feature(Value::LineString(line), properties)
                    }
                    Layer::Polygon(points) => {
                        properties.insert("kind".into(), "fresnel_zone".into());
                        let mut ring: Vec<Vec<f64>> =
                            points.iter().copied().map(position).collect();
                        if let Some(first) = ring.first().cloned() {
                            ring.push(first);
                        }
                        feature(Value::Polygon(vec![ring]), properties)
                    }
                }
            })
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl Projection<C> for Canvas {
    fn project(&self, coord: Coord<C>) -> Coord<C> {
        WebMercator.project(coord)
    }

    fn unproject(&self, point: Coord<C>) -> Coord<C> {
        WebMercator.unproject(point)
    }

    fn plane_units_per_meter(&self, at: Coord<C>) -> C {
        WebMercator.plane_units_per_meter(at)
    }
}

impl MapSurface for Canvas {
    type Handle = u64;

    fn place_marker(&mut self, position: Coord<C>, label: &str) -> u64 {
        self.insert(Layer::Marker {
            position,
            label: label.to_string(),
            selected: false,
        })
    }

    fn set_marker_selected(&mut self, marker: &u64, selected: bool) {
        match self.layers.get_mut(marker) {
            Some(Layer::Marker { selected: s, .. }) => *s = selected,
            _ => warn!("layer {marker} is not a marker"),
        }
    }

    fn draw_polyline(&mut self, ends: [Coord<C>; 2]) -> u64 {
        self.insert(Layer::Line {
            ends,
            color: LineColor::Idle,
        })
    }

    fn set_line_color(&mut self, line: &u64, color: LineColor) {
        match self.layers.get_mut(line) {
            Some(Layer::Line { color: c, .. }) => *c = color,
            _ => warn!("layer {line} is not a line"),
        }
    }

    fn draw_polygon(&mut self, points: &[Coord<C>]) -> u64 {
        self.insert(Layer::Polygon(points.to_vec()))
    }

    fn remove_layer(&mut self, layer: u64) {
        if self.layers.remove(&layer).is_some() {
            debug!("removed layer {layer}");
        } else {
            warn!("no layer {layer} to remove");
        }
    }
}
