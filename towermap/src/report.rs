use crate::canvas::Canvas;
use anyhow::Error as AnyError;
use linkplan::{LinkSummary, Notice, Prompt, Registry};
use rfgeo::FresnelZone;
use serde::Serialize;
use std::io::Write;
use textplots::{Chart, Plot, Shape};

/// Formats link details for humans.
pub fn summary_text(summary: &LinkSummary) -> String {
    format!(
        "{} ⇄ {}: {:.3} km, {} GHz, λ {:.1} mm, 1st Fresnel radius {:.2} m, bearing {:.1}°",
        summary.a_name,
        summary.b_name,
        summary.distance_km,
        summary.frequency_ghz,
        summary.wavelength_m * 1e3,
        summary.fresnel_radius_m,
        summary.bearing_deg,
    )
}

/// Formats a notice for humans.
pub fn notice_text(notice: &Notice, registry: &Registry) -> String {
    let tower_name = |id| {
        registry
            .tower(id)
            .map_or_else(|| id.to_string(), |t| format!("'{}' ({id})", t.name))
    };
    match notice {
        Notice::Error(e) => format!("error: {e}"),
        Notice::TowerAdded(id) => format!("added {}", tower_name(*id)),
        Notice::TowerRemoved { tower, links } => {
            format!("removed {tower} and {} link(s)", links.len())
        }
        Notice::LinkCreated(id) => match registry.summary(*id) {
            Some(summary) => format!("created {id}, {}", summary_text(&summary)),
            None => format!("created {id}"),
        },
        Notice::LinkRemoved(id) => format!("removed {id}"),
        Notice::FrequencyChanged {
            tower,
            frequency_ghz,
            removed,
        } => format!(
            "{} now on {frequency_ghz} GHz, removed {} link(s)",
            tower_name(*tower),
            removed.len()
        ),
        Notice::FrequencyReverted {
            tower,
            frequency_ghz,
        } => format!("{} stays on {frequency_ghz} GHz", tower_name(*tower)),
        Notice::ZoneActivated(summary) => {
            format!("showing zone of {}, {}", summary.link, summary_text(summary))
        }
        Notice::ZoneCleared(id) => format!("hid zone of {id}"),
    }
}

/// Formats a prompt, with a hint on how to answer it.
pub fn prompt_text(prompt: &Prompt) -> String {
    let hint = match prompt {
        Prompt::PlaceTower { .. } => "answer: place <ghz> <name> | cancel",
        _ => "answer: yes | no",
    };
    format!("? {prompt} ({hint})")
}

pub fn print_summary(summary: &LinkSummary) {
    println!("{}", summary_text(summary));
}

pub fn print_json(summary: &LinkSummary, canvas: &Canvas) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonLink<'a> {
        a: &'a str,
        b: &'a str,
        distance_km: f64,
        frequency_ghz: f64,
        wavelength_m: f64,
        fresnel_radius_m: f64,
        bearing_deg: f64,
        midpoint: [f64; 2],
        zone: Vec<[f64; 2]>,
    }

    let zone: Vec<[f64; 2]> = canvas
        .layers()
        .find_map(|layer| match layer {
            crate::canvas::Layer::Polygon(points) => {
                Some(points.iter().map(|c| [c.x, c.y]).collect())
            }
            _ => None,
        })
        .unwrap_or_default();
    let json = serde_json::to_string(&JsonLink {
        a: &summary.a_name,
        b: &summary.b_name,
        distance_km: summary.distance_km,
        frequency_ghz: summary.frequency_ghz,
        wavelength_m: summary.wavelength_m,
        fresnel_radius_m: summary.fresnel_radius_m,
        bearing_deg: summary.bearing_deg,
        midpoint: [summary.midpoint.x, summary.midpoint.y],
        zone,
    })?;
    println!("{json}");
    Ok(())
}

pub fn print_geojson(canvas: &Canvas) -> Result<(), AnyError> {
    let json = serde_json::to_string(&canvas.feature_collection())?;
    println!("{json}");
    Ok(())
}

/// Returns `(distance km, first zone radius m)` at `samples` points
/// along the link.
pub fn zone_profile(summary: &LinkSummary, samples: usize) -> Vec<(f64, f64)> {
    FresnelZone::new(1, summary.frequency_ghz, summary.distance_km * 1e3)
        .iter(samples)
        .map(|(d1_m, radius_m)| (d1_m / 1e3, radius_m))
        .collect()
}

pub fn print_csv(summary: &LinkSummary, samples: usize) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Fresnel")?;
    for (distance_km, radius_m) in zone_profile(summary, samples) {
        writeln!(stdout, "{distance_km},{radius_m}")?;
    }
    Ok(())
}

pub fn plot_ascii(summary: &LinkSummary, samples: usize) {
    #[allow(clippy::cast_possible_truncation)]
    let plot_data: Vec<(f32, f32)> = zone_profile(summary, samples)
        .into_iter()
        .map(|(d, r)| (d as f32, r as f32))
        .collect();
    #[allow(clippy::cast_possible_truncation)]
    Chart::new(200, 80, 0.0, summary.distance_km as f32)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}

#[cfg(test)]
mod tests {
    use super::{summary_text, zone_profile};
    use approx::assert_relative_eq;
    use geo::coord;
    use linkplan::{LinkSummary, Registry};

    fn ten_km_link() -> LinkSummary {
        let mut registry = Registry::new();
        let a = registry
            .add_tower(coord! { x: 0.0, y: 0.0 }, "West", 5.0)
            .unwrap()
            .id;
        let b = registry
            .add_tower(coord! { x: 0.089_932_16, y: 0.0 }, "East", 5.0)
            .unwrap()
            .id;
        let link = registry.create_link(a, b).unwrap().unwrap().id;
        registry.summary(link).unwrap()
    }

    #[test]
    fn test_zone_profile_peaks_mid_path() {
        let summary = ten_km_link();
        let profile = zone_profile(&summary, 5);
        assert_eq!(profile.len(), 5);
        assert_relative_eq!(profile[0].1, 0.0);
        assert_relative_eq!(profile[4].1, 0.0, epsilon = 1e-6);
        assert_relative_eq!(profile[2].0, summary.distance_km / 2.0, epsilon = 1e-9);
        assert_relative_eq!(profile[2].1, summary.fresnel_radius_m, epsilon = 1e-9);
    }

    #[test]
    fn test_summary_text() {
        let text = summary_text(&ten_km_link());
        assert!(text.starts_with("West ⇄ East: 10.000 km, 5 GHz, λ 60.0 mm"));
        assert!(text.contains("radius 12.25 m"));
        assert!(text.ends_with("bearing 90.0°"));
    }
}
