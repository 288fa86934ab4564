use anyhow::{anyhow, Error as AnyError};
use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use geo::geometry::Coord;
use std::str::FromStr;

/// Place radio towers, link them, and inspect Fresnel zones.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of vertices in Fresnel zone polygons, at least 3.
    #[arg(
        short,
        long,
        default_value_t = rfgeo::DEFAULT_SEGMENTS,
        value_parser = RangedU64ValueParser::<usize>::new().range(rfgeo::MIN_SEGMENTS as u64..),
    )]
    pub segments: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read map gestures, one per line, from stdin.
    ///
    /// Enter `help` for the list of gestures.
    Session,

    /// Analyze a single link between two points.
    Link {
        /// Start "lat,lon"
        #[arg(long)]
        start: LatLon,

        /// Destination "lat,lon"
        #[arg(long)]
        dest: LatLon,

        /// Link frequency in GHz.
        #[arg(short, long, default_value_t = 5.0)]
        freq: f64,

        /// Number of samples along the path for `csv` and `plot`.
        #[arg(long, default_value_t = 100)]
        samples: usize,

        #[command(subcommand)]
        out: Output,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Output {
    /// Print link details.
    Summary,

    /// Print link details and zone polygon as JSON.
    Json,

    /// Print towers, link and zone as a GeoJSON FeatureCollection.
    Geojson,

    /// Print Fresnel zone radius along the path as CSV.
    Csv,

    /// Plot Fresnel zone radius along the path to terminal.
    Plot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon pair"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, LatLon};
    use clap::Parser;
    use geo::coord;

    #[test]
    fn test_segments_range() {
        let cli = Cli::try_parse_from(["towermap", "session"]).unwrap();
        assert_eq!(cli.segments, rfgeo::DEFAULT_SEGMENTS);
        assert!(matches!(cli.cmd, Command::Session));
        let cli = Cli::try_parse_from(["towermap", "--segments", "3", "session"]).unwrap();
        assert_eq!(cli.segments, 3);
        for bad in ["0", "2", "-1", "many"] {
            assert!(Cli::try_parse_from(["towermap", "--segments", bad, "session"]).is_err());
        }
    }

    #[test]
    fn test_parse_lat_lon() {
        let LatLon(coord) = "44.2705,-71.30325".parse().unwrap();
        assert_eq!(coord, coord! { x: -71.30325, y: 44.2705 });
        let LatLon(coord) = "1.5, 2".parse().unwrap();
        assert_eq!(coord, coord! { x: 2.0, y: 1.5 });
        assert!("44.2705".parse::<LatLon>().is_err());
        assert!("north,west".parse::<LatLon>().is_err());
    }
}
