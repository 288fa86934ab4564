/// Earth radius used for all great-circle math, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Speed of light in m/s, rounded the way RF planning tools do.
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Hz per GHz.
pub const HZ_PER_GHZ: f64 = 1e9;

/// Meters per kilometer.
pub const M_PER_KM: f64 = 1e3;

/// Sphere radius of the EPSG:3857 (web mercator) projection, in meters.
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Highest latitude representable in web mercator.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;
