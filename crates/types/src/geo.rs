//! Spherical geometry primitives for the globe.

use std::f64::consts::PI;

use arrayvec::ArrayVec;
use serde::Deserialize;
use thiserror::Error;

/// Texture id carried by polygons with no texture (open ocean).
pub const NO_TEXTURE: i32 = -1;

/// Largest vertex count a globe polygon can have.
pub const MAX_POLYGON_POINTS: usize = 4;

/// Degrees per legacy world-map unit.
const XCOM_DEGREES_PER_UNIT: f64 = 0.125;

/// Converts a legacy world-map angle (1/8 degree units) to radians.
pub fn xcom_to_rad(units: i16) -> f64 {
    f64::from(units) * XCOM_DEGREES_PER_UNIT * PI / 180.0
}

/// Converts radians back to the nearest legacy world-map unit.
///
/// Values outside the `i16` range saturate.
pub fn rad_to_xcom(rad: f64) -> i16 {
    (rad * 180.0 / PI / XCOM_DEGREES_PER_UNIT).round() as i16
}

/// A point on the globe, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub lon: f64,
    pub lat: f64,
}

impl Vertex {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon: lon.to_radians(),
            lat: lat.to_radians(),
        }
    }
}

/// Vertex count of a globe polygon, fixed when the polygon is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonShape {
    Triangle,
    Quad,
}

impl PolygonShape {
    pub fn from_points(points: usize) -> Option<Self> {
        match points {
            3 => Some(Self::Triangle),
            4 => Some(Self::Quad),
            _ => None,
        }
    }

    pub const fn points(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Quad => 4,
        }
    }
}

/// Rejected flat coordinate list from a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Polygon lists are `[texture, lon, lat, ...]` with 3 or 4 points.
    #[error("polygon needs a texture followed by 3 or 4 lon/lat pairs, got {0} values")]
    PolygonValues(usize),
    /// Polyline lists are `[lon, lat, ...]` with at least 2 points.
    #[error("polyline needs at least 2 lon/lat pairs, got {0} values")]
    PolylineValues(usize),
}

/// A textured triangle or quad on the globe.
///
/// Rule documents describe one as a flat list of degrees:
/// `[texture, lon1, lat1, lon2, lat2, lon3, lat3(, lon4, lat4)]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Polygon {
    vertices: ArrayVec<Vertex, MAX_POLYGON_POINTS>,
    texture: i32,
}

impl Polygon {
    /// Creates a polygon with every vertex at (0, 0) and no texture.
    pub fn new(shape: PolygonShape) -> Self {
        let mut vertices = ArrayVec::new();
        for _ in 0..shape.points() {
            vertices.push(Vertex::default());
        }
        Self {
            vertices,
            texture: NO_TEXTURE,
        }
    }

    pub fn points(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, i: usize) -> Option<Vertex> {
        self.vertices.get(i).copied()
    }

    pub fn longitude(&self, i: usize) -> Option<f64> {
        self.vertices.get(i).map(|v| v.lon)
    }

    pub fn latitude(&self, i: usize) -> Option<f64> {
        self.vertices.get(i).map(|v| v.lat)
    }

    /// Returns false when `i` is past the polygon's vertex count.
    pub fn set_longitude(&mut self, i: usize, lon: f64) -> bool {
        match self.vertices.get_mut(i) {
            Some(v) => {
                v.lon = lon;
                true
            }
            None => false,
        }
    }

    /// Returns false when `i` is past the polygon's vertex count.
    pub fn set_latitude(&mut self, i: usize, lat: f64) -> bool {
        match self.vertices.get_mut(i) {
            Some(v) => {
                v.lat = lat;
                true
            }
            None => false,
        }
    }

    pub fn texture(&self) -> i32 {
        self.texture
    }

    pub fn set_texture(&mut self, texture: i32) {
        self.texture = texture;
    }
}

impl TryFrom<Vec<f64>> for Polygon {
    type Error = ShapeError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let n = values.len();
        if n % 2 == 0 {
            return Err(ShapeError::PolygonValues(n));
        }
        let shape = PolygonShape::from_points((n - 1) / 2).ok_or(ShapeError::PolygonValues(n))?;

        let mut poly = Polygon::new(shape);
        poly.texture = values[0] as i32;
        for (i, pair) in values[1..].chunks_exact(2).enumerate() {
            poly.vertices[i] = Vertex::from_degrees(pair[0], pair[1]);
        }
        Ok(poly)
    }
}

/// An open line on the globe, used for country borders.
///
/// Rule documents describe one as `[lon1, lat1, lon2, lat2, ...]` in degrees.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Polyline {
    vertices: Vec<Vertex>,
}

impl Polyline {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn points(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl TryFrom<Vec<f64>> for Polyline {
    type Error = ShapeError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let n = values.len();
        if n % 2 != 0 || n < 4 {
            return Err(ShapeError::PolylineValues(n));
        }
        let vertices = values
            .chunks_exact(2)
            .map(|pair| Vertex::from_degrees(pair[0], pair[1]))
            .collect();
        Ok(Self { vertices })
    }
}
