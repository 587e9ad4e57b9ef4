use serde::Serialize;

/// Axis-aligned bounding box of emitted coordinates.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box containing nothing; any `include` replaces it.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Flat per-base coordinates.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Coords {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bounds: Bounds,
}

/// Everything a renderer needs for one structure.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Dot-bracket of the input, crossing stems in `{}`, `[]` or `<>`.
    pub structure: String,
    /// Partner of each base, -1 if unpaired.
    pub pairs: Vec<isize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    pub coords: Coords,
    /// Rotation sign of each base (+1 clockwise, -1 counterclockwise).
    pub rotation: Vec<i8>,
}
