use crate::error::{AoiError, Result};

/// Parameters for turning line features into an AOI polygon.
///
/// All distances are in the units of the input's projected CRS (normally
/// metres) and areas in those units squared. Zero disables an optional stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiConfig {
    /// Half-width used to inflate each line. Must be positive.
    pub buffer_width: f64,
    /// Morphological closing distance.
    pub gap_close_distance: f64,
    /// Largest gap bridged by connectivity repair.
    pub max_connect_gap: f64,
    /// Half-width of connectivity corridors. Defaults to `buffer_width`.
    pub connector_width: Option<f64>,
    pub max_connect_iterations: usize,
    pub simplify_tolerance: f64,
    /// Holes with area `<=` this are filled.
    pub hole_fill_area_threshold: f64,
    pub enable_channel_cutting: bool,
    /// Half-width of hole-severing channels. Defaults to `buffer_width / 5`.
    pub channel_half_width: Option<f64>,
    /// How far each channel is extended past both of its ends.
    pub channel_extend_distance: f64,
}

impl AoiConfig {
    pub fn new(buffer_width: f64) -> Self {
        Self {
            buffer_width,
            gap_close_distance: 0.0,
            max_connect_gap: 0.0,
            connector_width: None,
            max_connect_iterations: 5,
            simplify_tolerance: 0.0,
            hole_fill_area_threshold: 0.0,
            enable_channel_cutting: false,
            channel_half_width: None,
            channel_extend_distance: 0.0,
        }
    }

    pub fn with_gap_close(mut self, distance: f64) -> Self {
        self.gap_close_distance = distance;
        self
    }

    /// Enables connectivity repair for gaps up to `max_gap`.
    pub fn with_connect_gap(mut self, max_gap: f64) -> Self {
        self.max_connect_gap = max_gap;
        self
    }

    pub fn with_connector_width(mut self, half_width: f64) -> Self {
        self.connector_width = Some(half_width);
        self
    }

    pub fn with_connect_iterations(mut self, iterations: usize) -> Self {
        self.max_connect_iterations = iterations;
        self
    }

    pub fn with_simplify(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    pub fn with_hole_fill(mut self, max_area: f64) -> Self {
        self.hole_fill_area_threshold = max_area;
        self
    }

    /// Enables channel cutting. `None` keeps the default half-width.
    pub fn with_channel_cutting(mut self, half_width: Option<f64>, extend: f64) -> Self {
        self.enable_channel_cutting = true;
        self.channel_half_width = half_width;
        self.channel_extend_distance = extend;
        self
    }

    pub fn connector_width(&self) -> f64 {
        self.connector_width.unwrap_or(self.buffer_width)
    }

    pub fn channel_half_width(&self) -> f64 {
        self.channel_half_width.unwrap_or(self.buffer_width / 5.0)
    }

    /// Checks every parameter, resolving defaults where a stage needs them.
    pub fn validate(&self) -> Result<()> {
        if !self.buffer_width.is_finite() || self.buffer_width <= 0.0 {
            return Err(AoiError::InvalidInput(format!(
                "buffer_width must be positive, got {}",
                self.buffer_width
            )));
        }

        let non_negative = [
            ("gap_close_distance", self.gap_close_distance),
            ("max_connect_gap", self.max_connect_gap),
            ("simplify_tolerance", self.simplify_tolerance),
            ("hole_fill_area_threshold", self.hole_fill_area_threshold),
            ("channel_extend_distance", self.channel_extend_distance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(AoiError::InvalidInput(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        if self.max_connect_gap > 0.0 {
            let w = self.connector_width();
            if !w.is_finite() || w <= 0.0 {
                return Err(AoiError::InvalidInput(format!(
                    "connector_width must be positive, got {}",
                    w
                )));
            }
        }

        if self.enable_channel_cutting {
            let c = self.channel_half_width();
            if !c.is_finite() || c <= 0.0 {
                return Err(AoiError::InvalidInput(format!(
                    "channel_half_width must be positive, got {}",
                    c
                )));
            }
        }

        Ok(())
    }
}
