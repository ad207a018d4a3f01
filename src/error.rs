use std::fmt;
use thiserror::Error;

/// Pipeline stage, used to say where a geometry collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BufferUnion,
    Closing,
    Repair,
    Connectivity,
    HoleFill,
    ChannelCut,
    Simplify,
    Validate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::BufferUnion => "buffer & union",
            Stage::Closing => "morphological closing",
            Stage::Repair => "geometry repair",
            Stage::Connectivity => "connectivity repair",
            Stage::HoleFill => "hole fill",
            Stage::ChannelCut => "channel cutting",
            Stage::Simplify => "simplification",
            Stage::Validate => "validation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AoiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Still disjoint: {remaining} components remain. Increase max_connect_gap or gap_close_distance")]
    Connectivity { remaining: usize },

    #[error("Output still has {remaining} hole(s). Increase hole_fill_area_threshold and/or enable channel cutting")]
    HoleRemains { remaining: usize },

    #[error("Geometry became empty during {stage}")]
    DegenerateGeometry { stage: Stage },
}

pub type Result<T> = std::result::Result<T, AoiError>;
