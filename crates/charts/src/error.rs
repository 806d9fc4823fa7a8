use chart3d_data::DataError;
use chart3d_graphics::GeometryError;
use thiserror::Error;

use crate::line::clip::BandPosition;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// Band extremes that are inverted, non-finite, or a value window with
    /// no height.
    #[error("invalid band: {reason}")]
    InvalidBand { reason: String },

    /// A profile vertex depends on a crossing that does not exist.
    #[error("unresolved cross point for segment case {start}{end}")]
    UnresolvedCrossPoint { start: BandPosition, end: BandPosition },

    #[error("invalid chart configuration: {reason}")]
    InvalidConfig { reason: String },
}
