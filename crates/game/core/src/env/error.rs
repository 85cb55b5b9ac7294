use crate::error::{ErrorSeverity, GameError};

/// Start positions could not be found on a generated grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("grid has no floor cells")]
    NoFloor,

    #[error("grid has a single floor cell; both units cannot be placed")]
    SingleFloorCell,
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFloor => "PLACEMENT_NO_FLOOR",
            Self::SingleFloorCell => "PLACEMENT_SINGLE_FLOOR_CELL",
        }
    }
}
