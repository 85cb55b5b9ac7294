//! Incremental shot planning for the human-controlled side.
//!
//! The player places waypoints one at a time. Each placement is previewed
//! against the board, and the plan fires on its own once the weapon's bend
//! budget is used up.

use super::{ShootError, ShotWaypoints, bend_budget};
use crate::env::Grid;
use crate::geometry::segment;
use crate::state::{Position, Unit};

/// Legality of a hypothetical next waypoint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointPreview {
    pub target: Position,
    pub legal: bool,
    /// Cells the new segment would cross, up to where it stops.
    pub path: Vec<Position>,
    pub reason: Option<ShootError>,
}

/// Result of appending a waypoint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanProgress {
    /// More waypoints may still be placed.
    Pending { placed: usize, remaining: usize },
    /// The bend budget is exhausted; these waypoints should be fired now.
    Ready(ShotWaypoints),
}

/// In-progress list of waypoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotPlan {
    waypoints: ShotWaypoints,
}

impl ShotPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn to_waypoints(&self) -> ShotWaypoints {
        self.waypoints.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Cell the next segment starts from.
    fn anchor(&self, shooter: &Unit) -> Position {
        self.waypoints.last().copied().unwrap_or(shooter.position)
    }

    /// Checks whether `target` could be appended as the next waypoint.
    pub fn preview(&self, shooter: &Unit, target: Position, grid: &Grid) -> WaypointPreview {
        let budget = bend_budget(shooter.weapon_level);
        let bends = self.waypoints.len();
        if bends > budget {
            return WaypointPreview {
                target,
                legal: false,
                path: Vec::new(),
                reason: Some(ShootError::TooManyBends { bends, budget }),
            };
        }

        let from = self.anchor(shooter);
        let traced = segment(from, target, grid);
        let reason = (!traced.valid).then_some(ShootError::SegmentBlocked {
            index: self.waypoints.len(),
            from,
            to: target,
        });

        WaypointPreview {
            target,
            legal: traced.valid,
            path: traced.path,
            reason,
        }
    }

    /// Appends `target` if legal.
    ///
    /// Once the plan holds `weapon_level` waypoints it is drained and returned
    /// as [`PlanProgress::Ready`].
    pub fn push(
        &mut self,
        shooter: &Unit,
        target: Position,
        grid: &Grid,
    ) -> Result<PlanProgress, ShootError> {
        let preview = self.preview(shooter, target, grid);
        if let Some(reason) = preview.reason {
            return Err(reason);
        }

        self.waypoints
            .try_push(target)
            .map_err(|_| ShootError::TooManyBends {
                bends: self.waypoints.len(),
                budget: bend_budget(shooter.weapon_level),
            })?;

        let capacity = usize::from(shooter.weapon_level);
        if self.waypoints.len() >= capacity {
            return Ok(PlanProgress::Ready(self.take()));
        }

        Ok(PlanProgress::Pending {
            placed: self.waypoints.len(),
            remaining: capacity - self.waypoints.len(),
        })
    }

    /// Fires early with whatever has been placed.
    pub fn commit(&mut self) -> Result<ShotWaypoints, ShootError> {
        if self.waypoints.is_empty() {
            return Err(ShootError::Empty);
        }
        Ok(self.take())
    }

    /// Discards all placed waypoints.
    pub fn cancel(&mut self) {
        self.waypoints.clear();
    }

    fn take(&mut self) -> ShotWaypoints {
        std::mem::take(&mut self.waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Side;

    fn shooter(level: u8) -> Unit {
        Unit::new(Side::Player, Position::new(5, 5)).with_weapon_level(level)
    }

    #[test]
    fn auto_commits_when_budget_is_spent() {
        let grid = Grid::open(20);
        let unit = shooter(3);
        let mut plan = ShotPlan::new();

        assert_eq!(
            plan.push(&unit, Position::new(5, 10), &grid),
            Ok(PlanProgress::Pending { placed: 1, remaining: 2 })
        );
        assert_eq!(
            plan.push(&unit, Position::new(10, 10), &grid),
            Ok(PlanProgress::Pending { placed: 2, remaining: 1 })
        );
        let Ok(PlanProgress::Ready(waypoints)) = plan.push(&unit, Position::new(10, 2), &grid)
        else {
            panic!("third waypoint should fire a level-3 shot");
        };
        assert_eq!(waypoints.len(), 3);
        assert!(plan.is_empty());
    }

    #[test]
    fn level_one_fires_on_first_waypoint() {
        let grid = Grid::open(20);
        let mut plan = ShotPlan::new();
        let progress = plan.push(&shooter(1), Position::new(5, 12), &grid).unwrap();
        assert!(matches!(progress, PlanProgress::Ready(ref w) if w.as_slice() == [Position::new(5, 12)]));
    }

    #[test]
    fn illegal_waypoint_leaves_plan_untouched() {
        let grid = Grid::from_rows(&[
            "........", "........", "........", "........", "........", "........", "........",
            ".....#..",
        ])
        .unwrap();
        let unit = shooter(3);
        let mut plan = ShotPlan::new();

        let preview = plan.preview(&unit, Position::new(5, 7), &grid);
        assert!(!preview.legal);
        assert_eq!(preview.path, vec![Position::new(5, 6)]);
        assert!(plan.push(&unit, Position::new(5, 7), &grid).is_err());
        assert!(plan.push(&unit, Position::new(7, 7), &grid).is_err());
        assert!(plan.is_empty());

        assert!(plan.preview(&unit, Position::new(5, 6), &grid).legal);
    }

    #[test]
    fn commit_and_cancel() {
        let grid = Grid::open(20);
        let unit = shooter(4);
        let mut plan = ShotPlan::new();
        assert_eq!(plan.commit(), Err(ShootError::Empty));

        plan.push(&unit, Position::new(5, 9), &grid).unwrap();
        plan.cancel();
        assert!(plan.is_empty());

        plan.push(&unit, Position::new(9, 5), &grid).unwrap();
        let waypoints = plan.commit().unwrap();
        assert_eq!(waypoints.as_slice(), &[Position::new(9, 5)]);
        assert!(plan.is_empty());
    }
}
