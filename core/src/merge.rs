//! Cell selection rules shared by the world and automated players.
//!
//! Every function scans stacks in cell order, so the world and a system
//! looking at a [`GridView`](crate::GridView) always agree on the outcome.

use serde::{Deserialize, Serialize};

use crate::{CellIndex, EpicRecipe, Grade, UnitKind};

/// Maximum number of units a single cell can hold.
pub const STACK_CAPACITY: u8 = 3;

/// Summary of a single cell's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// Cell holding the stack.
    pub cell: CellIndex,
    /// Kind shared by every unit in the stack, `None` when empty.
    pub kind: Option<UnitKind>,
    /// Number of units in the stack.
    pub count: u8,
}

impl StackSnapshot {
    /// Reports whether the stack holds no units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reports whether the stack can take another unit of its kind.
    #[must_use]
    pub const fn has_room(&self) -> bool {
        self.count < STACK_CAPACITY
    }

    fn holds(&self, kind: UnitKind) -> bool {
        self.count > 0 && self.kind == Some(kind)
    }
}

/// Cell a new unit of `kind` lands in: first same-kind stack with room, else first empty cell.
#[must_use]
pub fn placement_cell(stacks: &[StackSnapshot], kind: UnitKind) -> Option<CellIndex> {
    stacks
        .iter()
        .find(|stack| stack.holds(kind) && stack.has_room())
        .or_else(|| stacks.iter().find(|stack| stack.is_empty()))
        .map(|stack| stack.cell)
}

/// First full stack that can still be promoted to a higher grade.
#[must_use]
pub fn first_promotable(stacks: &[StackSnapshot]) -> Option<CellIndex> {
    stacks
        .iter()
        .find(|stack| {
            stack.count == STACK_CAPACITY
                && stack
                    .kind
                    .is_some_and(|kind| kind.grade().successor().is_some())
        })
        .map(|stack| stack.cell)
}

/// Cell an ingredient of `kind` is taken from.
///
/// The first holder with fewer than three units wins; when every holder is
/// full the last one scanned is used.
#[must_use]
pub fn ingredient_cell(stacks: &[StackSnapshot], kind: UnitKind) -> Option<CellIndex> {
    let mut chosen = None;
    for stack in stacks.iter().filter(|stack| stack.holds(kind)) {
        chosen = Some(stack.cell);
        if stack.has_room() {
            break;
        }
    }
    chosen
}

/// Cells supplying one unit of each ingredient, in recipe order.
#[must_use]
pub fn recipe_cells(stacks: &[StackSnapshot], recipe: EpicRecipe) -> Option<[CellIndex; 3]> {
    let [first, second, third] = recipe.ingredients();
    Some([
        ingredient_cell(stacks, first)?,
        ingredient_cell(stacks, second)?,
        ingredient_cell(stacks, third)?,
    ])
}

/// Cell that tops up `target` after it shrank to two units.
///
/// Only other stacks of the same kind holding one or two units donate.
#[must_use]
pub fn pull_donor(stacks: &[StackSnapshot], target: CellIndex, kind: UnitKind) -> Option<CellIndex> {
    stacks
        .iter()
        .find(|stack| stack.cell != target && stack.holds(kind) && stack.has_room())
        .map(|stack| stack.cell)
}

/// Grade a promotion of the stack would produce.
#[must_use]
pub fn promotion_grade(stack: &StackSnapshot) -> Option<Grade> {
    if stack.count != STACK_CAPACITY {
        return None;
    }
    stack.kind.and_then(|kind| kind.grade().successor())
}
