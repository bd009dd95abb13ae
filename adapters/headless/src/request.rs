use merge_defence_core::{
    CellIndex, Command, EpicRecipe, GambleTier, Grade, Side, UnitKind, UpgradeTier,
};

/// Input gestures of the human player, always addressed to the player's board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerRequest {
    /// Places a unit of the kind for free.
    Add {
        /// Kind of the new unit.
        kind: UnitKind,
    },
    /// Exchanges the stacks of two cells.
    Swap {
        /// Cell the drag started on.
        first: CellIndex,
        /// Cell the drag ended on.
        second: CellIndex,
    },
    /// Sells the front unit of a cell.
    Remove {
        /// Cell losing a unit.
        cell: CellIndex,
    },
    /// Sells every unit of a cell.
    RemoveAll {
        /// Cell being emptied.
        cell: CellIndex,
    },
    /// Merges a full stack into the next grade.
    Upgrade {
        /// Cell holding the stack.
        cell: CellIndex,
        /// Grade the player expects to receive.
        target: Grade,
    },
    /// Combines an epic recipe.
    Combine {
        /// Recipe to combine.
        recipe: EpicRecipe,
    },
    /// Buys a unit of the grade with gold.
    Summon {
        /// Grade of the summoned unit, [`Grade::Normal`] for the summon button.
        grade: Grade,
    },
    /// Spends gems on a graded unit.
    Gamble {
        /// Tier to roll.
        tier: GambleTier,
    },
    /// Raises the damage level of a grade band.
    PurchaseUpgrade {
        /// Band to raise.
        tier: UpgradeTier,
    },
}

impl PlayerRequest {
    /// World command carrying out the request.
    #[must_use]
    pub const fn into_command(self) -> Command {
        let side = Side::Player;
        match self {
            PlayerRequest::Add { kind } => Command::PlaceUnit { side, kind },
            PlayerRequest::Swap { first, second } => Command::SwapCells {
                side,
                first,
                second,
            },
            PlayerRequest::Remove { cell } => Command::RemoveUnit { side, cell },
            PlayerRequest::RemoveAll { cell } => Command::ClearCell { side, cell },
            PlayerRequest::Upgrade { cell, target } => Command::PromoteStack { side, cell, target },
            PlayerRequest::Combine { recipe } => Command::CombineEpic { side, recipe },
            PlayerRequest::Summon { grade } => Command::Summon { side, grade },
            PlayerRequest::Gamble { tier } => Command::Gamble { tier },
            PlayerRequest::PurchaseUpgrade { tier } => Command::PurchaseUpgrade { tier },
        }
    }
}
