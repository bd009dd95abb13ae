use merge_defence_core::{
    merge::{self, StackSnapshot},
    CellError, CellIndex, UnitId, UnitKind, CELL_COUNT, STACK_CAPACITY,
};

/// A single unit living on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) kind: UnitKind,
}

/// Ordered units of one kind owned by a cell. The kind is implied by the units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Stack {
    units: Vec<Unit>,
}

impl Stack {
    pub(crate) fn kind(&self) -> Option<UnitKind> {
        self.units.first().map(|unit| unit.kind)
    }

    pub(crate) fn count(&self) -> u8 {
        self.units.len() as u8
    }

    pub(crate) fn units(&self) -> &[Unit] {
        &self.units
    }

    fn push(&mut self, unit: Unit) {
        debug_assert!(self.units.len() < usize::from(STACK_CAPACITY));
        debug_assert!(self.kind().map_or(true, |kind| kind == unit.kind));
        self.units.push(unit);
    }

    fn remove_front(&mut self) -> Option<Unit> {
        if self.units.is_empty() {
            return None;
        }
        Some(self.units.remove(0))
    }

    fn pull_back(&mut self) -> Option<Unit> {
        self.units.pop()
    }

    fn drain(&mut self) -> Vec<Unit> {
        std::mem::take(&mut self.units)
    }
}

/// Outcome of removing the front unit of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Removal {
    pub(crate) cell: CellIndex,
    pub(crate) removed: Unit,
    pub(crate) remaining: u8,
    pub(crate) pulled: Option<Pull>,
}

/// A unit relocated from a donor into a shrunken stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Pull {
    pub(crate) from: CellIndex,
    pub(crate) unit: UnitId,
}

/// The eighteen cells of one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    cells: Vec<Stack>,
}

impl Grid {
    pub(crate) fn new() -> Self {
        Self {
            cells: vec![Stack::default(); CELL_COUNT],
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<StackSnapshot> {
        CellIndex::all()
            .zip(self.cells.iter())
            .map(|(cell, stack)| StackSnapshot {
                cell,
                kind: stack.kind(),
                count: stack.count(),
            })
            .collect()
    }

    pub(crate) fn stack(&self, cell: CellIndex) -> Result<&Stack, CellError> {
        self.cells.get(cell.as_usize()).ok_or(CellError::OutOfBounds)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellIndex, &Stack)> {
        CellIndex::all().zip(self.cells.iter())
    }

    pub(crate) fn unit_count(&self) -> u32 {
        self.cells.iter().map(|stack| u32::from(stack.count())).sum()
    }

    pub(crate) fn placement_cell(&self, kind: UnitKind) -> Option<CellIndex> {
        merge::placement_cell(&self.snapshots(), kind)
    }

    /// Places the unit following the two-pass scan, returning its cell.
    pub(crate) fn add(&mut self, unit: Unit) -> Option<CellIndex> {
        let cell = self.placement_cell(unit.kind)?;
        self.cells[cell.as_usize()].push(unit);
        Some(cell)
    }

    /// Destroys the front unit and tops a resulting two-stack up from a donor.
    pub(crate) fn remove_unit(&mut self, cell: CellIndex) -> Result<Removal, CellError> {
        let index = cell.as_usize();
        let stack = self.cells.get_mut(index).ok_or(CellError::OutOfBounds)?;
        let removed = stack.remove_front().ok_or(CellError::Empty)?;
        let remaining = stack.count();

        let mut pulled = None;
        if remaining == STACK_CAPACITY - 1 {
            if let Some(from) = merge::pull_donor(&self.snapshots(), cell, removed.kind) {
                if let Some(unit) = self.pull(from) {
                    self.cells[index].push(unit);
                    pulled = Some(Pull { from, unit: unit.id });
                }
            }
        }

        Ok(Removal {
            cell,
            removed,
            remaining,
            pulled,
        })
    }

    /// Destroys every unit in the cell.
    pub(crate) fn remove_all(&mut self, cell: CellIndex) -> Result<Vec<Unit>, CellError> {
        let stack = self.cells.get_mut(cell.as_usize()).ok_or(CellError::OutOfBounds)?;
        Ok(stack.drain())
    }

    /// Exchanges the stacks owned by two cells.
    pub(crate) fn swap(&mut self, first: CellIndex, second: CellIndex) -> Result<(), CellError> {
        if !first.is_on_board() || !second.is_on_board() {
            return Err(CellError::OutOfBounds);
        }
        self.cells.swap(first.as_usize(), second.as_usize());
        Ok(())
    }

    /// Detaches the back unit of the cell without destroying it.
    pub(crate) fn pull(&mut self, cell: CellIndex) -> Option<Unit> {
        self.cells.get_mut(cell.as_usize())?.pull_back()
    }

    /// Places a promoted unit after its source cell was emptied.
    ///
    /// The source cell is always a valid fallback because it is empty.
    pub(crate) fn replace(&mut self, source: CellIndex, unit: Unit) -> CellIndex {
        let cell = self.placement_cell(unit.kind).unwrap_or(source);
        self.cells[cell.as_usize()].push(unit);
        cell
    }
}
