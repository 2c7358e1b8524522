use crate::error::StoreError;

/// A committed transaction as the host's undo manager would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub name: String,
    /// False for transactions recorded while undo recording was suspended.
    pub undoable: bool,
}

/// Transaction bookkeeping for the floorplan store.
///
/// Transactions nest; only the outermost commit is recorded. Undo/redo
/// itself is the host's job, this only tracks boundaries.
#[derive(Debug, Default)]
pub struct Journal {
    open: Vec<String>,
    committed: Vec<Transaction>,
    skips_undo: bool,
}

impl Journal {
    pub fn begin(&mut self, name: &str) {
        self.open.push(name.to_owned());
    }

    /// Closes the innermost open transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoOpenTransaction` if nothing is open.
    pub fn commit(&mut self, name: &str) -> Result<(), StoreError> {
        let opened = self
            .open
            .pop()
            .ok_or_else(|| StoreError::NoOpenTransaction(name.to_owned()))?;
        if self.open.is_empty() {
            self.committed.push(Transaction {
                name: opened,
                undoable: !self.skips_undo,
            });
        }
        Ok(())
    }

    /// Drops the innermost open transaction without recording it.
    pub fn rollback(&mut self) {
        self.open.pop();
    }

    pub fn set_skips_undo(&mut self, skips: bool) {
        self.skips_undo = skips;
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn committed(&self) -> &[Transaction] {
        &self.committed
    }
}
