//! The cursor boundary.
//!
//! The decoder never opens connections or issues queries. It reads an already-executing result
//! through the [`Cursor`] trait, which a driver adapter implements.

mod memory;

pub use memory::MemoryCursor;

use crate::error::CursorError;
use crate::types::{NativeValue, ScanType};

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name; not guaranteed unique within a result.
    pub name: String,
    /// Engine type name as the driver reports it (e.g. `NUMERIC`, `_int4`).
    pub declared_type: String,
    /// Native scan type used to allocate the column's slot.
    pub scan_type: ScanType,
}

impl ColumnDescriptor {
    /// Create a descriptor whose scan type is derived from the declared type name.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        let scan_type = ScanType::for_declared_type(&declared_type);
        Self {
            name: name.into(),
            declared_type,
            scan_type,
        }
    }

    #[must_use]
    pub fn with_scan_type(mut self, scan_type: ScanType) -> Self {
        self.scan_type = scan_type;
        self
    }
}

/// Holder for one column's raw value during a single row scan.
///
/// Slots start empty; the cursor fills them in [`Cursor::scan_current_row`]. A slot left empty
/// is treated as a failed scan of that cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSlot {
    scan_type: ScanType,
    value: Option<NativeValue>,
}

impl RawSlot {
    #[must_use]
    pub fn new(scan_type: ScanType) -> Self {
        Self {
            scan_type,
            value: None,
        }
    }

    /// Scan type the slot was allocated for.
    #[must_use]
    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn set(&mut self, value: NativeValue) {
        self.value = Some(value);
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn value(&self) -> Option<&NativeValue> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<NativeValue> {
        self.value.take()
    }
}

/// An active, forward-only result cursor.
///
/// The caller owns the cursor; decoding borrows it mutably for the whole pass, so it cannot be
/// shared between concurrent decodes.
pub trait Cursor {
    /// Ordered column metadata for the active query.
    ///
    /// # Errors
    ///
    /// Returns `CursorError` if the driver cannot report the columns.
    fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, CursorError>;

    /// Ordered column names for the active query.
    ///
    /// # Errors
    ///
    /// Returns `CursorError` if the driver cannot report the columns.
    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        Ok(self
            .column_descriptors()?
            .into_iter()
            .map(|column| column.name)
            .collect())
    }

    /// Move to the next row. Returns `false` once the result is exhausted.
    fn advance(&mut self) -> bool;

    /// Deposit the current row's raw values into `slots`, one per column position.
    ///
    /// # Errors
    ///
    /// Returns `CursorError` if the row, or one of its cells, could not be scanned. Slots filled
    /// before the failure keep their values.
    fn scan_current_row(&mut self, slots: &mut [RawSlot]) -> Result<(), CursorError>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, CursorError> {
        (**self).column_descriptors()
    }

    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        (**self).column_names()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan_current_row(&mut self, slots: &mut [RawSlot]) -> Result<(), CursorError> {
        (**self).scan_current_row(slots)
    }
}
