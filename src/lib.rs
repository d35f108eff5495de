//! Calendar grid generation and date-selection state for date pickers.
//!
//! The crate is split along the lines a hosting view layer needs:
//!
//! - [`calendar`] builds the 42-cell month grids a picker displays,
//! - [`bounds`] decides which dates may be selected,
//! - [`selection`] turns clicks into new selection states,
//! - [`locale`] and [`input`] supply month/weekday names and typed date
//!   entry,
//! - [`picker`] ties the above together into the state a host owns.
//!
//! Every operation is synchronous and free of I/O; the host owns the state
//! and threads it through.
pub mod bounds;
pub mod calendar;
pub mod input;
pub mod locale;
pub mod picker;
pub mod selection;
pub use crate::bounds::{DateBounds, DateFilter};
pub use crate::calendar::{Grid, GridCell, OutOfTimeError, VisibleMonth};
pub use crate::picker::{DatePicker, DayState};
pub use crate::selection::{Mode, Selection, SelectionValue};
