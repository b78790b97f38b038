//! User actions on scan results and the OS integrations behind them.

mod busy;
mod critical;
mod executor;
mod reveal;
mod trash;
mod undo;

pub use busy::{BusyProbe, LsofProbe};
pub use critical::CriticalPathSet;
pub use executor::{ActionExecutor, CleanOutcome, RetryPolicy};
pub use reveal::{Revealer, XdgOpen};
pub use trash::{detect_trash, trash_files_dir, GioTrash, NoTrash, TrashBin, TrashPut};
pub use undo::UndoLog;
