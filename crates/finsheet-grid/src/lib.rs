//! # finsheet-grid
//!
//! Interactive layer of the finsheet financial spreading grid.
//!
//! - [`InteractionState`] - focus, edit session and keyboard navigation
//! - [`Grid`] - command dispatch over a [`Statement`](finsheet_core::Statement)
//! - [`Dialogs`] - injected confirmation and text prompts
//! - [`GridObserver`] - change notifications for persistence
//! - [`Grid::render`] - the display matrix
//! - [`Grid::row_menu`], [`Grid::column_menu`], [`Grid::cell_menu`] - context menus

pub mod command;
pub mod dialogs;
pub mod grid;
pub mod menu;
pub mod nav;
pub mod numbering;
pub mod observer;
pub mod render;

#[cfg(test)]
mod testing;

pub use command::{Dispatch, GridCommand};
pub use dialogs::{Answer, AutoConfirm, Dialogs, ScriptedDialogs};
pub use grid::{Grid, DEFAULT_ROW_LABEL, DEFAULT_VARIANT_LABEL};
pub use menu::{find_item, MenuEntry, MenuItem};
pub use nav::{
    first_navigable_cell, next_position, CellPosition, CommitRequest, Direction, InteractionState,
    Key, KeyInput, NavContext, NavMode,
};
pub use numbering::{period_numbers, row_numbers};
pub use observer::{GridObserver, Notification};
pub use render::{RenderedCell, RenderedColumn, RenderedGrid, RenderedRow};
