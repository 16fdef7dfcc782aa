//! Keyboard and pointer navigation
//!
//! [`InteractionState`] holds the focused cell, the cell being edited and the
//! edit buffer. It does not own any grid data: every transition consults a
//! [`NavContext`] for bounds, row editability and stored values. Transitions
//! that finish an edit hand back a [`CommitRequest`] for the owner to apply.
//!
//! Vertical moves only stop on rows that are both data rows and editable.
//! Horizontal moves step to the adjacent visible column.

use std::fmt;
use std::mem;

use finsheet_core::{format_for_editing, parse_number};
use log::trace;

/// A cell in the visible matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    /// Row index
    pub row: usize,
    /// Visible column index
    pub col: usize,
}

impl CellPosition {
    /// Create a position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Keys the grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Tab,
    Escape,
    F2,
    Delete,
    Backspace,
    /// A printable character
    Char(char),
}

impl Key {
    /// Parse a key name such as `ArrowDown`, `F2` or a single character
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "F2" => Key::F2,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Space" => Key::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    /// Unmodified key press
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            meta: false,
        }
    }

    /// Add the shift modifier
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Add the ctrl modifier
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Add the meta modifier
    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// The character this press types, if any
    ///
    /// Ctrl and meta chords never type.
    pub fn typed_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.ctrl && !self.meta => Some(c),
            _ => None,
        }
    }

    /// Parse a chord such as `shift+Tab` or `ctrl+c`
    pub fn parse(chord: &str) -> Option<Self> {
        // A trailing '+' names the plus key itself
        let (modifiers, name) = match chord.strip_suffix('+') {
            Some(rest) => (rest.strip_suffix('+').unwrap_or(rest), "+"),
            None => chord.rsplit_once('+').unwrap_or(("", chord)),
        };
        let mut input = KeyInput::new(Key::from_name(name)?);
        for modifier in modifiers.split('+').filter(|m| !m.is_empty()) {
            match modifier.to_ascii_lowercase().as_str() {
                "shift" => input.shift = true,
                "ctrl" | "control" => input.ctrl = true,
                "meta" | "cmd" => input.meta = true,
                _ => return None,
            }
        }
        Some(input)
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::new(key)
    }
}

/// Movement direction within the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Coarse interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavMode {
    /// Nothing focused
    NoFocus,
    /// A cell is focused but not being edited
    Idle,
    /// The focused cell is being edited
    Editing,
}

/// The grid as seen by the navigator
pub trait NavContext {
    /// Number of rows
    fn row_count(&self) -> usize;

    /// Number of visible columns
    fn column_count(&self) -> usize;

    /// Whether the row shows per-period cells and can take pointer focus
    fn has_cells(&self, row: usize) -> bool;

    /// Whether vertical navigation may stop on the row
    fn is_navigable(&self, row: usize) -> bool;

    /// Whether the row's cells accept input
    fn is_editable(&self, row: usize) -> bool;

    /// Stored value under a position
    fn value_at(&self, position: CellPosition) -> Option<f64>;
}

/// A finished edit waiting to be written
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitRequest {
    /// Cell being written
    pub position: CellPosition,
    /// Parsed value; `None` clears the cell
    pub value: Option<f64>,
}

/// Next cell in a direction, honoring the data-row skip rule
pub fn next_position<C: NavContext + ?Sized>(
    ctx: &C,
    from: CellPosition,
    direction: Direction,
) -> Option<CellPosition> {
    match direction {
        Direction::Up => (0..from.row.min(ctx.row_count()))
            .rev()
            .find(|&row| ctx.is_navigable(row))
            .map(|row| CellPosition::new(row, from.col)),
        Direction::Down => (from.row + 1..ctx.row_count())
            .find(|&row| ctx.is_navigable(row))
            .map(|row| CellPosition::new(row, from.col)),
        Direction::Left => from.col.checked_sub(1).map(|col| CellPosition::new(from.row, col)),
        Direction::Right => Some(from.col + 1)
            .filter(|&col| col < ctx.column_count())
            .map(|col| CellPosition::new(from.row, col)),
    }
}

/// First column of the first navigable row
pub fn first_navigable_cell<C: NavContext + ?Sized>(ctx: &C) -> Option<CellPosition> {
    if ctx.column_count() == 0 {
        return None;
    }
    (0..ctx.row_count())
        .find(|&row| ctx.is_navigable(row))
        .map(|row| CellPosition::new(row, 0))
}

/// Focus and edit state of the grid
///
/// `editing` is only ever set to the focused cell, and the buffer is empty
/// whenever no edit is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    focused: Option<CellPosition>,
    editing: Option<CellPosition>,
    edit_value: String,
}

impl InteractionState {
    /// Unfocused state
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused cell
    pub fn focused(&self) -> Option<CellPosition> {
        self.focused
    }

    /// Cell being edited
    pub fn editing(&self) -> Option<CellPosition> {
        self.editing
    }

    /// Current edit buffer
    pub fn edit_value(&self) -> &str {
        &self.edit_value
    }

    /// Current mode
    pub fn mode(&self) -> NavMode {
        match (self.focused, self.editing) {
            (_, Some(_)) => NavMode::Editing,
            (Some(_), None) => NavMode::Idle,
            (None, None) => NavMode::NoFocus,
        }
    }

    /// Handle a key press
    pub fn handle_key<C: NavContext + ?Sized>(
        &mut self,
        input: KeyInput,
        ctx: &C,
    ) -> Option<CommitRequest> {
        match self.mode() {
            NavMode::NoFocus => {
                self.enter_grid(input, ctx);
                None
            }
            NavMode::Idle => self.handle_idle_key(input, ctx),
            NavMode::Editing => self.handle_editing_key(input, ctx),
        }
    }

    fn enter_grid<C: NavContext + ?Sized>(&mut self, input: KeyInput, ctx: &C) {
        let enters = input.key.direction().is_some() || matches!(input.key, Key::Enter | Key::Tab);
        if !enters {
            return;
        }
        if let Some(position) = first_navigable_cell(ctx) {
            trace!("focus enters grid at {}", position);
            self.focused = Some(position);
        }
    }

    fn handle_idle_key<C: NavContext + ?Sized>(
        &mut self,
        input: KeyInput,
        ctx: &C,
    ) -> Option<CommitRequest> {
        let position = self.focused?;
        if let Some(direction) = input.key.direction() {
            self.move_focus(ctx, position, direction);
            return None;
        }
        match input.key {
            Key::Enter => self.move_focus(ctx, position, Direction::Down),
            Key::Tab => self.move_focus(ctx, position, horizontal(input.shift)),
            Key::F2 => self.start_edit(position, ctx),
            Key::Delete | Key::Backspace => {
                if ctx.is_editable(position.row) {
                    trace!("clear {}", position);
                    return Some(CommitRequest {
                        position,
                        value: None,
                    });
                }
            }
            _ => {
                if input.typed_char().is_some() {
                    self.start_edit(position, ctx);
                }
            }
        }
        None
    }

    fn handle_editing_key<C: NavContext + ?Sized>(
        &mut self,
        input: KeyInput,
        ctx: &C,
    ) -> Option<CommitRequest> {
        match input.key {
            Key::Enter => self.commit_and_move(ctx, Direction::Down),
            Key::Tab => self.commit_and_move(ctx, horizontal(input.shift)),
            Key::Escape => {
                self.cancel_edit();
                None
            }
            Key::Backspace => {
                self.edit_value.pop();
                None
            }
            _ => {
                if let Some(c) = input.typed_char() {
                    self.edit_value.push(c);
                }
                None
            }
        }
    }

    /// Pointer focus on a cell; commits an edit in progress elsewhere
    ///
    /// Positions outside the matrix or on rows without cells are ignored.
    pub fn focus<C: NavContext + ?Sized>(
        &mut self,
        position: CellPosition,
        ctx: &C,
    ) -> Option<CommitRequest> {
        if !in_bounds(ctx, position) || !ctx.has_cells(position.row) {
            return None;
        }
        if self.editing == Some(position) {
            return None;
        }
        let commit = self.finish_edit();
        trace!("focus {:?} -> {}", self.focused, position);
        self.focused = Some(position);
        commit
    }

    /// Double-click: focus the cell and start editing it when editable
    pub fn begin_edit<C: NavContext + ?Sized>(
        &mut self,
        position: CellPosition,
        ctx: &C,
    ) -> Option<CommitRequest> {
        let commit = self.focus(position, ctx);
        if self.focused == Some(position) && self.editing.is_none() {
            self.start_edit(position, ctx);
        }
        commit
    }

    /// Replace the edit buffer; ignored when not editing
    pub fn set_edit_text(&mut self, text: &str) -> bool {
        if self.editing.is_none() {
            return false;
        }
        self.edit_value.clear();
        self.edit_value.push_str(text);
        true
    }

    /// Focus leaves the grid input; commits without moving
    pub fn blur(&mut self) -> Option<CommitRequest> {
        self.finish_edit()
    }

    /// Discard the edit in progress
    pub fn cancel_edit(&mut self) {
        if let Some(position) = self.editing.take() {
            trace!("cancel edit at {}", position);
        }
        self.edit_value.clear();
    }

    /// Commit any edit in progress without moving
    pub fn finish_edit(&mut self) -> Option<CommitRequest> {
        let position = self.editing.take()?;
        let text = mem::take(&mut self.edit_value);
        let value = parse_number(&text);
        trace!("commit {:?} at {}", text, position);
        Some(CommitRequest { position, value })
    }

    /// Pull focus back inside the matrix
    ///
    /// Focus lands on the nearest row with cells at or above the old row,
    /// else below it; it is dropped when no such row or no column remains.
    /// Callers commit any edit first. An edit still open is kept only while
    /// its cell stays focused.
    pub fn clamp<C: NavContext + ?Sized>(&mut self, ctx: &C) {
        let Some(position) = self.focused else {
            return;
        };
        let rows = ctx.row_count();
        let cols = ctx.column_count();
        if rows == 0 || cols == 0 {
            self.focused = None;
            trace!("focus dropped, matrix is empty");
            return;
        }

        let start = position.row.min(rows - 1);
        let row = (0..=start)
            .rev()
            .find(|&r| ctx.has_cells(r))
            .or_else(|| (start + 1..rows).find(|&r| ctx.has_cells(r)));
        self.focused = row.map(|row| CellPosition::new(row, position.col.min(cols - 1)));
        if self.focused != Some(position) {
            trace!("focus clamped {} -> {:?}", position, self.focused);
            self.cancel_edit();
        }
    }

    fn start_edit<C: NavContext + ?Sized>(&mut self, position: CellPosition, ctx: &C) {
        if !in_bounds(ctx, position) || !ctx.is_editable(position.row) {
            return;
        }
        self.focused = Some(position);
        self.editing = Some(position);
        self.edit_value = format_for_editing(ctx.value_at(position));
        trace!("edit {} seeded with {:?}", position, self.edit_value);
    }

    fn move_focus<C: NavContext + ?Sized>(
        &mut self,
        ctx: &C,
        from: CellPosition,
        direction: Direction,
    ) {
        match next_position(ctx, from, direction) {
            Some(target) => {
                trace!("focus {} -> {}", from, target);
                self.focused = Some(target);
            }
            None => trace!("no cell {:?} of {}", direction, from),
        }
    }

    fn commit_and_move<C: NavContext + ?Sized>(
        &mut self,
        ctx: &C,
        direction: Direction,
    ) -> Option<CommitRequest> {
        let commit = self.finish_edit()?;
        self.move_focus(ctx, commit.position, direction);
        Some(commit)
    }
}

fn horizontal(shift: bool) -> Direction {
    if shift {
        Direction::Left
    } else {
        Direction::Right
    }
}

fn in_bounds<C: NavContext + ?Sized>(ctx: &C, position: CellPosition) -> bool {
    position.row < ctx.row_count() && position.col < ctx.column_count()
}
