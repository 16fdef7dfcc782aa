//! Replay scripts
//!
//! One step per line; blank lines and `#` comments are skipped. Rows and
//! columns are 0-based, columns counting visible periods only.
//!
//! ```text
//! key ArrowDown            key shift+Tab           type 1,250
//! click 1 0                dblclick 1 0            blur
//! insert-row 3 below       delete-row 3            move-row 3 up
//! add-period               remove-period           insert-column 0 right clone
//! delete-period 1          clear-period 1          toggle-active 1
//! include 1 no             font 1 0 red            background 1 0 yellow
//! bold 1 0                 clear-format 1 0        comment 1 0
//! remove-comment 1 0       hide 2023-12-31         show 2023-12-31
//! answer Pro Forma         cancel                  confirm yes
//! ```
//!
//! `answer`, `cancel` and `confirm` queue the reply to the next question the
//! grid asks.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use finsheet::{
    BackgroundHighlight, CellPosition, ColumnSide, FontHighlight, GridCommand, InsertMode,
    KeyInput, MoveDirection, RowSide,
};

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Command(GridCommand),
    Confirm(bool),
    /// `None` cancels the prompt
    Answer(Option<String>),
}

/// A step with the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub text: String,
    pub step: Step,
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let step = parse_step(text).with_context(|| format!("line {}: {}", i + 1, text))?;
        lines.push(ScriptLine {
            line: i + 1,
            text: text.to_string(),
            step,
        });
    }
    Ok(lines)
}

/// Parse one non-empty line
pub fn parse_step(text: &str) -> Result<Step> {
    let (verb, rest) = text
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((text, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "answer" => return Ok(Step::Answer(Some(rest.to_string()))),
        "cancel" => return Ok(Step::Answer(None)),
        "confirm" => return Ok(Step::Confirm(yes_no(arg(&args, 0)?)?)),

        "key" => {
            let chord = arg(&args, 0)?;
            GridCommand::Key(KeyInput::parse(chord).ok_or_else(|| anyhow!("unknown key {:?}", chord))?)
        }
        // Everything after the verb, spaces included
        "type" => GridCommand::EditText(rest.to_string()),
        "click" => GridCommand::Focus(cell(&args)?),
        "dblclick" => GridCommand::BeginEdit(cell(&args)?),
        "blur" => GridCommand::Blur,

        "insert-row" => GridCommand::InsertRow {
            row: index(&args, 0)?,
            side: match arg(&args, 1)? {
                "above" => RowSide::Above,
                "below" => RowSide::Below,
                other => bail!("expected above or below, got {:?}", other),
            },
        },
        "delete-row" => GridCommand::DeleteRow { row: index(&args, 0)? },
        "move-row" => GridCommand::MoveRow {
            row: index(&args, 0)?,
            direction: match arg(&args, 1)? {
                "up" => MoveDirection::Up,
                "down" => MoveDirection::Down,
                other => bail!("expected up or down, got {:?}", other),
            },
        },

        "add-period" => GridCommand::AddPeriod,
        "remove-period" => GridCommand::RemovePeriod,
        "insert-column" => GridCommand::InsertColumn {
            col: index(&args, 0)?,
            side: match arg(&args, 1)? {
                "left" => ColumnSide::Left,
                "right" => ColumnSide::Right,
                other => bail!("expected left or right, got {:?}", other),
            },
            mode: match args.get(2).copied().unwrap_or("clone") {
                "clone" => InsertMode::Clone,
                "blank" => InsertMode::Blank,
                other => bail!("expected clone or blank, got {:?}", other),
            },
        },
        "delete-period" => GridCommand::DeletePeriod { col: index(&args, 0)? },
        "clear-period" => GridCommand::ClearPeriod { col: index(&args, 0)? },
        "toggle-active" => GridCommand::ToggleActive { col: index(&args, 0)? },
        "include" => GridCommand::SetIncluded {
            col: index(&args, 0)?,
            included: yes_no(arg(&args, 1)?)?,
        },

        "font" => GridCommand::ToggleFont {
            cell: cell(&args)?,
            font: font(&args.get(2..).unwrap_or_default().join(" "))?,
        },
        "background" => GridCommand::ToggleBackground {
            cell: cell(&args)?,
            background: background(arg(&args, 2)?)?,
        },
        "bold" => GridCommand::ToggleBoldBorder { cell: cell(&args)? },
        "clear-format" => GridCommand::ClearFormatting { cell: cell(&args)? },
        "comment" => GridCommand::EditComment { cell: cell(&args)? },
        "remove-comment" => GridCommand::RemoveComment { cell: cell(&args)? },

        "hide" => GridCommand::HidePeriodEnd(date(arg(&args, 0)?)?),
        "show" => GridCommand::ShowPeriodEnd(date(arg(&args, 0)?)?),

        other => bail!("unknown command {:?}", other),
    };
    Ok(Step::Command(command))
}

fn arg<'a>(args: &[&'a str], i: usize) -> Result<&'a str> {
    args.get(i)
        .copied()
        .ok_or_else(|| anyhow!("missing argument {}", i + 1))
}

fn index(args: &[&str], i: usize) -> Result<usize> {
    let raw = arg(args, i)?;
    raw.parse()
        .with_context(|| format!("not an index: {:?}", raw))
}

fn cell(args: &[&str]) -> Result<CellPosition> {
    Ok(CellPosition::new(index(args, 0)?, index(args, 1)?))
}

fn yes_no(raw: &str) -> Result<bool> {
    match raw {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => bail!("expected yes or no, got {:?}", other),
    }
}

fn date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("not a date: {:?}", raw))
}

fn font(raw: &str) -> Result<FontHighlight> {
    FontHighlight::ALL
        .into_iter()
        .find(|f| {
            let label = f.label();
            label.eq_ignore_ascii_case(raw)
                || label
                    .strip_prefix("Bold ")
                    .map_or(false, |color| color.eq_ignore_ascii_case(raw))
        })
        .ok_or_else(|| anyhow!("unknown font color {:?}", raw))
}

fn background(raw: &str) -> Result<BackgroundHighlight> {
    BackgroundHighlight::ALL
        .into_iter()
        .find(|b| b.label().eq_ignore_ascii_case(raw))
        .ok_or_else(|| anyhow!("unknown background {:?}", raw))
}
