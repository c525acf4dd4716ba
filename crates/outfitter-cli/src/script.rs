//! Line-oriented input source.
//!
//! Each non-blank line not starting with `#` is one command:
//!
//! ```text
//! drag <inventory> <slot>      begin dragging a slot
//! drop <inventory> <slot>      release the drag over a slot
//! drop none                    release the drag over nothing
//! click <inventory> <slot>     activate a slot (buy or sell in a shop)
//! open <shop-id>               open a shop
//! close                        close the open shop
//! show <inventory>             print an inventory
//! coins                        print the balance
//! shops                        list the shops that can be opened
//! ```
//!
//! `<inventory>` is one of `player`, `wardrobe` or `shop`.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Inventory named by a script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The player's general inventory.
    Player,
    /// The player's clothing inventory.
    Wardrobe,
    /// The open shop's listing.
    Shop,
}

impl FromStr for Target {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Self::Player),
            "wardrobe" => Ok(Self::Wardrobe),
            "shop" => Ok(Self::Shop),
            other => Err(AppError::Input(format!("unknown inventory '{other}'"))),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "player",
            Self::Wardrobe => "wardrobe",
            Self::Shop => "shop",
        })
    }
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Begin dragging a slot.
    Drag(Target, usize),
    /// Release the drag, over a slot or over nothing.
    Drop(Option<(Target, usize)>),
    /// Activate a slot.
    Click(Target, usize),
    /// Open a shop by id.
    Open(String),
    /// Close the open shop.
    Close,
    /// Print an inventory.
    Show(Target),
    /// Print the balance.
    Coins,
    /// List shop ids.
    Shops,
}

/// Parses one line; blank lines and comments yield `None`.
///
/// # Errors
///
/// Returns `AppError::Input` for an unknown command or bad arguments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, AppError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["drag", target, slot] => ScriptCommand::Drag(target.parse()?, parse_slot(slot)?),
        ["drop", "none"] => ScriptCommand::Drop(None),
        ["drop", target, slot] => ScriptCommand::Drop(Some((target.parse()?, parse_slot(slot)?))),
        ["click", target, slot] => ScriptCommand::Click(target.parse()?, parse_slot(slot)?),
        ["open", shop] => ScriptCommand::Open((*shop).to_string()),
        ["close"] => ScriptCommand::Close,
        ["show", target] => ScriptCommand::Show(target.parse()?),
        ["coins"] => ScriptCommand::Coins,
        ["shops"] => ScriptCommand::Shops,
        _ => return Err(AppError::Input(format!("cannot parse '{line}'"))),
    };
    Ok(Some(command))
}

fn parse_slot(word: &str) -> Result<usize, AppError> {
    word.parse()
        .map_err(|e| AppError::Input(format!("slot '{word}' is not an index: {e}")))
}
