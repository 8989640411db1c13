//! Line-command driver for a headless color selector.
//!
//! Each input line is parsed into a [`Command`] and applied to a
//! [`ColorSelector`] over a [`HeadlessSurface`]. Key presses go through a
//! [`KeyEventsManager`] so the Ctrl shortcuts behave as they would in a window.

use std::str::FromStr;

use tinct_ui::{HeadlessSurface, KeyCodes, KeyEventsManager};

use crate::config::PickerConfig;
use crate::controller::ColorSelector;
use crate::error::{ColorError, SelectorError};
use crate::selector::FieldEdit;

/// Actions triggered by keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Copy,
    Paste,
    Undo,
    Redo,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move slider `field` of slot `slot`
    Slider { slot: usize, field: usize, value: i32 },
    /// Type `text` into entry `field` of slot `slot`
    Text {
        slot: usize,
        field: usize,
        text: String,
    },
    /// Append a slot of the named kind
    Add(String),
    /// Drop the last slot
    Remove,
    /// Switch slot `slot` to the named kind
    Retype { slot: usize, kind: String },
    /// Copy the color to the clipboard
    Copy,
    /// Paste the given text, or the clipboard when absent
    Paste(Option<String>),
    /// Raw key press
    Press(u32),
    /// Raw key release
    Release(u32),
    Undo,
    Redo,
    /// Print every slot
    Show,
    Quit,
}

/// Errors from parsing or running a command.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Not a number: {0:?}")]
    InvalidNumber(String),

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl From<ColorError> for DriverError {
    fn from(e: ColorError) -> Self {
        DriverError::Selector(e.into())
    }
}

fn number<T: FromStr>(
    args: &mut std::str::SplitWhitespace<'_>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, DriverError> {
    let word = args
        .next()
        .ok_or(DriverError::MissingArgument { command, argument })?;
    word.parse()
        .map_err(|_| DriverError::InvalidNumber(word.to_string()))
}

fn word(
    args: &mut std::str::SplitWhitespace<'_>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, DriverError> {
    args.next()
        .map(str::to_string)
        .ok_or(DriverError::MissingArgument { command, argument })
}

/// The part of `line` after its first `count` words.
fn after_words(line: &str, count: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..count {
        rest = rest
            .trim_start_matches(|c: char| !c.is_whitespace())
            .trim_start();
    }
    rest
}

impl FromStr for Command {
    type Err = DriverError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let Some(name) = args.next() else {
            return Ok(Command::Show);
        };

        let command = match name {
            "slider" => Command::Slider {
                slot: number(&mut args, "slider", "slot")?,
                field: number(&mut args, "slider", "field")?,
                value: number(&mut args, "slider", "value")?,
            },
            "text" => Command::Text {
                slot: number(&mut args, "text", "slot")?,
                field: number(&mut args, "text", "field")?,
                // Everything after the field index, spaces included; may be empty
                text: after_words(line, 3).to_string(),
            },
            "add" => Command::Add(word(&mut args, "add", "kind")?),
            "remove" => Command::Remove,
            "retype" => Command::Retype {
                slot: number(&mut args, "retype", "slot")?,
                kind: word(&mut args, "retype", "kind")?,
            },
            "copy" => Command::Copy,
            "paste" => Command::Paste(args.next().map(str::to_string)),
            "press" => Command::Press(number(&mut args, "press", "code")?),
            "release" => Command::Release(number(&mut args, "release", "code")?),
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "show" => Command::Show,
            "quit" | "exit" => Command::Quit,
            other => return Err(DriverError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// A headless selector plus the clipboard and keyboard state around it.
pub struct Driver {
    picker: ColorSelector<HeadlessSurface>,
    keys: KeyEventsManager<Shortcut>,
    clipboard: Option<String>,
    highlight_color: String,
}

impl Driver {
    pub fn new(config: &PickerConfig, codes: KeyCodes) -> Result<Self, SelectorError> {
        let picker = ColorSelector::from_config(HeadlessSurface::new(), config)?
            .on_color_change(|| log::trace!("Color changed"));
        let keys = KeyEventsManager::new(codes)
            .on_copy(|_| Shortcut::Copy)
            .on_paste(|_| Shortcut::Paste)
            .on_undo(|_| Shortcut::Undo)
            .on_redo(|_| Shortcut::Redo);

        Ok(Self {
            picker,
            keys,
            clipboard: None,
            highlight_color: config.highlight_color.clone(),
        })
    }

    pub fn picker(&self) -> &ColorSelector<HeadlessSurface> {
        &self.picker
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Apply one command. Returns `false` once the driver should stop.
    pub fn execute(&mut self, command: Command) -> Result<bool, DriverError> {
        match command {
            Command::Slider { slot, field, value } => {
                self.picker.edit(slot, FieldEdit::slider(field, value))?;
            }
            Command::Text { slot, field, text } => {
                self.picker.edit(slot, FieldEdit::text(field, text))?;
            }
            Command::Add(kind) => {
                let kind = self.picker.registry().resolve(&kind)?;
                self.picker.add_slot(kind)?;
            }
            Command::Remove => {
                if self.picker.remove_slot().is_none() {
                    log::warn!("No slot to remove");
                }
            }
            Command::Retype { slot, kind } => {
                self.picker.retype_slot_by_name(slot, &kind)?;
            }
            Command::Copy => self.shortcut(Shortcut::Copy)?,
            Command::Paste(Some(text)) => self.picker.paste_html(&text)?,
            Command::Paste(None) => self.shortcut(Shortcut::Paste)?,
            Command::Press(code) => {
                if let Some(shortcut) = self.keys.key_pressed(code) {
                    self.shortcut(shortcut)?;
                }
            }
            Command::Release(code) => self.keys.key_released(code),
            Command::Undo => self.shortcut(Shortcut::Undo)?,
            Command::Redo => self.shortcut(Shortcut::Redo)?,
            Command::Show => {}
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn shortcut(&mut self, shortcut: Shortcut) -> Result<(), DriverError> {
        match shortcut {
            Shortcut::Copy => {
                let html = self.picker.copy_html()?;
                log::info!("Copied {}", html);
                self.clipboard = Some(html);
                self.picker.highlight_hex_fields(&self.highlight_color);
            }
            Shortcut::Paste => {
                let text = self.clipboard.clone().ok_or(DriverError::EmptyClipboard)?;
                self.picker.paste_html(&text)?;
            }
            Shortcut::Undo => {
                if !self.picker.undo()? {
                    log::debug!("Nothing to undo");
                }
            }
            Shortcut::Redo => {
                if !self.picker.redo()? {
                    log::debug!("Nothing to redo");
                }
            }
        }
        Ok(())
    }

    /// One line per slot: `index kind values...`.
    pub fn render(&self) -> Vec<String> {
        (0..self.picker.len())
            .filter_map(|index| {
                let kind = self.picker.slot_kind(index)?;
                let display = self.picker.slot_display(index)?;
                Some(format!("{} {:<4} {}", index, kind, display.join(" ")))
            })
            .collect()
    }
}
