use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use okna_core::input::{parse_coordinates, parse_int, parse_optional_int};
use okna_core::{FreezeOutcome, UnfreezeOutcome, WindowHandle};

use super::Shell;

const ACTION_PROMPT: &str = "Choose an action (move/get_pos/rename/entr_kord/freeze/unfreeze/r to change window/q to quit): ";

/// How the action loop was left.
pub(super) enum Flow {
    Reselect,
    Quit,
}

/// `Break` when input ended mid-action.
type Step = ControlFlow<()>;

impl<R: BufRead, W: Write> Shell<R, W> {
    fn show_selected(&mut self, handle: WindowHandle) -> io::Result<()> {
        let title = self
            .directory
            .resolve(handle)
            .map(|record| record.title)
            .unwrap_or_default();
        let name = self.names.name_of(handle).unwrap_or("N/A").to_string();
        writeln!(self.output)?;
        self.say(format!("Currently selected window: {}", title))?;
        self.say(format!("Current name: {}", name))
    }

    /// Prompt for actions on `handle` until the user leaves or it goes away.
    pub(super) fn manage_window(&mut self, handle: WindowHandle) -> io::Result<Flow> {
        self.show_selected(handle)?;

        loop {
            if !self.directory.is_live(handle) {
                self.say("Selected window is not available")?;
                return Ok(Flow::Reselect);
            }

            let Some(action) = self.prompt(ACTION_PROMPT)? else {
                return Ok(Flow::Quit);
            };

            let step = match action.trim().to_lowercase().as_str() {
                "q" => return Ok(Flow::Quit),
                "r" => return Ok(Flow::Reselect),
                "move" => self.move_action(handle)?,
                "get_pos" => self.get_pos_action(handle)?,
                "rename" => self.rename_action(handle)?,
                "entr_kord" => self.entr_kord_action(handle)?,
                "freeze" => self.freeze_action(handle)?,
                "unfreeze" => self.unfreeze_action(handle)?,
                _ => {
                    self.say("Unknown action.")?;
                    ControlFlow::Continue(())
                }
            };
            if step.is_break() {
                return Ok(Flow::Quit);
            }
        }
    }

    fn move_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        let Some(x) = self.prompt("Enter X coordinate: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let x = match parse_int(&x) {
            Ok(x) => x,
            Err(e) => {
                self.report_error("move", e)?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        let Some(y) = self.prompt("Enter Y coordinate: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(width) = self.prompt("Enter width (leave empty to keep current): ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(height) = self.prompt("Enter height (leave empty to keep current): ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let parsed = parse_int(&y).and_then(|y| {
            Ok((
                y,
                parse_optional_int(&width)?,
                parse_optional_int(&height)?,
            ))
        });
        let (y, width, height) = match parsed {
            Ok(values) => values,
            Err(e) => {
                self.report_error("move", e)?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        match self.directory.move_window(handle, x, y, width, height) {
            Ok(_) => self.say("Window moved.")?,
            Err(e) => self.report_error("move", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn get_pos_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        match self.directory.position(handle) {
            Ok(rect) => self.say(format!("Current window position: {}", rect))?,
            Err(e) => self.report_error("get_pos", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn rename_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        let Some(new_name) = self.prompt("Enter a new name for the window: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.names.rename(handle, new_name.clone()) {
            Ok(()) => self.say(format!("Window renamed to: {}", new_name))?,
            Err(e) => self.report_error("rename", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn entr_kord_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        let Some(text) =
            self.prompt("Enter coordinates (e.g., X=-7, Y=0, Width=466, Height=359): ")?
        else {
            return Ok(ControlFlow::Break(()));
        };

        let rect = match parse_coordinates(&text) {
            Ok(rect) => rect,
            Err(e) => {
                self.report_error("entr_kord", e)?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        match self.directory.move_window(
            handle,
            rect.x,
            rect.y,
            Some(rect.width),
            Some(rect.height),
        ) {
            Ok(_) => self.say("Window moved to specified coordinates.")?,
            Err(e) => self.report_error("entr_kord", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn freeze_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        match self.registry.freeze(handle) {
            Ok(FreezeOutcome::Frozen {
                previous_suspend_count,
                ..
            }) => {
                self.say("Window frozen.")?;
                if previous_suspend_count > 0 {
                    self.say(format!(
                        "Note: its thread was already suspended {} time(s) by another program.",
                        previous_suspend_count
                    ))?;
                }
            }
            Ok(FreezeOutcome::AlreadyFrozen) => self.say("Window is already frozen.")?,
            Err(e) => self.report_error("freeze", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn unfreeze_action(&mut self, handle: WindowHandle) -> io::Result<Step> {
        match self.registry.unfreeze(handle) {
            Ok(outcome @ UnfreezeOutcome::Unfrozen { .. }) => {
                self.say("Window unfrozen.")?;
                if outcome.still_suspended() {
                    self.say(
                        "Note: its thread is still suspended by another program and may stay unresponsive.",
                    )?;
                }
            }
            Ok(UnfreezeOutcome::NotFrozen) => self.say("Window is not frozen.")?,
            Err(e) => self.report_error("unfreeze", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }
}
