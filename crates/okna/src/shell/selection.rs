use std::io::{self, BufRead, Write};

use tracing::info;

use okna_core::WindowHandle;
use okna_core::input::parse_int;

use super::Shell;

const SELECT_PROMPT: &str = "Enter the number of the window to manage, a name to search for (or 'q' to quit, 'r' to restart): ";
const DISAMBIGUATE_PROMPT: &str =
    "Select window to manage by index (or c to cancel window selection): ";

pub(super) enum Selection {
    Window(WindowHandle),
    Restart,
    Quit,
}

enum Pick {
    Selected(WindowHandle),
    Cancelled,
    Quit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn list_windows(&mut self) -> io::Result<Vec<WindowHandle>> {
        self.say("Available windows:")?;
        let windows = match self.directory.enumerate() {
            Ok(windows) => windows,
            Err(e) => {
                self.report_error("enumerate", &e)?;
                Vec::new()
            }
        };

        for (i, record) in windows.iter().enumerate() {
            let name = self.names.name_of(record.handle).unwrap_or("N/A");
            writeln!(
                self.output,
                "{}. {} (HWND: {}, Name: {})",
                i + 1,
                record.title,
                record.handle,
                name
            )?;
        }
        Ok(windows.into_iter().map(|record| record.handle).collect())
    }

    /// List windows and read choices until one names a live window.
    ///
    /// A choice is tried against stored names first (case-insensitive
    /// substring) and only then as a 1-based index into the list.
    pub(super) fn select_window(&mut self) -> io::Result<Selection> {
        let listed = self.list_windows()?;

        loop {
            let Some(choice) = self.prompt(SELECT_PROMPT)? else {
                return Ok(Selection::Quit);
            };
            let choice = choice.trim();

            match choice.to_lowercase().as_str() {
                "q" => return Ok(Selection::Quit),
                "r" => return Ok(Selection::Restart),
                "" => {
                    self.say("Error: Please enter a valid number or name.")?;
                    continue;
                }
                _ => {}
            }

            let matches = self.names.find_by_name_substring(choice);
            match matches.as_slice() {
                [] => {}
                [(name, handle)] => {
                    if self.directory.is_live(*handle) {
                        self.say(format!("Selected window by custom name: {}", name))?;
                        return Ok(self.selected(*handle));
                    }
                    self.say("Window is no longer available.")?;
                    continue;
                }
                _ => match self.disambiguate(&matches)? {
                    Pick::Selected(handle) => return Ok(self.selected(handle)),
                    Pick::Cancelled => continue,
                    Pick::Quit => return Ok(Selection::Quit),
                },
            }

            let Ok(index) = parse_int(choice) else {
                self.say("Error: Please enter a valid number or name.")?;
                continue;
            };
            let Some(&handle) = usize::try_from(index)
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| listed.get(index))
            else {
                self.say("Invalid window choice.")?;
                continue;
            };

            if self.directory.is_live(handle) {
                return Ok(self.selected(handle));
            }
            self.say("Window is no longer available.")?;
        }
    }

    fn selected(&self, handle: WindowHandle) -> Selection {
        info!(event = "cli.shell.window_selected", handle = %handle);
        Selection::Window(handle)
    }

    /// Choose between several name matches, listed in handle order.
    fn disambiguate(&mut self, matches: &[(String, WindowHandle)]) -> io::Result<Pick> {
        self.say("Multiple windows found, select by index")?;
        for (i, (name, handle)) in matches.iter().enumerate() {
            writeln!(self.output, "{}. {} (HWND: {})", i + 1, name, handle)?;
        }

        loop {
            let Some(choice) = self.prompt(DISAMBIGUATE_PROMPT)? else {
                return Ok(Pick::Quit);
            };
            if choice.trim().eq_ignore_ascii_case("c") {
                return Ok(Pick::Cancelled);
            }

            let Ok(index) = parse_int(&choice) else {
                self.say("Error: Please enter a valid number.")?;
                continue;
            };
            let Some((_, handle)) = usize::try_from(index)
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| matches.get(index))
            else {
                self.say("Invalid window choice.")?;
                continue;
            };

            if self.directory.is_live(*handle) {
                return Ok(Pick::Selected(*handle));
            }
            self.say("Window is no longer available.")?;
            return Ok(Pick::Cancelled);
        }
    }
}
