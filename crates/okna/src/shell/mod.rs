//! Interactive prompt for picking a window and acting on it.
//!
//! Generic over its input and output so tests can drive it with scripted
//! text against an in-memory desktop.

mod actions;
mod selection;

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use okna_core::desktop::WindowDirectory;
use okna_core::{FreezeRegistry, NameStore};

use actions::Flow;
use selection::Selection;

pub struct Shell<R, W> {
    directory: WindowDirectory,
    names: NameStore,
    registry: Arc<FreezeRegistry>,
    input: R,
    output: W,
    pause: Duration,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        directory: WindowDirectory,
        names: NameStore,
        registry: Arc<FreezeRegistry>,
        input: R,
        output: W,
        pause: Duration,
    ) -> Self {
        Self {
            directory,
            names,
            registry,
            input,
            output,
            pause,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.select_window()? {
                Selection::Quit => return Ok(()),
                Selection::Restart => continue,
                Selection::Window(handle) => match self.manage_window(handle)? {
                    Flow::Quit => return Ok(()),
                    Flow::Reselect => {
                        if !self.pause.is_zero() {
                            std::thread::sleep(self.pause);
                        }
                    }
                },
            }
        }
    }

    /// Print `text` and read one line. `None` means input has ended.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn report_error(&mut self, action: &str, error: impl Display) -> io::Result<()> {
        warn!(event = "cli.shell.action_failed", action = action, error = %error);
        writeln!(self.output, "Error: {}", error)
    }
}
