use std::{cell::RefCell, io::Write, rc::Rc};

use tracing::warn;

/// Screen shared by the panel and the surface on the app loop.
pub(crate) type SharedScreen = Rc<RefCell<Screen>>;

/// Redraws a live block (header plus spectrum rows) in place below the
/// scrolling log of status lines.
pub(crate) struct Screen {
    out: Box<dyn Write>,
    elapsed: String,
    keys: String,
    bars: Vec<String>,
    /// Lines of the live block currently on the terminal.
    drawn: usize,
}

impl Screen {
    pub(crate) fn new(out: Box<dyn Write>) -> Self {
        Self {
            out,
            elapsed: "00:00".to_string(),
            keys: String::new(),
            bars: Vec::new(),
            drawn: 0,
        }
    }

    pub(crate) fn shared(out: Box<dyn Write>) -> SharedScreen {
        Rc::new(RefCell::new(Self::new(out)))
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: &str) {
        self.elapsed = elapsed.to_string();
        self.redraw();
    }

    pub(crate) fn set_keys(&mut self, keys: String) {
        self.keys = keys;
        self.redraw();
    }

    pub(crate) fn set_bars(&mut self, bars: Vec<String>) {
        self.bars = bars;
        self.redraw();
    }

    /// `elapsed` followed by the available keys.
    pub(crate) fn header(&self) -> String {
        format!("[{}]  {}", self.elapsed, self.keys)
    }

    /// Prints a line above the live block.
    pub(crate) fn log_line(&mut self, line: &str) {
        let result = self
            .erase()
            .and_then(|_| writeln!(self.out, "{}", line))
            .and_then(|_| self.draw());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    pub(crate) fn redraw(&mut self) {
        if let Err(e) = self.erase().and_then(|_| self.draw()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn erase(&mut self) -> std::io::Result<()> {
        if self.drawn > 0 {
            // Cursor to the start of the block, then clear to end of screen.
            write!(self.out, "\x1b[{}F\x1b[J", self.drawn)?;
            self.drawn = 0;
        }
        Ok(())
    }

    fn draw(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", self.header())?;
        for line in &self.bars {
            writeln!(self.out, "{}", line)?;
        }
        self.drawn = 1 + self.bars.len();
        self.out.flush()
    }
}
