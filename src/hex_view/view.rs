use std::cell::Cell;
use std::cmp;
use std::io::Write;

use crossterm::{
    cursor,
    event,
    execute, queue, style,
    style::StyledContent,
    terminal, QueueableCommand,
};
use tracing::{debug, info};

use super::frame::{Frame, FrameRenderer};
use super::{OutputColorizer, Style};
use crate::error::Result;
use crate::modes;
use crate::modes::mode::{Mode, ModeTransition};
use crate::session::Session;

/// A mode that owns the menu line while it is active.
trait StatusLinePrompter: Mode {
    /// Draws the prompt into at most `max_width` columns and returns the
    /// first visible column of the input, so the next draw scrolls from
    /// there. The caret column is written to `caret`.
    fn render_with_size(
        &self,
        stdout: &mut dyn Write,
        colorizer: &OutputColorizer,
        max_width: usize,
        last_start_col: usize,
        caret: &mut usize,
    ) -> Result<usize>;
}

// queue! for writers behind `dyn Write`
macro_rules! d_queue {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        Ok::<_, crossterm::ErrorKind>(&mut *$writer)
            $(.and_then(|mut writer| {
                QueueableCommand::queue(&mut writer, $command)?;
                Ok(writer)
            }))*
            .map(|_| ())
    }}
}

impl StatusLinePrompter for modes::command::Command {
    fn render_with_size(
        &self,
        stdout: &mut dyn Write,
        colorizer: &OutputColorizer,
        mut max_width: usize,
        last_start_col: usize,
        caret: &mut usize,
    ) -> Result<usize> {
        let mut start_column = last_start_col;
        d_queue!(
            stdout,
            style::PrintStyledContent(StyledContent::new(
                colorizer.style(Style::Prompt),
                ":"
            ))
        )?;
        max_width = max_width.saturating_sub(1);

        // keep start_column between the cursor and the end of the input
        if self.command.len() <= start_column {
            start_column = cmp::max(1, self.command.len()) - 1;
        }
        if self.cursor < start_column {
            start_column = self.cursor;
        }

        max_width = max_width.saturating_sub((self.cursor == self.command.len()) as usize);

        let required_length = self.cursor - start_column;
        if required_length > max_width {
            start_column += required_length - max_width;
        }

        let end = cmp::min(self.command.len(), start_column + max_width);
        d_queue!(stdout, style::Print(&self.command[start_column..end]))?;
        *caret = 1 + self.cursor - start_column;

        Ok(start_column)
    }
}

pub struct HexView {
    session: Session,
    size: (u16, u16),
    last_visible_prompt_col: Cell<usize>,
    colorizer: OutputColorizer,

    mode: Box<dyn Mode>,
    info: Option<String>,
}

impl HexView {
    pub fn with_session(session: Session) -> HexView {
        HexView {
            session,
            size: (80, 24),
            last_visible_prompt_col: Cell::new(0),
            colorizer: OutputColorizer::new(),
            mode: Box::new(modes::normal::Normal::new()),
            info: None,
        }
    }

    fn draw_frame(&self, stdout: &mut impl Write, frame: &Frame) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for op in &frame.ops {
            queue!(
                stdout,
                cursor::MoveTo(op.col, op.row),
                style::PrintStyledContent(StyledContent::new(
                    self.colorizer.style(op.style),
                    op.text.as_str()
                )),
            )?;
        }
        Ok(())
    }

    fn draw_prompt(&self, stdout: &mut impl Write) -> Result<Option<(u16, u16)>> {
        let prompter = self
            .mode
            .as_any()
            .downcast_ref::<modes::command::Command>()
            .map(|prompter| prompter as &dyn StatusLinePrompter);

        let prompter = match prompter {
            Some(prompter) => prompter,
            None => return Ok(None),
        };

        let row = self.size.1.saturating_sub(1);
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        let mut caret = 0;
        let prev_col = self.last_visible_prompt_col.get();
        let new_col = prompter.render_with_size(
            stdout,
            &self.colorizer,
            self.size.0 as usize,
            prev_col,
            &mut caret,
        )?;
        self.last_visible_prompt_col.set(new_col);
        Ok(Some((caret as u16, row)))
    }

    fn draw(&mut self, stdout: &mut impl Write) -> Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size {
            debug!(width, height, "terminal resized");
            self.size = (width, height);
        }
        self.session.resize(height)?;

        let frame = FrameRenderer::new(width, height).render(&self.session, self.info.as_deref())?;
        self.draw_frame(stdout, &frame)?;

        let caret = match self.draw_prompt(stdout)? {
            Some(caret) => Some(caret),
            None => frame.caret,
        };
        match caret {
            Some((col, row)) => queue!(stdout, cursor::MoveTo(col, row), cursor::Show)?,
            None => queue!(stdout, cursor::Hide)?,
        }
        stdout.flush()?;
        Ok(())
    }

    fn transition(&mut self, transition: ModeTransition) {
        self.info = None;
        match transition {
            ModeTransition::None => {}
            ModeTransition::NewMode(mode) => {
                debug!(from = %self.mode.name(), to = %mode.name(), "input mode");
                self.mode = mode;
            }
            ModeTransition::ModeAndInfo(mode, info) => {
                self.mode = mode;
                self.info = Some(info);
            }
        }
    }

    fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        while self.mode.takes_input() {
            self.draw(stdout)?;
            let evt = event::read()?;
            if let Some(transition) = self.mode.transition(&evt, &mut self.session)? {
                self.transition(transition);
            }
        }
        Ok(())
    }

    /// Takes over the terminal until a quit command. The terminal is handed
    /// back before any error is returned.
    pub fn run_event_loop(mut self, stdout: &mut impl Write) -> Result<()> {
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        info!(file = %self.session.space().name(), "event loop started");

        let result = self.run(stdout);

        let restored = restore_terminal(stdout);
        info!(ok = result.is_ok(), "event loop finished");
        result.and(restored)
    }
}

/// Leaves raw mode and the alternate screen.
pub fn restore_terminal(stdout: &mut impl Write) -> Result<()> {
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
