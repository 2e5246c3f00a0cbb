use std::rc::Rc;

use tracing::info;

use crate::address_space::AddressSpace;
use crate::decoder::Decoder;
use crate::error::Result;
use crate::navigation::{Direction, NavigationEngine};
use crate::view_mode::{ModeKind, ViewMode, HEX_ROW_WIDTH};
use crate::viewport::Viewport;

/// Everything an input mode or the renderer needs to know about the file
/// being viewed and where the user is in it.
pub struct Session {
    space: AddressSpace,
    decoder: Rc<dyn Decoder>,
    mode: ViewMode,
    viewport: Viewport,
    engine: NavigationEngine,
}

impl Session {
    /// Opens a session on `space` with the cursor on `start` (clamped to the
    /// end of the file).
    pub fn new(
        space: AddressSpace,
        decoder: Rc<dyn Decoder>,
        kind: ModeKind,
        start: u64,
        visible_rows: usize,
    ) -> Result<Session> {
        let mode = make_mode(kind, &decoder);
        let mut viewport = Viewport::new(0);
        viewport.set_visible_row_count(visible_rows);

        let mut session = Session {
            space,
            decoder,
            mode,
            viewport,
            engine: NavigationEngine::new(),
        };
        session.jump_to(start)?;
        Ok(session)
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn decoder(&self) -> &dyn Decoder {
        self.decoder.as_ref()
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<()> {
        self.engine
            .apply(&mut self.viewport, &self.mode, &self.space, direction)
    }

    pub fn jump_to(&mut self, address: u64) -> Result<()> {
        self.engine
            .jump_to(&mut self.viewport, &self.mode, &self.space, address)
    }

    pub fn jump_to_boundary(&mut self, direction: Direction) -> Result<()> {
        self.engine
            .jump_to_boundary(&mut self.viewport, &self.mode, &self.space, direction)
    }

    /// Resamples the body height from the terminal height.
    pub fn resize(&mut self, terminal_height: u16) -> Result<()> {
        if self.viewport.resize(terminal_height) {
            self.engine
                .reconcile(&mut self.viewport, &self.mode, &self.space)?;
        }
        Ok(())
    }

    /// Switches between hex and code rows, keeping the current address.
    pub fn set_mode(&mut self, kind: ModeKind) -> Result<()> {
        if kind == self.mode.kind() {
            return Ok(());
        }
        self.mode = make_mode(kind, &self.decoder);
        self.engine.reset();

        if kind == ModeKind::Hex {
            let page_address = self.viewport.page_address();
            self.viewport
                .rebase(page_address - page_address % HEX_ROW_WIDTH as u64);
        }

        info!(
            mode = self.mode.name(),
            address = self.viewport.current_address(),
            "view mode switched"
        );
        self.engine
            .reconcile(&mut self.viewport, &self.mode, &self.space)
    }

    pub fn toggle_mode(&mut self) -> Result<()> {
        match self.mode.kind() {
            ModeKind::Hex => self.set_mode(ModeKind::Code),
            ModeKind::Code => self.set_mode(ModeKind::Hex),
        }
    }
}

fn make_mode(kind: ModeKind, decoder: &Rc<dyn Decoder>) -> ViewMode {
    match kind {
        ModeKind::Hex => ViewMode::hex(),
        ModeKind::Code => ViewMode::code(Rc::clone(decoder)),
    }
}
