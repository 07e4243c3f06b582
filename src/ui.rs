//! Cooperative UI loop
//!
//! Owns the menu state and the UI side of the shared context. The board's main
//! loop calls [`Ui::poll`] forever; there is no deadline.

use crate::display::{render, DEFAULT_SCOPE_GAIN};
use crate::hal::{Display, Encoder};
use crate::menu::{Menu, UiInput};
use crate::shared::{Selection, UiSide};

pub struct Ui<'a> {
    menu: Menu,
    shared: UiSide<'a>,
    scope_gain: f32,
}

impl<'a> Ui<'a> {
    pub fn new(shared: UiSide<'a>) -> Self {
        Self {
            menu: Menu::new(),
            shared,
            scope_gain: DEFAULT_SCOPE_GAIN,
        }
    }

    pub fn with_scope_gain(mut self, gain: f32) -> Self {
        self.scope_gain = gain;
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn selection(&self) -> Selection {
        self.shared.selection()
    }

    /// Apply one poll of input, publishing any selection change
    pub fn handle(&mut self, input: UiInput) {
        if let Some(next) = self.menu.update(input, self.shared.selection()) {
            log::debug!(
                "selection scale={} root={}",
                next.scale.scale().name,
                next.root
            );
            self.shared.set_selection(next);
        }
    }

    /// Redraw from the current state
    pub fn draw<D: Display>(&self, display: &mut D) {
        let scope = self.shared.scope();
        render(
            display,
            &self.menu,
            self.shared.selection(),
            &scope,
            self.scope_gain,
        );
    }

    /// One loop iteration: read the encoder, update state, redraw
    pub fn poll<E: Encoder, D: Display>(&mut self, encoder: &mut E, display: &mut D) {
        self.handle(UiInput::poll(encoder));
        self.draw(display);
    }
}
