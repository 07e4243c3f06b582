//! Menu State Machine
//!
//! Encoder-driven selection of scale and root note, and the scope display
//! mode toggle. Evaluated once per UI poll, in this order:
//!
//! 1. A toggle edge flips the menu between inactive and active. Leaving the
//!    menu forces the waveform view.
//! 2. If the menu is now active, rotation steps the selector of the current
//!    page (sign only), then a select press flips the page.
//! 3. If the menu is now inactive, any rotation flips the display mode.
//!
//! Toggle edge and select press are two independent detections of the same
//! physical button. Both are honored in the same pass.

use crate::hal::Encoder;
use crate::shared::Selection;

/// Which selector the encoder edits while the menu is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPage {
    #[default]
    ScaleSelection,
    RootNoteSelection,
}

impl MenuPage {
    pub fn toggled(self) -> Self {
        match self {
            MenuPage::ScaleSelection => MenuPage::RootNoteSelection,
            MenuPage::RootNoteSelection => MenuPage::ScaleSelection,
        }
    }
}

/// What the scope shows while the menu is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Waveform,
    Xy,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Waveform => DisplayMode::Xy,
            DisplayMode::Xy => DisplayMode::Waveform,
        }
    }
}

/// Observable menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStatus {
    Inactive,
    Active(MenuPage),
}

/// One poll worth of encoder input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiInput {
    /// Button press edge; toggles the menu
    pub toggle: bool,
    /// Rotation since the last poll
    pub increment: i32,
    /// Debounced press; flips the menu page
    pub select: bool,
}

impl UiInput {
    /// Poll every encoder signal once
    pub fn poll<E: Encoder>(encoder: &mut E) -> Self {
        Self {
            toggle: encoder.rising_edge(),
            increment: encoder.increment(),
            select: encoder.pressed(),
        }
    }

    pub fn rotate(increment: i32) -> Self {
        Self {
            increment,
            ..Default::default()
        }
    }

    pub fn toggle() -> Self {
        Self {
            toggle: true,
            ..Default::default()
        }
    }

    pub fn select() -> Self {
        Self {
            select: true,
            ..Default::default()
        }
    }
}

/// Menu and display-mode state, owned by the UI context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Menu {
    active: bool,
    page: MenuPage,
    display_mode: DisplayMode,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Page last shown; kept while the menu is closed
    pub fn page(&self) -> MenuPage {
        self.page
    }

    pub fn status(&self) -> MenuStatus {
        if self.active {
            MenuStatus::Active(self.page)
        } else {
            MenuStatus::Inactive
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Apply one poll of input. Returns the selection to publish if it changed.
    pub fn update(&mut self, input: UiInput, current: Selection) -> Option<Selection> {
        if input.toggle {
            self.active = !self.active;
            if !self.active {
                self.display_mode = DisplayMode::Waveform;
            }
            log::debug!("menu {:?}", self.status());
        }

        if !self.active {
            if input.increment != 0 {
                self.display_mode = self.display_mode.toggled();
                log::debug!("display mode {:?}", self.display_mode);
            }
            return None;
        }

        let mut next = current;
        if input.increment > 0 {
            match self.page {
                MenuPage::ScaleSelection => next.scale = next.scale.next(),
                MenuPage::RootNoteSelection => next.root = next.root.next(),
            }
        } else if input.increment < 0 {
            match self.page {
                MenuPage::ScaleSelection => next.scale = next.scale.prev(),
                MenuPage::RootNoteSelection => next.root = next.root.prev(),
            }
        }

        if input.select {
            self.page = self.page.toggled();
            log::debug!("menu page {:?}", self.page);
        }

        (next != current).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{RootNote, ScaleIndex, SCALE_COUNT};

    fn active_on(page: MenuPage) -> Menu {
        let mut menu = Menu::new();
        menu.update(UiInput::toggle(), Selection::default());
        if page == MenuPage::RootNoteSelection {
            menu.update(UiInput::select(), Selection::default());
        }
        menu
    }

    #[test]
    fn test_boot_state() {
        let menu = Menu::new();
        assert_eq!(menu.status(), MenuStatus::Inactive);
        assert_eq!(menu.display_mode(), DisplayMode::Waveform);
    }

    #[test]
    fn test_toggle_scenario() {
        let sel = Selection::default();
        let mut menu = Menu::new();

        menu.update(UiInput::toggle(), sel);
        assert_eq!(menu.status(), MenuStatus::Active(MenuPage::ScaleSelection));

        menu.update(UiInput::select(), sel);
        assert_eq!(
            menu.status(),
            MenuStatus::Active(MenuPage::RootNoteSelection)
        );

        menu.update(UiInput::toggle(), sel);
        assert_eq!(menu.status(), MenuStatus::Inactive);
        assert_eq!(menu.display_mode(), DisplayMode::Waveform);
    }

    #[test]
    fn test_leaving_menu_forces_waveform() {
        let sel = Selection::default();
        let mut menu = Menu::new();

        menu.update(UiInput::rotate(1), sel);
        assert_eq!(menu.display_mode(), DisplayMode::Xy);

        menu.update(UiInput::toggle(), sel);
        assert_eq!(menu.display_mode(), DisplayMode::Xy);

        menu.update(UiInput::toggle(), sel);
        assert_eq!(menu.display_mode(), DisplayMode::Waveform);
    }

    #[test]
    fn test_page_survives_close() {
        let sel = Selection::default();
        let mut menu = active_on(MenuPage::RootNoteSelection);
        menu.update(UiInput::toggle(), sel);
        menu.update(UiInput::toggle(), sel);
        assert_eq!(
            menu.status(),
            MenuStatus::Active(MenuPage::RootNoteSelection)
        );
    }

    #[test]
    fn test_rotation_steps_scale_by_sign() {
        let mut menu = active_on(MenuPage::ScaleSelection);
        let sel = Selection::default();

        let next = menu.update(UiInput::rotate(5), sel).unwrap();
        assert_eq!(next.scale.get(), 1);
        assert_eq!(next.root, sel.root);

        let prev = menu.update(UiInput::rotate(-3), sel).unwrap();
        assert_eq!(prev.scale.get(), SCALE_COUNT - 1);
    }

    #[test]
    fn test_scale_cycles_back() {
        let mut menu = active_on(MenuPage::ScaleSelection);
        let mut sel = Selection::default();
        for _ in 0..SCALE_COUNT {
            sel = menu.update(UiInput::rotate(1), sel).unwrap();
        }
        assert_eq!(sel.scale, ScaleIndex::default());
    }

    #[test]
    fn test_rotation_steps_root_with_wrap() {
        let mut menu = active_on(MenuPage::RootNoteSelection);
        let low = Selection {
            root: RootNote::new(0),
            ..Default::default()
        };
        let high = Selection {
            root: RootNote::new(107),
            ..Default::default()
        };

        assert_eq!(menu.update(UiInput::rotate(-1), low).unwrap().root.midi(), 107);
        assert_eq!(menu.update(UiInput::rotate(1), high).unwrap().root.midi(), 0);
    }

    #[test]
    fn test_no_rotation_no_change() {
        let mut menu = active_on(MenuPage::ScaleSelection);
        assert_eq!(menu.update(UiInput::default(), Selection::default()), None);
    }

    #[test]
    fn test_inactive_rotation_leaves_selection() {
        let mut menu = Menu::new();
        assert_eq!(menu.update(UiInput::rotate(-2), Selection::default()), None);
        assert_eq!(menu.display_mode(), DisplayMode::Xy);
        menu.update(UiInput::rotate(7), Selection::default());
        assert_eq!(menu.display_mode(), DisplayMode::Waveform);
    }

    #[test]
    fn test_both_button_checks_in_one_pass() {
        let mut menu = Menu::new();
        let input = UiInput {
            toggle: true,
            increment: 0,
            select: true,
        };
        menu.update(input, Selection::default());
        assert_eq!(
            menu.status(),
            MenuStatus::Active(MenuPage::RootNoteSelection)
        );
    }

    #[test]
    fn test_close_and_rotate_in_one_pass() {
        let mut menu = active_on(MenuPage::ScaleSelection);
        let input = UiInput {
            toggle: true,
            increment: 1,
            select: false,
        };
        assert_eq!(menu.update(input, Selection::default()), None);
        assert_eq!(menu.status(), MenuStatus::Inactive);
        assert_eq!(menu.display_mode(), DisplayMode::Xy);
    }
}
