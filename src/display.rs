//! Display Renderer
//!
//! Stateless: every redraw is derived from the menu, the current selection and
//! a snapshot of the waveform ring.

use crate::hal::{Display, Font};
use crate::menu::{DisplayMode, Menu, MenuPage};
use crate::scope::{WaveformSnapshot, WAVEFORM_CAPACITY};
use crate::shared::Selection;
use core::fmt::Write;

/// Default vertical scale of the trace, in pixels per unit sample
pub const DEFAULT_SCOPE_GAIN: f32 = 20.0;

/// Row of the menu content line
const MENU_LINE_Y: i32 = 15;

/// Room for `"Root: "` plus the longest label (`"C#8"`)
type LineBuf = heapless::String<16>;

/// Draw one full frame and push it to the panel
pub fn render<D: Display>(
    display: &mut D,
    menu: &Menu,
    selection: Selection,
    scope: &WaveformSnapshot,
    gain: f32,
) {
    display.fill(false);

    if menu.is_active() {
        draw_menu(display, menu.page(), selection);
    } else {
        match menu.display_mode() {
            DisplayMode::Waveform => draw_waveform(display, scope, gain),
            DisplayMode::Xy => draw_xy(display, scope, gain),
        }
    }

    display.update();
}

fn draw_menu<D: Display>(display: &mut D, page: MenuPage, selection: Selection) {
    display.set_cursor(0, 0);
    display.write_string("Menu:", Font::Font7x10, true);

    display.set_cursor(0, MENU_LINE_Y);
    match page {
        MenuPage::ScaleSelection => {
            display.write_string("Scale: ", Font::Font7x10, false);
            display.write_string(selection.scale.scale().name, Font::Font7x10, true);
        }
        MenuPage::RootNoteSelection => {
            let mut line = LineBuf::new();
            // Cannot overflow: the longest line is 9 bytes
            let _ = write!(line, "Root: {}", selection.root);
            display.write_string(&line, Font::Font7x10, true);
        }
    }
}

/// Left channel as a connected line across the full width
fn draw_waveform<D: Display>(display: &mut D, scope: &WaveformSnapshot, gain: f32) {
    let step = display.width() / WAVEFORM_CAPACITY as i32;
    let mid_y = display.height() / 2;

    for i in 1..WAVEFORM_CAPACITY {
        let x1 = (i as i32 - 1) * step;
        let y1 = (scope.left[i - 1] * gain) as i32 + mid_y;
        let x2 = i as i32 * step;
        let y2 = (scope.left[i] * gain) as i32 + mid_y;
        display.draw_line(x1, y1, x2, y2, true);
    }
}

/// Left against right, one pixel per slot
fn draw_xy<D: Display>(display: &mut D, scope: &WaveformSnapshot, gain: f32) {
    let mid_x = display.width() / 2;
    let mid_y = display.height() / 2;

    for i in 0..WAVEFORM_CAPACITY {
        let x = (scope.left[i] * gain) as i32 + mid_x;
        let y = (scope.right[i] * gain) as i32 + mid_y;
        display.draw_pixel(x, y, true);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::menu::UiInput;
    use crate::scale::{RootNote, ScaleIndex};

    /// A draw command captured by [`RecordingDisplay`]
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Draw {
        Fill(bool),
        Cursor(i32, i32),
        Text(String, bool),
        Line(i32, i32, i32, i32),
        Pixel(i32, i32),
        Update,
    }

    /// 128x64 display that records every call
    #[derive(Debug, Default)]
    pub(crate) struct RecordingDisplay {
        pub(crate) calls: Vec<Draw>,
    }

    impl RecordingDisplay {
        pub(crate) fn texts(&self) -> Vec<(&str, bool)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Draw::Text(t, inv) => Some((t.as_str(), *inv)),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, pred: impl Fn(&Draw) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    impl Display for RecordingDisplay {
        fn fill(&mut self, on: bool) {
            self.calls.push(Draw::Fill(on));
        }
        fn set_cursor(&mut self, x: i32, y: i32) {
            self.calls.push(Draw::Cursor(x, y));
        }
        fn write_string(&mut self, text: &str, _font: Font, invert: bool) {
            self.calls.push(Draw::Text(text.to_string(), invert));
        }
        fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, _on: bool) {
            self.calls.push(Draw::Line(x1, y1, x2, y2));
        }
        fn draw_pixel(&mut self, x: i32, y: i32, _on: bool) {
            self.calls.push(Draw::Pixel(x, y));
        }
        fn update(&mut self) {
            self.calls.push(Draw::Update);
        }
        fn width(&self) -> i32 {
            128
        }
        fn height(&self) -> i32 {
            64
        }
    }

    fn open_menu(page: MenuPage) -> Menu {
        let mut menu = Menu::new();
        menu.update(UiInput::toggle(), Selection::default());
        if page == MenuPage::RootNoteSelection {
            menu.update(UiInput::select(), Selection::default());
        }
        menu
    }

    #[test]
    fn test_frame_is_cleared_and_pushed() {
        let mut display = RecordingDisplay::default();
        render(
            &mut display,
            &Menu::new(),
            Selection::default(),
            &WaveformSnapshot::default(),
            DEFAULT_SCOPE_GAIN,
        );

        assert_eq!(display.calls.first(), Some(&Draw::Fill(false)));
        assert_eq!(display.calls.last(), Some(&Draw::Update));
    }

    #[test]
    fn test_scale_page() {
        let mut display = RecordingDisplay::default();
        let selection = Selection {
            scale: ScaleIndex::new(2),
            ..Default::default()
        };
        render(
            &mut display,
            &open_menu(MenuPage::ScaleSelection),
            selection,
            &WaveformSnapshot::default(),
            DEFAULT_SCOPE_GAIN,
        );

        assert_eq!(
            display.texts(),
            vec![("Menu:", true), ("Scale: ", false), ("Pentatonic", true)]
        );
        assert!(display.calls.contains(&Draw::Cursor(0, 15)));
    }

    #[test]
    fn test_root_page() {
        let mut display = RecordingDisplay::default();
        let selection = Selection {
            root: RootNote::new(61),
            ..Default::default()
        };
        render(
            &mut display,
            &open_menu(MenuPage::RootNoteSelection),
            selection,
            &WaveformSnapshot::default(),
            DEFAULT_SCOPE_GAIN,
        );

        assert_eq!(display.texts(), vec![("Menu:", true), ("Root: C#5", true)]);
    }

    #[test]
    fn test_root_page_default_label() {
        let mut display = RecordingDisplay::default();
        render(
            &mut display,
            &open_menu(MenuPage::RootNoteSelection),
            Selection::default(),
            &WaveformSnapshot::default(),
            DEFAULT_SCOPE_GAIN,
        );
        assert_eq!(display.texts()[1], ("Root: A5", true));
    }

    #[test]
    fn test_waveform_lines() {
        let mut display = RecordingDisplay::default();
        let mut scope = WaveformSnapshot::default();
        scope.left[0] = 0.5;
        scope.left[1] = -0.5;

        render(&mut display, &Menu::new(), Selection::default(), &scope, 20.0);

        assert_eq!(
            display.count(|c| matches!(c, Draw::Line(..))),
            WAVEFORM_CAPACITY - 1
        );
        assert!(display.calls.contains(&Draw::Line(0, 42, 1, 22)));
        assert!(display.calls.contains(&Draw::Line(1, 22, 2, 32)));
        assert!(display.texts().is_empty());
    }

    #[test]
    fn test_xy_pixels() {
        let mut display = RecordingDisplay::default();
        let mut menu = Menu::new();
        menu.update(UiInput::rotate(1), Selection::default());

        let mut scope = WaveformSnapshot::default();
        scope.left[3] = 1.0;
        scope.right[3] = -1.0;

        render(&mut display, &menu, Selection::default(), &scope, 20.0);

        assert_eq!(
            display.count(|c| matches!(c, Draw::Pixel(..))),
            WAVEFORM_CAPACITY
        );
        assert!(display.calls.contains(&Draw::Pixel(84, 12)));
        assert!(display.calls.contains(&Draw::Pixel(64, 32)));
        assert_eq!(display.count(|c| matches!(c, Draw::Line(..))), 0);
    }
}
