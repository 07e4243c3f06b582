//! Host Simulation
//!
//! Runs the module without hardware: a fake driver pumps audio blocks on a
//! background thread while the main thread scripts encoder turns and prints
//! the display as ASCII.
//!
//! Run with: cargo run --example host_sim

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use subharmonic::prelude::*;

const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const BLOCK_SIZE: usize = 48;

static CONTEXT: SharedContext = SharedContext::new();

/// Audio driver that calls the block callback from a thread
struct ThreadDriver {
    sample_rate: f32,
    running: Arc<AtomicBool>,
}

impl AudioDriver for ThreadDriver {
    fn start_adc(&mut self) {
        println!("ADC started");
    }

    fn start_audio<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut [f32], &mut [f32]) + Send + 'static,
    {
        let running = self.running.clone();
        let period = Duration::from_secs_f32(BLOCK_SIZE as f32 / self.sample_rate);
        thread::spawn(move || {
            let mut left = [0.0f32; BLOCK_SIZE];
            let mut right = [0.0f32; BLOCK_SIZE];
            while running.load(Ordering::Relaxed) {
                callback(&mut left[..], &mut right[..]);
                thread::sleep(period);
            }
        });
    }
}

/// Slow triangle LFO standing in for the CV jack
struct LfoCv {
    phase: f32,
    rate: f32,
}

impl ControlInput for LfoCv {
    fn read(&mut self) -> f32 {
        self.phase = (self.phase + self.rate).fract();
        1.0 - (2.0 * self.phase - 1.0).abs()
    }
}

/// Encoder replaying one scripted input per poll
struct ScriptEncoder {
    script: Vec<UiInput>,
    current: UiInput,
}

impl Encoder for ScriptEncoder {
    fn rising_edge(&mut self) -> bool {
        self.current = if self.script.is_empty() {
            UiInput::default()
        } else {
            self.script.remove(0)
        };
        self.current.toggle
    }

    fn increment(&mut self) -> i32 {
        self.current.increment
    }

    fn pressed(&mut self) -> bool {
        self.current.select
    }
}

/// Framebuffer printed as text
struct AsciiDisplay {
    pixels: Vec<bool>,
    text: Vec<String>,
}

impl AsciiDisplay {
    fn new() -> Self {
        Self {
            pixels: vec![false; WIDTH * HEIGHT],
            text: Vec::new(),
        }
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y) {
            self.pixels[y as usize * WIDTH + x as usize] = on;
        }
    }
}

impl Display for AsciiDisplay {
    fn fill(&mut self, on: bool) {
        self.pixels.fill(on);
        self.text.clear();
    }

    fn set_cursor(&mut self, _x: i32, _y: i32) {
        self.text.push(String::new());
    }

    fn write_string(&mut self, text: &str, _font: Font, _invert: bool) {
        if let Some(line) = self.text.last_mut() {
            line.push_str(text);
        }
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) {
        let steps = (x2 - x1).abs().max((y2 - y1).abs()).max(1);
        for s in 0..=steps {
            let x = x1 + (x2 - x1) * s / steps;
            let y = y1 + (y2 - y1) * s / steps;
            self.set(x, y, on);
        }
    }

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.set(x, y, on);
    }

    fn update(&mut self) {
        if !self.text.is_empty() {
            for line in &self.text {
                println!("| {}", line);
            }
            return;
        }
        // Halve resolution in both directions for the terminal
        for row in (0..HEIGHT).step_by(4) {
            let line: String = (0..WIDTH)
                .step_by(2)
                .map(|col| {
                    let lit = (row..row + 4).any(|r| self.pixels[r * WIDTH + col]);
                    if lit {
                        '#'
                    } else {
                        ' '
                    }
                })
                .collect();
            println!("|{}|", line);
        }
    }

    fn width(&self) -> i32 {
        WIDTH as i32
    }

    fn height(&self) -> i32 {
        HEIGHT as i32
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ModuleConfig {
        initial_root: 0,
        ..Default::default()
    };

    let running = Arc::new(AtomicBool::new(true));
    let mut driver = ThreadDriver {
        sample_rate: config.sample_rate,
        running: running.clone(),
    };
    let oscillators = std::array::from_fn(|_| PhaseOscillator::new(config.sample_rate));
    let cv = LfoCv {
        phase: 0.0,
        rate: 1.0 / config.sample_rate,
    };

    let mut ui = boot(&CONTEXT, &config, oscillators, &mut driver, cv)?;

    let mut encoder = ScriptEncoder {
        script: vec![
            UiInput::default(),
            UiInput::rotate(1),
            UiInput::toggle(),
            UiInput::rotate(1),
            UiInput::select(),
            UiInput::rotate(-1),
            UiInput::toggle(),
        ],
        current: UiInput::default(),
    };
    let mut display = AsciiDisplay::new();

    for step in 0..8 {
        thread::sleep(Duration::from_millis(50));
        ui.poll(&mut encoder, &mut display);
        let sel = ui.selection();
        println!(
            "step {}: {:?}, {:?}, scale {}, root {}\n",
            step,
            ui.menu().status(),
            ui.menu().display_mode(),
            sel.scale.scale().name,
            sel.root
        );
    }

    running.store(false, Ordering::Relaxed);
    Ok(())
}
