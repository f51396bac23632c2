//! Toroids entry point
//!
//! Headless demo driver: runs the core at a fixed frame rate with a
//! scripted autopilot on the controls, logging frames and session changes.
//! An interactive host would replace the autopilot with real key events
//! and the text renderer with an actual canvas.

use std::thread;
use std::time::Duration;

use toroids::audio::{AudioManager, DebugSink};
use toroids::consts::FRAME_HZ;
use toroids::game::Game;
use toroids::render::{Renderer, TextRenderer};
use toroids::session::MemoryStore;
use toroids::sim::{Control, InputEvent};

/// Scripted stand-in for a player: sweeps the heading, fires in bursts,
/// and thrusts now and then to drift around the torus.
#[derive(Default)]
struct Autopilot {
    frame: u32,
}

impl Autopilot {
    fn drive(&mut self, game: &mut Game) {
        self.frame += 1;

        match self.frame % 90 {
            0 => game.handle_input(InputEvent::down(Control::RotateRight)),
            45 => game.handle_input(InputEvent::up(Control::RotateRight)),
            _ => {}
        }

        // Press-release pairs; holding the key would only fire once
        match self.frame % 8 {
            0 => game.handle_input(InputEvent::down(Control::Fire)),
            2 => game.handle_input(InputEvent::up(Control::Fire)),
            _ => {}
        }

        match self.frame % 240 {
            0 => game.handle_input(InputEvent::down(Control::Thrust)),
            30 => game.handle_input(InputEvent::up(Control::Thrust)),
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x70601D5);
    log::info!("toroids demo starting with seed {seed}");

    let store = Box::new(MemoryStore::new());
    let audio = AudioManager::new(Box::new(DebugSink));
    let mut game = Game::new(seed, store, audio);
    let mut renderer = TextRenderer;
    let mut autopilot = Autopilot::default();

    game.start();

    let frame_time = Duration::from_secs_f32(1.0 / FRAME_HZ as f32);
    let max_frames = 60 * FRAME_HZ; // the autopilot rarely lasts a minute

    for frame in 0..max_frames {
        autopilot.drive(&mut game);
        let running = game.advance();

        // Draw once a second, plus whenever the session moved
        if game.take_changed() || frame % FRAME_HZ == 0 {
            renderer.draw(&game.snapshot());
        }

        if !running {
            break;
        }
        thread::sleep(frame_time);
    }

    // Final frame and one last notification for observers
    renderer.draw(&game.snapshot());
    let session = game.session();
    log::info!(
        "demo finished: score {} lives {} level {} game_over={}",
        session.score,
        session.lives,
        session.level,
        session.game_over,
    );
}
