//! Terminal gridlight runner (default binary).
//!
//! Traces the demo cave at a fixed world resolution and presents it with
//! half-block glyphs. Movement keys steer the light-carrying character,
//! `x` switches between mesh and smooth shadows, `q`/Esc quits.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use gridlight::engine::{Character, FrameClock, InputState, Pipeline, Scene};
use gridlight::term::TermPresenter;

/// World resolution in pixels. Must tile into cells.
const WORLD_W: usize = 1280;
const WORLD_H: usize = 720;

/// Upper bound on input polling per frame.
const POLL_TIMEOUT: Duration = Duration::from_millis(8);

fn main() -> Result<()> {
    env_logger::init();

    let mut term = TermPresenter::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TermPresenter) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1) | 1;

    let mut pipeline = Pipeline::new(WORLD_W, WORLD_H, seed)?;
    let mut scene = Scene::new();
    scene.add(Box::new(Character::new(
        WORLD_W as f32 * 0.25,
        WORLD_H as f32 * 0.55,
        (WORLD_W as f32, WORLD_H as f32),
        seed.wrapping_add(1),
    )));

    let mut clock = FrameClock::new();

    loop {
        let mut input = InputState::default();

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('x') => pipeline.toggle_quality(),
                        KeyCode::Left | KeyCode::Char('a') => input.move_x = -1.0,
                        KeyCode::Right | KeyCode::Char('d') => input.move_x = 1.0,
                        KeyCode::Up | KeyCode::Char('w') => input.move_y = -1.0,
                        KeyCode::Down | KeyCode::Char('s') => input.move_y = 1.0,
                        _ => {}
                    }
                }
            }
        }

        let dt = clock.tick();
        pipeline.advance(&mut scene, &input, dt)?;

        let hud = format_hud(&pipeline, clock.fps());
        term.present(pipeline.frame(), &hud)?;
    }
}

fn format_hud(pipeline: &Pipeline, fps: f32) -> String {
    let mut hud = format!(
        "fps {:5.1} | rays {} | shadows {}",
        fps,
        pipeline.rays_last_frame(),
        pipeline.quality().as_str(),
    );
    for stage in pipeline.stage_timings() {
        hud.push_str(&format!(" | {} {:.1}ms", stage.label, stage.duration.as_secs_f32() * 1000.0));
    }
    hud.push_str(" | x: shadows, q: quit");
    hud
}
