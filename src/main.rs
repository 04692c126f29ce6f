//! Warp Runner entry point
//!
//! Headless run of the built-in levels with a scripted player, for smoke
//! testing the simulation outside a browser. Pass a settings JSON path as the
//! first argument to override the defaults; `RUST_LOG=debug` shows every event.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use warp_runner::Session;
    use warp_runner::render::DrawStats;
    use warp_runner::sim::GameEvent;

    /// 60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    /// Tap jump this often while running right
    const JUMP_EVERY: u32 = 45;

    env_logger::init();
    log::info!("Warp Runner (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let mut session = match Session::builtin(settings_path.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not load levels: {e}");
            std::process::exit(1);
        }
    };

    let mut stats = DrawStats::default();
    let mut coins = 0u32;
    let mut hits = 0;
    let mut frame = 0;

    session.key_down("ArrowRight");
    while frame < MAX_FRAMES && !session.state.phase.is_over() {
        if frame % JUMP_EVERY == 0 {
            session.key_down(" ");
        } else if frame % JUMP_EVERY == JUMP_EVERY / 2 {
            session.key_up(" ");
        }

        for event in session.frame(f64::from(frame) * FRAME_MS, &mut stats) {
            log::debug!("frame {frame}: {event:?}");
            match event {
                GameEvent::CoinsCollected { count, .. } => coins += *count,
                GameEvent::Damage { absorbed: false, .. } => hits += 1,
                _ => {}
            }
        }
        frame += 1;
    }

    let state = &session.state;
    println!("\nRun finished after {frame} frames");
    println!("  phase:  {:?}", state.phase);
    println!("  level:  {} ({})", state.level, state.stage.name);
    println!("  score:  {} ({coins} coins)", state.score);
    println!("  hits:   {hits}");
    println!("  frames drawn: {}", stats.frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host drives `Session` directly on the web
}
