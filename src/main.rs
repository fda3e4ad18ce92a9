//! Projectile Combat entry point
//!
//! Runs a headless demo session: the intro is skipped with a key press,
//! then the autopilot plays a run while every frame is tessellated into
//! a vertex batch. Stats are written at shutdown.

use std::time::{SystemTime, UNIX_EPOCH};

use projectile_combat::App;
use projectile_combat::app::Paths;
use projectile_combat::input::{InputEvent, Key};
use projectile_combat::menu::{MenuKey, Payload};
use projectile_combat::renderer::VertexBatch;

const FRAME_DT: f32 = 1.0 / 60.0;
/// Length of the autopilot run
const DEMO_SECONDS: f32 = 60.0;
/// Give up on the intro after this long
const INTRO_TIMEOUT: f32 = 10.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Projectile Combat (headless demo) starting...");

    let mut app = App::new(seed, Paths::default());
    let mut batch = VertexBatch::new();

    // Intro: wait past the skip guard, press a key, let the warp finish
    let mut elapsed = 0.0;
    let mut pressed = false;
    let key_press = [InputEvent::KeyDown(Key::Other)];
    while app.current() == Some(MenuKey::Intro) && elapsed < INTRO_TIMEOUT {
        let events: &[InputEvent] = if !pressed && elapsed > 2.5 {
            pressed = true;
            &key_press
        } else {
            &[]
        };
        app.frame(events, FRAME_DT);
        app.render(&mut batch);
        elapsed += FRAME_DT;
    }
    log::info!("Intro finished after {elapsed:.1}s");

    app.change_state(MenuKey::Playing, Payload::Autopilot);

    let frames = (DEMO_SECONDS / FRAME_DT) as usize;
    let mut triangles = 0;
    for frame in 0..frames {
        if !app.frame(&[], FRAME_DT) {
            break;
        }
        app.render(&mut batch);
        triangles += batch.triangle_count();

        if frame % 600 == 0 {
            if let Some(stats) = app.run_stats() {
                log::info!(
                    "t={:.0}s kills={} fired={} accuracy={:.1}%",
                    frame as f32 * FRAME_DT,
                    stats.enemies_killed,
                    stats.projectiles_fired,
                    stats.hit_accuracy_percent
                );
            }
        }
    }
    log::info!(
        "Rendered {frames} frames, {:.0} triangles/frame on average",
        triangles as f32 / frames.max(1) as f32
    );

    app.shutdown();
}
