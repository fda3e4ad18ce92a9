//! Playing: hosts the combat simulation
//!
//! Frame time is fed through a fixed-step accumulator. Input edges wait
//! in `pending` until a tick consumes them.

use glam::Vec2;

use super::{Command, Context, MenuKey, Payload, Screen, Transition, checked};
use crate::consts::*;
use crate::input::{FrameInput, InputEvent, Key, MouseButton};
use crate::renderer::{Backdrop, Hud, Surface, scene};
use crate::settings::Settings;
use crate::sim::{CombatPhase, CombatState, TickInput, autopilot, tick};
use crate::stats::Stats;
use crate::tuning::Tuning;
use crate::ui::Button;

pub struct PlayingScreen {
    pub state: CombatState,
    hud: Hud,
    back: Button<Command>,
    backdrop: Backdrop,
    /// Display flags captured from settings on enter
    view: Settings,
    accumulator: f32,
    pending: TickInput,
    autopilot: bool,
    seed: u64,
    runs: u64,
}

impl PlayingScreen {
    pub fn new(seed: u64, backdrop: Backdrop) -> Self {
        let back = Button::new(
            "Back to Menu",
            Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 + 250.0),
            42.0,
        )
        .with_action(|| Ok(Command::Goto(MenuKey::MainMenu)));

        Self {
            state: CombatState::new(seed, Tuning::default()),
            hud: Hud::new(true),
            back,
            backdrop,
            view: Settings::default(),
            accumulator: 0.0,
            pending: TickInput::default(),
            autopilot: false,
            seed,
            runs: 0,
        }
    }

    pub fn is_autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn back_button(&self) -> &Button<Command> {
        &self.back
    }

    /// Run as many fixed ticks as the accumulated time allows
    fn step(&mut self, ctx: &mut Context) {
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut input = if self.autopilot {
                autopilot::drive(&self.state)
            } else {
                self.pending.clone()
            };
            // The player can still pause a demo run
            input.pause = self.pending.pause;
            tick(&mut self.state, &input, SIM_DT, ctx.audio);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = self.pending.held_only();
        }
        if substeps == MAX_SUBSTEPS {
            // Fell behind: drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }
    }
}

impl Screen for PlayingScreen {
    fn enter(&mut self, payload: Payload, ctx: &mut Context) {
        self.runs += 1;
        let seed = self.seed.wrapping_add(self.runs);
        self.state = CombatState::new(seed, ctx.tuning.clone());
        self.state.set_max_particles(ctx.settings.max_particles());
        self.view = ctx.settings.clone();
        self.hud.show_fps = ctx.settings.show_fps;
        self.hud.sync(&self.state.player);
        self.accumulator = 0.0;
        self.pending = TickInput::default();
        self.autopilot = payload == Payload::Autopilot;
        log::info!(
            "Run {} started (seed {seed}{})",
            self.runs,
            if self.autopilot { ", autopilot" } else { "" }
        );
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut Context) -> Transition {
        // During play, clicks are shots
        if self.state.phase == CombatPhase::Playing {
            return Transition::Stay;
        }
        let InputEvent::MouseDown {
            button: MouseButton::Left,
            pos,
        } = *event
        else {
            return Transition::Stay;
        };
        match checked(self.back.click_at(pos, ctx.audio)) {
            Some(Command::Goto(key)) => Transition::Change(key, Payload::Stats(self.state.stats.clone())),
            Some(command) => command.into(),
            None => Transition::Stay,
        }
    }

    fn update(&mut self, dt: f32, input: &FrameInput, ctx: &mut Context) -> Transition {
        if input.was_pressed(Key::ToggleFps) {
            self.hud.toggle_fps();
            ctx.settings.show_fps = self.hud.show_fps;
        }

        let frame = TickInput::from_frame(input);
        if self.state.phase == CombatPhase::Playing {
            self.pending.absorb(&frame);
        } else {
            // Overlay clicks belong to the back button
            self.pending.absorb(&TickInput {
                fire: false,
                ..frame
            });
        }

        self.accumulator += dt.min(MAX_FRAME_DT);
        self.step(ctx);

        self.back.enabled = self.state.phase != CombatPhase::Playing;
        self.back.update(dt, input.pointer, ctx.audio);
        self.hud.update(dt, &self.state.player);
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.backdrop.draw(surface);
        scene::draw_combat(surface, &self.state, &self.view);
        self.hud.render(surface, &self.state);
        if self.back.enabled {
            self.back.render(surface);
        }
    }

    fn shows_starfield(&self) -> bool {
        false
    }

    fn run_stats(&self) -> Option<&Stats> {
        Some(&self.state.stats)
    }
}
