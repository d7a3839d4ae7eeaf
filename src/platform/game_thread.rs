//! Dedicated simulation/render thread
//!
//! The game thread owns the `GameState`. Other threads talk to it through a
//! command channel (pointer input, restart) and a two-state scheduler
//! (running/paused) guarded by a mutex and condition variable. While paused
//! the thread is fully blocked; on wake the frame clock restarts so paused
//! time is never simulated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{Receiver, Sender, TryRecvError, unbounded};
use parking_lot::{Condvar, Mutex};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::FrameClock;
use crate::audio::AudioManager;
use crate::renderer::{FrameSnapshot, SnapshotOptions, SurfaceSlot};
use crate::sim::{self, GameEvent, GameState, PointerEvent, SessionReport};
use crate::{Error, Result, Settings};

/// End-of-session callback
pub type GameOverCallback = Box<dyn FnMut(SessionReport) + Send>;

/// Intent sent from the UI thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pointer(PointerEvent),
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Stopping,
}

/// Result of checking the scheduler at the top of an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Continue,
    Resumed,
    Stop,
}

struct Control {
    state: Mutex<RunState>,
    wake: Condvar,
}

impl Control {
    fn new(initial: RunState) -> Self {
        Self {
            state: Mutex::new(initial),
            wake: Condvar::new(),
        }
    }

    fn get(&self) -> RunState {
        *self.state.lock()
    }

    /// Move from `from` to `to`. No-op (returns false) in any other state.
    fn transition(&self, from: RunState, to: RunState) -> bool {
        let mut state = self.state.lock();
        if *state != from {
            return false;
        }
        *state = to;
        self.wake.notify_all();
        true
    }

    fn stop(&self) {
        *self.state.lock() = RunState::Stopping;
        self.wake.notify_all();
    }

    /// Block while paused
    fn wait(&self) -> Wake {
        let mut state = self.state.lock();
        let mut waited = false;
        while *state == RunState::Paused {
            waited = true;
            self.wake.wait(&mut state);
        }
        if *state == RunState::Stopping {
            Wake::Stop
        } else if waited {
            Wake::Resumed
        } else {
            Wake::Continue
        }
    }
}

/// One iteration's worth of game logic, independent of threading
pub struct GameLoop {
    state: GameState,
    audio: AudioManager,
    commands: Receiver<Command>,
    on_game_over: GameOverCallback,
    surface: SurfaceSlot,
    options: SnapshotOptions,
    render_rng: Pcg32,
    active: Arc<AtomicBool>,
}

impl GameLoop {
    pub fn new(
        state: GameState,
        audio: AudioManager,
        commands: Receiver<Command>,
        surface: SurfaceSlot,
        options: SnapshotOptions,
        on_game_over: GameOverCallback,
    ) -> Self {
        let active = Arc::new(AtomicBool::new(state.is_active()));
        Self {
            state,
            audio,
            commands,
            on_game_over,
            surface,
            options,
            render_rng: Pcg32::from_rng(&mut rand::rng()),
            active,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Shared flag mirroring whether a session is active
    pub fn active_flag(&self) -> Arc<AtomicBool> {
        self.active.clone()
    }

    /// Apply queued commands, advance the simulation and dispatch its events
    pub fn step(&mut self, dt: f32) {
        self.apply_commands(false);
        sim::tick(&mut self.state, dt);
        self.dispatch_events();
    }

    /// Drain queued commands, dropping pointer input that arrived while paused
    ///
    /// Releases are still applied so a held item is never left stuck.
    pub fn discard_stale_input(&mut self) {
        self.apply_commands(true);
        self.dispatch_events();
    }

    fn apply_commands(&mut self, drop_pointer: bool) {
        loop {
            match self.commands.try_recv() {
                Ok(Command::Restart) => self.state.restart(),
                Ok(Command::Pointer(event)) if drop_pointer && event != PointerEvent::Up => {}
                Ok(Command::Pointer(event)) => {
                    if let Some(outcome) = sim::handle_pointer(&mut self.state, event) {
                        log::debug!("Release: {outcome:?}");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::LevelUp(level) => log::debug!("Reached level {level}"),
                GameEvent::GameOver(report) => (self.on_game_over)(report),
            }
        }
        self.active.store(self.state.is_active(), Ordering::Release);
    }

    /// Render the current state if a presenter is attached
    pub fn render(&mut self) -> bool {
        let Self {
            state,
            surface,
            options,
            render_rng,
            ..
        } = self;
        surface.render(|| FrameSnapshot::capture(state, options, render_rng))
    }

    /// Tear down, handing back the audio manager so the caller can release it
    fn finish(self) -> AudioManager {
        self.audio
    }
}

/// Handle to the running game thread
pub struct GameThread {
    control: Arc<Control>,
    commands: Sender<Command>,
    surface: SurfaceSlot,
    active: Arc<AtomicBool>,
    handle: Option<JoinHandle<AudioManager>>,
}

impl GameThread {
    /// Spawn the game thread, initially paused (menu showing)
    pub fn spawn(
        state: GameState,
        audio: AudioManager,
        settings: &Settings,
        on_game_over: impl FnMut(SessionReport) + Send + 'static,
    ) -> Result<Self> {
        let (commands, receiver) = unbounded();
        let surface = SurfaceSlot::new();
        let game = GameLoop::new(
            state,
            audio,
            receiver,
            surface.clone(),
            SnapshotOptions::from(settings),
            Box::new(on_game_over),
        );
        let active = game.active_flag();
        let control = Arc::new(Control::new(RunState::Paused));
        let frame_cap = settings.frame_cap;

        let thread_control = control.clone();
        let handle = thread::Builder::new()
            .name("game".into())
            .spawn(move || run(game, &thread_control, FrameClock::new(frame_cap)))?;

        log::info!("Game thread started");
        Ok(Self {
            control,
            commands,
            surface,
            active,
            handle: Some(handle),
        })
    }

    /// Restart the session and run it
    pub fn start_new_game(&self) {
        self.send(Command::Restart);
        self.resume();
    }

    /// Resume a paused session
    pub fn continue_game(&self) {
        self.resume();
    }

    /// Pause and show the menu
    pub fn return_to_menu(&self) {
        self.pause();
    }

    /// Whether there is an active session to continue
    ///
    /// Reflects the state after the game thread's last iteration.
    pub fn can_continue(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn send_pointer(&self, event: PointerEvent) {
        self.send(Command::Pointer(event));
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::debug!("Game thread gone; dropped {command:?}");
        }
    }

    pub fn pause(&self) {
        if self.control.transition(RunState::Running, RunState::Paused) {
            log::info!("Game paused");
        }
    }

    pub fn resume(&self) {
        if self.control.transition(RunState::Paused, RunState::Running) {
            log::info!("Game resumed");
        }
    }

    pub fn run_state(&self) -> RunState {
        self.control.get()
    }

    /// The presentation surface; attach a presenter to receive frames
    pub fn surface(&self) -> &SurfaceSlot {
        &self.surface
    }

    /// Stop and join the thread, then release the surface and audio
    ///
    /// Safe to call more than once.
    pub fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        self.control.stop();
        let joined = handle.join();
        self.surface.detach();

        let mut audio = joined.map_err(|_| Error::ThreadPanicked)?;
        audio.release();
        log::info!("Game thread stopped");
        Ok(())
    }
}

impl Drop for GameThread {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("Game thread shutdown failed: {e}");
        }
    }
}

fn run(mut game: GameLoop, control: &Control, mut clock: FrameClock) -> AudioManager {
    loop {
        match control.wait() {
            Wake::Stop => break,
            Wake::Resumed => {
                clock.reset();
                game.discard_stale_input();
            }
            Wake::Continue => {}
        }

        let dt = clock.tick();
        game.step(dt);
        game.render();
        clock.throttle();
    }
    game.finish()
}
