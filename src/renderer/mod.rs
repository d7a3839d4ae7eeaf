//! Presentation boundary
//!
//! The game thread never draws. Once per loop iteration it captures a
//! read-only `FrameSnapshot` and hands it to whatever `Presenter` is
//! attached to the `SurfaceSlot`. Attaching and detaching happen from other
//! threads; the slot lock makes a render pass atomic with respect to
//! surface teardown.

pub mod hud;
pub mod snapshot;

use std::sync::Arc;

use parking_lot::Mutex;

pub use hud::{LogPresenter, format_clock, hud_text};
pub use snapshot::{FrameSnapshot, ParticleView, SharedFrame, SnapshotOptions};

/// Consumer of rendered frames
pub trait Presenter: Send {
    fn present(&mut self, frame: &FrameSnapshot);

    /// Called when the presenter is detached or the game thread stops
    fn release(&mut self) {}
}

impl Presenter for Vec<Box<dyn Presenter>> {
    fn present(&mut self, frame: &FrameSnapshot) {
        for presenter in self.iter_mut() {
            presenter.present(frame);
        }
    }

    fn release(&mut self) {
        for presenter in self.iter_mut() {
            presenter.release();
        }
    }
}

/// Mutex-guarded optional presenter shared between the game thread and the UI
#[derive(Clone, Default)]
pub struct SurfaceSlot {
    inner: Arc<Mutex<Option<Box<dyn Presenter>>>>,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a presenter, releasing any previous one
    pub fn attach(&self, presenter: Box<dyn Presenter>) {
        let previous = self.inner.lock().replace(presenter);
        if let Some(mut previous) = previous {
            previous.release();
        }
        log::debug!("Surface attached");
    }

    /// Detach and release the current presenter. Returns false if none was attached.
    pub fn detach(&self) -> bool {
        let previous = self.inner.lock().take();
        match previous {
            Some(mut presenter) => {
                presenter.release();
                log::debug!("Surface detached");
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Render one frame if a presenter is attached
    ///
    /// The snapshot is only built when there is somewhere to send it.
    pub fn render(&self, build: impl FnOnce() -> FrameSnapshot) -> bool {
        let mut guard = self.inner.lock();
        match guard.as_mut() {
            Some(presenter) => {
                presenter.present(&build());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::sim::{GameState, Layout};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        frames: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl Presenter for Counting {
        fn present(&mut self, _frame: &FrameSnapshot) {
            self.frames.fetch_add(1, Ordering::SeqCst);
        }

        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn snapshot() -> FrameSnapshot {
        let tuning = Tuning::default();
        let layout = Layout::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT, &tuning);
        let state = GameState::new(tuning, layout, 1);
        let mut rng = Pcg32::seed_from_u64(1);
        FrameSnapshot::capture(&state, &SnapshotOptions::default(), &mut rng)
    }

    #[test]
    fn test_render_without_presenter_skips_capture() {
        let slot = SurfaceSlot::new();
        let rendered = slot.render(|| panic!("snapshot built without a presenter"));
        assert!(!rendered);
        assert!(!slot.detach());
    }

    #[test]
    fn test_attach_render_detach() {
        let frames = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicUsize::new(0));
        let slot = SurfaceSlot::new();
        slot.attach(Box::new(Counting {
            frames: frames.clone(),
            released: released.clone(),
        }));

        // Clones share the same surface
        let other = slot.clone();
        assert!(other.render(snapshot));
        assert!(slot.render(snapshot));
        assert_eq!(frames.load(Ordering::SeqCst), 2);

        assert!(slot.detach());
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(!other.is_attached());
    }

    #[test]
    fn test_fan_out() {
        let frames = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicUsize::new(0));
        let mut all: Vec<Box<dyn Presenter>> = (0..3)
            .map(|_| {
                Box::new(Counting {
                    frames: frames.clone(),
                    released: released.clone(),
                }) as Box<dyn Presenter>
            })
            .collect();

        all.present(&snapshot());
        all.release();
        assert_eq!(frames.load(Ordering::SeqCst), 3);
        assert_eq!(released.load(Ordering::SeqCst), 3);
    }
}
