// Ties a particle field to a drawing surface and runs it as a scheduled task.
//
// The host (requestAnimationFrame in the browser, a loop in tests) owns the
// scheduling; it pulls a FrameCallback from the Session and calls it once per
// display refresh until it returns false. Detaching cancels the shared token
// and drops the animator, so a callback that was already queued does nothing.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::renderer::{Renderer, Surface};
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct Animator<S: Surface, R: Rng> {
    field: ParticleField<R>,
    renderer: Renderer<S>,
}

impl<S: Surface, R: Rng> Animator<S, R> {
    pub fn attach(surface: S, width: f64, height: f64, config: FieldConfig, rng: R) -> Self {
        let field = ParticleField::new(width, height, config, rng);
        log::debug!(
            "attached {} particles to a {}x{} surface",
            field.len(),
            width,
            height
        );
        Animator {
            field,
            renderer: Renderer::new(surface),
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
        self.renderer.surface_mut().resize(width, height);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.field.set_pointer(x, y);
    }

    // Pointer left the viewport: stop repelling until it comes back
    pub fn on_pointer_leave(&mut self) {
        self.field.clear_pointer();
    }

    pub fn tick(&mut self) {
        self.field.step();
        self.renderer.render(&self.field);
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct Session<S: Surface, R: Rng> {
    animator: Rc<RefCell<Option<Animator<S, R>>>>,
    token: CancellationToken,
}

impl<S: Surface, R: Rng> Clone for Session<S, R> {
    fn clone(&self) -> Self {
        Session {
            animator: Rc::clone(&self.animator),
            token: self.token.clone(),
        }
    }
}

impl<S: Surface, R: Rng> Session<S, R> {
    pub fn start(animator: Animator<S, R>) -> Self {
        Session {
            animator: Rc::new(RefCell::new(Some(animator))),
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn frame_callback(&self) -> FrameCallback<S, R> {
        FrameCallback {
            animator: Rc::clone(&self.animator),
            token: self.token.clone(),
        }
    }

    pub fn on_resize(&self, width: f64, height: f64) {
        if let Some(animator) = self.animator.borrow_mut().as_mut() {
            animator.on_resize(width, height);
        }
    }

    pub fn on_pointer_move(&self, x: f64, y: f64) {
        if let Some(animator) = self.animator.borrow_mut().as_mut() {
            animator.on_pointer_move(x, y);
        }
    }

    pub fn on_pointer_leave(&self) {
        if let Some(animator) = self.animator.borrow_mut().as_mut() {
            animator.on_pointer_leave();
        }
    }

    pub fn with_animator<T>(&self, f: impl FnOnce(&Animator<S, R>) -> T) -> Option<T> {
        self.animator.borrow().as_ref().map(f)
    }

    // Idempotent. Releases the surface and the population immediately.
    pub fn detach(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.animator.borrow_mut().take();
        log::debug!("particle field detached");
    }
}

pub struct FrameCallback<S: Surface, R: Rng> {
    animator: Rc<RefCell<Option<Animator<S, R>>>>,
    token: CancellationToken,
}

impl<S: Surface, R: Rng> FrameCallback<S, R> {
    /// Advance one tick. Returns false once the session has been detached,
    /// in which case nothing is drawn and the caller should stop scheduling.
    pub fn run(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        match self.animator.borrow_mut().as_mut() {
            Some(animator) => {
                animator.tick();
                true
            }
            None => false,
        }
    }
}
