// Browser side: a canvas 2d Surface, and the ParticleBackground export that
// sizes the canvas to the viewport, listens for resize and mouse movement on
// the window, and drives the session from requestAnimationFrame.

use crate::animator::{Animator, Session};
use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::AnimatorError;
use crate::renderer::Surface;
use crate::utils::Timer;
use rand::rngs::ThreadRng;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, AnimatorError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(AnimatorError::SurfaceUnavailable)?;
        Ok(Canvas2dSurface {
            canvas: canvas.clone(),
            context,
        })
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.context.begin_path();
        // arc only rejects negative radii, which spawn never produces
        if self
            .context
            .arc(center[0], center[1], radius, 0.0, PI * 2.0)
            .is_err()
        {
            return;
        }
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        opacity: f64,
    ) {
        self.context.begin_path();
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_with_opacity(opacity)));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

type CanvasSession = Session<Canvas2dSurface, ThreadRng>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn request_frame(window: &Window, frame: &FrameSlot) -> Option<i32> {
    let frame = frame.borrow();
    let callback = frame.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

#[wasm_bindgen]
pub struct ParticleBackground {
    session: CanvasSession,
    window: Window,
    canvas: HtmlCanvasElement,
    owns_canvas: bool,
    on_resize: Closure<dyn FnMut()>,
    on_pointer_move: Closure<dyn FnMut(MouseEvent)>,
    on_pointer_out: Closure<dyn FnMut(MouseEvent)>,
    frame: FrameSlot,
    frame_id: Rc<Cell<Option<i32>>>,
    profiling: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Start animating on an existing canvas. Returns `undefined` when the
    /// canvas can't hand out a 2d context.
    pub fn attach(canvas: HtmlCanvasElement) -> Option<ParticleBackground> {
        ParticleBackground::attach_with_config(canvas, FieldConfig::default())
    }

    pub fn attach_with_config(
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Option<ParticleBackground> {
        match ParticleBackground::start(canvas, config, false) {
            Ok(background) => Some(background),
            Err(err) => {
                log::debug!("particle background not started: {}", err);
                None
            }
        }
    }

    /// Create a full-viewport canvas behind the page content and animate it.
    pub fn mount() -> Result<Option<ParticleBackground>, JsValue> {
        let window = web_sys::window().ok_or(AnimatorError::NoWindow)?;
        let document = window
            .document()
            .ok_or_else(|| AnimatorError::Dom("window has no document".to_owned()))?;
        let body = document
            .body()
            .ok_or_else(|| AnimatorError::Dom("document has no body".to_owned()))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        let style = canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("z-index", "0")?;
        body.append_child(&canvas)?;

        match ParticleBackground::start(canvas.clone(), FieldConfig::default(), true) {
            Ok(background) => Ok(Some(background)),
            Err(err) => {
                log::debug!("particle background not started: {}", err);
                canvas.remove();
                Ok(None)
            }
        }
    }

    /// Stop the animation loop, drop listeners and release the particles.
    pub fn detach(&mut self) {
        if !self.session.is_running() {
            return;
        }
        self.session.detach();
        if let Some(id) = self.frame_id.take() {
            // Best effort: a queued frame would see the cancelled token anyway
            let _ = self.window.cancel_animation_frame(id);
        }
        self.frame.borrow_mut().take();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        let _ = self.window.remove_event_listener_with_callback(
            "mousemove",
            self.on_pointer_move.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "mouseout",
            self.on_pointer_out.as_ref().unchecked_ref(),
        );
        if self.owns_canvas {
            self.canvas.remove();
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn particle_count(&self) -> u32 {
        self.session
            .with_animator(|animator| animator.field().len() as u32)
            .unwrap_or(0)
    }

    /// Wrap every frame in console.time / console.timeEnd.
    pub fn set_profiling(&mut self, enabled: bool) {
        self.profiling.set(enabled);
    }
}

impl ParticleBackground {
    fn start(
        canvas: HtmlCanvasElement,
        config: FieldConfig,
        owns_canvas: bool,
    ) -> Result<ParticleBackground, AnimatorError> {
        let window = web_sys::window().ok_or(AnimatorError::NoWindow)?;
        let mut surface = Canvas2dSurface::from_canvas(&canvas)?;
        let (width, height) = viewport(&window);
        surface.resize(width, height);

        let animator = Animator::attach(surface, width, height, config, rand::thread_rng());
        let session = Session::start(animator);
        log::info!(
            "particle background running: {} particles on {}x{}",
            config.population,
            width,
            height
        );

        let on_resize = {
            let session = session.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let (width, height) = viewport(&window);
                session.on_resize(width, height);
            }) as Box<dyn FnMut()>)
        };
        let on_pointer_move = {
            let session = session.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                session.on_pointer_move(event.client_x() as f64, event.client_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        // mouseout with no related target means the pointer left the window
        let on_pointer_out = {
            let session = session.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                if event.related_target().is_none() {
                    session.on_pointer_leave();
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(AnimatorError::dom)?;
        window
            .add_event_listener_with_callback(
                "mousemove",
                on_pointer_move.as_ref().unchecked_ref(),
            )
            .map_err(AnimatorError::dom)?;
        window
            .add_event_listener_with_callback("mouseout", on_pointer_out.as_ref().unchecked_ref())
            .map_err(AnimatorError::dom)?;

        let background = ParticleBackground {
            session,
            window,
            canvas,
            owns_canvas,
            on_resize,
            on_pointer_move,
            on_pointer_out,
            frame: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(None)),
            profiling: Rc::new(Cell::new(false)),
        };
        background.schedule();
        Ok(background)
    }

    // The frame closure re-requests itself each refresh until the session is
    // detached, then drops itself out of the slot to break the Rc cycle.
    fn schedule(&self) {
        let mut callback = self.session.frame_callback();
        let frame = Rc::clone(&self.frame);
        let frame_id = Rc::clone(&self.frame_id);
        let profiling = Rc::clone(&self.profiling);
        let window = self.window.clone();

        *self.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let running = {
                let _timer = if profiling.get() {
                    Some(Timer::new("ParticleBackground::tick"))
                } else {
                    None
                };
                callback.run()
            };
            if running {
                frame_id.set(request_frame(&window, &frame));
            } else {
                frame_id.set(None);
                let _ = frame.borrow_mut().take();
            }
        }) as Box<dyn FnMut()>));

        self.frame_id.set(request_frame(&self.window, &self.frame));
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.detach();
    }
}
