//! Browser host: owns the canvas, the frame loop and the input listeners,
//! and drives a [`Board`] of `HtmlImageElement` tiles.
//!
//! Images arrive already decoded from the page. Completion is reported by
//! queueing the page's `on_solved` function as a microtask, so page code
//! never runs while the board is borrowed.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Function};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlImageElement, MouseEvent,
    TouchEvent, Window, window,
};

use crate::board::Board;
use crate::config::PuzzleConfig;
use crate::error::PuzzleError;
use crate::geom::Rect;
use crate::surface::Surface;

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    type Image = HtmlImageElement;

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx
            .stroke_rect(rect.origin.x, rect.origin.y, rect.width, rect.height);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dest: Rect) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            dest.origin.x,
            dest.origin.y,
            dest.width,
            dest.height,
        ) {
            log::warn!("tile draw failed: {:?}", e);
        }
    }
}

struct HostState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    board: Board<HtmlImageElement, StdRng>,
    config: PuzzleConfig,
}

type Shared = Rc<RefCell<HostState>>;

/// Run `f` on the host state unless it is already borrowed further up the stack.
fn with_state(state: &Shared, f: impl FnOnce(&mut HostState)) {
    match state.try_borrow_mut() {
        Ok(mut st) => f(&mut st),
        Err(_) => log::warn!("event dropped: puzzle state busy"),
    }
}

fn draw_frame(st: &HostState) {
    let w = st.canvas.width() as f64;
    let h = st.canvas.height() as f64;
    st.ctx.clear_rect(0.0, 0.0, w, h);
    st.ctx.set_stroke_style_str(&st.config.outline_color);
    st.board.render(&mut CanvasSurface { ctx: &st.ctx });
}

fn viewport(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

fn touch_point(canvas: &HtmlCanvasElement, evt: &TouchEvent) -> Option<(f64, f64)> {
    let touch = evt.touches().get(0)?;
    let r = canvas.get_bounding_client_rect();
    Some((
        touch.client_x() as f64 - r.left(),
        touch.client_y() as f64 - r.top(),
    ))
}

fn resize(st: &mut HostState) {
    let Some(win) = window() else {
        return;
    };
    let (w, h) = viewport(&win);
    st.canvas.set_width(w as u32);
    st.canvas.set_height(h as u32);
    let area = st.config.play_area(w, h);
    if let Err(e) = st.board.reposition(area) {
        log::warn!("resize ignored: {e}");
    }
}

// --- Listener / frame bookkeeping ------------------------------------------

/// A registered DOM listener, removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling requestAnimationFrame loop.
struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(win: &Window, state: Shared) -> Result<Self, JsValue> {
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let p = pending.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            p.set(None);
            if let Ok(st) = state.try_borrow() {
                draw_frame(&st);
            }
            let next = f.borrow();
            if let (Some(w), Some(cb)) = (window(), next.as_ref()) {
                match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => p.set(Some(id)),
                    Err(e) => log::warn!("frame loop stopped: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match g.borrow().as_ref() {
            Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(PuzzleError::Dom("frame callback missing".into()).into()),
        };
        pending.set(Some(id));
        Ok(Self {
            callback: g,
            pending,
        })
    }

    /// Cancel the queued frame and drop the callback, which also breaks the
    /// closure's reference to itself.
    fn stop(&mut self) {
        if let (Some(id), Some(win)) = (self.pending.take(), window()) {
            let _ = win.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

struct Session {
    state: Shared,
    frames: FrameLoop,
    // Held only so the listeners stay registered; removed on drop.
    _listeners: Vec<Listener>,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.frames.stop();
        if let Ok(st) = self.state.try_borrow() {
            st.canvas.remove();
        }
        log::info!("puzzle host torn down");
    }
}

fn install_listeners(win: &Window, state: &Shared) -> Result<Vec<Listener>, JsValue> {
    let canvas: EventTarget = state.borrow().canvas.clone().into();
    let win_target: &EventTarget = win.as_ref();
    let mut listeners = Vec::with_capacity(7);

    let s = state.clone();
    listeners.push(Listener::new(&canvas, "mousedown", move |evt| {
        if let Some(m) = evt.dyn_ref::<MouseEvent>() {
            let (x, y) = (m.offset_x() as f64, m.offset_y() as f64);
            with_state(&s, |st| {
                st.board.on_pointer_down(x, y);
            });
        }
    })?);

    let s = state.clone();
    listeners.push(Listener::new(&canvas, "mousemove", move |evt| {
        if let Some(m) = evt.dyn_ref::<MouseEvent>() {
            let (x, y) = (m.offset_x() as f64, m.offset_y() as f64);
            with_state(&s, |st| {
                st.board.on_pointer_drag(x, y);
            });
        }
    })?);

    // Released on the window so a drop outside the canvas still ends the drag.
    let s = state.clone();
    listeners.push(Listener::new(win_target, "mouseup", move |_evt| {
        with_state(&s, |st| {
            st.board.on_pointer_up();
        });
    })?);

    let s = state.clone();
    listeners.push(Listener::new(&canvas, "touchstart", move |evt| {
        evt.prevent_default();
        if let Some(t) = evt.dyn_ref::<TouchEvent>() {
            with_state(&s, |st| {
                if let Some((x, y)) = touch_point(&st.canvas, t) {
                    st.board.on_pointer_down(x, y);
                }
            });
        }
    })?);

    let s = state.clone();
    listeners.push(Listener::new(&canvas, "touchmove", move |evt| {
        evt.prevent_default();
        if let Some(t) = evt.dyn_ref::<TouchEvent>() {
            with_state(&s, |st| {
                if let Some((x, y)) = touch_point(&st.canvas, t) {
                    st.board.on_pointer_drag(x, y);
                }
            });
        }
    })?);

    let s = state.clone();
    listeners.push(Listener::new(&canvas, "touchend", move |evt| {
        evt.prevent_default();
        with_state(&s, |st| {
            st.board.on_pointer_up();
        });
    })?);

    let s = state.clone();
    listeners.push(Listener::new(win_target, "resize", move |_evt| {
        with_state(&s, resize);
    })?);

    Ok(listeners)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| PuzzleError::Dom("2d context unavailable".into()))?
        .dyn_into()?)
}

/// Take an attached canvas back out of the page when a later setup step fails.
fn detach_on_err<T>(canvas: &HtmlCanvasElement, step: Result<T, JsValue>) -> Result<T, JsValue> {
    if step.is_err() {
        canvas.remove();
    }
    step
}

fn start(
    parent_id: &str,
    images: Array,
    config: PuzzleConfig,
    on_solved: Option<Function>,
) -> Result<PuzzleHandle, JsValue> {
    config.validate()?;
    log::set_max_level(config.level_filter());

    let win = window().ok_or_else(|| PuzzleError::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| PuzzleError::Dom("no document".into()))?;
    let parent = doc
        .get_element_by_id(parent_id)
        .ok_or_else(|| PuzzleError::Dom(format!("no element #{parent_id}")))?;

    let images = images
        .iter()
        .map(|v| {
            v.dyn_into::<HtmlImageElement>()
                .map_err(|_| PuzzleError::Dom("images must be <img> elements".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    let (w, h) = viewport(&win);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    parent.append_child(&canvas)?;
    let ctx = detach_on_err(&canvas, context_2d(&canvas))?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let board = Board::new(config.play_area(w, h), images, config.grid_size, rng);
    let mut board = detach_on_err(&canvas, board.map_err(JsValue::from))?;
    if let Some(cb) = on_solved {
        board.on_solved(move || {
            if let Some(w) = window() {
                w.queue_microtask(&cb);
            }
        });
    }

    let attached = canvas.clone();
    let state: Shared = Rc::new(RefCell::new(HostState {
        canvas,
        ctx,
        board,
        config,
    }));
    // Listeners installed before a failing frame loop are dropped, and so
    // unregistered, on the way out.
    let listeners = detach_on_err(&attached, install_listeners(&win, &state))?;
    let frames = detach_on_err(&attached, FrameLoop::start(&win, state.clone()))?;
    Ok(PuzzleHandle {
        session: Some(Session {
            state,
            frames,
            _listeners: listeners,
        }),
    })
}

/// A running puzzle. Call `destroy()` (or `free()`) to tear it down.
#[wasm_bindgen]
pub struct PuzzleHandle {
    session: Option<Session>,
}

#[wasm_bindgen]
impl PuzzleHandle {
    /// Stop the frame loop, unregister every listener and remove the canvas.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        self.session.take();
    }

    #[wasm_bindgen(getter)]
    pub fn solved(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.state.try_borrow().ok().map(|st| st.board.is_solved()))
            .unwrap_or(false)
    }

    #[wasm_bindgen(getter, js_name = correctCount)]
    pub fn correct_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.state.try_borrow().ok().map(|st| st.board.correct_count()))
            .unwrap_or(0)
    }
}

/// Start an N×N puzzle inside the element with id `parent_id`, using the
/// default 400×400 play area. `images` holds N² loaded `<img>` elements in
/// solved (row-major) order.
#[wasm_bindgen]
pub fn start_puzzle(
    parent_id: &str,
    images: Array,
    grid_size: u32,
    on_solved: Option<Function>,
) -> Result<PuzzleHandle, JsValue> {
    let config = PuzzleConfig {
        grid_size,
        ..PuzzleConfig::default()
    };
    start(parent_id, images, config, on_solved)
}

/// Like [`start_puzzle`], with every setting taken from a JSON
/// [`PuzzleConfig`].
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_puzzle_with_config(
    parent_id: &str,
    images: Array,
    config_json: &str,
    on_solved: Option<Function>,
) -> Result<PuzzleHandle, JsValue> {
    let config = PuzzleConfig::from_json(config_json)?;
    start(parent_id, images, config, on_solved)
}
