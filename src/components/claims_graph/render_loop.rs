use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::state::ClaimsGraphState;

/// Simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;

pub type SharedState = Rc<RefCell<Option<ClaimsGraphState>>>;

/// Inner size of the browser window.
pub fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Stops and removes the pass held in `state`, returning it.
pub fn retire(state: &SharedState) -> Option<ClaimsGraphState> {
	let mut previous = state.borrow_mut().take()?;
	previous.stop();
	Some(previous)
}

/// Installs `next`, stopping whatever pass it replaces first.
pub fn install(state: &SharedState, next: ClaimsGraphState) -> Option<ClaimsGraphState> {
	let previous = retire(state);
	*state.borrow_mut() = Some(next);
	previous
}

/// Animation-frame loop of one rendering pass.
///
/// Dropping it cancels the pending frame, detaches the resize listener, stops
/// the simulation, discards the layout state and clears the canvas.
pub struct RenderLoop {
	state: SharedState,
	ctx: CanvasRenderingContext2d,
	frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	handle: Rc<Cell<Option<i32>>>,
	resize: Option<Closure<dyn FnMut()>>,
}

impl RenderLoop {
	pub fn start(state: SharedState, ctx: CanvasRenderingContext2d) -> Self {
		let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));

		let (state_anim, ctx_anim, frame_inner, handle_inner) =
			(state.clone(), ctx.clone(), frame.clone(), handle.clone());
		*frame.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx_anim);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), frame_inner.borrow().as_ref()) {
				handle_inner.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), frame.borrow().as_ref()) {
			handle.set(
				window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}

		Self {
			state,
			ctx,
			frame,
			handle,
			resize: None,
		}
	}

	/// Keeps the canvas sized to the window.
	pub fn watch_resize(&mut self, canvas: HtmlCanvasElement) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let state = self.state.clone();
		let cb = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (w, h) = viewport_size(&win);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			if let Some(ref mut s) = *state.borrow_mut() {
				s.resize(w, h);
			}
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		self.resize = Some(cb);
	}

	fn stop(&mut self) {
		let window = web_sys::window();
		if let (Some(window), Some(id)) = (&window, self.handle.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		// breaks the closure's reference to itself
		self.frame.borrow_mut().take();
		if let (Some(window), Some(cb)) = (&window, self.resize.take()) {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		retire(&self.state);
		if let Some(canvas) = self.ctx.canvas() {
			self.ctx
				.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
		}
	}
}

impl Drop for RenderLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
