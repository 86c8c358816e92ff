use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render_loop::{RenderLoop, SharedState, install, viewport_size};
use super::state::ClaimsGraphState;
use super::tooltip::{GraphTooltip, TooltipData};
use crate::config::WidgetConfig;
use crate::host::EventHandlers;
use crate::network::{ClaimRecord, GraphBuilder};

/// Text shown instead of the graph when the host supplies no claims.
pub const PLACEHOLDER_TEXT: &str = "No claims to display";

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed claims network drawn on a canvas.
///
/// The whole graph and its simulation are rebuilt whenever `claims` changes;
/// the previous pass is torn down first. `builder` defaults to the placeholder
/// agent list capped at `config.claim_limit`.
#[component]
pub fn ClaimsGraphCanvas(
	#[prop(into)] claims: Signal<Vec<ClaimRecord>>,
	events: EventHandlers,
	#[prop(optional)] config: WidgetConfig,
	#[prop(optional)] builder: Option<GraphBuilder>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<TooltipData>);
	let is_empty = Memo::new(move |_| claims.with(Vec::is_empty));
	let render_loop = StoredValue::new_local(None::<RenderLoop>);
	let state_init = state.clone();
	let builder =
		builder.unwrap_or_else(|| GraphBuilder::new().with_claim_limit(config.claim_limit));

	Effect::new(move |_| {
		let records = claims.get();
		// drops the previous pass before anything new is built
		render_loop.set_value(None);
		tooltip.set(None);

		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(graph_state) = ClaimsGraphState::prepare(&records, &builder, &config, w, h) else {
			return;
		};
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => return,
		};
		install(&state_init, graph_state);

		let mut pass = RenderLoop::start(state_init.clone(), ctx);
		if fullscreen {
			pass.watch_resize(canvas);
		}
		render_loop.set_value(Some(pass));
		info!("Rendering {} claims", records.len());
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			tooltip.set(s.pointer_move(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.pointer_up().cloned());
		if let Some(node) = clicked {
			if let Some(event) = events.handle_click(&node) {
				info!("Dispatched {} for {}", event.name(), node.id());
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		tooltip.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<div class="claims-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="claims-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style=move || {
					if is_empty.get() { "display: none;" } else { "display: block; cursor: grab;" }
				}
			/>
			{move || {
				is_empty
					.get()
					.then(|| view! { <div class="graph-placeholder">{PLACEHOLDER_TEXT}</div> })
			}}
			<GraphTooltip data=tooltip />
		</div>
	}
}
