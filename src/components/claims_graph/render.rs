use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::node_color;
use super::state::ClaimsGraphState;
use crate::network::GraphNode;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ClaimsGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ClaimsGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.2 / k, 6.0 / k, 3.0 / k);
	let dash_offset = -(state.flow_time * 20.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state
		.simulation
		.visit_links(|(s1, x1, y1), (s2, x2, y2)| {
			let (dx, dy) = (x2 - x1, y2 - y1);
			let dist = (dx * dx + dy * dy).sqrt();
			let (r1, r2) = (state.simulation.radius(s1), state.simulation.radius(s2));
			if dist <= r1 + r2 {
				return;
			}

			// t=0: all edges at 0.5, t=1: highlighted at 0.9, others at 0.1
			let alpha = if state.is_highlighted(s1) && state.is_highlighted(s2) {
				0.5 + 0.4 * t
			} else {
				0.5 - 0.4 * t
			};

			ctx.set_stroke_style_str(&format!("rgba(160, 170, 200, {})", alpha));
			ctx.set_line_width(line_width);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);

			let (ux, uy) = (dx / dist, dy / dist);
			ctx.begin_path();
			ctx.move_to(x1 + ux * r1, y1 + uy * r1);
			ctx.line_to(x2 - ux * r2, y2 - uy * r2);
			ctx.stroke();
		});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	x: f64,
	y: f64,
	radius: f64,
	k: f64,
	alpha: f64,
) {
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
	let _ = ctx.fill_text(node.label(), x + radius + 3.0, y + 3.0);
}

fn draw_nodes(state: &ClaimsGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.simulation.visit_nodes(|slot, x, y| {
		if has_highlight && state.is_highlighted(slot) {
			return;
		}
		let Some(node) = state.node(slot) else {
			return;
		};
		let base = state.simulation.radius(slot);
		let (alpha, radius) = (1.0 - 0.7 * t, base * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		// claims are only labelled while highlighted
		if !matches!(node, GraphNode::Claim(_)) {
			draw_label(ctx, node, x, y, radius, k, alpha * 0.8);
		}
	});

	if !has_highlight {
		return;
	}

	state.simulation.visit_nodes(|slot, x, y| {
		if !state.is_highlighted(slot) {
			return;
		}
		let Some(node) = state.node(slot) else {
			return;
		};
		let base = state.simulation.radius(slot);
		let is_hovered = state.is_hovered(slot);
		let is_neighbor =
			state.hover.neighbors.contains(&slot) || state.hover.prev_neighbors.contains(&slot);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else {
			(base, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) =
				ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node));
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, node, x, y, radius, k, 1.0);
	});
}
