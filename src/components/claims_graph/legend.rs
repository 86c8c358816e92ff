use leptos::prelude::*;

use super::scale::LEGEND;

/// Key for the node colors.
#[component]
pub fn GraphLegend() -> impl IntoView {
	view! {
		<div class="graph-legend">
			{LEGEND
				.iter()
				.map(|&(label, color)| {
					view! {
						<div class="legend-row">
							<span class="legend-swatch" style=format!("background-color: {color};")></span>
							<span>{label}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}
