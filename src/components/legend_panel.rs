use crate::render::{
    FRONTIER_COLOR, GOAL_COLOR, GRID_LINE_COLOR, OPEN_COLOR, PATH_COLOR, START_COLOR,
    VISITED_COLOR, WALL_COLOR,
};
use yew::prelude::*;

/// Swatches in paint order: cell backgrounds, then trace overlays, then markers.
const ENTRIES: [(&str, &str); 7] = [
    (OPEN_COLOR, "Open"),
    (WALL_COLOR, "Wall"),
    (FRONTIER_COLOR, "Frontier"),
    (VISITED_COLOR, "Visited"),
    (PATH_COLOR, "Path"),
    (START_COLOR, "Start"),
    (GOAL_COLOR, "Goal"),
];

fn swatch(color: &str, label: &str) -> Html {
    let style = format!(
        "display:inline-block; width:14px; height:14px; background:{color}; border:1px solid {GRID_LINE_COLOR};"
    );
    html! {
        <li style="display:flex; align-items:center; gap:8px; margin:3px 0;">
            <span {style}></span>
            <span>{ label.to_string() }</span>
        </li>
    }
}

#[function_component]
pub fn LegendPanel() -> Html {
    html! {<div id="legend" style="background:#f6f8fa; border:1px solid #d0d7de; border-radius:8px; padding:8px; min-width:150px; font-size:13px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        <ul style="list-style:none; margin:0; padding:0;">
            { for ENTRIES.iter().map(|(color, label)| swatch(color, label)) }
        </ul>
    </div>}
}
