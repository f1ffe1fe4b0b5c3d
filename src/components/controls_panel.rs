use crate::solver::Algorithm;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub algorithm: Algorithm,
    pub speed: u32,
    pub on_algorithm: Callback<Algorithm>,
    pub on_speed: Callback<u32>,
    pub on_start: Callback<()>,
    pub on_pause: Callback<()>,
    pub on_step: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_random_walls: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let unit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let select_cb = {
        let cb = props.on_algorithm.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(alg) = Algorithm::from_key(&select.value()) {
                cb.emit(alg);
            }
        })
    };
    let speed_cb = {
        let cb = props.on_speed.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<u32>() {
                cb.emit(v);
            }
        })
    };
    html! {<div style="display:flex; flex-wrap:wrap; align-items:center; gap:8px;">
        <select id="algorithm" onchange={select_cb}>
            { for Algorithm::ALL.iter().map(|alg| html!{
                <option value={alg.key()} selected={*alg == props.algorithm}>{ alg.info().name }</option>
            }) }
        </select>
        <button id="startBtn" onclick={unit(&props.on_start)}>{"Start"}</button>
        <button id="pauseBtn" onclick={unit(&props.on_pause)}>{"Pause"}</button>
        <button id="stepBtn" onclick={unit(&props.on_step)}>{"Step"}</button>
        <button id="resetBtn" onclick={unit(&props.on_reset)}>{"Reset"}</button>
        <button id="randomWallsBtn" onclick={unit(&props.on_random_walls)}>{"Random Walls"}</button>
        <label style="display:flex; align-items:center; gap:6px;">
            <span>{"Speed"}</span>
            <input id="speed" type="range" min="0" max="100" value={props.speed.to_string()} oninput={speed_cb} />
            <span id="speedValue" style="min-width:2em;">{ props.speed }</span>
        </label>
    </div>}
}
