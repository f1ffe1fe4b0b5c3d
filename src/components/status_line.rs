use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusLineProps {
    pub text: String,
    pub cursor: usize,
    pub total: usize,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    html! {<div id="status" style="display:flex; justify-content:space-between; gap:12px; font-size:14px; min-height:20px;">
        <span>{ props.text.clone() }</span>
        { if props.total > 0 { html!{ <span style="opacity:0.7;">{ format!("Step {}/{}", props.cursor, props.total) }</span> } } else { html!{} } }
    </div>}
}
