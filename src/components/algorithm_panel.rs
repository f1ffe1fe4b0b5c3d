use crate::solver::Algorithm;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AlgorithmPanelProps {
    pub algorithm: Algorithm,
}

#[function_component(AlgorithmPanel)]
pub fn algorithm_panel(props: &AlgorithmPanelProps) -> Html {
    let info = props.algorithm.info();
    html! {<div id="algorithmInfo" style="background:#f6f8fa; border:1px solid #d0d7de; border-radius:8px; padding:8px 10px; font-size:13px; line-height:1.4;">
        <strong>{ info.name }</strong><br/>
        { info.description }<br/>
        <em>{ format!("Complexity: {}", info.complexity) }</em>
    </div>}
}
