use super::grid_view::GridView;
use crate::config::AppConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Read once; query overrides only apply at page load
    let config = use_state(AppConfig::from_location);
    html! {
        <GridView config={(*config).clone()} />
    }
}
