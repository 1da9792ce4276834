use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_params_map, ParamsMap};

pub mod chart;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::SensorDetailPanel;

use crate::{
    api::ApiError,
    components::{error::InlineErrorMessage, layout::Layout},
};

/// Follows the `:sensor_id` route param, so navigating between sensors
/// yields a new id even while the route stays mounted.
fn sensor_id_memo(params: Memo<ParamsMap>) -> Memo<Result<i64, ApiError>> {
    create_memo(move |_| {
        params.with(|p| utils::parse_sensor_id(p.get("sensor_id").map(String::as_str)))
    })
}

#[component]
pub fn SensorDetailPage() -> impl IntoView {
    let sensor_id = sensor_id_memo(use_params_map());

    view! {
        <Title text="Sensor | Sensor Dashboard"/>
        <Layout>
            <SensorDetailBody sensor_id=sensor_id />
        </Layout>
    }
}

/// Rebuilds the panel, and with it the view model and its fetch, whenever
/// the id changes.
#[component]
fn SensorDetailBody(sensor_id: Memo<Result<i64, ApiError>>) -> impl IntoView {
    move || match sensor_id.get() {
        Ok(id) => view! { <SensorDetailPanel sensor_id=id /> }.into_view(),
        Err(err) => {
            let error = create_rw_signal(Some(err));
            view! { <InlineErrorMessage error=error /> }.into_view()
        }
    }
}
