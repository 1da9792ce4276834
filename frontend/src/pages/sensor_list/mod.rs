use leptos::*;
use leptos_meta::Title;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::SensorListPanel;

use crate::components::layout::Layout;

#[component]
pub fn SensorListPage() -> impl IntoView {
    view! {
        <Title text="Sensors | Sensor Dashboard"/>
        <Layout>
            <SensorListPanel />
        </Layout>
    }
}
