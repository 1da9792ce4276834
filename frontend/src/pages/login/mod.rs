use leptos::*;
use leptos_meta::Title;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <Title text="Login | Sensor Dashboard"/>
        <LoginPanel />
    }
}
