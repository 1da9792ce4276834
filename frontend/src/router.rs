use leptos::*;
use leptos_router::*;

use crate::{
    components::guard::RequireAuth,
    pages::{
        login::LoginPage, register::RegisterPage, sensor_detail::SensorDetailPage,
        sensor_list::SensorListPage,
    },
    state::session::SessionProvider,
};

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const SENSORS_PATH: &str = "/sensors";
pub const SENSOR_DETAIL_PATH: &str = "/sensors/:sensor_id";

pub const ROUTE_PATHS: &[&str] = &[
    ROOT_PATH,
    LOGIN_PATH,
    REGISTER_PATH,
    SENSORS_PATH,
    SENSOR_DETAIL_PATH,
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[SENSORS_PATH, SENSOR_DETAIL_PATH];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[ROOT_PATH, LOGIN_PATH, REGISTER_PATH];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    view! {
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path=ROOT_PATH view=|| view! { <Redirect path=LOGIN_PATH/> }/>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path=REGISTER_PATH view=RegisterPage/>
                    <Route path=SENSORS_PATH view=ProtectedSensorList/>
                    <Route path=SENSOR_DETAIL_PATH view=ProtectedSensorDetail/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn ProtectedSensorList() -> impl IntoView {
    view! { <RequireAuth><SensorListPage/></RequireAuth> }
}

#[component]
fn ProtectedSensorDetail() -> impl IntoView {
    view! { <RequireAuth><SensorDetailPage/></RequireAuth> }
}
