use super::view_model::use_login_view_model;
use crate::{
    components::error::InlineErrorMessage,
    router::REGISTER_PATH,
    utils::navigation::go_to,
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str = "w-full px-4 py-2 border border-border rounded-lg bg-surface text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus";

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let form = vm.form;
    let pending = vm.pending;
    let redirect = vm.redirect;
    let error = vm.error;

    create_effect(move |_| {
        if let Some(target) = redirect.get() {
            go_to(target);
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let vm = vm.clone();
        spawn_local(async move { vm.submit().await });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface-muted px-4">
            <div class="w-full max-w-md bg-surface-elevated rounded-xl shadow-lg p-8">
                <h1 class="text-2xl font-bold mb-6 text-center text-fg">"Login"</h1>
                <form class="space-y-4" on:submit=on_submit>
                    <input
                        type="email"
                        placeholder="Email"
                        required
                        class=INPUT_CLASS
                        prop:value=form.email
                        on:input=move |ev| {
                            form.email.set(event_target::<HtmlInputElement>(&ev).value())
                        }
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        class=INPUT_CLASS
                        prop:value=form.password
                        on:input=move |ev| {
                            form.password.set(event_target::<HtmlInputElement>(&ev).value())
                        }
                    />
                    <InlineErrorMessage error=error />
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full py-2 rounded-lg text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="mt-4 text-center text-sm text-fg-muted">
                    "Don't have an account? "
                    <a href=REGISTER_PATH class="text-action-primary-bg hover:underline">
                        "Register"
                    </a>
                </p>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::Session;
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_form_and_register_link() {
        let html = render_to_string(move || {
            provide_session(Session::logged_out());
            view! { <LoginPanel /> }
        });
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("href=\"/register\""));
        assert!(!html.contains("role=\"alert\""));
    }
}
