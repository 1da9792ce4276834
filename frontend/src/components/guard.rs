use crate::{
    router::LOGIN_PATH,
    state::session::{use_session, Session},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    Redirect(&'static str),
}

pub fn gate_decision(session: &Session) -> GateDecision {
    if session.is_authenticated {
        GateDecision::Render
    } else {
        GateDecision::Redirect(LOGIN_PATH)
    }
}

/// Renders `children` for an authenticated session; otherwise replaces the
/// current history entry with the login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session().signal();
    let decision = create_memo(move |_| gate_decision(&session.get()));
    create_effect(move |_| {
        if let GateDecision::Redirect(target) = decision.get() {
            if let Some(win) = web_sys::window() {
                if let Err(err) = win.location().replace(target) {
                    log::error!("redirect to {} failed: {:?}", target, err);
                }
            }
        }
    });
    view! {
        <Show when=move || decision.get() == GateDecision::Render fallback=|| ()>
            {children()}
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireAuth;
    use crate::state::session::Session;
    use crate::test_support::helpers::{authenticated_session, provide_session};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(authenticated_session());
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_logged_out() {
        let html = render_to_string(move || {
            provide_session(Session::logged_out());
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    #[should_panic(expected = "use_session called outside of <SessionProvider>")]
    fn require_auth_without_provider_panics() {
        render_to_string(move || {
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
    }
}
