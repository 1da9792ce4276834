use crate::{
    router::LOGIN_PATH,
    state::session::{use_session, Session},
    utils::navigation::go_to,
};
use leptos::*;

fn greeting_name(session: &Session) -> Option<String> {
    if session.is_authenticated {
        Some(session.username.clone())
    } else {
        None
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let store = use_session();
    let session = store.signal();
    let user_name = create_memo(move |_| greeting_name(&session.get()));

    let on_logout = {
        let store = store.clone();
        move |_| {
            store.logout();
            go_to(LOGIN_PATH);
        }
    };

    view! {
        <nav class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Sensor Dashboard"</h1>
                    <div class="flex items-center space-x-4">
                        <Show
                            when=move || user_name.get().is_some()
                            fallback=move || {
                                view! {
                                    <button
                                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                        on:click=move |_| go_to(LOGIN_PATH)
                                    >
                                        "Login"
                                    </button>
                                }
                            }
                        >
                            <span class="text-sm text-fg-muted">
                                "Hello, "
                                <span class="font-semibold text-fg">
                                    {move || user_name.get().unwrap_or_default()}
                                </span>
                            </span>
                            <button
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=on_logout.clone()
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Navbar/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div
            class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4"
            role="status"
        >
            <p class="text-sm">{move || message.get()}</p>
        </div>
    }
}
