use leptos::ev::KeyboardEvent;
use leptos::*;

const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
const DEFAULT_CANCEL_LABEL: &str = "Cancel";

fn label_or_default(text: String, default: &str) -> String {
    if text.trim().is_empty() {
        default.to_string()
    } else {
        text
    }
}

fn confirm_button_class(destructive: bool) -> &'static str {
    if destructive {
        "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
    } else {
        "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
    }
}

/// Modal asking for confirmation. Escape, the backdrop and Cancel all call `on_cancel`.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_disabled: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let title = Signal::derive(move || title.get());
    let message = Signal::derive(move || message.get());
    let confirm_text =
        Signal::derive(move || label_or_default(confirm_label.get(), DEFAULT_CONFIRM_LABEL));

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                    <p class="text-sm text-fg-muted">{move || message.get()}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_cancel.call(())
                        >
                            {DEFAULT_CANCEL_LABEL}
                        </button>
                        <button
                            type="button"
                            class=confirm_button_class(destructive)
                            disabled=move || confirm_disabled.get()
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || confirm_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn confirm_dialog_renders_when_open() {
        let html = render_to_string(move || {
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| true)
                    title="Delete sensor"
                    message="Delete Greenhouse?"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    confirm_label="Delete"
                    destructive=true
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Delete Greenhouse?"));
        assert!(html.contains("Cancel"));
    }

    #[test]
    fn confirm_dialog_hidden_when_closed() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <ConfirmDialog
                        is_open=Signal::derive(|| false)
                        title="Delete sensor"
                        message="Delete Greenhouse?"
                        on_confirm=Callback::new(|_| {})
                        on_cancel=Callback::new(|_| {})
                    />
                </div>
            }
        });
        assert!(!html.contains("Delete Greenhouse?"));
    }

    #[test]
    fn confirm_dialog_reads_signal_title_and_message() {
        let html = render_to_string(move || {
            let pending = create_rw_signal(Some("Attic".to_string()));
            let message = Signal::derive(move || {
                pending
                    .get()
                    .map(|name| format!("Delete sensor \"{}\"?", name))
                    .unwrap_or_default()
            });
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(move || pending.with(Option::is_some))
                    title=Signal::derive(|| "Delete sensor".to_string())
                    message=message
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Delete sensor"));
        assert!(html.contains("Attic"));
        assert!(html.contains("Confirm"));
    }
}
