use super::{
    utils::{sensor_detail_href, EMPTY_LIST_MESSAGE},
    view_model::{use_sensor_list_view_model, SensorListViewModel},
};
use crate::{
    api::Sensor,
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{LoadingSpinner, SuccessMessage},
    },
    utils::time::format_timestamp,
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str =
    "border border-border rounded px-2 py-1 bg-surface text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus";

/// Runs one of the view model's async operations on the local executor.
fn run<F, Fut>(vm: &SensorListViewModel, op: F)
where
    F: FnOnce(SensorListViewModel) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(op(vm.clone()));
}

#[component]
pub fn SensorListPanel() -> impl IntoView {
    let vm = use_sensor_list_view_model();

    {
        let vm = vm.clone();
        create_effect(move |_| run(&vm, |vm| async move { vm.fetch().await }));
    }

    let on_add = {
        let vm = vm.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            run(&vm, |vm| async move { vm.add_sensor().await });
        }
    };
    let on_search = {
        let vm = vm.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            run(&vm, |vm| async move { vm.search().await });
        }
    };
    let on_reset = {
        let vm = vm.clone();
        move |_| run(&vm, |vm| async move { vm.reset_search().await })
    };
    let on_previous = {
        let vm = vm.clone();
        move |_| run(&vm, |vm| async move { vm.previous_page().await })
    };
    let on_next = {
        let vm = vm.clone();
        move |_| run(&vm, |vm| async move { vm.next_page().await })
    };
    let on_confirm_delete = {
        let vm = vm.clone();
        Callback::new(move |_: ()| run(&vm, |vm| async move { vm.confirm_delete().await }))
    };
    let on_cancel_delete = {
        let vm = vm.clone();
        Callback::new(move |_: ()| vm.cancel_delete())
    };
    let on_delete = {
        let vm = vm.clone();
        Callback::new(move |sensor: Sensor| vm.request_delete(sensor))
    };

    let form = vm.form;
    let search_input = vm.search_input;
    let sensors = vm.sensors;
    let page = vm.page;
    let has_next = vm.has_next;
    let has_previous = vm.has_previous;
    let loading = vm.loading;
    let creating = vm.creating;
    let error = vm.error;
    let notice = vm.notice;
    let pending_delete = vm.pending_delete;

    let delete_message = Signal::derive(move || {
        pending_delete
            .get()
            .map(|sensor| format!("Delete sensor \"{}\"? This cannot be undone.", sensor.name))
            .unwrap_or_default()
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-fg">"Sensors"</h1>

            <form class="flex flex-wrap gap-2" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Name"
                    required
                    class=INPUT_CLASS
                    prop:value=form.name
                    on:input=move |ev| form.name.set(event_target::<HtmlInputElement>(&ev).value())
                />
                <input
                    type="text"
                    placeholder="Model"
                    required
                    class=INPUT_CLASS
                    prop:value=form.model
                    on:input=move |ev| form.model.set(event_target::<HtmlInputElement>(&ev).value())
                />
                <input
                    type="text"
                    placeholder="Description (optional)"
                    class=INPUT_CLASS
                    prop:value=form.description
                    on:input=move |ev| {
                        form.description.set(event_target::<HtmlInputElement>(&ev).value())
                    }
                />
                <button
                    type="submit"
                    disabled=move || creating.get()
                    class="rounded px-3 py-1 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                >
                    "Add"
                </button>
            </form>

            <form class="flex flex-wrap gap-2" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Search by name or model"
                    class=INPUT_CLASS
                    prop:value=search_input
                    on:input=move |ev| search_input.set(event_target::<HtmlInputElement>(&ev).value())
                />
                <button
                    type="submit"
                    class="rounded px-3 py-1 text-sm font-semibold bg-surface-muted text-fg border border-border"
                >
                    "Search"
                </button>
                <button
                    type="button"
                    class="rounded px-3 py-1 text-sm font-semibold bg-surface text-fg-muted border border-border"
                    on:click=on_reset
                >
                    "Reset"
                </button>
            </form>

            {move || notice.get().map(|message| view! { <SuccessMessage message=message /> })}
            <InlineErrorMessage error=error />

            <Show when=move || !loading.get() || !sensors.with(Vec::is_empty) fallback=|| view! { <LoadingSpinner /> }>
                <Show
                    when=move || !sensors.with(Vec::is_empty)
                    fallback=|| view! { <EmptyState title=EMPTY_LIST_MESSAGE /> }
                >
                    <ul class="space-y-2">
                        <For
                            each=move || sensors.get()
                            key=|sensor| sensor.id
                            children=move |sensor| view! { <SensorRow sensor=sensor on_delete=on_delete /> }
                        />
                    </ul>
                </Show>
            </Show>

            <div class="flex justify-center items-center gap-4">
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=Signal::derive(move || !has_previous.get())
                    on:click=on_previous
                >
                    "Previous"
                </Button>
                <span class="text-sm text-fg-muted">{move || format!("Page {}", page.get())}</span>
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=Signal::derive(move || !has_next.get())
                    on:click=on_next
                >
                    "Next"
                </Button>
            </div>

            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.with(Option::is_some))
                title="Delete sensor"
                message=delete_message
                on_confirm=on_confirm_delete
                on_cancel=on_cancel_delete
                confirm_label="Delete"
                destructive=true
            />
        </div>
    }
}

#[component]
fn SensorRow(sensor: Sensor, on_delete: Callback<Sensor>) -> impl IntoView {
    let href = sensor_detail_href(sensor.id);
    let created = format_timestamp(&sensor.created_at);
    let description = sensor.description.clone();
    let name = sensor.name.clone();
    let model = sensor.model.clone();

    view! {
        <li class="flex justify-between items-center p-3 border border-border rounded hover:bg-surface-muted">
            <a href=href class="block flex-1">
                <div class="font-semibold text-fg">{name}</div>
                <div class="text-sm text-fg-muted">{model}</div>
                {description.map(|text| view! { <div class="text-sm text-fg-muted">{text}</div> })}
                <div class="text-xs text-fg-muted">{format!("Created: {}", created)}</div>
            </a>
            <Button
                variant=ButtonVariant::Danger
                on:click=move |_| on_delete.call(sensor.clone())
            >
                "Delete"
            </Button>
        </li>
    }
}
