use super::{
    chart::ReadingsChart,
    utils::LOADING_MESSAGE,
    view_model::{use_sensor_detail_view_model, SensorDetailViewModel},
};
use crate::{
    api::{Reading, Sensor},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    utils::time::format_timestamp,
};
use leptos::{
    ev::{MouseEvent, SubmitEvent},
    *,
};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str =
    "border border-border rounded px-2 py-1 bg-surface text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus";

fn run<F, Fut>(vm: &SensorDetailViewModel, op: F)
where
    F: FnOnce(SensorDetailViewModel) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(op(vm.clone()));
}

fn sensor_heading(sensor: &Sensor) -> String {
    format!("{} ({})", sensor.name, sensor.model)
}

#[component]
pub fn SensorDetailPanel(sensor_id: i64) -> impl IntoView {
    let vm = use_sensor_detail_view_model(sensor_id);

    {
        let vm = vm.clone();
        create_effect(move |_| run(&vm, |vm| async move { vm.fetch().await }));
    }

    let on_add = {
        let vm = vm.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            run(&vm, |vm| async move { vm.add_reading().await });
        }
    };
    let on_filter = {
        let vm = vm.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            run(&vm, |vm| async move { vm.filter().await });
        }
    };
    let on_clear = {
        let vm = vm.clone();
        move |_: MouseEvent| run(&vm, |vm| async move { vm.clear_filter().await })
    };

    let sensor = vm.sensor;
    let readings = vm.readings;
    let form = vm.form;
    let range_from = vm.range_from;
    let range_to = vm.range_to;
    let submitting = vm.submitting;
    let error = vm.error;

    view! {
        <div class="space-y-6">
            <InlineErrorMessage error=error />
            <Show
                when=move || sensor.with(Option::is_some)
                fallback=|| view! {
                    <div class="flex items-center gap-2 text-fg-muted">
                        <LoadingSpinner />
                        <span>{LOADING_MESSAGE}</span>
                    </div>
                }
            >
                <header class="space-y-1">
                    <h1 class="text-2xl font-bold text-fg">
                        {move || sensor.with(|s| s.as_ref().map(sensor_heading).unwrap_or_default())}
                    </h1>
                    {move || sensor.with(|s| {
                        s.as_ref().and_then(|s| s.description.clone()).map(|text| view! {
                            <p class="text-fg-muted">{text}</p>
                        })
                    })}
                </header>

                <section class="space-y-2">
                    <h2 class="text-lg font-semibold text-fg">"Add reading"</h2>
                    <form class="flex flex-wrap gap-2" on:submit=on_add.clone()>
                        <input
                            type="number"
                            step="any"
                            placeholder="Temperature (°C)"
                            required
                            class=INPUT_CLASS
                            prop:value=form.temperature
                            on:input=move |ev| {
                                form.temperature.set(event_target::<HtmlInputElement>(&ev).value())
                            }
                        />
                        <input
                            type="number"
                            step="any"
                            placeholder="Humidity (%)"
                            required
                            class=INPUT_CLASS
                            prop:value=form.humidity
                            on:input=move |ev| {
                                form.humidity.set(event_target::<HtmlInputElement>(&ev).value())
                            }
                        />
                        <input
                            type="datetime-local"
                            required
                            class=INPUT_CLASS
                            prop:value=form.timestamp
                            on:input=move |ev| {
                                form.timestamp.set(event_target::<HtmlInputElement>(&ev).value())
                            }
                        />
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="rounded px-3 py-1 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        >
                            "Add"
                        </button>
                    </form>
                </section>

                <section class="space-y-2">
                    <h2 class="text-lg font-semibold text-fg">"Readings"</h2>
                    <form class="flex flex-wrap items-end gap-2" on:submit=on_filter.clone()>
                        <label class="flex flex-col text-sm text-fg-muted">
                            "From"
                            <input
                                type="datetime-local"
                                class=INPUT_CLASS
                                prop:value=range_from
                                on:input=move |ev| {
                                    range_from.set(event_target::<HtmlInputElement>(&ev).value())
                                }
                            />
                        </label>
                        <label class="flex flex-col text-sm text-fg-muted">
                            "To"
                            <input
                                type="datetime-local"
                                class=INPUT_CLASS
                                prop:value=range_to
                                on:input=move |ev| {
                                    range_to.set(event_target::<HtmlInputElement>(&ev).value())
                                }
                            />
                        </label>
                        <button
                            type="submit"
                            class="rounded px-3 py-1 text-sm font-semibold bg-surface-muted text-fg border border-border"
                        >
                            "Filter"
                        </button>
                        <button
                            type="button"
                            class="rounded px-3 py-1 text-sm font-semibold bg-surface text-fg-muted border border-border"
                            on:click=on_clear.clone()
                        >
                            "Clear"
                        </button>
                    </form>
                    <ReadingsChart readings=readings />
                    <ReadingTable readings=readings />
                </section>
            </Show>
        </div>
    }
}

#[component]
fn ReadingTable(#[prop(into)] readings: Signal<Vec<Reading>>) -> impl IntoView {
    view! {
        <Show when=move || !readings.with(Vec::is_empty)>
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-fg-muted">
                        <th class="py-1">"Time"</th>
                        <th class="py-1">"Temperature (°C)"</th>
                        <th class="py-1">"Humidity (%)"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || readings.get().into_iter().map(|reading| view! {
                        <tr class="border-t border-border">
                            <td class="py-1">{format_timestamp(&reading.timestamp)}</td>
                            <td class="py-1">{format!("{:.1}", reading.temperature)}</td>
                            <td class="py-1">{format!("{:.1}", reading.humidity)}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </Show>
    }
}
