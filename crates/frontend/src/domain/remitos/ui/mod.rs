//! Remitos table view: dynamic header, filter row, rows and pagination.

pub mod config_panel;
pub mod firmar;

use contracts::filters::{FirmadoFilter, SIGNED_VALUE};
use contracts::pagination::PaginationState;
use contracts::remitos::RemitoRow;
use contracts::table_config::{DbColumn, FilterType, SIGNED_COLUMN};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::domain::remitos::api::{self, RemitosRequest};
use crate::domain::remitos::config_store::{self, ConfigStore, NUMBER_COLUMN};
use crate::domain::remitos::filter_machine::{DebounceGate, FirmadoGuard, TEXT_FILTER_DEBOUNCE_MS};
use crate::domain::remitos::header_policy::HeaderPolicy;
use crate::domain::remitos::state::{FilterSessionState, FocusState};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::pagination_controls::PaginationControls;

use self::config_panel::ConfigPanel;

const PAGE_SIZE: u64 = 50;

#[component]
pub fn RemitosList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let config = expect_context::<ConfigStore>();

    let rows = RwSignal::new(Vec::<RemitoRow>::new());
    let pagination = RwSignal::new(None::<PaginationState>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let session = RwSignal::new(FilterSessionState::default());
    let show_config = RwSignal::new(false);

    let header_columns = RwSignal::new(Vec::<DbColumn>::new());
    let policy = StoredValue::new(HeaderPolicy::default());
    let last_generation = StoredValue::new(0u32);

    let focus = StoredValue::new(FocusState::default());
    let gate = StoredValue::new(DebounceGate::default());
    let firmado_guard = StoredValue::new(FirmadoGuard::default());
    let started = StoredValue::new(false);

    let load_page = move |page: u64| {
        let Some(merged) = config.merged() else {
            return;
        };
        let columns = config_store::visible_columns(&merged);
        let column_fields = config_store::request_fields(&merged);
        let date_fields = config_store::date_fields(&merged);
        let filters = session.with_untracked(|s| s.descriptors(&columns));
        let desde = session.with_untracked(|s| s.desde.clone());
        let cpy = ctx.company.get_untracked();
        let stofcy = ctx.facility.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let request = RemitosRequest {
                cpy: &cpy,
                stofcy: &stofcy,
                columns: &column_fields,
                filters: &filters,
                desde: &desde,
                page,
                page_size: PAGE_SIZE,
            };
            match api::fetch_remitos(&request, &date_fields).await {
                Ok(page_data) => {
                    rows.set(page_data.remitos);
                    pagination.set(Some(page_data.pagination));
                }
                Err(e) => {
                    log!("fetch remitos failed: {}", e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    // Header regeneration: only a changed column count or a config edit may
    // rebuild the header row (rebuilding drops the focused input).
    Effect::new(move |_| {
        let generation = config.generation.get();
        let Some(merged) = config.merged() else {
            return;
        };
        let columns = config_store::visible_columns(&merged);

        let force = last_generation.get_value() != generation;
        last_generation.set_value(generation);

        let mut p = policy.get_value();
        let regenerate = p.should_regenerate(columns.len(), force);
        policy.set_value(p);
        if regenerate {
            header_columns.set(columns);
            // Rebuilding the header row drops the focused filter input. Let
            // the new inputs render, put the caret back, then forget the
            // snapshot so later fetches leave focus alone.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                let mut held = focus.get_value();
                let snapshot = held.take();
                focus.set_value(held);
                restore_focus(snapshot);
            });
        }
    });

    // First fetch once both config documents answered and a puesto is set.
    Effect::new(move |_| {
        if started.get_value() {
            return;
        }
        if config.loaded.get() && config.merged().is_some() {
            started.set_value(true);
            load_page(1);
        }
    });

    let sign = move |sdhnum: String| {
        if !ctx.try_begin_sign() {
            return;
        }
        spawn_local(async move {
            // Pull the report through the proxy before navigating; a dead
            // report service would otherwise land in a blank signing view.
            match crate::shared::api::check_report(&sdhnum).await {
                Ok(()) => ctx.open_firmar(sdhnum),
                Err(e) => {
                    log!("report unavailable for {}: {}", sdhnum, e);
                    error.set(Some(format!("No se pudo obtener el reporte de {sdhnum}: {e}")));
                    ctx.end_sign();
                }
            }
        });
    };

    let on_config_saved = Callback::new(move |_: ()| {
        config.bump_generation();
        load_page(1);
    });

    view! {
        <div style="padding: 16px;">
            <div style="display: flex; align-items: center; gap: 12px; margin-bottom: 12px;">
                <h2 style="margin: 0;">"Remitos pendientes de firma"</h2>
                <span style="color: #666;">
                    {move || format!("{} / {}", ctx.company.get(), ctx.facility.get())}
                </span>

                <label style="margin-left: auto;">"Desde:"</label>
                <input
                    type="date"
                    prop:value=move || session.with(|s| s.desde.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if !value.is_empty() {
                            session.update(|s| s.desde = value);
                            load_page(1);
                        }
                    }
                />

                <button on:click=move |_| show_config.update(|v| *v = !*v)>
                    "Columnas"
                </button>
            </div>

            {move || {
                show_config
                    .get()
                    .then(|| view! { <ConfigPanel on_saved=on_config_saved /> })
            }}

            {move || {
                error
                    .get()
                    .map(|e| view! { <div style="color: #b91c1c; margin-bottom: 8px;">{e}</div> })
            }}

            {move || {
                if config.loaded.get() && config.merged().is_none() {
                    Some(view! {
                        <div style="color: #92400e;">
                            "Sin configuracion de columnas. Pida a un administrador que la genere."
                        </div>
                    })
                } else {
                    None
                }
            }}

            <table style="border-collapse: collapse; width: 100%;">
                <thead>
                    <tr>
                        {move || {
                            header_columns
                                .get()
                                .into_iter()
                                .map(|col| {
                                    view! {
                                        <th style=format!(
                                            "width: {}; text-align: left; border-bottom: 2px solid #ddd; padding: 6px;",
                                            col.width,
                                        )>
                                            {col.label.clone()}
                                        </th>
                                    }
                                })
                                .collect_view()
                        }}
                        <th style="border-bottom: 2px solid #ddd;"></th>
                    </tr>
                    <tr>
                        {move || {
                            header_columns
                                .get()
                                .into_iter()
                                .map(|col| view! { <th>{filter_cell(col, session, focus, gate, firmado_guard, load_page)}</th> })
                                .collect_view()
                        }}
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let columns = header_columns.get();
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                let signed = row.text(SIGNED_COLUMN) == SIGNED_VALUE;
                                let sdhnum = row.text(NUMBER_COLUMN);
                                view! {
                                    <tr>
                                        {columns
                                            .iter()
                                            .map(|col| {
                                                view! {
                                                    <td style="border-bottom: 1px solid #eee; padding: 6px;">
                                                        {row.text(&col.field)}
                                                    </td>
                                                }
                                            })
                                            .collect_view()}
                                        <td style="border-bottom: 1px solid #eee; padding: 6px;">
                                            {if signed {
                                                view! { <span style="color: #15803d;">"Firmado"</span> }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <button on:click=move |_| sign(sdhnum.clone())>
                                                        "Firmar"
                                                    </button>
                                                }
                                                .into_any()
                                            }}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            {move || loading.get().then(|| view! { <div style="color: #666;">"Cargando..."</div> })}

            <PaginationControls
                pagination=pagination
                on_page_change=Callback::new(move |page| load_page(page))
            />
        </div>
    }
}

/// One cell of the filter row: a debounced text input, or the firmado select
/// for select-typed columns.
fn filter_cell(
    col: DbColumn,
    session: RwSignal<FilterSessionState>,
    focus: StoredValue<FocusState>,
    gate: StoredValue<DebounceGate>,
    firmado_guard: StoredValue<FirmadoGuard>,
    load_page: impl Fn(u64) + Copy + 'static,
) -> AnyView {
    if !col.filterable {
        return ().into_any();
    }

    if col.field == SIGNED_COLUMN {
        let options = col.filter_options.clone().unwrap_or_default();
        return view! {
            <select
                prop:value=move || session.with(|s| s.firmado.as_value().to_string())
                on:change=move |ev| {
                    let now = js_sys::Date::now();
                    let mut guard = firmado_guard.get_value();
                    let accepted = guard.try_accept(now);
                    firmado_guard.set_value(guard);
                    if !accepted {
                        // Rejected click: snap the widget back to the state.
                        if let Some(select) = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                        {
                            select.set_value(session.with_untracked(|s| s.firmado.as_value()));
                        }
                        return;
                    }
                    let value = event_target_value(&ev);
                    session.update(|s| s.firmado = FirmadoFilter::from_value(&value));
                    load_page(1);
                }
            >
                {options
                    .into_iter()
                    .map(|opt| {
                        view! { <option value=opt.value.clone()>{opt.label.clone()}</option> }
                    })
                    .collect_view()}
            </select>
        }
        .into_any();
    }

    match col.filter_type {
        FilterType::Select => {
            let field = col.field.clone();
            let options = col.filter_options.clone().unwrap_or_default();
            let field_for_value = field.clone();
            view! {
                <select
                    prop:value=move || {
                        session.with(|s| s.values.get(&field_for_value).cloned().unwrap_or_default())
                    }
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| s.set_value(&field, value));
                        load_page(1);
                    }
                >
                    <option value="">"Todos"</option>
                    {options
                        .into_iter()
                        .map(|opt| {
                            view! { <option value=opt.value.clone()>{opt.label.clone()}</option> }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FilterType::Text => {
            let field = col.field.clone();
            let field_for_value = field.clone();
            let input_id = format!("filter-{}", col.field);
            view! {
                <input
                    type="text"
                    id=input_id
                    style="width: 90%;"
                    prop:value=move || {
                        session.with(|s| s.values.get(&field_for_value).cloned().unwrap_or_default())
                    }
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let caret = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                            .and_then(|input| input.selection_start().ok().flatten());
                        focus.set_value(FocusState {
                            field: Some(field.clone()),
                            caret,
                        });
                        session.update(|s| s.set_value(&field, value));

                        let now = js_sys::Date::now();
                        let mut g = gate.get_value();
                        g.keystroke(now);
                        gate.set_value(g);

                        spawn_local(async move {
                            TimeoutFuture::new(TEXT_FILTER_DEBOUNCE_MS as u32).await;
                            let now = js_sys::Date::now();
                            let mut g = gate.get_value();
                            let fire = g.timer_fired(now);
                            gate.set_value(g);
                            if fire {
                                load_page(1);
                            }
                        });
                    }
                />
            }
            .into_any()
        }
    }
}

/// Put focus and caret back on the filter input that had them before the
/// table re-rendered.
fn restore_focus(focus: FocusState) {
    let Some(field) = focus.field else {
        return;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(&format!("filter-{field}")) else {
        return;
    };
    let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() else {
        return;
    };
    let _ = input.focus();
    if let Some(caret) = focus.caret {
        let _ = input.set_selection_range(caret, caret);
    }
}
