//! Column customization panel.
//!
//! Edits are collected into the specific config's override map and persisted
//! as a whole document. A failed save leaves the panel open with the edits
//! intact.

use std::collections::BTreeMap;

use contracts::table_config::{ColumnOverride, SpecificConfig, SpecificTable};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::remitos::config_store::ConfigStore;
use crate::shared::api;

#[derive(Debug, Clone, PartialEq)]
struct DraftColumn {
    field: String,
    label: String,
    width: String,
    visible: bool,
    position: i32,
}

#[component]
pub fn ConfigPanel(on_saved: Callback<()>) -> impl IntoView {
    let config = expect_context::<ConfigStore>();

    let drafts = RwSignal::new(initial_drafts(&config));
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let save = move |_| {
        saving.set(true);
        error.set(None);

        let overrides: BTreeMap<String, ColumnOverride> = drafts
            .get()
            .into_iter()
            .map(|d| {
                (
                    d.field,
                    ColumnOverride {
                        label: Some(d.label),
                        width: Some(d.width),
                        visible: Some(d.visible),
                        position: Some(d.position),
                        ..Default::default()
                    },
                )
            })
            .collect();

        let previous = config.specific.get_untracked();
        let specific = SpecificConfig {
            version: previous
                .as_ref()
                .map(|s| s.version.clone())
                .unwrap_or_else(|| "1".to_string()),
            client: previous
                .as_ref()
                .map(|s| s.client.clone())
                .unwrap_or_else(|| "default".to_string()),
            last_modified: String::from(js_sys::Date::new_0().to_iso_string()),
            table: SpecificTable {
                column_overrides: overrides,
                custom_filters: previous
                    .as_ref()
                    .map(|s| s.table.custom_filters.clone())
                    .unwrap_or_default(),
                settings: previous
                    .map(|s| s.table.settings)
                    .unwrap_or_default(),
            },
        };

        spawn_local(async move {
            match api::put_specific_config(&specific).await {
                Ok(()) => {
                    config.specific.set(Some(specific));
                    on_saved.run(());
                }
                Err(e) => error.set(Some(format!("No se pudo guardar: {e}"))),
            }
            saving.set(false);
        });
    };

    let derive_standard = move |_| {
        error.set(None);
        spawn_local(async move {
            match api::derive_standard_config().await {
                Ok(standard) => {
                    config.standard.set(Some(standard));
                    drafts.set(initial_drafts(&config));
                }
                Err(e) => error.set(Some(format!("No se pudo regenerar: {e}"))),
            }
        });
    };

    view! {
        <div style="border: 1px solid #ddd; border-radius: 6px; padding: 12px; margin-bottom: 12px;">
            <h3 style="margin-top: 0;">"Columnas de la tabla"</h3>

            {move || {
                error
                    .get()
                    .map(|e| view! { <div style="color: #b91c1c; margin-bottom: 8px;">{e}</div> })
            }}

            <table>
                <thead>
                    <tr>
                        <th>"Campo"</th>
                        <th>"Etiqueta"</th>
                        <th>"Ancho"</th>
                        <th>"Posicion"</th>
                        <th>"Visible"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        drafts
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, draft)| draft_row(index, draft, drafts))
                            .collect_view()
                    }}
                </tbody>
            </table>

            <div style="display: flex; gap: 8px; margin-top: 10px;">
                <button on:click=save disabled=move || saving.get()>
                    {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                </button>
                <button on:click=derive_standard>"Regenerar estandar desde SQL"</button>
            </div>
        </div>
    }
}

fn initial_drafts(config: &ConfigStore) -> Vec<DraftColumn> {
    config
        .merged()
        .map(|merged| {
            merged
                .db_columns
                .into_iter()
                .map(|c| DraftColumn {
                    field: c.field,
                    label: c.label,
                    width: c.width,
                    visible: c.visible,
                    position: c.position,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn draft_row(index: usize, draft: DraftColumn, drafts: RwSignal<Vec<DraftColumn>>) -> impl IntoView {
    let label = draft.label.clone();
    let width = draft.width.clone();
    view! {
        <tr>
            <td style="padding: 2px 8px;">{draft.field.clone()}</td>
            <td>
                <input
                    type="text"
                    prop:value=label
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        drafts.update(|all| {
                            if let Some(d) = all.get_mut(index) {
                                d.label = value;
                            }
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="text"
                    style="width: 70px;"
                    prop:value=width
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        drafts.update(|all| {
                            if let Some(d) = all.get_mut(index) {
                                d.width = value;
                            }
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="number"
                    style="width: 60px;"
                    prop:value=draft.position.to_string()
                    on:input=move |ev| {
                        if let Ok(position) = event_target_value(&ev).parse::<i32>() {
                            drafts.update(|all| {
                                if let Some(d) = all.get_mut(index) {
                                    d.position = position;
                                }
                            });
                        }
                    }
                />
            </td>
            <td style="text-align: center;">
                <input
                    type="checkbox"
                    prop:checked=draft.visible
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        drafts.update(|all| {
                            if let Some(d) = all.get_mut(index) {
                                d.visible = checked;
                            }
                        });
                    }
                />
            </td>
        </tr>
    }
}
