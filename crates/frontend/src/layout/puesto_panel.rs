use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

/// Startup form selecting the puesto. The remitos list only mounts once a
/// company and facility are set.
#[component]
pub fn PuestoPanel() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let (company, set_company) = signal(String::new());
    let (facility, set_facility) = signal(String::new());
    let (puesto, set_puesto) = signal(String::new());

    let can_enter = move || !company.get().trim().is_empty() && !facility.get().trim().is_empty();

    let enter = move |_| {
        if !can_enter() {
            return;
        }
        ctx.company.set(company.get().trim().to_string());
        ctx.facility.set(facility.get().trim().to_string());
        ctx.puesto.set(puesto.get().trim().to_string());
    };

    view! {
        <div style="max-width: 360px; margin: 80px auto; display: flex; flex-direction: column; gap: 12px;">
            <h2 style="margin: 0;">"Firma de remitos"</h2>

            <label>"Sociedad"</label>
            <input
                type="text"
                placeholder="ES01"
                prop:value=move || company.get()
                on:input=move |ev| set_company.set(event_target_value(&ev))
            />

            <label>"Planta"</label>
            <input
                type="text"
                placeholder="SEV1"
                prop:value=move || facility.get()
                on:input=move |ev| set_facility.set(event_target_value(&ev))
            />

            <label>"Puesto"</label>
            <input
                type="text"
                placeholder="EXPEDICION-1"
                prop:value=move || puesto.get()
                on:input=move |ev| set_puesto.set(event_target_value(&ev))
            />

            <button on:click=enter disabled=move || !can_enter()>
                "Entrar"
            </button>
        </div>
    }
}
