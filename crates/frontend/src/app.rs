use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::domain::remitos::config_store::ConfigStore;
use crate::domain::remitos::ui::firmar::FirmarView;
use crate::domain::remitos::ui::RemitosList;
use crate::layout::global_context::{ActiveView, AppGlobalContext};
use crate::layout::puesto_panel::PuestoPanel;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    // An external signing step ends with the operator coming back to this
    // window; both events release the sign lock. Registered once, for the
    // lifetime of the app.
    if let Some(window) = web_sys::window() {
        let reset = Closure::wrap(Box::new(move || ctx.end_sign()) as Box<dyn Fn()>);
        let _ = window.add_event_listener_with_callback("focus", reset.as_ref().unchecked_ref());
        if let Some(document) = window.document() {
            let _ = document
                .add_event_listener_with_callback("visibilitychange", reset.as_ref().unchecked_ref());
        }
        reset.forget();
    }

    let config = ConfigStore::new();
    provide_context(config);
    config.load();

    view! {
        {move || {
            if !ctx.ready() {
                view! { <PuestoPanel /> }.into_any()
            } else {
                match ctx.active_view.get() {
                    ActiveView::Remitos => view! { <RemitosList /> }.into_any(),
                    ActiveView::Firmar { sdhnum } => {
                        view! { <FirmarView sdhnum=sdhnum /> }.into_any()
                    }
                }
            }
        }}
    }
}
