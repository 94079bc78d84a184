//! Sign view: the remito's PDF, ready to be signed.

use contracts::remitos::ReportConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api;

#[component]
pub fn FirmarView(sdhnum: String) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let report = RwSignal::new(None::<ReportConfig>);
    spawn_local(async move {
        match api::get_report_config().await {
            Ok(config) => report.set(Some(config)),
            Err(e) => log::warn!("report config unavailable: {e}"),
        }
    });

    // The backend proxies the report service, so the iframe stays same-origin.
    let proxy_url = crate::shared::api::report_proxy_url(&sdhnum);
    let external_sdhnum = sdhnum.clone();

    view! {
        <div style="padding: 16px; display: flex; flex-direction: column; gap: 10px; height: 100vh; box-sizing: border-box;">
            <div style="display: flex; align-items: center; gap: 12px;">
                <button on:click=move |_| ctx.back_to_list()>"Volver"</button>
                <h2 style="margin: 0;">{format!("Firmar remito {sdhnum}")}</h2>

                {move || {
                    report.get().map(|config| {
                        let href = format!(
                            "{}/{}?sdhnum={}",
                            config.base_url, config.report_name, external_sdhnum,
                        );
                        view! {
                            <a href=href target="_blank" style="margin-left: auto;">
                                "Abrir en el editor de firma"
                            </a>
                        }
                    })
                }}
            </div>

            <iframe
                src=proxy_url
                style="flex: 1; border: 1px solid #ddd; border-radius: 6px; width: 100%;"
            ></iframe>
        </div>
    }
}
