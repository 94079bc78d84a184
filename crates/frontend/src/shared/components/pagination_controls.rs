use contracts::pagination::PaginationState;
use leptos::prelude::*;

/// Sliding window of numbered page buttons: at most five, centered on the
/// current page and clamped to the valid range (1-based).
pub fn page_window(current: u64, total: u64) -> Vec<u64> {
    if total == 0 {
        return Vec::new();
    }
    let span = total.min(5);
    let start = current
        .saturating_sub(2)
        .max(1)
        .min(total - span + 1);
    (0..span).map(|i| start + i).collect()
}

/// Pagination bar fed by the server-side metadata. The enabled state of every
/// button comes from that metadata, never from a client-side recount.
#[component]
pub fn PaginationControls(
    #[prop(into)] pagination: Signal<Option<PaginationState>>,
    on_page_change: Callback<u64>,
) -> impl IntoView {
    view! {
        {move || {
            let Some(p) = pagination.get() else {
                return ().into_any();
            };
            if p.total_pages == 0 {
                return ().into_any();
            }

            view! {
                <div style="display: flex; align-items: center; gap: 6px; margin-top: 10px;">
                    <button
                        on:click=move |_| {
                            if p.has_previous_page {
                                on_page_change.run(p.current_page - 1);
                            }
                        }
                        disabled=!p.has_previous_page
                    >
                        "Anterior"
                    </button>

                    {page_window(p.current_page, p.total_pages)
                        .into_iter()
                        .map(|page| {
                            let is_current = page == p.current_page;
                            view! {
                                <button
                                    style=move || {
                                        if is_current {
                                            "font-weight: bold; background: #2563eb; color: white;"
                                        } else {
                                            ""
                                        }
                                    }
                                    on:click=move |_| {
                                        if !is_current {
                                            on_page_change.run(page);
                                        }
                                    }
                                >
                                    {page.to_string()}
                                </button>
                            }
                        })
                        .collect_view()}

                    <button
                        on:click=move |_| {
                            if p.has_next_page {
                                on_page_change.run(p.current_page + 1);
                            }
                        }
                        disabled=!p.has_next_page
                    >
                        "Siguiente"
                    </button>

                    <span style="margin-left: 8px; color: #666;">
                        {format!("{} remitos", p.total_count)}
                    </span>
                </div>
            }
            .into_any()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered_when_room_on_both_sides() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn window_clamps_at_the_edges() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_shrinks_below_five_pages() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(2, 2), vec![1, 2]);
        assert_eq!(page_window(1, 1), vec![1]);
    }

    #[test]
    fn empty_result_has_no_window() {
        assert!(page_window(1, 0).is_empty());
    }
}
