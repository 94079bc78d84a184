use leptos::prelude::*;

/// Screen currently shown. Two views do not justify a router; a context
/// signal keeps the list state alive while the sign view is open.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView {
    Remitos,
    Firmar { sdhnum: String },
}

/// App-wide context: the puesto (company + facility + workstation) the
/// operator selected at startup, plus the active view.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub company: RwSignal<String>,
    pub facility: RwSignal<String>,
    pub puesto: RwSignal<String>,
    pub active_view: RwSignal<ActiveView>,
    sign_in_progress: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            company: RwSignal::new(String::new()),
            facility: RwSignal::new(String::new()),
            puesto: RwSignal::new(String::new()),
            active_view: RwSignal::new(ActiveView::Remitos),
            sign_in_progress: RwSignal::new(false),
        }
    }

    /// Claim the app-wide sign lock. Returns `false` while another sign flow
    /// holds it, so a second Firmar click is ignored.
    pub fn try_begin_sign(&self) -> bool {
        if self.sign_in_progress.get_untracked() {
            return false;
        }
        self.sign_in_progress.set(true);
        true
    }

    pub fn end_sign(&self) {
        self.sign_in_progress.set(false);
    }

    /// The remitos query cannot run without a company and facility.
    pub fn ready(&self) -> bool {
        !self.company.get().is_empty() && !self.facility.get().is_empty()
    }

    pub fn open_firmar(&self, sdhnum: String) {
        self.active_view.set(ActiveView::Firmar { sdhnum });
    }

    pub fn back_to_list(&self) {
        self.end_sign();
        self.active_view.set(ActiveView::Remitos);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
