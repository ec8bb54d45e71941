//! Browser entry for Miniflux Tweaks.
//!
//! Compiles to a `cdylib` wasm module that gates itself on the
//! authorized origin, then injects the settings panel and the
//! sort-direction selector into the Miniflux UI. All policy lives in
//! `miniflux-tweaks-core`; this crate only drives the DOM and the
//! network.

#[cfg(target_arch = "wasm32")]
mod constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};

    use miniflux_tweaks_core::guard::{DomainGuardDecision, evaluate_domain};
    use miniflux_tweaks_core::routing::{is_activation_path, is_settings_path};
    use miniflux_tweaks_core::sort_control::SortControlState;
    use miniflux_tweaks_core::storage::{STORAGE_KEY_DOMAIN, TweaksStore};
    use wasm_bindgen::prelude::*;

    use crate::constants::*;

    mod dom;
    mod network;
    mod storage;

    use dom::{inject_settings_panel, inject_sort_dropdown};
    use storage::LocalStore;

    thread_local! {
        static SORT_CONTROL_STATE: RefCell<SortControlState> = RefCell::new(SortControlState::new());
        static TOKEN_SAVE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static DOMAIN_RESET_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SORT_CHANGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SAVE_STATUS_GENERATION: Cell<u64> = const { Cell::new(0) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(error) = boot() {
            console_error(&format!("boot failed: {error}"));
        }
    }

    fn boot() -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document is unavailable".to_string())?;
        let location = window.location();
        let pathname = location
            .pathname()
            .map_err(|_| "pathname is unavailable".to_string())?;
        if !is_activation_path(&pathname) {
            return Ok(());
        }

        let origin = location
            .origin()
            .map_err(|_| "origin is unavailable".to_string())?;
        let store = LocalStore::from_window(&window)?;
        if !run_domain_guard(&window, &store, &origin) {
            return Ok(());
        }

        if is_settings_path(&pathname) {
            inject_settings_panel(&document, &store)?;
        }
        inject_sort_dropdown(&document, &store)?;
        Ok(())
    }

    /// Runs once per page load, before any injection. Accepting the
    /// setup prompt stores the origin and reloads, so the next pass
    /// runs with the guard armed; both prompt branches leave the
    /// current pass inert.
    fn run_domain_guard(window: &web_sys::Window, store: &LocalStore, origin: &str) -> bool {
        let stored = store.get(STORAGE_KEY_DOMAIN).ok().flatten();
        match evaluate_domain(stored.as_deref(), origin) {
            DomainGuardDecision::Authorized => true,
            DomainGuardDecision::Mismatch => false,
            DomainGuardDecision::PromptForSetup => {
                let confirmed = window.confirm_with_message(SETUP_PROMPT).unwrap_or(false);
                if confirmed {
                    if store.set(STORAGE_KEY_DOMAIN, origin).is_err() {
                        console_error("failed to persist authorized domain");
                        return false;
                    }
                    let _ = window.location().reload();
                }
                false
            }
        }
    }

    fn console_error(message: &str) {
        web_sys::console::error_1(&JsValue::from_str(&format!("{CONSOLE_TAG} {message}")));
    }
}
