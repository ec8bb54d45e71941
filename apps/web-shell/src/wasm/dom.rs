use gloo_timers::future::sleep;
use miniflux_tweaks_core::api::SortDirection;
use miniflux_tweaks_core::sort_control::{SortControlEffect, SortControlEvent};
use miniflux_tweaks_core::storage::{STORAGE_KEY_API_TOKEN, STORAGE_KEY_DOMAIN};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

use super::*;

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, String> {
    document
        .create_element(tag)
        .map_err(|_| format!("failed to create <{tag}>"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("<{tag}> is not an HtmlElement"))
}

/// Appends the credential-management fieldset to the settings form.
/// No-op when the page has no `main form` or the fieldset already
/// exists.
pub(super) fn inject_settings_panel(document: &Document, store: &LocalStore) -> Result<(), String> {
    let form = match document.query_selector(SETTINGS_FORM_SELECTOR).ok().flatten() {
        Some(form) => form,
        None => return Ok(()),
    };
    if document.get_element_by_id(CONFIG_FIELDSET_ID).is_some() {
        return Ok(());
    }

    let saved_token = store.get_or(STORAGE_KEY_API_TOKEN, "");
    let saved_domain = store.get_or(STORAGE_KEY_DOMAIN, "");

    let fieldset = create_html(document, "fieldset")?;
    fieldset.set_id(CONFIG_FIELDSET_ID);

    let legend = create_html(document, "legend")?;
    legend.set_text_content(Some("Miniflux Tweaks"));
    let _ = fieldset.append_child(&legend);

    let label_row = create_html(document, "div")?;
    label_row.set_class_name("form-label-row");
    let label = create_html(document, "label")?;
    let _ = label.set_attribute("for", TOKEN_INPUT_ID);
    label.set_text_content(Some("API Token"));
    let _ = label_row.append_child(&label);
    let _ = fieldset.append_child(&label_row);

    let token_input = create_html(document, "input")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| "token input is not an HtmlInputElement".to_string())?;
    token_input.set_type("password");
    token_input.set_id(TOKEN_INPUT_ID);
    token_input.set_value(&saved_token);
    token_input.set_placeholder("Paste your API token");
    let _ = token_input.style().set_property("width", "100%");
    let _ = token_input.style().set_property("max-width", "400px");
    let _ = fieldset.append_child(&token_input);

    let help = create_html(document, "p")?;
    help.set_class_name("form-help");
    help.set_text_content(Some("Generate at Settings → API Keys "));
    let help_link = create_html(document, "a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "help link is not an HtmlAnchorElement".to_string())?;
    help_link.set_href(API_KEYS_HELP_HREF);
    help_link.set_target("_blank");
    let icon = document
        .create_element_ns(Some(SVG_NAMESPACE), "svg")
        .map_err(|_| "failed to create help icon".to_string())?;
    let _ = icon.set_attribute("class", "icon");
    let _ = icon.set_attribute("aria-hidden", "true");
    let sprite = document
        .create_element_ns(Some(SVG_NAMESPACE), "use")
        .map_err(|_| "failed to create help icon sprite".to_string())?;
    let _ = sprite.set_attribute("href", EXTERNAL_LINK_ICON_HREF);
    let _ = icon.append_child(&sprite);
    let _ = help_link.append_child(&icon);
    let _ = help.append_child(&help_link);
    let _ = fieldset.append_child(&help);

    let save_button = create_html(document, "button")?;
    let _ = save_button.set_attribute("type", "button");
    save_button.set_id(TOKEN_SAVE_ID);
    save_button.set_class_name("button button-primary");
    save_button.set_text_content(Some("Update"));

    let status = create_html(document, "span")?;
    status.set_id(SAVE_STATUS_ID);
    let _ = status.style().set_property("margin-left", "1em");

    let save_row = create_html(document, "div")?;
    let _ = save_row.style().set_property("margin-top", "0.5em");
    let _ = save_row.append_child(&save_button);
    let _ = save_row.append_child(&status);
    let _ = fieldset.append_child(&save_row);

    let divider = create_html(document, "hr")?;
    let _ = divider.style().set_property("margin", "1em 0");
    let _ = divider.style().set_property("border", "none");
    let _ = divider
        .style()
        .set_property("border-top", "1px solid var(--hr-border-color, #ddd)");
    let _ = fieldset.append_child(&divider);

    let reset_button = create_html(document, "button")?;
    let _ = reset_button.set_attribute("type", "button");
    reset_button.set_id(DOMAIN_RESET_ID);
    reset_button.set_class_name("button button-primary");
    reset_button.set_text_content(Some("Reset Domain"));

    let domain_note = create_html(document, "small")?;
    let _ = domain_note.style().set_property("margin-left", "1em");
    domain_note.set_text_content(Some(&format!("Currently: {saved_domain}")));

    let reset_row = create_html(document, "div")?;
    let _ = reset_row.append_child(&reset_button);
    let _ = reset_row.append_child(&domain_note);
    let _ = fieldset.append_child(&reset_row);

    let _ = form.append_child(&fieldset);

    install_token_save_handler(&save_button, store.clone());
    install_domain_reset_handler(&reset_button, store.clone());
    Ok(())
}

fn install_token_save_handler(button: &HtmlElement, store: LocalStore) {
    TOKEN_SAVE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            save_token_from_input(&store);
        }));
        let _ =
            button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

// Any non-empty or empty string is accepted and stored verbatim.
fn save_token_from_input(store: &LocalStore) {
    let Some(value) = read_input_value(TOKEN_INPUT_ID) else {
        return;
    };
    if store.set(STORAGE_KEY_API_TOKEN, &value).is_err() {
        console_error("failed to persist api token");
        return;
    }
    show_saved_status();
}

fn read_input_value(id: &str) -> Option<String> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let input = document.get_element_by_id(id)?;
    let input = input.dyn_into::<HtmlInputElement>().ok()?;
    Some(input.value())
}

/// Shows "Saved!" for two seconds. A newer save bumps the generation
/// counter, so a stale timer never clears a fresh message.
fn show_saved_status() {
    let Some(status) = save_status_span() else {
        return;
    };
    status.set_text_content(Some(SAVED_STATUS_TEXT));
    let _ = status.style().set_property("color", "green");

    let generation = SAVE_STATUS_GENERATION.with(|cell| {
        let next = cell.get().wrapping_add(1);
        cell.set(next);
        next
    });
    spawn_local(async move {
        sleep(SAVE_STATUS_CLEAR_DELAY).await;
        let still_current = SAVE_STATUS_GENERATION.with(|cell| cell.get() == generation);
        if !still_current {
            return;
        }
        if let Some(status) = save_status_span() {
            status.set_text_content(None);
        }
    });
}

fn save_status_span() -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(SAVE_STATUS_ID)?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn install_domain_reset_handler(button: &HtmlElement, store: LocalStore) {
    DOMAIN_RESET_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            reset_domain(&store);
        }));
        let _ =
            button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

fn reset_domain(store: &LocalStore) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let confirmed = window.confirm_with_message(RESET_PROMPT).unwrap_or(false);
    if !confirmed {
        return;
    }
    if store.delete(STORAGE_KEY_DOMAIN).is_err() {
        console_error("failed to clear authorized domain");
        return;
    }
    let _ = window.location().reload();
}

/// Attaches the sort-direction selector to the pagination-next control
/// and kicks off initialization. No-op when the page has no pagination
/// control or the selector already exists.
pub(super) fn inject_sort_dropdown(document: &Document, store: &LocalStore) -> Result<(), String> {
    let pagination = match document
        .query_selector(PAGINATION_NEXT_SELECTOR)
        .ok()
        .flatten()
    {
        Some(element) => element,
        None => return Ok(()),
    };
    if document.get_element_by_id(SORT_SELECT_ID).is_some() {
        return Ok(());
    }

    let select = create_html(document, "select")?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| "sort selector is not an HtmlSelectElement".to_string())?;
    select.set_id(SORT_SELECT_ID);
    for direction in [SortDirection::Desc, SortDirection::Asc] {
        let option = document
            .create_element("option")
            .map_err(|_| "failed to create sort option".to_string())?
            .dyn_into::<HtmlOptionElement>()
            .map_err(|_| "sort option is not an HtmlOptionElement".to_string())?;
        option.set_value(direction.as_str());
        option.set_text_content(Some(direction.label()));
        let _ = select.append_child(&option);
    }

    // Muted placeholder styling until the control initializes.
    let _ = select.style().set_property("margin", "0 15px 0 0");
    let _ = select.style().set_property("padding", "1px 4px");
    let _ = select.style().set_property("font-size", "0.85em");
    let _ = select.style().set_property("color", "#777");
    let _ = select.style().set_property("border", "1px solid #ccc");
    let _ = select.style().set_property("border-radius", "3px");
    let _ = select.style().set_property("background", "transparent");

    pagination
        .insert_before(&select, pagination.first_child().as_ref())
        .map_err(|_| "failed to attach sort selector".to_string())?;

    let token = store.get_or(STORAGE_KEY_API_TOKEN, "");
    if token.is_empty() {
        dispatch_sort_event(SortControlEvent::TokenMissing, store);
        return Ok(());
    }

    let init_store = store.clone();
    spawn_local(async move {
        match network::fetch_me(&token).await {
            Ok(user) => dispatch_sort_event(SortControlEvent::UserLoaded { user }, &init_store),
            Err(error) => {
                network::log_api_failure("GET /v1/me", &error);
                dispatch_sort_event(SortControlEvent::UserLoadFailed, &init_store);
            }
        }
    });
    Ok(())
}

fn dispatch_sort_event(event: SortControlEvent, store: &LocalStore) {
    let effects = SORT_CONTROL_STATE.with(|state| state.borrow_mut().apply_event(event));
    for effect in effects {
        perform_sort_effect(effect, store);
    }
}

fn perform_sort_effect(effect: SortControlEffect, store: &LocalStore) {
    match effect {
        SortControlEffect::DisableControl { tooltip } => {
            if let Some(select) = sort_select() {
                select.set_disabled(true);
                select.set_title(tooltip);
            }
        }
        SortControlEffect::EnableControl { value } => {
            if let Some(select) = sort_select() {
                select.set_value(value.as_str());
                select.set_disabled(false);
                // Initialized controls drop the muted placeholder look.
                let _ = select.style().set_property("color", "#000");
                let _ = select.style().remove_property("border");
                install_sort_change_handler(&select, store.clone());
            }
        }
        SortControlEffect::BeginUpdate { user_id, direction } => {
            if let Some(select) = sort_select() {
                select.set_disabled(true);
            }
            // The token is re-read per call, so a token updated in
            // another tab is picked up without a reload.
            let token = store.get_or(STORAGE_KEY_API_TOKEN, "");
            let update_store = store.clone();
            spawn_local(async move {
                match network::update_sorting(&token, user_id, direction).await {
                    Ok(_) => {
                        dispatch_sort_event(SortControlEvent::UpdateSucceeded, &update_store);
                    }
                    Err(error) => {
                        network::log_api_failure("PUT /v1/users", &error);
                        dispatch_sort_event(SortControlEvent::UpdateFailed, &update_store);
                    }
                }
            });
        }
        SortControlEffect::ReloadPage => {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        }
        SortControlEffect::RevertControl { value, alert } => {
            if let Some(select) = sort_select() {
                select.set_value(value.as_str());
                select.set_disabled(false);
            }
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(alert);
            }
        }
    }
}

fn sort_select() -> Option<HtmlSelectElement> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(SORT_SELECT_ID)?
        .dyn_into::<HtmlSelectElement>()
        .ok()
}

fn install_sort_change_handler(select: &HtmlSelectElement, store: LocalStore) {
    SORT_CHANGE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            let Some(select) = sort_select() else {
                return;
            };
            let Some(direction) = SortDirection::from_value(&select.value()) else {
                return;
            };
            dispatch_sort_event(SortControlEvent::DirectionChanged { direction }, &store);
        }));
        let _ =
            select.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}
