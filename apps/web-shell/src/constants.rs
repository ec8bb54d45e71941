use web_time::Duration;

pub(crate) const CONSOLE_TAG: &str = "[miniflux-tweaks]";

pub(crate) const CONFIG_FIELDSET_ID: &str = "miniflux-tweaks-config";
pub(crate) const TOKEN_INPUT_ID: &str = "miniflux-tweaks-api-token";
pub(crate) const TOKEN_SAVE_ID: &str = "miniflux-tweaks-save-token";
pub(crate) const SAVE_STATUS_ID: &str = "miniflux-tweaks-save-status";
pub(crate) const DOMAIN_RESET_ID: &str = "miniflux-tweaks-reset-domain";
pub(crate) const SORT_SELECT_ID: &str = "miniflux-tweaks-sort-direction";

pub(crate) const PAGINATION_NEXT_SELECTOR: &str = ".pagination-next";
pub(crate) const SETTINGS_FORM_SELECTOR: &str = "main form";

pub(crate) const API_KEYS_HELP_HREF: &str = "/keys";
pub(crate) const EXTERNAL_LINK_ICON_HREF: &str = "/icon/sprite.svg#icon-external-link";
pub(crate) const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub(crate) const SETUP_PROMPT: &str =
    "Configure Miniflux Tweaks?\n\nClick OK if this is your Miniflux instance.";
pub(crate) const RESET_PROMPT: &str =
    "Reset domain configuration?\n\nYou will be prompted to reconfigure on next page load.";
pub(crate) const SAVED_STATUS_TEXT: &str = "Saved!";
pub(crate) const SAVE_STATUS_CLEAR_DELAY: Duration = Duration::from_secs(2);
