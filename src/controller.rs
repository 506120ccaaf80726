//! Scheme controller.
//!
//! Reads the persisted preference, applies it to the stylesheet links and
//! meta tag, and subscribes to the scheme buttons so clicks switch and
//! persist the preference.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::SwitcherConfig;
use crate::error::Result;
use crate::page::{ButtonContainer, MetaTag, Page, PreferenceStore, SchemeButton, StyleLink};
use crate::scheme::Scheme;

type ButtonOf<P> = <<P as Page>::Container as ButtonContainer>::Button;

/// State shared between the controller handle and the click handlers.
struct Shared<P: Page, S> {
    light: P::Link,
    dark: P::Link,
    meta: Option<P::Meta>,
    container: Option<P::Container>,
    button_selector: String,
    // buttons present at init; only these carry click handlers
    buttons: Vec<ButtonOf<P>>,
    storage: S,
    storage_key: String,
    current: RefCell<String>,
}

impl<P: Page, S: PreferenceStore> Shared<P, S> {
    fn apply(&self, label: &str) -> Result<()> {
        let scheme = Scheme::resolve(label);

        self.light.set_media(scheme.light_media());
        self.dark.set_media(scheme.dark_media());
        if let Some(meta) = &self.meta {
            meta.set_content(scheme.meta_content());
        }
        *self.current.borrow_mut() = label.to_string();
        log::debug!("Applied color scheme '{}' as {}", label, scheme);

        // Unrecognized labels are stored verbatim.
        self.storage.set(&self.storage_key, label)
    }

    /// Scheme buttons in the container right now, including ones added
    /// after initialization.
    fn current_buttons(&self) -> Vec<ButtonOf<P>> {
        self.container
            .as_ref()
            .map(|container| container.buttons(&self.button_selector))
            .unwrap_or_default()
    }

    fn click(&self, index: usize) -> Result<()> {
        let Some(clicked) = self.buttons.get(index) else {
            return Ok(());
        };
        let Some(label) = clicked.scheme_label().filter(|label| !label.is_empty()) else {
            log::trace!("Ignoring click on unlabeled scheme button {}", index);
            return Ok(());
        };

        for button in self.current_buttons() {
            button.set_pressed(button.is_same(clicked));
        }
        self.apply(&label)
    }

    fn sync_pressed(&self, label: &str) {
        for button in self.current_buttons() {
            button.set_pressed(button.scheme_label().as_deref() == Some(label));
        }
    }
}

/// Handle to an initialized scheme switcher.
///
/// Click handlers only hold a weak reference, so the switcher stops
/// reacting once every handle is dropped.
pub struct SchemeController<P: Page, S> {
    shared: Rc<Shared<P, S>>,
}

impl<P, S> SchemeController<P, S>
where
    P: Page + 'static,
    S: PreferenceStore + 'static,
{
    /// Wire the switcher into `page`.
    ///
    /// Returns `Ok(None)` without touching page or storage when either
    /// stylesheet link is missing. Storage failures while loading or
    /// persisting the initial preference are returned.
    pub fn initialize(page: &P, storage: S, config: &SwitcherConfig) -> Result<Option<Self>> {
        let (Some(light), Some(dark)) = (
            page.stylesheet(&config.light_link_id),
            page.stylesheet(&config.dark_link_id),
        ) else {
            log::warn!(
                "Color scheme links not found (#{}, #{})",
                config.light_link_id,
                config.dark_link_id
            );
            return Ok(None);
        };

        let meta = page.meta(&config.meta_selector);
        let container = page.container(&config.switcher_id);
        let buttons = container
            .as_ref()
            .map(|container| container.buttons(&config.button_selector))
            .unwrap_or_default();

        let saved = storage
            .get(&config.storage_key)?
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Scheme::Auto.as_str().to_string());

        let controller = Self {
            shared: Rc::new(Shared {
                light,
                dark,
                meta,
                container,
                button_selector: config.button_selector.clone(),
                buttons,
                storage,
                storage_key: config.storage_key.clone(),
                current: RefCell::new(String::new()),
            }),
        };

        controller.apply(&saved)?;
        if config.sync_buttons_on_init {
            controller.shared.sync_pressed(&saved);
        }
        controller.subscribe_buttons();

        log::info!(
            "Color scheme switcher ready with '{}' and {} button(s)",
            saved,
            controller.button_count()
        );
        Ok(Some(controller))
    }

    fn subscribe_buttons(&self) {
        for (index, button) in self.shared.buttons.iter().enumerate() {
            let shared: Weak<Shared<P, S>> = Rc::downgrade(&self.shared);
            button.on_click(Box::new(move || {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                if let Err(e) = shared.click(index) {
                    log::error!("Failed to switch color scheme: {}", e);
                }
            }));
        }
    }

    /// Apply `label` to the page and persist it.
    ///
    /// `light` and `dark` force one stylesheet on; anything else defers to
    /// the system preference. The label is persisted as given.
    pub fn apply(&self, label: &str) -> Result<()> {
        self.shared.apply(label)
    }

    /// The label most recently applied.
    pub fn current(&self) -> String {
        self.shared.current.borrow().clone()
    }

    /// The scheme in effect.
    pub fn scheme(&self) -> Scheme {
        Scheme::resolve(&self.shared.current.borrow())
    }

    /// Number of subscribed scheme buttons.
    pub fn button_count(&self) -> usize {
        self.shared.buttons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DARK_LINK_ID, LIGHT_LINK_ID, STORAGE_KEY};
    use crate::error::SchemeError;
    use crate::memory::{MemoryButton, MemoryPage, MemoryStorage};

    type Controller = SchemeController<MemoryPage, MemoryStorage>;

    fn init(page: &MemoryPage, storage: &MemoryStorage) -> Controller {
        Controller::initialize(page, storage.clone(), &SwitcherConfig::default())
            .unwrap()
            .expect("links present")
    }

    fn media(page: &MemoryPage) -> (String, String) {
        (
            page.link_media(LIGHT_LINK_ID).unwrap(),
            page.link_media(DARK_LINK_ID).unwrap(),
        )
    }

    #[test]
    fn test_meta_content_per_scheme() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        for (label, expected) in [("light", "light"), ("dark", "dark"), ("auto", "light dark")] {
            controller.apply(label).unwrap();
            assert_eq!(page.meta_content().as_deref(), Some(expected));
            assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some(label));
        }
    }

    #[test]
    fn test_default_is_auto() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        assert_eq!(controller.scheme(), Scheme::Auto);
        assert_eq!(
            media(&page),
            (
                "(prefers-color-scheme: light)".to_string(),
                "(prefers-color-scheme: dark)".to_string()
            )
        );
        assert_eq!(page.meta_content().as_deref(), Some("light dark"));
        // the load-time apply persists too
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("auto"));
    }

    #[test]
    fn test_empty_stored_value_is_auto() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "");
        let controller = init(&page, &storage);
        assert_eq!(controller.current(), "auto");
    }

    #[test]
    fn test_stored_dark_is_applied() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "dark");
        let controller = init(&page, &storage);

        assert_eq!(controller.scheme(), Scheme::Dark);
        assert_eq!(media(&page), ("not all".to_string(), "all".to_string()));
        assert_eq!(page.meta_content().as_deref(), Some("dark"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        controller.apply("light").unwrap();
        let once = (media(&page), page.meta_content(), storage.value(STORAGE_KEY));
        controller.apply("light").unwrap();
        let twice = (media(&page), page.meta_content(), storage.value(STORAGE_KEY));
        assert_eq!(once, twice);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_reload_restores_preference() {
        let storage = MemoryStorage::new();
        for label in ["light", "dark", "auto"] {
            let page = MemoryPage::standard();
            init(&page, &storage).apply(label).unwrap();

            let reloaded = MemoryPage::standard();
            let controller = init(&reloaded, &storage);
            assert_eq!(controller.current(), label);
            assert_eq!(
                reloaded.meta_content().as_deref(),
                Some(Scheme::resolve(label).meta_content())
            );
        }
    }

    #[test]
    fn test_click_light_without_stored_value() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let _controller = init(&page, &storage);

        page.button("light").unwrap().click();

        assert_eq!(page.meta_content().as_deref(), Some("light"));
        assert_eq!(media(&page), ("all".to_string(), "not all".to_string()));
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_click_marks_exactly_one_pressed() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);
        assert_eq!(controller.button_count(), 3);

        for label in ["dark", "auto", "light", "dark"] {
            page.button(label).unwrap().click();
            let pressed: Vec<_> = page
                .switcher_buttons()
                .iter()
                .filter(|b| b.pressed() == Some(true))
                .filter_map(|b| b.scheme_label())
                .collect();
            assert_eq!(pressed, vec![label.to_string()]);
            assert!(page.switcher_buttons().iter().all(|b| b.pressed().is_some()));
        }
    }

    #[test]
    fn test_duplicate_labels_press_only_clicked_button() {
        let first = MemoryButton::new("dark");
        let second = MemoryButton::new("dark");
        let page = MemoryPage::new()
            .with_stylesheets()
            .with_switcher(vec![first.clone(), second.clone()]);
        let _controller = init(&page, &MemoryStorage::new());

        second.click();
        assert_eq!(first.pressed(), Some(false));
        assert_eq!(second.pressed(), Some(true));
    }

    #[test]
    fn test_label_removed_before_click_is_ignored() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        let dark = page.button("dark").unwrap();
        dark.set_label(Some(""));
        dark.click();

        assert_eq!(controller.current(), "auto");
        assert!(page.switcher_buttons().iter().all(|b| b.pressed().is_none()));
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("auto"));
    }

    #[test]
    fn test_unlabeled_buttons_are_not_subscribed() {
        let unlabeled = MemoryButton::unlabeled();
        let page = MemoryPage::new()
            .with_stylesheets()
            .with_switcher(vec![MemoryButton::new("light"), unlabeled.clone()]);
        let controller = init(&page, &MemoryStorage::new());

        assert_eq!(controller.button_count(), 1);
        assert_eq!(unlabeled.handler_count(), 0);
    }

    #[test]
    fn test_missing_links_leave_storage_untouched() {
        let storage = MemoryStorage::new();
        let page = MemoryPage::new().with_link(LIGHT_LINK_ID).with_meta();

        let result = Controller::initialize(&page, storage.clone(), &SwitcherConfig::default());
        assert!(matches!(result, Ok(None)));
        assert!(storage.is_empty());
        assert_eq!(page.meta_content().as_deref(), Some(""));
    }

    #[test]
    fn test_missing_links_do_not_subscribe_buttons() {
        let button = MemoryButton::new("dark");
        let page = MemoryPage::new().with_switcher(vec![button.clone()]);
        let result =
            Controller::initialize(&page, MemoryStorage::new(), &SwitcherConfig::default());
        assert!(matches!(result, Ok(None)));
        assert_eq!(button.handler_count(), 0);
    }

    #[test]
    fn test_optional_elements_may_be_missing() {
        let page = MemoryPage::new().with_stylesheets();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "light");
        let controller = init(&page, &storage);

        assert_eq!(controller.button_count(), 0);
        assert_eq!(page.meta_content(), None);
        assert_eq!(media(&page), ("all".to_string(), "not all".to_string()));
    }

    #[test]
    fn test_unknown_label_applies_auto_but_stores_verbatim() {
        let page = MemoryPage::new()
            .with_stylesheets()
            .with_meta()
            .with_switcher(vec![MemoryButton::new("sepia")]);
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        page.button("sepia").unwrap().click();

        assert_eq!(controller.scheme(), Scheme::Auto);
        assert_eq!(controller.current(), "sepia");
        assert_eq!(page.meta_content().as_deref(), Some("light dark"));
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("sepia"));
    }

    #[test]
    fn test_storage_write_failure_is_returned() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new().rejecting_writes();
        let result = Controller::initialize(&page, storage, &SwitcherConfig::default());

        assert!(matches!(result, Err(SchemeError::Storage(_))));
        // visuals are applied before the write fails
        assert_eq!(page.meta_content().as_deref(), Some("light dark"));
    }

    #[test]
    fn test_sync_buttons_on_init() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "dark");
        let config = SwitcherConfig {
            sync_buttons_on_init: true,
            ..SwitcherConfig::default()
        };
        let _controller = Controller::initialize(&page, storage, &config)
            .unwrap()
            .unwrap();

        assert_eq!(page.button("dark").unwrap().pressed(), Some(true));
        assert_eq!(page.button("light").unwrap().pressed(), Some(false));
        assert_eq!(page.button("auto").unwrap().pressed(), Some(false));
    }

    #[test]
    fn test_custom_storage_key() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value("site-theme", "light");
        let config = SwitcherConfig {
            storage_key: "site-theme".to_string(),
            ..SwitcherConfig::default()
        };
        let controller = Controller::initialize(&page, storage.clone(), &config)
            .unwrap()
            .unwrap();

        assert_eq!(controller.scheme(), Scheme::Light);
        assert_eq!(storage.value(STORAGE_KEY), None);
    }

    #[test]
    fn test_dropped_controller_stops_handling_clicks() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        drop(init(&page, &storage));

        page.button("dark").unwrap().click();
        assert_eq!(page.meta_content().as_deref(), Some("light dark"));
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("auto"));
    }

    #[test]
    fn test_click_resets_buttons_added_after_init() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::new();
        let controller = init(&page, &storage);

        let late = MemoryButton::new("dark");
        late.set_pressed(true);
        page.switcher().unwrap().push(late.clone());

        page.button("light").unwrap().click();

        let pressed: Vec<_> = page
            .switcher_buttons()
            .into_iter()
            .filter(|b| b.pressed() == Some(true))
            .collect();
        assert_eq!(pressed.len(), 1);
        assert_eq!(pressed[0].scheme_label().as_deref(), Some("light"));
        assert_eq!(late.pressed(), Some(false));
        // only buttons present at init are subscribed
        assert_eq!(late.handler_count(), 0);
        assert_eq!(controller.button_count(), 3);
    }

    #[test]
    fn test_storage_read_failure_is_returned() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "dark").rejecting_reads();
        let result = Controller::initialize(&page, storage, &SwitcherConfig::default());

        assert!(matches!(result, Err(SchemeError::Storage(_))));
        assert_eq!(page.meta_content().as_deref(), Some(""));
        assert_eq!(page.link_media(DARK_LINK_ID).as_deref(), Some(""));
    }

    #[test]
    fn test_missing_links_never_read_storage() {
        let page = MemoryPage::new().with_meta();
        let storage = MemoryStorage::new().rejecting_reads().rejecting_writes();
        let result = Controller::initialize(&page, storage, &SwitcherConfig::default());

        assert!(matches!(result, Ok(None)));
        assert_eq!(page.meta_content().as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_stored_value_is_kept_verbatim() {
        let page = MemoryPage::standard();
        let storage = MemoryStorage::with_value(STORAGE_KEY, "sepia");
        let controller = init(&page, &storage);

        assert_eq!(controller.scheme(), Scheme::Auto);
        assert_eq!(controller.current(), "sepia");
        assert_eq!(
            media(&page),
            (
                "(prefers-color-scheme: light)".to_string(),
                "(prefers-color-scheme: dark)".to_string()
            )
        );
        assert_eq!(page.meta_content().as_deref(), Some("light dark"));
        assert_eq!(storage.value(STORAGE_KEY).as_deref(), Some("sepia"));
    }
}
