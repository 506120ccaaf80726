/// Native preview of the scheme switcher.
///
/// Usage: `scheme-native [label] [storage-path]`
///
/// Runs the controller against an in-memory page backed by a JSON file
/// store, optionally clicks the button carrying `label`, and prints the
/// resulting page state. Running it again shows the persisted preference
/// being restored. `storage-path` overrides the default store location
/// under the user's config directory.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scheme_switcher::constants::{DARK_LINK_ID, LIGHT_LINK_ID};
    use scheme_switcher::{
        FileStore, MemoryButton, MemoryPage, Scheme, SchemeButton, SchemeController,
        SwitcherConfig,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args()
        .nth(2)
        .map(std::path::PathBuf::from)
        .or_else(FileStore::default_path)
    else {
        eprintln!("Could not determine config directory");
        std::process::exit(1);
    };
    let store = FileStore::new(path);
    let label = std::env::args().nth(1);

    let mut buttons: Vec<MemoryButton> = Scheme::all()
        .iter()
        .map(|scheme| MemoryButton::new(scheme.as_str()))
        .collect();
    if let Some(label) = &label {
        if label.parse::<Scheme>().is_err() {
            log::warn!("'{}' is not a known scheme, adding a button for it", label);
            buttons.push(MemoryButton::new(label));
        }
    }
    let page = MemoryPage::new()
        .with_stylesheets()
        .with_meta()
        .with_switcher(buttons);

    let config = SwitcherConfig::default();
    let controller = match SchemeController::initialize(&page, store.clone(), &config) {
        Ok(Some(controller)) => controller,
        Ok(None) => return,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };
    println!("loaded:      {}", controller.current());

    if let Some(button) = label.as_deref().and_then(|l| page.button(l)) {
        button.click();
    }

    println!("preference:  {} ({})", controller.current(), controller.scheme());
    println!(
        "css-light:   {}",
        page.link_media(LIGHT_LINK_ID).unwrap_or_default()
    );
    println!(
        "css-dark:    {}",
        page.link_media(DARK_LINK_ID).unwrap_or_default()
    );
    println!("meta:        {}", page.meta_content().unwrap_or_default());
    for button in page.switcher_buttons() {
        println!(
            "button {:<6} pressed={:?}",
            button.scheme_label().unwrap_or_default(),
            button.pressed()
        );
    }
    println!("storage:     {:?}", store.path());
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
