//! Theme management.
//!
//! Two independent axes, both persisted in localStorage: a light/dark/system
//! mode and a color preset. The mode resolves against the OS preference via
//! `matchMedia` when set to `System`; the preset is written onto the document
//! root as CSS custom properties so stylesheets stay theme-agnostic.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::window;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }

    pub fn all() -> [ThemeMode; 3] {
        [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }
}

/// A named color palette applied as CSS custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub key: &'static str,
    pub label: &'static str,
    /// `(--variable-name, value)` pairs written onto `:root`.
    pub variables: &'static [(&'static str, &'static str)],
}

pub const PRESETS: &[ThemePreset] = &[
    ThemePreset {
        key: "clinical",
        label: "Clinical Blue",
        variables: &[
            ("--color-primary", "#1565c0"),
            ("--color-primary-soft", "#e3f0fc"),
            ("--color-accent", "#00897b"),
        ],
    },
    ThemePreset {
        key: "verdant",
        label: "Verdant",
        variables: &[
            ("--color-primary", "#2e7d32"),
            ("--color-primary-soft", "#e8f5e9"),
            ("--color-accent", "#558b2f"),
        ],
    },
    ThemePreset {
        key: "plum",
        label: "Plum",
        variables: &[
            ("--color-primary", "#6a1b9a"),
            ("--color-primary-soft", "#f3e5f5"),
            ("--color-accent", "#ad1457"),
        ],
    },
];

const MODE_STORAGE_KEY: &str = "theme-mode";
const PRESET_STORAGE_KEY: &str = "theme-preset";

fn storage_get(key: &str) -> Option<String> {
    window()?.local_storage().ok()??.get_item(key).ok()?
}

fn storage_set(key: &str, value: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

fn preset_by_key(key: &str) -> ThemePreset {
    PRESETS
        .iter()
        .copied()
        .find(|p| p.key == key)
        .unwrap_or(PRESETS[0])
}

/// OS-level dark preference.
fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn resolved_dark(mode: ThemeMode) -> bool {
    match mode {
        ThemeMode::Dark => true,
        ThemeMode::Light => false,
        ThemeMode::System => system_prefers_dark(),
    }
}

/// Writes the current mode and preset onto the document root.
fn apply(mode: ThemeMode, preset: ThemePreset) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(root) = document.document_element() else {
        return;
    };
    let class_list = root.class_list();
    if resolved_dark(mode) {
        let _ = class_list.add_1("dark");
    } else {
        let _ = class_list.remove_1("dark");
    }
    let _ = root.set_attribute("data-theme", preset.key);
    if let Some(html) = root.dyn_ref::<web_sys::HtmlElement>() {
        let style = html.style();
        for (name, value) in preset.variables {
            let _ = style.set_property(name, value);
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: RwSignal<ThemeMode>,
    pub preset: RwSignal<ThemePreset>,
}

impl ThemeContext {
    pub fn set_mode(&self, mode: ThemeMode) {
        self.mode.set(mode);
        storage_set(MODE_STORAGE_KEY, mode.as_str());
        apply(mode, self.preset.get_untracked());
    }

    pub fn set_preset(&self, preset: ThemePreset) {
        self.preset.set(preset);
        storage_set(PRESET_STORAGE_KEY, preset.key);
        apply(self.mode.get_untracked(), preset);
    }

    pub fn is_dark(&self) -> bool {
        resolved_dark(self.mode.get())
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial_mode = storage_get(MODE_STORAGE_KEY)
        .map(|s| ThemeMode::from_str(&s))
        .unwrap_or_default();
    let initial_preset = storage_get(PRESET_STORAGE_KEY)
        .map(|s| preset_by_key(&s))
        .unwrap_or(PRESETS[0]);

    apply(initial_mode, initial_preset);

    let context = ThemeContext {
        mode: RwSignal::new(initial_mode),
        preset: RwSignal::new(initial_preset),
    };
    provide_context(context);

    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
        .expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Mode and preset pickers for the header.
#[component]
pub fn ThemeControls() -> impl IntoView {
    let ctx = use_theme();
    view! {
        <div class="theme-controls">
            <select
                class="theme-select"
                on:change=move |ev| {
                    ctx.set_mode(ThemeMode::from_str(&event_target_value(&ev)));
                }
            >
                {ThemeMode::all()
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <option
                                value=mode.as_str()
                                selected=move || ctx.mode.get() == mode
                            >
                                {mode.as_str()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                class="theme-select"
                on:change=move |ev| {
                    ctx.set_preset(preset_by_key(&event_target_value(&ev)));
                }
            >
                {PRESETS
                    .iter()
                    .map(|preset| {
                        let preset = *preset;
                        view! {
                            <option
                                value=preset.key
                                selected=move || ctx.preset.get() == preset
                            >
                                {preset.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_storage_strings() {
        for mode in ThemeMode::all() {
            assert_eq!(ThemeMode::from_str(mode.as_str()), mode);
        }
        assert_eq!(ThemeMode::from_str("garbage"), ThemeMode::System);
    }

    #[test]
    fn unknown_preset_falls_back_to_first() {
        assert_eq!(preset_by_key("clinical").key, "clinical");
        assert_eq!(preset_by_key("nope").key, PRESETS[0].key);
    }
}
