//! Settings window: widget toggles, clock options, the shortcut editor, and backups.

use leptos::*;
use platform_host::unix_time_ms_now;
use system_ui::{
    Button, ButtonVariant, FieldGroup, IconName, SelectField, Switch, TextArea, TextField,
};

use crate::{
    backup::export_backup,
    config::widget_registry,
    model::{ClockConfig, ItemSize, ShortcutRecord, WidgetStyle},
    reducer::{DesktopAction, ReducerError},
    runtime_context::{use_desktop_runtime, DesktopRuntimeContext},
    shortcuts::{ShortcutDraft, ShortcutValidationError},
};

const BACKUP_FILE_NAME: &str = "bentodesk-backup.json";

const CLOCK_ZONES: [(&str, &str); 9] = [
    ("local", "Local time"),
    ("UTC", "UTC"),
    ("UTC-08:00", "UTC-08:00 (Pacific)"),
    ("UTC-05:00", "UTC-05:00 (Eastern)"),
    ("UTC+01:00", "UTC+01:00 (Central Europe)"),
    ("UTC+03:00", "UTC+03:00"),
    ("UTC+05:30", "UTC+05:30 (India)"),
    ("UTC+08:00", "UTC+08:00"),
    ("UTC+09:00", "UTC+09:00 (Japan)"),
];

const CLOCK_SIZES: [ItemSize; 4] = [
    ItemSize::Small,
    ItemSize::Wide,
    ItemSize::Tall,
    ItemSize::Large,
];

const SHORTCUT_STYLES: [WidgetStyle; 4] = [
    WidgetStyle::Standard,
    WidgetStyle::Vertical,
    WidgetStyle::Horizontal,
    WidgetStyle::Status,
];

/// Timezone choices, keeping a stored value that is not in the preset list selectable.
fn timezone_options(current: &str) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = CLOCK_ZONES
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();
    if !current.is_empty() && !options.iter().any(|(value, _)| value == current) {
        options.push((current.to_string(), current.to_string()));
    }
    options
}

fn size_options(include_style_default: bool) -> Vec<(String, String)> {
    let mut options = Vec::new();
    if include_style_default {
        options.push((String::new(), "Style default".to_string()));
    }
    options.extend(
        CLOCK_SIZES
            .iter()
            .map(|size| (size.token().to_string(), size.token().to_string())),
    );
    options
}

fn style_options() -> Vec<(String, String)> {
    SHORTCUT_STYLES
        .iter()
        .map(|style| (style.token().to_string(), style.token().to_string()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormErrors {
    name: Option<String>,
    url: Option<String>,
    form: Option<String>,
}

impl FormErrors {
    fn from_error(err: &ReducerError) -> Self {
        match err {
            ReducerError::InvalidShortcut(ShortcutValidationError::MissingName) => Self {
                name: Some(err.to_string()),
                ..Self::default()
            },
            ReducerError::InvalidShortcut(
                ShortcutValidationError::MissingUrl | ShortcutValidationError::InvalidUrl(_),
            ) => Self {
                url: Some(err.to_string()),
                ..Self::default()
            },
            other => Self {
                form: Some(other.to_string()),
                ..Self::default()
            },
        }
    }
}

fn update_clock(runtime: DesktopRuntimeContext, edit: impl FnOnce(&mut ClockConfig)) {
    let mut clock = runtime.state.with_untracked(|desktop| desktop.clock.clone());
    edit(&mut clock);
    runtime.dispatch_action(DesktopAction::SetClockConfig { clock });
}

#[component]
fn WidgetSettings() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <section class="settings-section" aria-label="Widgets">
            <h3>"Widgets"</h3>
            {widget_registry()
                .iter()
                .map(|widget| {
                    let widget_id = widget.id;
                    let checked = Signal::derive(move || {
                        runtime
                            .state
                            .with(|desktop| desktop.enabled_widgets.iter().any(|id| id == widget_id))
                    });
                    let on_toggle = Callback::new(move |enabled| {
                        runtime.dispatch_action(DesktopAction::SetWidgetEnabled {
                            widget_id: widget_id.to_string(),
                            enabled,
                        })
                    });
                    view! { <Switch label=widget.title checked on_toggle /> }
                })
                .collect_view()}
        </section>
    }
}

#[component]
fn ClockSettings() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock = create_memo(move |_| runtime.state.with(|desktop| desktop.clock.clone()));

    view! {
        <section class="settings-section" aria-label="Clock">
            <h3>"Clock"</h3>
            <FieldGroup label="Label">
                <TextField
                    value=Signal::derive(move || clock.with(|clock| clock.label.clone()))
                    on_input=Callback::new(move |ev: web_sys::Event| {
                        let label = event_target_value(&ev);
                        update_clock(runtime, |clock| clock.label = label);
                    })
                />
            </FieldGroup>
            <FieldGroup label="Timezone">
                {move || {
                    let current = clock.with(|clock| clock.timezone.clone());
                    view! {
                        <SelectField
                            options=timezone_options(&current)
                            value=current
                            on_change=Callback::new(move |ev: web_sys::Event| {
                                let timezone = event_target_value(&ev);
                                update_clock(runtime, |clock| clock.timezone = timezone);
                            })
                        />
                    }
                }}
            </FieldGroup>
            <FieldGroup label="Size">
                <SelectField
                    options=size_options(false)
                    value=Signal::derive(move || clock.with(|clock| clock.size().token().to_string()))
                    on_change=Callback::new(move |ev: web_sys::Event| {
                        let grid_size = event_target_value(&ev);
                        update_clock(runtime, |clock| clock.grid_size = grid_size);
                    })
                />
            </FieldGroup>
            <Switch
                label="24-hour time"
                checked=Signal::derive(move || clock.with(|clock| clock.use_24_hour))
                on_toggle=Callback::new(move |use_24_hour| {
                    update_clock(runtime, |clock| clock.use_24_hour = use_24_hour);
                })
            />
        </section>
    }
}

#[component]
fn ShortcutSettings() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let shortcuts = create_memo(move |_| runtime.state.with(|desktop| desktop.shortcuts.clone()));
    let editing = create_rw_signal(None::<String>);
    let draft = create_rw_signal(ShortcutDraft::default());
    let errors = create_rw_signal(FormErrors::default());

    let reset_form = move || {
        editing.set(None);
        draft.set(ShortcutDraft::default());
        errors.set(FormErrors::default());
    };

    let edit_field = move |edit: fn(&mut ShortcutDraft, String)| {
        Callback::new(move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            draft.update(|draft| edit(draft, value));
        })
    };

    let save = Callback::new(move |_| {
        let action = match editing.get_untracked() {
            Some(id) => DesktopAction::UpdateShortcut {
                id,
                draft: draft.get_untracked(),
            },
            None => DesktopAction::AddShortcut {
                draft: draft.get_untracked(),
            },
        };
        match runtime.try_dispatch(action) {
            Ok(()) => reset_form(),
            Err(err) => errors.set(FormErrors::from_error(&err)),
        }
    });

    let render_row = move |record: ShortcutRecord| {
        let edit_record = record.clone();
        let delete_id = record.id.clone();
        view! {
            <li class="settings-shortcut" data-ui-kind="shortcut-row">
                <span class="settings-shortcut-name">{record.name.clone()}</span>
                <span class="settings-shortcut-url">{record.url.clone()}</span>
                <Button
                    variant=ButtonVariant::Quiet
                    aria_label=format!("Edit {}", record.name)
                    leading_icon=IconName::Edit
                    on_click=Callback::new(move |_| {
                        editing.set(Some(edit_record.id.clone()));
                        draft.set(ShortcutDraft::from_record(&edit_record));
                        errors.set(FormErrors::default());
                    })
                >
                    "Edit"
                </Button>
                <Button
                    variant=ButtonVariant::Danger
                    aria_label=format!("Delete {}", record.name)
                    leading_icon=IconName::Trash
                    on_click=Callback::new(move |_| {
                        if editing.get_untracked().as_deref() == Some(delete_id.as_str()) {
                            reset_form();
                        }
                        runtime.dispatch_action(DesktopAction::DeleteShortcut {
                            id: delete_id.clone(),
                        });
                    })
                >
                    "Delete"
                </Button>
            </li>
        }
    };

    view! {
        <section class="settings-section" aria-label="Shortcuts">
            <h3>"Shortcuts"</h3>
            <ul class="settings-shortcut-list">
                {move || shortcuts.get().into_iter().map(render_row).collect_view()}
            </ul>
            <form class="settings-shortcut-form" on:submit=move |ev| {
                ev.prevent_default();
                save.call(());
            }>
                <h4>
                    {move || if editing.with(Option::is_some) { "Edit shortcut" } else { "Add shortcut" }}
                </h4>
                <FieldGroup label="Name" error=Signal::derive(move || errors.with(|e| e.name.clone()))>
                    <TextField
                        value=Signal::derive(move || draft.with(|d| d.name.clone()))
                        on_input=edit_field(|d, v| d.name = v)
                    />
                </FieldGroup>
                <FieldGroup label="URL" error=Signal::derive(move || errors.with(|e| e.url.clone()))>
                    <TextField
                        input_type="url"
                        placeholder="example.com"
                        value=Signal::derive(move || draft.with(|d| d.url.clone()))
                        on_input=edit_field(|d, v| d.url = v)
                    />
                </FieldGroup>
                <FieldGroup label="Description">
                    <TextField
                        value=Signal::derive(move || draft.with(|d| d.description.clone()))
                        on_input=edit_field(|d, v| d.description = v)
                    />
                </FieldGroup>
                <FieldGroup label="Color">
                    <TextField
                        input_type="color"
                        value=Signal::derive(move || draft.with(|d| d.color.clone()))
                        on_input=edit_field(|d, v| d.color = v)
                    />
                </FieldGroup>
                <FieldGroup label="Icon name">
                    <TextField
                        placeholder="globe"
                        value=Signal::derive(move || draft.with(|d| d.icon_name.clone()))
                        on_input=edit_field(|d, v| d.icon_name = v)
                    />
                </FieldGroup>
                <FieldGroup label="Icon URL">
                    <TextField
                        input_type="url"
                        value=Signal::derive(move || draft.with(|d| d.icon_url.clone()))
                        on_input=edit_field(|d, v| d.icon_url = v)
                    />
                </FieldGroup>
                <FieldGroup label="Style">
                    <SelectField
                        options=style_options()
                        value=Signal::derive(move || draft.with(|d| d.widget_style.token().to_string()))
                        on_change=edit_field(|d, v| d.widget_style = WidgetStyle::from_token(&v))
                    />
                </FieldGroup>
                <FieldGroup label="Size">
                    <SelectField
                        options=size_options(true)
                        value=Signal::derive(move || {
                            draft.with(|d| d.grid_size.map(|size| size.token().to_string()).unwrap_or_default())
                        })
                        on_change=edit_field(|d, v| d.grid_size = ItemSize::from_token(&v))
                    />
                </FieldGroup>
                <FieldGroup label="" error=Signal::derive(move || errors.with(|e| e.form.clone()))>
                    <div class="settings-form-actions">
                        <Button variant=ButtonVariant::Primary leading_icon=IconName::Plus on_click=Callback::new(move |_| save.call(()))>
                            {move || if editing.with(Option::is_some) { "Save" } else { "Add" }}
                        </Button>
                        <Button variant=ButtonVariant::Quiet on_click=Callback::new(move |_| reset_form())>
                            "Clear"
                        </Button>
                    </div>
                </FieldGroup>
            </form>
        </section>
    }
}

/// Reads the first selected file of an `<input type="file">` as text.
#[cfg(target_arch = "wasm32")]
fn read_selected_file(ev: &web_sys::Event, on_text: Callback<String>) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return;
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };
    let reader = match web_sys::FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            logging::warn!("backup file reader unavailable: {err:?}");
            return;
        }
    };
    let loaded = reader.clone();
    let onload = Closure::once(move |_: web_sys::ProgressEvent| {
        let text = loaded
            .result()
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        on_text.call(text);
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    if let Err(err) = reader.read_as_text(&file) {
        logging::warn!("backup file read failed: {err:?}");
    }
    input.set_value("");
}

#[cfg(not(target_arch = "wasm32"))]
fn read_selected_file(_ev: &web_sys::Event, _on_text: Callback<String>) {}

fn download_href(json: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        format!(
            "data:application/json;charset=utf-8,{}",
            String::from(js_sys::encode_uri_component(json))
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = json;
        String::new()
    }
}

#[component]
fn BackupSettings() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let exported = create_rw_signal(String::new());
    let pasted = create_rw_signal(String::new());

    let export = Callback::new(move |_| {
        let json = runtime.state.with_untracked(|desktop| {
            export_backup(
                &desktop.shortcuts,
                &desktop.enabled_widgets,
                desktop.layout.order(),
                unix_time_ms_now(),
            )
        });
        match json {
            Ok(json) => exported.set(json),
            Err(err) => logging::warn!("backup export failed: {err}"),
        }
    });
    let import = Callback::new(move |raw: String| {
        runtime.dispatch_action(DesktopAction::ImportBackup { raw });
    });

    view! {
        <section class="settings-section" aria-label="Backup">
            <h3>"Backup"</h3>
            <div class="settings-form-actions">
                <Button leading_icon=IconName::Download on_click=export>
                    "Export"
                </Button>
                <Show when=move || exported.with(|json| !json.is_empty()) fallback=|| ()>
                    <a
                        class="ui-button"
                        data-ui-variant="primary"
                        href=move || exported.with(|json| download_href(json))
                        download=BACKUP_FILE_NAME
                    >
                        "Download"
                    </a>
                </Show>
            </div>
            <Show when=move || exported.with(|json| !json.is_empty()) fallback=|| ()>
                <TextArea readonly=true rows=8 aria_label="Exported backup" value=Signal::from(exported) />
            </Show>
            <FieldGroup label="Restore from file">
                <input
                    type="file"
                    accept="application/json,.json"
                    on:change=move |ev| read_selected_file(&ev, import)
                />
            </FieldGroup>
            <FieldGroup label="Or paste a backup">
                <TextArea
                    rows=6
                    placeholder="{\"apps\": [...]}"
                    value=Signal::from(pasted)
                    on_input=Callback::new(move |ev: web_sys::Event| pasted.set(event_target_value(&ev)))
                />
            </FieldGroup>
            <Button
                variant=ButtonVariant::Primary
                leading_icon=IconName::Upload
                on_click=Callback::new(move |_| import.call(pasted.get_untracked()))
            >
                "Restore"
            </Button>
        </section>
    }
}

#[component]
/// Internal settings view shown in the active window.
pub(super) fn SettingsView() -> impl IntoView {
    view! {
        <div class="settings-view">
            <WidgetSettings />
            <ClockSettings />
            <ShortcutSettings />
            <BackupSettings />
        </div>
    }
}
