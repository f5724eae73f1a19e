use super::*;

#[component]
/// Shared button primitive with standardized states and an optional leading icon.
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] leading_icon: Option<IconName>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=merge_layout_class("ui-button", layout_class)
            aria-label=aria_label
            title=title
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-variant=variant.token()
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {leading_icon.map(|icon| view! { <Icon icon size=IconSize::Sm /> })}
            {children()}
        </button>
    }
}

#[component]
/// Labelled field wrapper with an inline validation message slot.
pub fn FieldGroup(
    #[prop(into)] label: String,
    #[prop(optional, into)] error: MaybeSignal<Option<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <label class="ui-field-group" data-ui-primitive="true" data-ui-kind="field-group">
            <span class="ui-field-label">{label}</span>
            {children()}
            <Show when={
                let error = error.clone();
                move || error.with(Option::is_some)
            }>
                <span class="ui-field-error" role="alert" data-ui-kind="field-error">
                    {let error = error.clone(); move || error.get().unwrap_or_default()}
                </span>
            </Show>
        </label>
    }
}

#[component]
/// Single-line text input.
pub fn TextField(
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional)] on_input: Option<Callback<web_sys::Event>>,
) -> impl IntoView {
    view! {
        <input
            class="ui-field"
            placeholder=placeholder
            aria-label=aria_label
            type=input_type.unwrap_or("text")
            prop:value=move || value.get()
            data-ui-primitive="true"
            data-ui-kind="text-field"
            on:input=move |ev| {
                if let Some(on_input) = on_input.as_ref() {
                    on_input.call(ev);
                }
            }
        />
    }
}

#[component]
/// Multi-line text input.
pub fn TextArea(
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(default = 6)] rows: u32,
    #[prop(optional)] readonly: bool,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional)] on_input: Option<Callback<web_sys::Event>>,
) -> impl IntoView {
    view! {
        <textarea
            class="ui-field ui-textarea"
            placeholder=placeholder
            aria-label=aria_label
            rows=rows
            readonly=readonly
            prop:value=move || value.get()
            data-ui-primitive="true"
            data-ui-kind="text-area"
            on:input=move |ev| {
                if let Some(on_input) = on_input.as_ref() {
                    on_input.call(ev);
                }
            }
        ></textarea>
    }
}

#[component]
/// Native select over `(value, label)` pairs.
pub fn SelectField(
    options: Vec<(String, String)>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional)] on_change: Option<Callback<web_sys::Event>>,
) -> impl IntoView {
    view! {
        <select
            class="ui-field ui-select"
            aria-label=aria_label
            prop:value={
                let value = value.clone();
                move || value.get()
            }
            data-ui-primitive="true"
            data-ui-kind="select-field"
            on:change=move |ev| {
                if let Some(on_change) = on_change.as_ref() {
                    on_change.call(ev);
                }
            }
        >
            {options
                .into_iter()
                .map(|(option_value, label)| {
                    let selected_value = option_value.clone();
                    let value = value.clone();
                    view! {
                        <option
                            value=option_value
                            selected=move || value.get() == selected_value
                        >
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

#[component]
/// On/off switch.
pub fn Switch(
    #[prop(into)] label: String,
    #[prop(into)] checked: MaybeSignal<bool>,
    on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="ui-switch"
            role="switch"
            aria-label=label.clone()
            aria-checked=move || bool_token(checked.get())
            data-ui-primitive="true"
            data-ui-kind="switch"
            data-ui-selected=move || bool_token(checked.get())
            on:click=move |_| on_toggle.call(!checked.get_untracked())
        >
            <span class="ui-switch-track" aria-hidden="true"></span>
            <span class="ui-switch-label">{label}</span>
        </button>
    }
}
