use std::time::Duration;

use leptos::*;
use platform_host::unix_time_ms_now;

use crate::{
    clock::{local_offset_minutes, ClockZone, WallTime},
    config::{widget_descriptor, CALENDAR_WIDGET_ID, CLOCK_WIDGET_ID, STATUS_WIDGET_ID},
    model::{ClockConfig, DesktopState, ItemSize},
    runtime_context::use_desktop_runtime,
};

fn wall_time_now(clock: &ClockConfig, now_ms: u64) -> WallTime {
    let offset = ClockZone::parse(&clock.timezone).offset_minutes(local_offset_minutes());
    WallTime::at(i64::try_from(now_ms).unwrap_or(i64::MAX), offset)
}

fn status_lines(desktop: &DesktopState) -> (String, String) {
    let shortcuts = desktop.shortcuts.len();
    let widgets = desktop.enabled_widgets.len();
    (
        format!("{shortcuts} shortcut{}", if shortcuts == 1 { "" } else { "s" }),
        format!("{widgets} widget{} enabled", if widgets == 1 { "" } else { "s" }),
    )
}

/// Ticking unix-ms signal, cleared with the owning view.
fn ticking_now(period: Duration) -> ReadSignal<u64> {
    let (now, set_now) = create_signal(unix_time_ms_now());
    if let Ok(interval) = set_interval_with_handle(move || set_now.set(unix_time_ms_now()), period) {
        on_cleanup(move || interval.clear());
    }
    now
}

#[component]
fn ClockWidget(compact: bool) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock = create_memo(move |_| runtime.state.with(|desktop| desktop.clock.clone()));
    let now = ticking_now(Duration::from_secs(1));
    let small = Signal::derive(move || compact && clock.with(|clock| clock.size() == ItemSize::Small));
    let wall = Signal::derive(move || clock.with(|clock| wall_time_now(clock, now.get())));

    view! {
        <div class="bento-widget bento-clock" data-ui-compact=move || if small.get() { "true" } else { "false" }>
            <span class="bento-clock-time">
                {move || clock.with(|clock| wall.get().time_label(clock.use_24_hour))}
            </span>
            <Show when=move || !small.get() fallback=|| ()>
                <span class="bento-clock-label">{move || clock.with(|clock| clock.label.clone())}</span>
                <span class="bento-clock-date">{move || wall.get().date_label()}</span>
            </Show>
        </div>
    }
}

#[component]
fn CalendarWidget() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let now = ticking_now(Duration::from_secs(60));
    let wall = Signal::derive(move || {
        runtime
            .state
            .with(|desktop| wall_time_now(&desktop.clock, now.get()))
    });

    view! {
        <div class="bento-widget bento-calendar">
            <span class="bento-calendar-weekday">{move || wall.get().weekday_name()}</span>
            <span class="bento-calendar-day">{move || wall.get().day}</span>
            <span class="bento-calendar-month">
                {move || {
                    let wall = wall.get();
                    format!("{} {}", wall.month_name(), wall.year)
                }}
            </span>
        </div>
    }
}

#[component]
fn StatusWidget() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let lines = create_memo(move |_| runtime.state.with(status_lines));
    let strategy = runtime.host.get_value().host_strategy_name();

    view! {
        <div class="bento-widget bento-status">
            <span class="bento-status-line">{move || lines.get().0}</span>
            <span class="bento-status-line">{move || lines.get().1}</span>
            <span class="bento-status-host">{strategy}</span>
        </div>
    }
}

#[component]
/// Renders a registry widget, either inside its tile (`compact`) or in the active window.
pub(super) fn WidgetBody(widget_id: String, #[prop(optional)] compact: bool) -> impl IntoView {
    match widget_id.as_str() {
        CLOCK_WIDGET_ID => view! { <ClockWidget compact /> }.into_view(),
        CALENDAR_WIDGET_ID => view! { <CalendarWidget /> }.into_view(),
        STATUS_WIDGET_ID => view! { <StatusWidget /> }.into_view(),
        other => {
            let title = widget_descriptor(other)
                .map(|widget| widget.title)
                .unwrap_or("Widget");
            view! { <div class="bento-widget">{title}</div> }.into_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_zones_ignore_the_browser_offset() {
        let clock = ClockConfig {
            timezone: "UTC+02:00".into(),
            ..ClockConfig::default()
        };
        // 2024-03-01T22:30:00Z
        let wall = wall_time_now(&clock, 1_709_332_200_000);
        assert_eq!((wall.day, wall.hour, wall.minute), (2, 0, 30));
        assert_eq!(wall.time_label(true), "00:30");
    }

    #[test]
    fn status_lines_pluralize() {
        let mut desktop = DesktopState::default();
        desktop.enabled_widgets = vec!["clock".into()];
        assert_eq!(
            status_lines(&desktop),
            ("0 shortcuts".to_string(), "1 widget enabled".to_string())
        );
    }
}
