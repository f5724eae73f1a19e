//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod grid;
mod settings;
mod tiles;
mod widgets;
mod window;

use leptos::*;
use system_ui::{DesktopBackdrop, DesktopRoot};

use self::{dock::DesktopDock, grid::BentoGrid, window::ActiveWindowLayer};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Full desktop surface: the bento grid, the single active window, and the floating dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let booted = Signal::derive(move || runtime.state.with(|desktop| desktop.booted));

    view! {
        <DesktopRoot id="bentodesk">
            <DesktopBackdrop>
                <Show when=move || booted.get() fallback=|| ()>
                    <BentoGrid />
                </Show>
            </DesktopBackdrop>
            <ActiveWindowLayer />
            <DesktopDock />
        </DesktopRoot>
    }
}
