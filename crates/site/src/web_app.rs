use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

const OPEN_QUERY_KEY: &str = "open";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Bento Desk" />
        <Meta name="description" content="A bento-grid desktop for web shortcuts and widgets." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/open/:item" view=OpenItemRoute />
                </Routes>
            </main>
        </Router>
    }
}

/// Desktop at `/`, opening the item named by `?open=<item id>` once storage is loaded.
#[component]
pub fn DesktopEntry() -> impl IntoView {
    let query = use_query_map();
    let deep_link = query.with_untracked(|map| map.get(OPEN_QUERY_KEY).cloned());

    view! {
        <DesktopProvider deep_link=deep_link>
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Path form of the deep link: `/open/<item id>`.
#[component]
fn OpenItemRoute() -> impl IntoView {
    let params = use_params_map();
    let deep_link = params.with_untracked(|map| map.get("item").cloned());

    view! {
        <DesktopProvider deep_link=deep_link>
            <DesktopShell />
        </DesktopProvider>
    }
}
