use leptos::{create_effect, Callable, Callback};

use crate::{host::DesktopHostContext, model::ItemId, reducer::DesktopAction};

pub(super) fn install_boot_hydration(
    host: DesktopHostContext,
    dispatch: Callback<DesktopAction>,
    deep_link: Option<ItemId>,
) {
    create_effect(move |_| {
        dispatch.call(DesktopAction::Hydrate {
            config: host.load_config(),
        });
        if let Some(item_id) = deep_link.clone() {
            dispatch.call(DesktopAction::OpenItem { item_id });
        }
    });
}
