use leptos::*;
use leptos_meta::*;
use poster_host_web::build_host_services;
use poster_runtime::{AppContainer, ShellConfig, ShellProvider, ShellVariant};

/// Reads `?variant=` and `min-loading-ms=` from the page URL.
fn shell_config_from_location() -> ShellConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    ShellConfig::from_query(&search)
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let config = shell_config_from_location();
    let title = match config.variant {
        ShellVariant::Classic => "One Piece Wanted Poster",
        ShellVariant::Criminal => "One Piece Wanted Poster | Criminal",
    };

    view! {
        <Title text=title />
        <Meta name="description" content="Make your own One Piece wanted poster." />

        <main class="site-root">
            <PosterEntry config />
        </main>
    }
}

#[component]
pub fn PosterEntry(config: ShellConfig) -> impl IntoView {
    view! {
        <ShellProvider config host_services=build_host_services()>
            <AppContainer />
        </ShellProvider>
    }
}
