//! Navigation Component
//!
//! Header bar with brand and the Tracker/Dashboard links.

use leptos::*;
use leptos_router::*;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="w-9 h-9 rounded-lg bg-primary-600 flex items-center justify-center font-bold">
                            "RT"
                        </span>
                        <div class="leading-tight">
                            <div class="text-lg font-bold text-white">"Usage Tracker"</div>
                            <div class="text-xs text-gray-400">"Reels-focused • Manual sessions"</div>
                        </div>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Tracker" exact=true />
                        <NavLink href="/dashboard" label="Dashboard" exact=false />
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
    exact: bool,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=exact
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
