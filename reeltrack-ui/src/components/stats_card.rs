//! Stats Card Component
//!
//! One headline figure on the dashboard.

use leptos::*;

/// Stats card component
#[component]
pub fn StatsCard(
    /// Caption above the value
    #[prop(into)]
    label: String,
    /// Figure to display
    #[prop(into)]
    value: Signal<String>,
    /// Optional line under the value
    #[prop(optional, into)]
    subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="text-gray-400 text-sm">{label}</div>

            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>

            {subtitle.map(|s| view! {
                <div class="text-sm text-gray-500 mt-2">{s}</div>
            })}
        </div>
    }
}
