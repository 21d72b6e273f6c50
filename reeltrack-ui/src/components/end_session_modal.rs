//! End Session Modal
//!
//! Mood picker plus the final estimate, shown before a session is saved.

use leptos::*;

use reeltrack::model::Mood;

use crate::components::loading::InlineLoading;

/// Modal asking for an optional mood before ending the session
#[component]
pub fn EndSessionModal(
    /// Estimate line, e.g. "12 reels (estimated) • 2 min"
    #[prop(into)]
    summary: Signal<String>,
    /// Disables both buttons while the end request is in flight
    #[prop(into)]
    saving: Signal<bool>,
    #[prop(into)]
    on_cancel: Callback<()>,
    #[prop(into)]
    on_save: Callback<Option<Mood>>,
) -> impl IntoView {
    let (mood, set_mood) = create_signal::<Option<Mood>>(None);

    view! {
        <div
            class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center px-4"
            on:click=move |_| dismiss(saving.get_untracked(), on_cancel)
        >
            <div
                role="dialog"
                aria-modal="true"
                on:click=|ev| ev.stop_propagation()
                class="bg-gray-800 border border-gray-700 rounded-lg p-6 w-full max-w-md space-y-5"
            >
                <h2 class="text-xl font-semibold">"End session"</h2>

                <p class="text-gray-300">{move || summary.get()}</p>

                <MoodSelector mood=mood set_mood=set_mood />

                <div class="flex justify-end space-x-3">
                    <button
                        type="button"
                        disabled=move || saving.get()
                        on:click=move |_| on_cancel.call(())
                        class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600
                               disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        disabled=move || saving.get()
                        on:click=move |_| on_save.call(mood.get())
                        class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 font-semibold
                               disabled:bg-gray-600 disabled:cursor-not-allowed transition-colors
                               flex items-center space-x-2"
                    >
                        {move || saving.get().then(|| view! { <InlineLoading /> })}
                        <span>"Save session"</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn MoodSelector(
    mood: ReadSignal<Option<Mood>>,
    set_mood: WriteSignal<Option<Mood>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2" for="mood">
                "How do you feel? (optional)"
            </label>
            <select
                id="mood"
                class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                on:change=move |ev| set_mood.set(parse_mood_choice(&event_target_value(&ev)))
            >
                <option value="" selected=move || mood.get().is_none()>"Skip"</option>
                {Mood::all()
                    .iter()
                    .map(|m| {
                        let m = *m;
                        view! {
                            <option value=m.as_str() selected=move || mood.get() == Some(m)>
                                {m.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Backdrop click closes the dialog unless a save is in flight
fn dismiss(saving: bool, on_cancel: Callback<()>) {
    if !saving {
        on_cancel.call(());
    }
}

/// Empty selection means no mood
fn parse_mood_choice(value: &str) -> Option<Mood> {
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}
