//! Tracker Page
//!
//! Start/end controls, live estimate and the seconds-per-reel setting.

use chrono::{Local, Utc};
use gloo_timers::callback::Interval;
use leptos::*;

use reeltrack::estimate::{format_elapsed, SecondsPerReel};
use reeltrack::client::ClientResult;
use reeltrack::model::{Mood, Session};
use reeltrack::prefs::{load_rate, save_rate};
use reeltrack::tracker::{messages, TrackerState, DEFAULT_CONTENT_URL};

use crate::api::{self, LocalStorageStore};
use crate::components::EndSessionModal;
use crate::state::global::GlobalState;

/// Content site, overridable at build time via `REELTRACK_CONTENT_URL`
fn content_url() -> &'static str {
    option_env!("REELTRACK_CONTENT_URL").unwrap_or(DEFAULT_CONTENT_URL)
}

/// Send the browser to the content site
fn redirect_to_content() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(content_url()) {
            web_sys::console::error_1(&e);
        }
    }
}

/// Adopt a running session from the on-load probe. A failed probe reads as
/// "nothing running" and only reaches the console at debug level.
fn apply_probe(tracker: &mut TrackerState, probed: ClientResult<Option<Session>>) {
    match probed {
        Ok(session) => {
            tracker.adopt(session);
        }
        Err(e) => {
            web_sys::console::debug_1(&format!("Active session probe failed: {}", e).into());
        }
    }
}

/// Tracker page component
#[component]
pub fn Tracker() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let tracker = create_rw_signal(TrackerState::default());
    let rate = create_rw_signal(load_rate(&LocalStorageStore));
    let (busy, set_busy) = create_signal(false);

    // Clock driving the live estimate
    let now = create_rw_signal(Utc::now());
    let ticker = Interval::new(1_000, move || now.set(Utc::now()));
    on_cleanup(move || drop(ticker));

    // Pick up a session left running in an earlier visit
    create_effect(move |_| {
        spawn_local(async move {
            let probed = api::active_session().await;
            tracker.update(|t| apply_probe(t, probed));
        });
    });

    let estimate = create_memo(move |_| tracker.with(|t| t.estimate(now.get(), rate.get())));

    let on_start = move |_| {
        if busy.get_untracked() || !tracker.with_untracked(TrackerState::can_start) {
            return;
        }
        set_busy.set(true);
        state.clear_alerts();

        spawn_local(async move {
            match api::start_session().await {
                Ok(session) => {
                    tracker.update(|t| {
                        t.started(session);
                    });
                    state.show_success(messages::SESSION_STARTED);
                    redirect_to_content();
                }
                Err(e) => state.show_error(&e.user_message(messages::START_FAILED)),
            }
            set_busy.set(false);
        });
    };

    let on_end_click = move |_| {
        tracker.update(|t| {
            t.open_end();
        });
    };

    let on_cancel = move |_: ()| {
        if !busy.get_untracked() {
            tracker.update(|t| {
                t.cancel_end();
            });
        }
    };

    let on_save = move |mood: Option<Mood>| {
        let Some(request) = tracker.with_untracked(|t| t.end_request(Utc::now(), rate.get_untracked(), mood)) else {
            return;
        };
        set_busy.set(true);
        state.clear_alerts();

        spawn_local(async move {
            match api::end_session(&request).await {
                Ok(_) => {
                    tracker.update(|t| {
                        t.ended();
                    });
                    state.show_success(messages::SESSION_SAVED);
                }
                Err(e) => state.show_error(&e.user_message(messages::END_FAILED)),
            }
            set_busy.set(false);
        });
    };

    let on_rate_input = move |ev| {
        let Ok(seconds) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        let next = SecondsPerReel::new(seconds);
        rate.set(next);
        if let Err(e) = save_rate(&mut LocalStorageStore, next) {
            web_sys::console::warn_1(&format!("Could not save rate: {}", e).into());
        }
    };

    view! {
        <div class="space-y-8 max-w-2xl mx-auto">
            // Hero with start/end controls
            <section class="bg-gray-800 rounded-xl p-6 border border-gray-700 space-y-5">
                <div class="inline-block text-xs uppercase tracking-wide text-primary-400">
                    "Manual Tracking"
                </div>
                <h1 class="text-3xl font-bold">"Instagram Reels Session Tracker"</h1>
                <p class="text-gray-400">
                    "Start a session, watch Reels in Instagram, come back and end it. \
                     Reels watched are estimated from session duration."
                </p>

                <div class="flex flex-wrap gap-3">
                    <button
                        on:click=on_start
                        disabled=move || busy.get() || !tracker.with(TrackerState::can_start)
                        class="px-6 py-3 rounded-lg bg-primary-600 hover:bg-primary-700 font-semibold
                               disabled:bg-gray-600 disabled:cursor-not-allowed transition-colors"
                    >
                        {move || if tracker.with(TrackerState::is_idle) {
                            "Start Instagram Session"
                        } else {
                            messages::ALREADY_RUNNING
                        }}
                    </button>
                    <button
                        on:click=on_end_click
                        disabled=move || busy.get() || !tracker.with(TrackerState::can_end)
                        class="px-6 py-3 rounded-lg bg-gray-700 hover:bg-gray-600 font-semibold
                               disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                    >
                        "End Session"
                    </button>
                </div>

                <div class="flex flex-wrap gap-2 text-sm">
                    {move || match tracker.with(|t| t.session().map(|s| s.start_time)) {
                        Some(start) => view! {
                            <span class="px-3 py-1 rounded-full bg-green-900 text-green-300">
                                {format!("Active • Started {}", start.with_timezone(&Local).format("%H:%M"))}
                            </span>
                        }.into_view(),
                        None => view! {
                            <span class="px-3 py-1 rounded-full bg-gray-700 text-gray-300">
                                {messages::NO_ACTIVE_SESSION}
                            </span>
                        }.into_view(),
                    }}
                    {move || estimate.get().map(|e| view! {
                        <span class="px-3 py-1 rounded-full bg-blue-900 text-blue-300">
                            {format!("Est. {} reels so far • {}", e.estimated_reels, format_elapsed(e.duration_seconds))}
                        </span>
                    })}
                </div>
            </section>

            // Estimation setting
            <section class="bg-gray-800 rounded-xl p-6 border border-gray-700 space-y-3">
                <h2 class="text-lg font-semibold">"Estimation setting"</h2>
                <p class="text-gray-400 text-sm">
                    "Reels watched are estimated as duration ÷ average seconds per reel."
                </p>
                <div class="flex items-center justify-between">
                    <label for="avg-seconds" class="text-sm">"Avg seconds per reel"</label>
                    <span class="font-semibold">{move || rate.get().to_string()}</span>
                </div>
                <input
                    id="avg-seconds"
                    type="range"
                    min=SecondsPerReel::MIN
                    max=SecondsPerReel::MAX
                    prop:value=move || rate.get().get().to_string()
                    on:input=on_rate_input
                    class="w-full"
                />
                <p class="text-gray-500 text-xs">"Tip: set this once to match your scrolling speed."</p>
            </section>

            {move || tracker.with(TrackerState::is_ending).then(|| view! {
                <EndSessionModal
                    summary=Signal::derive(move || {
                        estimate.get().map(|e| e.summary()).unwrap_or_default()
                    })
                    saving=busy
                    on_cancel=on_cancel
                    on_save=on_save
                />
            })}
        </div>
    }
}
