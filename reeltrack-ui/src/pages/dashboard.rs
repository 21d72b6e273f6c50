//! Dashboard Page
//!
//! Headline stats, streaks, daily charts and recent weeks/months.

use leptos::*;

use reeltrack::client::ClientResult;
use reeltrack::stats::{
    format_days, month_label, recent, totals_label, week_label, DashboardData, DashboardStats,
};

use crate::api;
use crate::components::{CardSkeleton, DailyChart, DailySeries, Loading, StatsCard};
use crate::state::global::GlobalState;

/// Fetch the four summary collections concurrently
async fn load_dashboard() -> ClientResult<DashboardData> {
    let (daily, weekly, monthly, streaks) = futures_util::join!(
        api::daily_summaries(),
        api::weekly_summaries(),
        api::monthly_summaries(),
        api::streaks(),
    );

    Ok(DashboardData {
        daily: daily?,
        weekly: weekly?,
        monthly: monthly?,
        streaks: streaks?,
    })
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let data = create_rw_signal(DashboardData::default());
    let (loading, set_loading) = create_signal(true);

    // Fetch once on mount
    create_effect(move |_| {
        spawn_local(async move {
            state.loading.set(true);

            match load_dashboard().await {
                Ok(loaded) => data.set(loaded),
                Err(e) => {
                    // Leave the dashboard empty; the failure only goes to the console
                    web_sys::console::error_1(&format!("Failed to load dashboard: {}", e).into());
                }
            }

            set_loading.set(false);
            state.loading.set(false);
        });
    });

    let stats = create_memo(move |_| DashboardStats::derive(&data.get()));
    let daily = Signal::derive(move || data.get().daily);

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Your Reels usage at a glance"</p>
            </div>

            {move || loading.get().then(|| view! {
                <Loading message="Loading your stats..." />
            })}

            // Headline figures
            <section>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {move || {
                        if loading.get() {
                            (0..4).map(|_| view! { <CardSkeleton /> }).collect_view()
                        } else {
                            view! {
                                <StatsCard
                                    label="Reels today"
                                    value=Signal::derive(move || stats.get().today_reels.to_string())
                                    subtitle=if stats.get_untracked().tracked_today {
                                        "Tracked today".to_string()
                                    } else {
                                        "No sessions yet today".to_string()
                                    }
                                />
                                <StatsCard
                                    label="Daily average (this week)"
                                    value=Signal::derive(move || stats.get().weekly_average_reels.to_string())
                                    subtitle="Reels per day"
                                />
                                <StatsCard
                                    label="Longest day"
                                    value=Signal::derive(move || format!("{} min", stats.get().longest_daily_minutes))
                                />
                                <StatsCard
                                    label="Reels per session"
                                    value=Signal::derive(move || stats.get().reels_per_session)
                                />
                            }.into_view()
                        }
                    }}
                </div>
            </section>

            <StreaksCard stats=stats />

            // Daily charts
            <div class="grid md:grid-cols-2 gap-8">
                <DailyChart title="Reels per day" series=DailySeries::Reels daily=daily />
                <DailyChart title="Minutes per day" series=DailySeries::Minutes daily=daily />
            </div>

            // Recent weeks and months
            <div class="grid md:grid-cols-2 gap-8">
                <PeriodList
                    title="Recent weeks"
                    empty="No weekly data yet."
                    rows=Signal::derive(move || {
                        recent(&data.get().weekly)
                            .iter()
                            .map(|w| (week_label(w), totals_label(w.total_reels, w.total_minutes)))
                            .collect::<Vec<_>>()
                    })
                />
                <PeriodList
                    title="Recent months"
                    empty="No monthly data yet."
                    rows=Signal::derive(move || {
                        recent(&data.get().monthly)
                            .iter()
                            .map(|m| (month_label(m), totals_label(m.total_reels, m.total_minutes)))
                            .collect::<Vec<_>>()
                    })
                />
            </div>
        </div>
    }
}

/// Current and longest streak
#[component]
fn StreaksCard(stats: Memo<DashboardStats>) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <h2 class="text-xl font-semibold mb-4">"Streaks"</h2>
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <div class="text-gray-400 text-sm">"Current streak"</div>
                    <div class="text-2xl font-bold mt-1">
                        {move || format_days(stats.get().current_streak)}
                    </div>
                </div>
                <div>
                    <div class="text-gray-400 text-sm">"Longest streak"</div>
                    <div class="text-2xl font-bold mt-1">
                        {move || format_days(stats.get().longest_streak)}
                    </div>
                </div>
            </div>
        </section>
    }
}

/// Labelled totals for recent periods
#[component]
fn PeriodList(
    title: &'static str,
    empty: &'static str,
    #[prop(into)]
    rows: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <h2 class="text-xl font-semibold mb-4">{title}</h2>
            <div class="space-y-2">
                {move || {
                    let rows = rows.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">{empty}</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|(label, totals)| view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <span>{label}</span>
                                <span class="text-gray-300 text-sm">{totals}</span>
                            </div>
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}
