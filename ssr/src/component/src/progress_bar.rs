use leptos::prelude::*;

/// Fills over `duration` seconds of playback. The animation is paused
/// whenever `playing` is false, so it follows watched time rather than
/// wall-clock time.
#[component]
pub fn ProgressBar(duration: u32, #[prop(into)] playing: Signal<bool>) -> impl IntoView {
    view! {
        <div class="overflow-hidden w-full h-1.5 rounded-full bg-white/20">
            <div
                class="w-0 h-full rounded-full watch-progress bg-primary-600"
                style:animation-duration=format!("{duration}s")
                style:animation-play-state=move || if playing.get() { "running" } else { "paused" }
            ></div>
        </div>
    }
}
