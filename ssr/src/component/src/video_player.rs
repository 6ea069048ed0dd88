use leptos::html;
use leptos::prelude::*;
use leptos_meta::Style;
use state::player_options::{PlayerOptions, PlayerVariant};
use state::watch_session::WatchSession;
use utils::types::VideoDetails;

use crate::init_error::InitErrorView;
use crate::loading::Loading;
use crate::next_button::NextButton;
use crate::progress_bar::ProgressBar;

const PLAYER_CSS: &str = r#"
@keyframes watch-progress { from { width: 0%; } to { width: 100%; } }
.watch-progress { animation-name: watch-progress; animation-timing-function: linear; animation-fill-mode: forwards; }
@keyframes watch-shake {
    0% { transform: rotate(0); }
    25% { transform: rotate(-3deg); }
    50% { transform: rotate(3deg); }
    75% { transform: rotate(-3deg); }
    100% { transform: rotate(0); }
}
.watch-shake { animation: watch-shake 0.5s 4; }
@media (max-width: 600px) { .watch-box { aspect-ratio: 1 / 1; } }
"#;

fn wrapper_class(variant: PlayerVariant) -> &'static str {
    match variant {
        PlayerVariant::Fullscreen => {
            "flex flex-col gap-6 justify-center items-center px-4 w-full bg-black h-dvh"
        }
        PlayerVariant::Inline => "flex flex-col gap-4 items-center w-full",
    }
}

/// Embedded YouTube player that keeps "Next" locked until the video has
/// actually been played for its configured duration.
#[component]
pub fn VideoPlayer(
    #[prop(into)] on_next: Callback<()>,
    #[prop(optional)] options: PlayerOptions,
    details: Option<VideoDetails>,
) -> impl IntoView {
    let duration = details.as_ref().map(|d| d.duration);
    let session = WatchSession::new(details);
    let host = NodeRef::<html::Div>::new();
    let retry = RwSignal::new(0u32);

    Effect::new(move |_| {
        retry.track();
        let Some(host) = host.get() else {
            return;
        };
        session.teardown();
        session.mount(host.into());
    });

    on_cleanup(move || session.teardown());

    let player = move || {
        view! {
            <div class="relative w-full max-w-3xl aspect-video watch-box">
                <div node_ref=host class="w-full h-full"></div>
                {move || {
                    session
                        .init_error
                        .get()
                        .map(|error| {
                            view! {
                                <InitErrorView
                                    error
                                    on_retry=move |_| retry.update(|r| *r += 1)
                                />
                            }
                        })
                }}
            </div>
            {duration
                .filter(|_| options.show_progress_bar)
                .map(|duration| {
                    view! {
                        <div class="w-full max-w-3xl">
                            <ProgressBar duration playing=session.is_playing />
                        </div>
                    }
                })}
            <NextButton
                remaining=session.remaining
                unlocked=session.next_unlocked
                on_next
            />
        }
    };

    view! {
        <Style>{PLAYER_CSS}</Style>
        <div class=wrapper_class(options.variant)>
            <Show when=move || session.loading.get() fallback=|| view! { <Loading /> }>
                {player}
            </Show>
        </div>
    }
}
