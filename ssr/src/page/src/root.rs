use component::video_player::VideoPlayer;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::hooks::use_query_map;
use state::player_options::PlayerOptions;
use utils::types::VideoDetails;

#[component]
pub fn WatchPage() -> impl IntoView {
    let params = use_query_map();
    let options = params.with_untracked(|params| {
        PlayerOptions::from_query(
            params.get("progress").as_deref(),
            params.get("variant").as_deref(),
        )
    });

    // a fetched video would replace the stub here
    let details = Some(VideoDetails::stub());

    view! {
        <Title text="Watch" />
        <VideoPlayer
            details
            options
            on_next=move |_| leptos::logging::log!("next video")
        />
    }
}
