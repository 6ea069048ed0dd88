use leptos::prelude::*;
use utils::youtube::PlayerInitError;

fn error_message(error: &PlayerInitError) -> String {
    match error {
        PlayerInitError::ScriptLoad | PlayerInitError::LoadTimeout => {
            "Couldn't reach YouTube. Check your connection and try again.".to_string()
        }
        e => e.to_string(),
    }
}

/// Overlay shown over the player box when the embed could not be set up.
#[component]
pub fn InitErrorView(error: PlayerInitError, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    let message = error_message(&error);

    view! {
        <div class="flex absolute inset-0 flex-col gap-3 justify-center items-center px-8 text-center bg-black/90">
            <h1 class="text-xl font-bold text-white">"oh no!"</h1>
            <div class="text-xs md:text-sm text-white/60">{message}</div>
            <button
                on:click=move |_| on_retry.run(())
                class="py-2 px-8 mt-2 text-white rounded-full bg-primary-600"
            >
                Retry
            </button>
        </div>
    }
}
