use leptos::prelude::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center w-full h-full bg-black">
            <div class="w-10 h-10 rounded-full border-4 animate-spin border-white/20 border-t-white"></div>
        </div>
    }
}
