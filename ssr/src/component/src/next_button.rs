use leptos::prelude::*;

pub fn next_label(remaining: Option<u32>, unlocked: bool) -> String {
    match remaining {
        Some(remaining) if !unlocked => format!("Next {remaining}"),
        _ => "Next".to_string(),
    }
}

/// Runs `on_next` only once the button is unlocked.
pub fn on_next_click(unlocked: bool, on_next: Callback<()>) {
    if unlocked {
        on_next.run(());
    }
}

#[component]
pub fn NextButton(
    #[prop(into)] remaining: Signal<Option<u32>>,
    #[prop(into)] unlocked: Signal<bool>,
    #[prop(into)] on_next: Callback<()>,
) -> impl IntoView {
    let label = move || next_label(remaining.get(), unlocked.get());

    view! {
        <button
            disabled=move || !unlocked.get()
            on:click=move |_| on_next_click(unlocked.get_untracked(), on_next)
            class="py-3 px-10 text-lg font-semibold rounded-full transition-colors enabled:text-white enabled:bg-primary-600 disabled:text-white/40 disabled:bg-white/10"
            class:watch-shake=move || unlocked.get()
        >
            {label}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn locked_label_counts_down() {
        assert_eq!(next_label(Some(10), false), "Next 10");
        assert_eq!(next_label(Some(3), false), "Next 3");
    }

    #[test]
    fn unlocked_label_is_plain() {
        assert_eq!(next_label(Some(0), true), "Next");
    }

    #[test]
    fn missing_duration_label_is_plain() {
        assert_eq!(next_label(None, false), "Next");
    }

    #[test]
    fn click_runs_callback_only_when_unlocked() {
        let owner = Owner::new();
        owner.set();
        let calls = Arc::new(AtomicUsize::new(0));
        let on_next = Callback::new({
            let calls = calls.clone();
            move |()| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        on_next_click(false, on_next);
        on_next_click(false, on_next);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        on_next_click(true, on_next);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
