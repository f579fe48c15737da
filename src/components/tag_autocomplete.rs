//! Tag Autocomplete Component
//!
//! Tag name input with suggestions from the existing tags. Several names can
//! be entered at once separated by semicolons.

use leptos::prelude::*;

use crate::models::Tag;
use crate::text::normalize_text;

const MAX_SUGGESTIONS: usize = 5;

/// Query chars appear in order in the target, ignoring case and accents
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let target = normalize_text(target);
    let mut target_chars = target.chars();
    normalize_text(query)
        .chars()
        .all(|q| target_chars.by_ref().any(|c| c == q))
}

/// Text after the last semicolon
fn current_segment(input: &str) -> &str {
    input.rsplit(';').next().unwrap_or("").trim()
}

/// Replace the text after the last semicolon
fn replace_current_segment(input: &str, new_segment: &str) -> String {
    match input.rfind(';') {
        Some(pos) => format!("{}; {}", &input[..pos], new_segment),
        None => new_segment.to_string(),
    }
}

/// Every non-blank semicolon-separated name
fn split_names(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tag autocomplete input
///
/// Props:
/// - all_tags: tags offered as suggestions
/// - on_select: called once per submitted tag name
#[component]
pub fn TagAutocomplete(
    #[prop(into)] all_tags: Signal<Vec<Tag>>,
    #[prop(into)] on_select: Callback<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    let placeholder = placeholder.unwrap_or_else(|| "Etiqueta (separa varias con ;)".to_string());

    let suggestions = move || {
        let full_input = input_value.get();
        let segment = current_segment(&full_input);
        if segment.is_empty() {
            return vec![];
        }
        all_tags
            .get()
            .into_iter()
            .filter(|tag| fuzzy_match(segment, &tag.name))
            .take(MAX_SUGGESTIONS)
            .collect::<Vec<_>>()
    };

    let pick_suggestion = move |name: String| {
        let full_input = input_value.get();
        set_input_value.set(replace_current_segment(&full_input, &name));
        set_selected_idx.set(0);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let names = split_names(&input_value.get());
        let sugg = suggestions();
        let sel = selected_idx.get();

        for (i, name) in names.iter().enumerate() {
            // The segment being typed resolves to the highlighted suggestion
            let is_last = i + 1 == names.len();
            let final_name = match sugg.get(sel) {
                Some(tag) if is_last && fuzzy_match(name, &tag.name) => tag.name.clone(),
                _ => name.clone(),
            };
            on_select.run(final_name);
        }

        set_input_value.set(String::new());
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        match ev.key().as_str() {
            "Tab" => {
                if let Some(tag) = sugg.get(selected_idx.get()) {
                    ev.prevent_default();
                    pick_suggestion(tag.name.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_selected_idx.update(|sel| *sel = sel.saturating_sub(1));
            }
            _ => {}
        }
    };

    view! {
        <div class="tag-input-wrapper">
            <form class="tag-input-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder=placeholder
                    autocomplete="off"
                    prop:value=move || input_value.get()
                    on:input=move |ev| {
                        set_input_value.set(event_target_value(&ev));
                        set_selected_idx.set(0);
                    }
                    on:keydown=on_keydown
                />
                <button type="submit">"+"</button>
            </form>

            {move || {
                let sugg = suggestions();
                if sugg.is_empty() {
                    return view! { <div></div> }.into_any();
                }
                let selected = selected_idx.get();
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, tag)| {
                            let name = tag.name.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        pick_suggestion(name.clone());
                                    }
                                >
                                    {tag.name}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("fml", "Familia"));
        assert!(fuzzy_match("nino", "Niños"));
        assert!(!fuzzy_match("vpi", "VIP"));
        assert!(fuzzy_match("", "Cualquiera"));
    }

    #[test]
    fn test_segments() {
        assert_eq!(current_segment("VIP; fam"), "fam");
        assert_eq!(replace_current_segment("VIP; fam", "Familia"), "VIP; Familia");
        assert_eq!(replace_current_segment("fa", "Familia"), "Familia");
    }

    #[test]
    fn test_split_names() {
        assert_eq!(split_names(" VIP ;; Familia;"), vec!["VIP".to_string(), "Familia".to_string()]);
    }
}
