// web_app/components/search.rs - Filter bar of the products table
//
// - SearchBar: free-text search on name and description
// - CategorySelect: category dropdown with an "all categories" entry
//
// Both filter the snapshot locally as the user types; no store call.

use leptos::prelude::*;

use crate::catalog::filter::{CategoryFilter, ALL_CATEGORIES};
use crate::catalog::model::Category;

/// Search input bound to the list view's search term
#[component]
pub fn SearchBar(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="relative flex-1">
            <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                <span class="text-gray-400">"🔍"</span>
            </div>
            <input
                type="search"
                placeholder="Buscar produtos..."
                class="w-full pl-10 pr-4 py-2 border border-gray-300 rounded-lg \
                       focus:ring-2 focus:ring-purple-500 focus:border-transparent \
                       outline-none transition-shadow shadow-sm"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        </div>
    }
}

/// (value, label) pairs of the category dropdown, "all" first
pub fn category_options() -> Vec<(&'static str, &'static str)> {
    std::iter::once((ALL_CATEGORIES, "Todas as categorias"))
        .chain(Category::ALL.iter().map(|c| (c.as_str(), c.label())))
        .collect()
}

/// Category dropdown
#[component]
pub fn CategorySelect(
    #[prop(into)]
    value: Signal<CategoryFilter>,
    on_change: Callback<CategoryFilter>,
) -> impl IntoView {
    let class = "px-4 py-2 border border-gray-300 rounded-lg bg-white \
                 focus:ring-2 focus:ring-purple-500 focus:border-transparent \
                 outline-none cursor-pointer shadow-sm";

    view! {
        <select
            class=class
            on:change=move |ev| {
                let raw = event_target_value(&ev);
                match raw.parse::<CategoryFilter>() {
                    Ok(filter) => on_change.run(filter),
                    Err(e) => tracing::warn!("Ignoring category filter: {}", e),
                }
            }
        >
            {category_options().into_iter().map(|(opt_value, label)| {
                view! {
                    <option
                        value=opt_value
                        selected=move || value.get().as_str() == opt_value
                    >
                        {label}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}
