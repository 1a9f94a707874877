// web_app/components/product.rs - Product table, form and delete dialog
//
// - ProductTable / ProductRow: the filtered snapshot with row actions
// - ProductForm: create/edit form bound to the EditSession
// - DeleteConfirm: confirmation dialog before a delete reaches the store
//
// The components only read state and emit callbacks; the page owns the
// store calls.

use leptos::prelude::*;
use rust_decimal::Decimal;

use super::common::{Badge, Button, ErrorDisplay, FieldError, ModalWrapper, PriceDisplay, SecondaryButton};
use crate::catalog::list_view::ProductListView;
use crate::catalog::model::{format_price_per_gram, parse_decimal_input, Category, Product, ProductFields, ProductId};
use crate::catalog::session::{EditSession, SessionState};
use crate::catalog::validation::ProductField;

/// Text shown in a money input. Zero and missing values start empty.
pub fn decimal_input_text(value: Option<Decimal>) -> String {
    match value {
        Some(v) if !v.is_zero() => v.normalize().to_string(),
        _ => String::new(),
    }
}

/// Products table
///
/// Renders the visible rows of the list view, or an empty-state message.
#[component]
pub fn ProductTable(
    list: RwSignal<ProductListView>,
    on_edit: Callback<Product>,
    on_toggle: Callback<ProductId>,
    on_delete: Callback<ProductId>,
) -> impl IntoView {
    let visible = Signal::derive(move || list.with(|l| l.visible()));
    let has_products = move || list.with(|l| !l.snapshot().is_empty());

    view! {
        <Show
            when=move || !visible.with(Vec::is_empty)
            fallback=move || view! {
                <div class="text-center py-16 text-gray-500 bg-white rounded-xl border border-gray-100">
                    {move || if has_products() {
                        "Nenhum produto corresponde aos filtros."
                    } else {
                        "Nenhum produto encontrado. Clique em \"Novo Produto\" para adicionar o primeiro."
                    }}
                </div>
            }
        >
            <div class="bg-white rounded-xl shadow-sm border border-gray-100 overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Produto"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Categoria"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Preço"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Status"</th>
                            <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase">"Ações"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100">
                        <For
                            each=move || visible.get()
                            key=|p| (p.id, p.is_active, p.updated_at)
                            children=move |product| {
                                let id = product.id;
                                let toggling = Signal::derive(move || list.with(|l| l.is_toggling(id)));
                                view! {
                                    <ProductRow
                                        product=product
                                        toggling=toggling
                                        on_edit=on_edit
                                        on_toggle=on_toggle
                                        on_delete=on_delete
                                    />
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

/// One row of the products table
#[component]
pub fn ProductRow(
    product: Product,
    #[prop(into)]
    toggling: Signal<bool>,
    on_edit: Callback<Product>,
    on_toggle: Callback<ProductId>,
    on_delete: Callback<ProductId>,
) -> impl IntoView {
    let id = product.id;
    let is_active = product.is_active;
    let per_gram = product
        .is_weighable
        .then_some(product.price_per_gram)
        .flatten()
        .map(format_price_per_gram);
    let editable = product.clone();

    view! {
        <tr class=if is_active { "hover:bg-gray-50" } else { "hover:bg-gray-50 opacity-60" }>
            <td class="px-6 py-4">
                <div class="flex items-center gap-3">
                    {product.image_url.clone().map(|url| view! {
                        <img src=url alt="" class="h-10 w-10 rounded-lg object-cover" />
                    })}
                    <div>
                        <div class="font-medium text-gray-900">{product.name.clone()}</div>
                        <div class="text-sm text-gray-500 line-clamp-1">{product.description.clone()}</div>
                    </div>
                </div>
            </td>
            <td class="px-6 py-4">
                <Badge variant="purple">{product.category.label()}</Badge>
            </td>
            <td class="px-6 py-4">
                <PriceDisplay price=product.price original_price=product.original_price />
                {per_gram.map(|label| view! { <span class="text-xs text-gray-500">{label}</span> })}
            </td>
            <td class="px-6 py-4">
                <button
                    type="button"
                    class="cursor-pointer disabled:cursor-wait"
                    title="Alternar status"
                    disabled=move || toggling.get()
                    on:click=move |_| on_toggle.run(id)
                >
                    {if is_active {
                        view! { <Badge variant="green">"Ativo"</Badge> }.into_any()
                    } else {
                        view! { <Badge variant="red">"Inativo"</Badge> }.into_any()
                    }}
                </button>
            </td>
            <td class="px-6 py-4 text-right whitespace-nowrap">
                <button
                    type="button"
                    class="text-purple-600 hover:text-purple-800 font-medium mr-4"
                    on:click=move |_| on_edit.run(editable.clone())
                >
                    "Editar"
                </button>
                <button
                    type="button"
                    class="text-red-600 hover:text-red-800 font-medium"
                    on:click=move |_| on_delete.run(id)
                >
                    "Excluir"
                </button>
            </td>
        </tr>
    }
}

/// Create/edit form
///
/// Every input writes straight into the session draft and clears that
/// field's inline error. Inputs are disabled while a save is in flight.
#[component]
pub fn ProductForm(
    session: RwSignal<EditSession>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let read = move |get: fn(&ProductFields) -> String| {
        session.with(|s| s.draft().map(|d| get(&d.fields)).unwrap_or_default())
    };
    let write = move |field: Option<ProductField>, change: Box<dyn FnOnce(&mut ProductFields)>| {
        session.update(|s| {
            s.edit(change);
            if let Some(field) = field {
                s.clear_field_error(field);
            }
        });
    };
    let error_for = move |field: ProductField| {
        Signal::derive(move || session.with(|s| s.field_error(field).map(str::to_string)))
    };

    let saving = Signal::derive(move || session.with(EditSession::is_saving));
    let is_weighable = move || session.with(|s| s.draft().is_some_and(|d| d.fields.is_weighable));
    let is_active = move || session.with(|s| s.draft().is_some_and(|d| d.fields.is_active));
    let general_error = move || session.with(|s| s.general_error().map(str::to_string));

    // Money inputs keep their own text so partial input like "12," survives
    let initial = session.with_untracked(|s| s.draft().map(|d| d.fields.clone()).unwrap_or_default());
    let price_text = RwSignal::new(decimal_input_text(Some(initial.price)));
    let original_price_text = RwSignal::new(decimal_input_text(initial.original_price));
    let price_per_gram_text = RwSignal::new(decimal_input_text(initial.price_per_gram));

    let input_class = "w-full px-4 py-2 border border-gray-300 rounded-lg \
                       focus:ring-2 focus:ring-purple-500 focus:border-transparent \
                       outline-none transition-shadow shadow-sm disabled:bg-gray-100";
    let label_class = "block text-sm font-medium text-gray-700 mb-1";

    view! {
        <form
            class="space-y-4"
            on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                ev.prevent_default();
                on_save.run(());
            }
        >
            {move || general_error().map(|error| view! { <ErrorDisplay error=error /> })}

            <div>
                <label class=label_class>"Nome *"</label>
                <input
                    type="text"
                    class=input_class
                    disabled=move || saving.get()
                    prop:value=move || read(|f| f.name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        write(Some(ProductField::Name), Box::new(move |f| f.name = value));
                    }
                />
                <FieldError message=error_for(ProductField::Name) />
            </div>

            <div>
                <label class=label_class>"Descrição *"</label>
                <textarea
                    rows="3"
                    class=input_class
                    disabled=move || saving.get()
                    prop:value=move || read(|f| f.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        write(Some(ProductField::Description), Box::new(move |f| f.description = value));
                    }
                ></textarea>
                <FieldError message=error_for(ProductField::Description) />
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                <div>
                    <label class=label_class>"Categoria"</label>
                    <select
                        class=input_class
                        disabled=move || saving.get()
                        on:change=move |ev| {
                            if let Ok(category) = event_target_value(&ev).parse::<Category>() {
                                write(None, Box::new(move |f| f.category = category));
                            }
                        }
                    >
                        {Category::ALL.into_iter().map(|category| view! {
                            <option
                                value=category.as_str()
                                selected=move || read(|f| f.category.as_str().to_string()) == category.as_str()
                            >
                                {category.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                <div>
                    <label class=label_class>"Preço (R$) *"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        class=input_class
                        disabled=move || saving.get()
                        prop:value=move || price_text.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            let price = parse_decimal_input(&text).unwrap_or(Decimal::ZERO);
                            price_text.set(text);
                            write(Some(ProductField::Price), Box::new(move |f| f.price = price));
                        }
                    />
                    <FieldError message=error_for(ProductField::Price) />
                </div>

                <div>
                    <label class=label_class>"Preço original (R$)"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        class=input_class
                        disabled=move || saving.get()
                        prop:value=move || original_price_text.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            let original = parse_decimal_input(&text);
                            original_price_text.set(text);
                            write(None, Box::new(move |f| f.original_price = original));
                        }
                    />
                </div>
            </div>

            <div>
                <label class=label_class>"URL da imagem"</label>
                <input
                    type="url"
                    class=input_class
                    disabled=move || saving.get()
                    prop:value=move || read(|f| f.image_url.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        write(None, Box::new(move |f| f.image_url = Some(value)));
                    }
                />
            </div>

            <div class="flex flex-wrap gap-6">
                <label class="flex items-center gap-3 cursor-pointer">
                    <input
                        type="checkbox"
                        class="rounded border-gray-300 text-purple-600 h-4 w-4"
                        disabled=move || saving.get()
                        prop:checked=is_active
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            write(None, Box::new(move |f| f.is_active = checked));
                        }
                    />
                    <span class="text-gray-700">"Produto ativo"</span>
                </label>
                <label class="flex items-center gap-3 cursor-pointer">
                    <input
                        type="checkbox"
                        class="rounded border-gray-300 text-purple-600 h-4 w-4"
                        disabled=move || saving.get()
                        prop:checked=is_weighable
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            write(Some(ProductField::PricePerGram), Box::new(move |f| f.is_weighable = checked));
                        }
                    />
                    <span class="text-gray-700">"Vendido por peso"</span>
                </label>
            </div>

            <Show when=is_weighable>
                <div>
                    <label class=label_class>"Preço por grama (R$) *"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        class=input_class
                        disabled=move || saving.get()
                        prop:value=move || price_per_gram_text.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            let per_gram = parse_decimal_input(&text);
                            price_per_gram_text.set(text);
                            write(Some(ProductField::PricePerGram), Box::new(move |f| f.price_per_gram = per_gram));
                        }
                    />
                    <FieldError message=error_for(ProductField::PricePerGram) />
                </div>
            </Show>

            <div class="flex justify-end gap-3 pt-4 border-t border-gray-100">
                <SecondaryButton on_click=on_cancel disabled=saving>
                    "Cancelar"
                </SecondaryButton>
                <Button button_type="submit" disabled=saving>
                    {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                </Button>
            </div>
        </form>
    }
}

/// Title of the form dialog for a session state
pub fn form_title(state: SessionState) -> &'static str {
    match state {
        SessionState::Creating => "Criar Novo Produto",
        _ => "Editar Produto",
    }
}

/// Confirmation dialog shown before deleting a product
#[component]
pub fn DeleteConfirm(
    product_name: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <ModalWrapper title="Excluir produto".to_string() on_close=on_cancel>
            <p class="text-gray-700 mb-2">"Tem certeza que deseja excluir este produto?"</p>
            <p class="font-semibold text-gray-900 mb-6">{product_name}</p>
            <div class="flex justify-end gap-3">
                <SecondaryButton on_click=on_cancel>"Cancelar"</SecondaryButton>
                <Button on_click=on_confirm class="bg-red-600 hover:bg-red-700">"Excluir"</Button>
            </div>
        </ModalWrapper>
    }
}
