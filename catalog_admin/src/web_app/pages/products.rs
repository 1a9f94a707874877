// web_app/pages/products.rs - Products admin page
//
// Owns the page state and every store call:
// - EditSession drives the create/edit dialog
// - ProductListView holds the snapshot, filters, delete confirmation and toggles
//
// Store calls go through the server functions inside spawn_local. The core
// types do the bookkeeping through their begin/finish methods so the
// futures never have to cross a Send boundary in the browser.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

use crate::catalog::filter::CategoryFilter;
use crate::catalog::list_view::ProductListView;
use crate::catalog::notification::Notification;
use crate::catalog::session::{EditSession, SaveAttempt, SaveRequest};
use crate::web_app::components::*;
use crate::web_app::model::*;
use crate::web_app::server_fns::{create_product, delete_product, into_store_error, list_products, update_product};

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(4);

/// Header summary line, e.g. "3 de 7 produtos · 6 ativos"
pub fn counts_label(visible: usize, total: usize, active: usize) -> String {
    let noun = if total == 1 { "produto" } else { "produtos" };
    let active_noun = if active == 1 { "ativo" } else { "ativos" };
    if visible == total {
        format!("{} {} · {} {}", total, noun, active, active_noun)
    } else {
        format!("{} de {} {} · {} {}", visible, total, noun, active, active_noun)
    }
}

// Perform the store call behind a save
async fn run_save(request: SaveRequest) -> Result<Product, StoreError> {
    match request {
        SaveRequest::Create(fields) => {
            let payload = to_payload(&fields)?;
            create_product(payload).await.map_err(into_store_error)
        }
        SaveRequest::Update { id, patch } => {
            let payload = to_payload(&patch)?;
            update_product(id.to_string(), payload).await.map_err(into_store_error)
        }
    }
}

/// Products admin page
///
/// Lists the catalog with search and category filters, and opens a dialog
/// to create or edit a product. Delete asks for confirmation first.
#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = RwSignal::new(EditSession::new());
    let list = RwSignal::new(ProductListView::new());
    let notification = RwSignal::new(None::<Notification>);

    // Bumped to reload the snapshot from the store
    let reload = RwSignal::new(0_u32);
    let products = Resource::new(move || reload.get(), |_| list_products());

    // Show a toast and dismiss it later, unless a newer one replaced it
    let notify = move |shown: Notification| {
        notification.set(Some(shown.clone()));
        set_timeout(
            move || {
                notification.update(|current| {
                    if current.as_ref() == Some(&shown) {
                        *current = None;
                    }
                });
            },
            NOTIFICATION_TIMEOUT,
        );
    };

    Effect::new(move |_| {
        if let Some(result) = products.get() {
            match result {
                Ok(snapshot) => list.update(|l| l.replace_snapshot(snapshot)),
                Err(e) => {
                    let error = into_store_error(e);
                    if let Some(n) = list.try_update(|l| l.fail_load(&error)) {
                        notify(n);
                    }
                }
            }
        }
    });

    let counts = Signal::derive(move || list.with(|l| l.counts()));

    // ---- Filters ----

    let search_term = Signal::derive(move || list.with(|l| l.search_term().to_string()));
    let on_search = Callback::new(move |term: String| list.update(|l| l.set_search_term(term)));
    let category = Signal::derive(move || list.with(|l| l.category()));
    let on_category = Callback::new(move |filter: CategoryFilter| list.update(|l| l.set_category(filter)));
    let on_refresh = Callback::new(move |()| reload.update(|n| *n += 1));

    // ---- Create / edit dialog ----

    let on_new = Callback::new(move |()| {
        session.update(|s| {
            if let Err(e) = s.start_create() {
                tracing::warn!("{}", e);
            }
        });
    });

    let on_edit = Callback::new(move |product: Product| {
        session.update(|s| {
            if let Err(e) = s.start_edit(&product) {
                tracing::warn!("{}", e);
            }
        });
    });

    let on_cancel = Callback::new(move |()| {
        session.update(|s| {
            s.cancel();
        });
    });

    let on_save = Callback::new(move |()| {
        match session.try_update(|s| s.begin_save()) {
            Some(SaveAttempt::Ready(request)) => spawn_local(async move {
                match run_save(request).await {
                    Ok(product) => {
                        if let Some(n) = session.try_update(|s| s.complete_save(&product)) {
                            notify(n);
                        }
                        list.update(|l| l.upsert(product));
                    }
                    Err(error) => {
                        if let Some(n) = session.try_update(|s| s.fail_save(&error)) {
                            notify(n);
                        }
                    }
                }
            }),
            Some(SaveAttempt::Unchanged(n)) => notify(n),
            _ => {}
        }
    });

    let dialog_open = move || session.with(EditSession::is_open);
    let dialog_title = Signal::derive(move || session.with(|s| form_title(s.state()).to_string()));

    // ---- Row actions ----

    let on_toggle = Callback::new(move |id: ProductId| {
        let Some(patch) = list.try_update(|l| l.begin_toggle(id)).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = match to_payload(&patch) {
                Ok(payload) => update_product(id.to_string(), payload).await.map_err(into_store_error),
                Err(e) => Err(e),
            };
            if let Some(n) = list.try_update(|l| l.finish_toggle(id, result)) {
                notify(n);
            }
        });
    });

    let on_delete = Callback::new(move |id: ProductId| {
        list.update(|l| {
            l.request_delete(id);
        });
    });

    let on_cancel_delete = Callback::new(move |()| list.update(|l| l.cancel_delete()));

    let on_confirm_delete = Callback::new(move |()| {
        let Some(id) = list.try_update(|l| l.confirm_delete()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = delete_product(id.to_string()).await.map_err(into_store_error);
            if let Some(n) = list.try_update(|l| l.finish_delete(id, result)) {
                notify(n);
            }
        });
    });

    let pending_delete = move || list.with(|l| l.pending_delete().map(|p| p.name.clone()));

    view! {
        <div class="min-h-screen bg-gray-50 font-sans text-gray-900">
            <header class="bg-white shadow-sm sticky top-0 z-40 border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 h-16 flex items-center justify-between">
                    <div class="flex items-baseline gap-3">
                        <h1 class="text-xl font-bold text-purple-700">"Produtos"</h1>
                        <span class="text-sm text-gray-500">
                            {move || counts.with(|c| counts_label(c.visible, c.total, c.active))}
                        </span>
                    </div>
                    <div class="flex gap-3">
                        <SecondaryButton on_click=on_refresh>"Atualizar"</SecondaryButton>
                        <Button on_click=on_new>"+ Novo Produto"</Button>
                    </div>
                </div>
            </header>

            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <section class="flex flex-col sm:flex-row gap-4 mb-6">
                    <SearchBar value=search_term on_change=on_search />
                    <CategorySelect value=category on_change=on_category />
                </section>

                <Suspense fallback=move || view! {
                    <div class="bg-white rounded-2xl p-12 shadow-sm border border-gray-100">
                        <Loading message="Carregando produtos..." />
                    </div>
                }>
                    {move || {
                        match products.get() {
                            None => view! { <Loading /> }.into_any(),
                            // Previous rows stay usable when a reload fails
                            Some(Err(e)) if list.with(|l| l.snapshot().is_empty()) => view! {
                                <ErrorDisplay error=into_store_error(e).to_string() />
                            }.into_any(),
                            Some(_) => view! {
                                <ProductTable
                                    list=list
                                    on_edit=on_edit
                                    on_toggle=on_toggle
                                    on_delete=on_delete
                                />
                            }.into_any(),
                        }
                    }}
                </Suspense>
            </main>

            <Show when=dialog_open>
                <ModalWrapper title=dialog_title on_close=on_cancel>
                    <ProductForm session=session on_save=on_save on_cancel=on_cancel />
                </ModalWrapper>
            </Show>

            {move || pending_delete().map(|name| view! {
                <DeleteConfirm
                    product_name=name
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            })}

            <NotificationToast notification=notification />
        </div>
    }
}
