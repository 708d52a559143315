//! Application components.

use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use linkventa_core::prelude::*;
use linkventa_data::{DataSync, PageState, ProductStore};

use crate::backend::build_store;
use crate::config::session_logger;
use crate::shell::WebShell;

type AppSync = DataSync<Box<dyn ProductStore>>;

/// Browser-local handle to the sync; the store holds non-`Send` futures.
type SyncHandle = StoredValue<Rc<AppSync>, LocalStorage>;

/// The page signal, written step by step as requests complete.
#[derive(Clone, Copy)]
struct SignalPage(RwSignal<StorefrontState>);

impl PageState for SignalPage {
    fn read<R>(&self, f: impl FnOnce(&StorefrontState) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn update(&self, f: impl FnOnce(&mut StorefrontState)) {
        self.0.update(f);
    }
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App(config: StoreConfig, search: String) -> impl IntoView {
    provide_meta_context();

    let initial = StorefrontState::from_query(&search);
    let mode = initial.mode().clone();
    let logger = session_logger(&config, &mode);
    logger
        .info_builder("storefront opened")
        .field("store", if config.backend.is_remote() { "rest" } else { "memory" })
        .emit();

    let sync: SyncHandle =
        StoredValue::new_local(Rc::new(DataSync::new(build_store(&config), logger)));
    let state = RwSignal::new(initial);

    // Exactly one fetch per page load: the single product or the listing.
    let startup = sync.get_value();
    spawn_local(async move {
        startup.load(&SignalPage(state)).await;
    });

    let title = config.app_name.clone();
    let logo = config.logo_url.clone();
    let config = StoredValue::new(config);

    let body = match mode {
        ViewMode::Buyer(_) => view! { <BuyerView state=state config=config/> }.into_any(),
        ViewMode::Seller => {
            view! { <SellerView state=state config=config sync=sync/> }.into_any()
        }
    };

    view! {
        <Title text=title/>
        <Meta name="description" content="Vende por WhatsApp con un solo enlace"/>
        <div class="app">
            <Banner logo=logo/>
            {body}
        </div>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Banner(logo: String) -> impl IntoView {
    view! {
        <header class="banner">
            <img src=logo alt="LinkVenta Banner"/>
        </header>
    }
}

#[component]
fn Loader() -> impl IntoView {
    view! { <div class="loader">"Cargando catálogo..."</div> }
}

// ============================================================================
// Buyer Checkout
// ============================================================================

/// One product and the button into the messaging app.
#[component]
fn BuyerView(state: RwSignal<StorefrontState>, config: StoredValue<StoreConfig>) -> impl IntoView {
    let (color, currency) = config.with_value(|c| (c.primary_color.clone(), c.currency));

    let on_checkout = move |_| {
        let product = state.with_untracked(|s| s.buyer_product.clone());
        config.with_value(|c| {
            if finalize_checkout(&WebShell, c, product.as_ref()).is_none() {
                log::info!("checkout pressed with no product loaded");
            }
        });
    };

    let loading = move || state.with(|s| s.loading);

    view! {
        {move || loading().then(|| view! { <Loader/> })}
        <div class="cliente-container" class:hidden=loading>
            <h2 class="cliente-nombre">{move || state.with(|s| s.buyer_name().to_string())}</h2>
            <p class="cliente-precio">{move || state.with(|s| s.buyer_price_label(currency))}</p>
            <button
                class="btn-primary"
                style=format!("background-color: {}", color)
                on:click=on_checkout
            >
                "Confirmar por WhatsApp"
            </button>
        </div>
    }
}

// ============================================================================
// Seller Dashboard
// ============================================================================

/// Stats, add-product form and the listing with share buttons.
#[component]
fn SellerView(
    state: RwSignal<StorefrontState>,
    config: StoredValue<StoreConfig>,
    sync: SyncHandle,
) -> impl IntoView {
    let (color, currency) = config.with_value(|c| (c.primary_color.clone(), c.currency));
    let price_placeholder = format!("Precio ({})", currency.symbol());
    let stats = move || state.with(|s| s.stats(currency));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let sync = sync.get_value();
        spawn_local(async move {
            if let Err(e) = sync.submit(&SignalPage(state)).await {
                sync.logger()
                    .warn_builder("product form rejected")
                    .field("error", e.to_string())
                    .emit();
            }
        });
    };

    view! {
        <div class="stats">
            <div class="stat-card">
                <span class="stat-label">"PRODUCTOS"</span>
                <span class="stat-val">{move || stats().count.to_string()}</span>
            </div>
            <div class="stat-card">
                <span class="stat-label">"VALOR CARTERA"</span>
                <span class="stat-val">{move || stats().portfolio_label()}</span>
            </div>
        </div>

        <form class="form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Nombre del producto"
                required=true
                prop:value=move || state.with(|s| s.form.nombre.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.form.nombre = value);
                }
            />
            <input
                type="number"
                step="0.01"
                placeholder=price_placeholder
                required=true
                prop:value=move || state.with(|s| s.form.precio.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.form.precio = value);
                }
            />
            <button type="submit" class="btn-primary" style=format!("background-color: {}", color)>
                "Subir a mi Tienda"
            </button>
        </form>

        {move || state.with(|s| s.loading).then(|| view! { <Loader/> })}
        <div class="lista">
            <For
                each=move || state.with(|s| s.products.clone())
                key=|product: &Product| product.id.clone()
                children=move |product: Product| view! { <ProductRow product=product config=config/> }
            />
        </div>
    }
}

#[component]
fn ProductRow(product: Product, config: StoredValue<StoreConfig>) -> impl IntoView {
    let price = config.with_value(|c| product.price_label(c.currency));
    let id = product.id.clone();

    let on_copy = move |_| {
        config.with_value(|c| {
            let link = copy_link(&WebShell, c, &id);
            log::debug!("share link copied: {}", link);
        });
    };

    view! {
        <div class="item">
            <div class="item-info">
                <span class="item-nombre">{product.nombre}</span>
                <span class="item-precio">{price}</span>
            </div>
            <button class="btn-copy" on:click=on_copy>"Copiar Link"</button>
        </div>
    }
}
