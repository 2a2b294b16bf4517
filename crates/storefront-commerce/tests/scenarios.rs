//! End-to-end shopper sessions against the storefront facade.

use std::time::Duration;

use storefront_commerce::prelude::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn ids(values: &[u32]) -> Vec<ProductId> {
    values.iter().copied().map(ProductId::new).collect()
}

fn two_category_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new(1, "Desk Lamp", "home", Price::new(4500)),
        Product::new(2, "Earbuds", "audio", Price::new(8900)),
        Product::new(3, "Throw Pillow", "home", Price::new(2500)),
        Product::new(4, "Soundbar", "audio", Price::new(19900)),
        Product::new(5, "Rug", "home", Price::new(12000)),
        Product::new(6, "Turntable", "audio", Price::new(15000)),
    ])
    .unwrap()
}

fn sample_storefront() -> Storefront {
    Storefront::new(
        Catalog::sample().unwrap(),
        Theme::Light,
        StorefrontSettings::default(),
    )
}

#[test]
fn test_filter_then_sort_by_price_high() {
    let mut storefront = Storefront::new(
        two_category_catalog(),
        Theme::Light,
        StorefrontSettings::default(),
    );
    assert_eq!(storefront.visible_ids(), ids(&[1, 2, 3, 4, 5, 6]));

    storefront.dispatch(Intent::FilterBy {
        category: CategoryFilter::category("home"),
    });
    storefront.dispatch(Intent::SortBy {
        sort: SortKey::PriceHigh,
    });

    assert_eq!(storefront.visible_ids(), ids(&[5, 1, 3]));
    let prices: Vec<Price> = storefront.visible_products().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![Price::new(12000), Price::new(4500), Price::new(2500)]);
}

#[test]
fn test_quick_view_add_to_cart_with_options_and_toast() {
    let mut storefront = sample_storefront();

    storefront.dispatch(Intent::OpenQuickView {
        product_id: ProductId::new(7),
    });
    storefront.dispatch(Intent::SelectColor {
        name: "Red".to_string(),
    });
    storefront.dispatch(Intent::SelectSize {
        size: "M".to_string(),
    });
    storefront.dispatch(Intent::SetQuantity { quantity: 2 });
    let notifications = storefront.dispatch(Intent::ConfirmAddToCart);

    let expected = CartLine::new(ProductId::new(7))
        .with_quantity(2)
        .with_color("Red")
        .with_size("M");
    assert_eq!(storefront.store().cart().lines(), &[expected]);
    assert!(storefront.store().quick_view().is_none());

    assert_eq!(
        notifications,
        vec![Notification::ToastShown {
            message: "Added to cart successfully!".to_string(),
            duration_ms: 3000,
        }]
    );
    assert_eq!(storefront.toast().unwrap().message, ADDED_TO_CART_MESSAGE);

    assert!(storefront.advance(ms(2999)).is_empty());
    assert!(storefront.toast().is_some());
    assert_eq!(storefront.advance(ms(1)), vec![Notification::ToastDismissed]);
    assert!(storefront.toast().is_none());
}

#[test]
fn test_direct_add_to_cart_with_options() {
    let mut storefront = sample_storefront();
    storefront.dispatch(Intent::AddToCart {
        product_id: ProductId::new(7),
        quantity: 2,
        color: Some("Red".to_string()),
        size: Some("M".to_string()),
    });

    let line = &storefront.store().cart().lines()[0];
    assert_eq!(line.product_id, ProductId::new(7));
    assert_eq!(line.quantity, 2);
    assert_eq!(line.color.as_deref(), Some("Red"));
    assert_eq!(line.size.as_deref(), Some("M"));
}

#[test]
fn test_compare_cap_then_swap() {
    let mut storefront = sample_storefront();
    for id in 1..=4 {
        storefront.dispatch(Intent::ToggleCompare {
            product_id: ProductId::new(id),
            desired: true,
        });
    }

    storefront.dispatch(Intent::ToggleCompare {
        product_id: ProductId::new(5),
        desired: true,
    });
    assert_eq!(storefront.store().compare_list().ids(), ids(&[1, 2, 3, 4]).as_slice());
    assert!(!storefront.compare_tray().show_hint());

    storefront.dispatch(Intent::RemoveFromCompare {
        product_id: ProductId::new(2),
    });
    assert!(storefront.compare_tray().show_hint());

    storefront.dispatch(Intent::ToggleCompare {
        product_id: ProductId::new(5),
        desired: true,
    });
    assert_eq!(storefront.store().compare_list().ids(), ids(&[1, 3, 4, 5]).as_slice());
    assert_eq!(storefront.compare_tray().ids(), ids(&[1, 3, 4, 5]));
}

#[test]
fn test_featured_all_is_catalog_order() {
    let storefront = sample_storefront();
    let catalog_ids: Vec<ProductId> = storefront.catalog().products().iter().map(|p| p.id).collect();
    assert_eq!(storefront.visible_ids(), catalog_ids);
}

#[test]
fn test_quantity_clamps_to_stock() {
    let catalog = Catalog::new(vec![
        Product::new(1, "Mug", "home", Price::new(1500)).with_stock(10, 20)
    ])
    .unwrap();
    let mut storefront = Storefront::new(catalog, Theme::Light, StorefrontSettings::default());
    storefront.dispatch(Intent::OpenQuickView {
        product_id: ProductId::new(1),
    });

    storefront.dispatch(Intent::SetQuantity { quantity: 0 });
    assert_eq!(storefront.store().quick_view().unwrap().selection().quantity, 1);

    storefront.dispatch(Intent::SetQuantity { quantity: 999 });
    assert_eq!(storefront.store().quick_view().unwrap().selection().quantity, 10);
}

#[test]
fn test_reopening_quick_view_resets_selection() {
    let mut storefront = sample_storefront();
    storefront.dispatch(Intent::OpenQuickView {
        product_id: ProductId::new(2),
    });
    storefront.dispatch(Intent::SelectColor {
        name: "Ocean Blue".to_string(),
    });
    storefront.dispatch(Intent::SelectSize {
        size: "10".to_string(),
    });
    storefront.dispatch(Intent::SetQuantity { quantity: 3 });
    storefront.dispatch(Intent::CloseQuickView);

    storefront.dispatch(Intent::OpenQuickView {
        product_id: ProductId::new(2),
    });
    let view = storefront.store().quick_view().unwrap();
    assert_eq!(view.selection().selected_color, "Cloud White");
    assert_eq!(view.selection().selected_size, "7");
    assert_eq!(view.selection().quantity, 1);
    assert_eq!(view.image_index(), 0);
}

#[test]
fn test_wishlist_toggle_twice_restores_state() {
    let mut storefront = sample_storefront();
    let before = storefront.snapshot().selection;

    storefront.dispatch(Intent::ToggleWishlist {
        product_id: ProductId::new(3),
    });
    assert!(storefront.store().is_wished(ProductId::new(3)));
    storefront.dispatch(Intent::ToggleWishlist {
        product_id: ProductId::new(3),
    });

    assert_eq!(storefront.snapshot().selection, before);
}

#[test]
fn test_out_of_stock_product_can_be_added() {
    let mut storefront = sample_storefront();
    let sold_out = ProductId::new(6);
    assert!(storefront.catalog().get(sold_out).unwrap().is_out_of_stock());

    storefront.dispatch(Intent::add_to_cart(6));
    assert_eq!(storefront.store().cart().quantity_of(sold_out), 1);
}

#[test]
fn test_offer_countdown_follows_session_clock() {
    let mut storefront = sample_storefront();
    storefront.dispatch(Intent::OpenQuickView {
        product_id: ProductId::new(3),
    });
    let start = storefront.store().quick_view().unwrap().time_left().unwrap();
    assert_eq!(start.to_string(), "01:00:00");

    storefront.advance(ms(61_000));
    let later = storefront.store().quick_view().unwrap().time_left().unwrap();
    assert_eq!(later.to_string(), "00:58:59");

    storefront.advance(ms(4_000_000));
    let done = storefront.store().quick_view().unwrap().time_left().unwrap();
    assert!(done.is_zero());
}

#[test]
fn test_cards_reveal_in_stagger_order() {
    let mut storefront = sample_storefront();
    for id in storefront.visible_ids() {
        storefront.dispatch(Intent::ScrolledIntoView { product_id: id });
    }
    storefront.advance(ms(250));

    let visible: Vec<bool> = storefront.cards().iter().map(ProductCard::is_visible).collect();
    assert_eq!(visible, vec![true, true, true, false, false, false, false, false]);

    storefront.advance(ms(1000));
    assert!(storefront.cards().iter().all(ProductCard::is_visible));
}

#[test]
fn test_hovered_card_cycles_and_resets() {
    let mut storefront = sample_storefront();
    let id = ProductId::new(1);
    storefront.dispatch(Intent::PointerEnter { product_id: id });
    storefront.advance(ms(1500));
    assert_eq!(storefront.card(id).unwrap().image_index(), 1);

    storefront.dispatch(Intent::PointerLeave { product_id: id });
    storefront.advance(ms(3000));
    assert_eq!(storefront.card(id).unwrap().image_index(), 0);
}

#[test]
fn test_filtering_out_a_hovered_card_cancels_its_cycle() {
    let mut storefront = sample_storefront();
    let id = ProductId::new(1);
    storefront.dispatch(Intent::PointerEnter { product_id: id });
    storefront.dispatch(Intent::FilterBy {
        category: CategoryFilter::category("home"),
    });
    assert!(storefront.card(id).is_none());

    storefront.dispatch(Intent::FilterBy {
        category: CategoryFilter::All,
    });
    storefront.advance(ms(3000));
    let card = storefront.card(id).unwrap();
    assert!(!card.is_hovered());
    assert_eq!(card.image_index(), 0);
}
