use octodeco_cache::FileStore;
use octodeco_commerce::checkout::FormSection;
use octodeco_commerce::prelude::*;
use tempfile::TempDir;

fn shipping() -> ShippingDetails {
    ShippingDetails {
        first_name: "Mona".into(),
        last_name: "Lisa".into(),
        email: "mona@example.com".into(),
        address: "88 Colin P Kelly Jr St".into(),
        city: "San Francisco".into(),
        postal_code: "94107".into(),
        country: "United States".into(),
    }
}

#[test]
fn test_checkout_from_file_backed_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("carts").join("default.json");
    let catalog = Catalog::builtin();

    {
        let mut cart = CartStore::open_in(FileStore::open(&path).unwrap());
        cart.add_item(catalog.by_slug("surftocat").unwrap().clone(), 6);
        assert!(cart.apply_coupon("save20").success);
    }

    // A later process picks the cart up and checks out.
    let mut cart = CartStore::open_in(FileStore::open(&path).unwrap());
    assert_eq!(cart.item_count(), 6);
    assert_eq!(cart.applied_coupon().map(|c| c.code.as_str()), Some("SAVE20"));

    let confirmation = place_order(&mut cart, &CheckoutForm::new(shipping())).unwrap();
    assert_eq!(confirmation.ship_to.full_name(), "Mona Lisa");
    assert_eq!(confirmation.summary.lines.len(), 1);
    assert_eq!(confirmation.summary.totals.total, Money::from_cents(2875));
    assert!(confirmation.free_shipping());

    let after = CartStore::open_in(FileStore::open(&path).unwrap());
    assert!(after.items().is_empty());
    assert!(after.applied_coupon().is_none());
}

#[test]
fn test_damaged_session_file_is_replaced_by_next_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("default.json");
    std::fs::write(&path, "garbage").unwrap();
    let catalog = Catalog::builtin();

    let mut cart = CartStore::open_in(FileStore::open(&path).unwrap());
    assert!(cart.items().is_empty());
    cart.add_item(catalog.by_slug("surftocat").unwrap().clone(), 2);

    let reopened = CartStore::open_in(FileStore::open(&path).unwrap());
    assert_eq!(reopened.item_count(), 2);
}

#[test]
fn test_checkout_reports_billing_problem() {
    let catalog = Catalog::builtin();
    let mut cart = CartStore::open_in(octodeco_cache::MemoryStore::new());
    cart.add_item(catalog.featured()[0].clone(), 1);

    let mut form = CheckoutForm::new(shipping());
    form.billing.same_as_shipping = false;

    match place_order(&mut cart, &form) {
        Err(CommerceError::Validation(errors)) => {
            assert_eq!(
                errors.for_field(FormSection::Billing, "first_name"),
                Some("Billing address is required when not same as shipping")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn test_confirmation_serializes_for_display() {
    let catalog = Catalog::builtin();
    let mut cart = CartStore::open_in(octodeco_cache::MemoryStore::new());
    cart.add_item(catalog.by_slug("original").unwrap().clone(), 1);
    cart.apply_coupon("SAVE10");

    let confirmation = place_order(&mut cart, &CheckoutForm::new(shipping())).unwrap();
    let json = serde_json::to_value(&confirmation).unwrap();
    assert_eq!(json["summary"]["totals"]["total"], 449);
    assert_eq!(json["summary"]["coupon"]["code"], "SAVE10");
    assert!(json["placed_at"].is_string());
}
