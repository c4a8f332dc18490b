// TestWorld wiring: catalog file, options and client share one temp root
use viewcfg_testing::{TestWorld, assertions, fixtures};

#[test]
fn test_sample_catalog_resolves_nested_types() {
    let world = TestWorld::new().with_sample_catalog();
    let client = world.client().unwrap();

    assert!(client.catalog().contains(&fixtures::order().identity));
    assert!(client.catalog().contains(&fixtures::address().identity));
    assert!(client.catalog().contains(&fixtures::order_status().identity));
    assert_eq!(world.options().configuration_folder, world.config_folder());
}

#[test]
fn test_order_item_paths() {
    let item = fixtures::order_item();
    assert!(item.lookup("ShipTo.City").is_some());
    assert!(item.lookup("ShipTo.Zip").is_none());
    assert!(item.lookup("Customer.Name").is_none());
}

#[tokio::test]
async fn test_auto_saved_document_matches_assertions() {
    let world = TestWorld::new().with_sample_catalog();
    let client = world.client().unwrap();
    client.get_or_create_config(&fixtures::order()).await;

    let identity = fixtures::order().identity;
    assertions::assert_document_for(world.config_folder(), &identity).unwrap();
    let doc = assertions::read_document(world.config_folder(), &identity).unwrap();
    assertions::assert_property_count(&doc, 8).unwrap();
}
