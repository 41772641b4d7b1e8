use inventory_service::{AppError, ItemPatch, ItemService, ListQuery, MemoryItemStore, NewItem};
use std::collections::HashSet;
use std::sync::Arc;

fn service() -> ItemService {
    ItemService::new(Arc::new(MemoryItemStore::new()))
}

fn new_item(name: &str, price: f64, stock: i64) -> NewItem {
    NewItem {
        name: name.to_string(),
        price,
        stock,
    }
}

async fn seed(svc: &ItemService) {
    for (name, price) in [
        ("Widget", 9.99),
        ("Gadget", 25.0),
        ("widget pro", 49.5),
        ("Sprocket", 5.0),
        ("ABC crate", 10.0),
        ("xabcx", 0.0),
    ] {
        svc.create(new_item(name, price, 1)).await.unwrap();
    }
}

fn ids(items: &[inventory_service::Item]) -> Vec<i64> {
    items.iter().map(|i| i.id).collect()
}

#[tokio::test]
async fn sequential_creates_get_ids_one_to_n() {
    let svc = service();
    for expected in 1..=20 {
        let item = svc.create(new_item("thing", 1.0, 0)).await.unwrap();
        assert_eq!(item.id, expected);
    }
}

#[tokio::test]
async fn concurrent_creates_never_share_an_id() {
    let svc = service();
    let mut handles = Vec::new();
    for i in 0..50 {
        let svc = svc.clone();
        handles.push(tokio::spawn(async move {
            svc.create(new_item(&format!("item-{}", i), 1.0, 1)).await.unwrap().id
        }));
    }
    let mut seen = HashSet::new();
    for h in handles {
        assert!(seen.insert(h.await.unwrap()));
    }
    let expected: HashSet<i64> = (1..=50).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn rejected_create_does_not_store_anything() {
    let svc = service();
    let err = svc.create(new_item("X", 1.0, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(svc.list(&ListQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_sorted_by_id_for_any_filter() {
    let svc = service();
    seed(&svc).await;
    let queries = [
        ListQuery::default(),
        ListQuery {
            q: Some("widget".into()),
            ..Default::default()
        },
        ListQuery {
            min_price: Some(5.0),
            max_price: Some(30.0),
            ..Default::default()
        },
        ListQuery {
            q: Some("e".into()),
            min_price: Some(1.0),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        },
    ];
    for q in &queries {
        let got = ids(&svc.list(q).await.unwrap());
        let mut sorted = got.clone();
        sorted.sort();
        assert_eq!(got, sorted, "query {:?}", q);
    }
}

#[tokio::test]
async fn name_query_is_case_insensitive_substring() {
    let svc = service();
    seed(&svc).await;
    let q = ListQuery {
        q: Some("abc".into()),
        ..Default::default()
    };
    let got = svc.list(&q).await.unwrap();
    let names: Vec<&str> = got.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["ABC crate", "xabcx"]);

    let all = svc.list(&ListQuery::default()).await.unwrap();
    for blank in ["", "  "] {
        let q = ListQuery {
            q: Some(blank.into()),
            ..Default::default()
        };
        assert_eq!(svc.list(&q).await.unwrap(), all);
    }
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let svc = service();
    seed(&svc).await;
    let q = ListQuery {
        min_price: Some(9.99),
        max_price: Some(25.0),
        ..Default::default()
    };
    assert_eq!(ids(&svc.list(&q).await.unwrap()), vec![1, 2, 5]);
}

#[tokio::test]
async fn inverted_price_range_is_invalid_argument() {
    let svc = service();
    let q = ListQuery {
        min_price: Some(10.0),
        max_price: Some(5.0),
        ..Default::default()
    };
    assert!(matches!(svc.list(&q).await, Err(AppError::InvalidArgument(_))));
}

#[tokio::test]
async fn negative_offset_is_invalid_argument() {
    let svc = service();
    let q = ListQuery {
        offset: Some(-1),
        ..Default::default()
    };
    assert!(matches!(svc.list(&q).await, Err(AppError::InvalidArgument(_))));
}

#[tokio::test]
async fn limit_is_clamped_to_ceiling() {
    let svc = service();
    for _ in 0..1005 {
        svc.create(new_item("bulk", 1.0, 1)).await.unwrap();
    }
    let huge = ListQuery {
        limit: Some(5000),
        ..Default::default()
    };
    let capped = ListQuery {
        limit: Some(1000),
        ..Default::default()
    };
    let a = svc.list(&huge).await.unwrap();
    assert_eq!(a.len(), 1000);
    assert_eq!(a, svc.list(&capped).await.unwrap());
    assert_eq!(svc.list(&ListQuery::default()).await.unwrap().len(), 100);
}

#[tokio::test]
async fn pagination_slices_and_past_end_is_empty() {
    let svc = service();
    seed(&svc).await;
    let page = ListQuery {
        limit: Some(2),
        offset: Some(2),
        ..Default::default()
    };
    assert_eq!(ids(&svc.list(&page).await.unwrap()), vec![3, 4]);
    let zero = ListQuery {
        limit: Some(0),
        ..Default::default()
    };
    assert!(svc.list(&zero).await.unwrap().is_empty());
    let past = ListQuery {
        offset: Some(100),
        ..Default::default()
    };
    assert!(svc.list(&past).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_update_leaves_item_unchanged() {
    let svc = service();
    let item = svc.create(new_item("Widget", 9.99, 10)).await.unwrap();
    let patch = ItemPatch {
        name: Some("Renamed".into()),
        price: Some(-1.0),
        stock: None,
    };
    let err = svc.update(item.id, patch).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(svc.get(item.id).await.unwrap(), Some(item));
}

#[tokio::test]
async fn update_changes_only_present_fields() {
    let svc = service();
    let item = svc.create(new_item("Widget", 9.99, 10)).await.unwrap();
    let patch = ItemPatch {
        name: Some("Xy".into()),
        ..Default::default()
    };
    let updated = svc.update(item.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.name, "Xy");
    assert_eq!(updated.price, 9.99);
    assert_eq!(updated.stock, 10);
}

#[tokio::test]
async fn empty_update_returns_current_state() {
    let svc = service();
    let item = svc.create(new_item("Widget", 9.99, 10)).await.unwrap();
    let same = svc.update(item.id, ItemPatch::default()).await.unwrap();
    assert_eq!(same, Some(item));
}

#[tokio::test]
async fn missing_id_is_none_for_get_and_update() {
    let svc = service();
    assert_eq!(svc.get(404).await.unwrap(), None);
    let patch = ItemPatch {
        stock: Some(1),
        ..Default::default()
    };
    assert_eq!(svc.update(404, patch).await.unwrap(), None);
}

#[tokio::test]
async fn widget_end_to_end() {
    let svc = service();
    let created = svc.create(new_item("Widget", 9.99, 10)).await.unwrap();
    assert_eq!(created.id, 1);

    let patch = ItemPatch {
        stock: Some(5),
        ..Default::default()
    };
    svc.update(1, patch).await.unwrap().unwrap();

    let got = svc.get(1).await.unwrap().unwrap();
    assert_eq!(got.id, 1);
    assert_eq!(got.name, "Widget");
    assert_eq!(got.price, 9.99);
    assert_eq!(got.stock, 5);

    let q = ListQuery {
        min_price: Some(10.0),
        ..Default::default()
    };
    assert!(svc.list(&q).await.unwrap().is_empty());
}
