use super::*;
use crate::domain::{Category, ItemAddress, ListError, ListId};
use crate::ports::outbound::ListRepository;

fn account(h: &Harness, list: &ListId, uid: &str) -> Result<ListSession, ListError> {
    ListSession::open(
        h.app.list_deps.clone(),
        ListTarget::Account {
            list: list.clone(),
            member: Uid::parse(uid).unwrap(),
        },
    )
}

#[test]
fn test_create_list_owner_is_only_member() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);

    let list = h.app.lists.create_list(&alice, "  Weekly  ", Vec::new()).unwrap();

    assert_eq!(list.name, "Weekly");
    assert_eq!(list.members, vec![alice.uid.clone()]);
    assert!(list.items.is_none());
    assert_eq!(list.created_at, NOW_MS);
    assert_eq!(
        h.app.lists.create_list(&alice, " ", Vec::new()),
        Err(ListError::EmptyInput)
    );
}

#[test]
fn test_lists_for_returns_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let bob = principal("bob", None);

    let older = h.app.lists.create_list(&alice, "Older", Vec::new()).unwrap();
    h.clock.0.store(NOW_MS + 1000, std::sync::atomic::Ordering::SeqCst);
    let newer = h.app.lists.create_list(&alice, "Newer", Vec::new()).unwrap();
    h.app.lists.create_list(&bob, "Bob's", Vec::new()).unwrap();

    let ids: Vec<ListId> = h
        .app
        .lists
        .lists_for(&alice)
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[test]
fn test_account_list_categorization_stamps_last_updated() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();

    let mut session = account(&h, &list.id, "alice").unwrap();
    session.add_items("milk\nbread").unwrap();

    let stored = ListRepository::get(h.store.as_ref(), &list.id).unwrap().unwrap();
    assert_eq!(stored.last_updated, Some(NOW_MS));
    assert_eq!(stored.items.unwrap().item_count(), 2);
    assert_eq!(stored.name, "Weekly");
}

#[test]
fn test_item_update_does_not_stamp_last_updated() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();
    let mut session = account(&h, &list.id, "alice").unwrap();
    session.add_items("milk").unwrap();

    h.clock.0.store(NOW_MS + 5000, std::sync::atomic::Ordering::SeqCst);
    session
        .toggle_check(ItemAddress::new(Category::DairyEggs, 0))
        .unwrap();

    let stored = ListRepository::get(h.store.as_ref(), &list.id).unwrap().unwrap();
    assert_eq!(stored.last_updated, Some(NOW_MS));
    assert!(stored.items.unwrap().get(Category::DairyEggs)[0].checked);
}

#[test]
fn test_non_member_cannot_open_list() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();

    assert!(matches!(
        account(&h, &list.id, "mallory"),
        Err(ListError::NotPermitted(_))
    ));
    assert!(matches!(
        account(&h, &ListId::parse("missing").unwrap(), "alice"),
        Err(ListError::NotFound(_))
    ));
}

#[test]
fn test_share_adds_member_once() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", Some("alice@example.com"));
    let bob = principal("bob", Some("bob@example.com"));
    h.app.billing.on_user_created(&alice).unwrap();
    h.app.billing.on_user_created(&bob).unwrap();
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();

    let shared = h
        .app
        .lists
        .share_list(&alice, &list.id, " Bob@Example.com ")
        .unwrap();
    assert_eq!(shared.members, vec![alice.uid.clone(), bob.uid.clone()]);
    let again = h
        .app
        .lists
        .share_list(&alice, &list.id, "bob@example.com")
        .unwrap();
    assert_eq!(again.members.len(), 2);

    // 共有されたメンバーは開いて編集できる
    let mut session = account(&h, &list.id, "bob").unwrap();
    session.add_items("apples").unwrap();
    assert_eq!(h.app.lists.lists_for(&bob).unwrap().len(), 1);
}

#[test]
fn test_share_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", Some("alice@example.com"));
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();

    assert_eq!(
        h.app.lists.share_list(&alice, &list.id, "  "),
        Err(ListError::EmptyInput)
    );
    assert!(matches!(
        h.app.lists.share_list(&alice, &list.id, "nobody@example.com"),
        Err(ListError::NotFound(_))
    ));
    assert!(matches!(
        h.app.lists.share_list(&alice, &list.id, "not-an-email"),
        Err(ListError::NotFound(_))
    ));
    let mallory = principal("mallory", None);
    assert!(matches!(
        h.app.lists.share_list(&mallory, &list.id, "alice@example.com"),
        Err(ListError::NotPermitted(_))
    ));
}

#[test]
fn test_only_owner_deletes() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", Some("alice@example.com"));
    let bob = principal("bob", Some("bob@example.com"));
    h.app.billing.on_user_created(&bob).unwrap();
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();
    h.app
        .lists
        .share_list(&alice, &list.id, "bob@example.com")
        .unwrap();

    assert!(matches!(
        h.app.lists.delete_list(&bob, &list.id),
        Err(ListError::NotPermitted(_))
    ));
    h.app.lists.delete_list(&alice, &list.id).unwrap();
    assert!(h.app.lists.lists_for(&alice).unwrap().is_empty());
    assert!(matches!(
        h.app.lists.delete_list(&alice, &list.id),
        Err(ListError::NotFound(_))
    ));
}

#[test]
fn test_add_meal_merges_ingredients_and_records_meal() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let list = h.app.lists.create_list(&alice, "Weekly", Vec::new()).unwrap();
    let mut session = account(&h, &list.id, "alice").unwrap();
    session.add_items("milk\nonion").unwrap();

    let meal = h
        .app
        .meals
        .create_meal(&alice, "Omelette", "eggs, onion\ncheese", None)
        .unwrap();
    let session = h.app.meals.add_meal_to_list(&alice, &meal.id, &list.id).unwrap();

    assert_eq!(
        sorted(session.items().unwrap().flatten_names()),
        vec!["cheese", "eggs", "milk", "onion"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(session.planned_meals(), &["Omelette".to_string()]);
    let stored = ListRepository::get(h.store.as_ref(), &list.id).unwrap().unwrap();
    assert_eq!(stored.planned_meals, vec!["Omelette".to_string()]);
}
