use super::*;
use crate::domain::{ListError, MealSlot, Weekday};
use crate::ports::outbound::{ListRepository, MealPlanRepository};
use common::error::Error;

#[test]
fn test_meal_create_edit_delete() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);

    assert_eq!(
        h.app.meals.create_meal(&alice, "Tacos", " , \n", None),
        Err(ListError::EmptyInput)
    );
    let meal = h
        .app
        .meals
        .create_meal(&alice, " Tacos ", "tortillas, beef\nlettuce", Some("Cook."))
        .unwrap();
    assert_eq!(meal.name, "Tacos");
    assert_eq!(meal.ingredients, vec!["tortillas", "beef", "lettuce"]);

    let edited = h
        .app
        .meals
        .edit_meal(&alice, &meal.id, "Fish Tacos", "tortillas, salmon", None)
        .unwrap();
    assert_eq!(edited.instructions.as_deref(), Some("Cook."));
    assert_eq!(h.app.meals.get_meal(&alice, &meal.id).unwrap(), edited);

    // 他人の食事は見えない
    let bob = principal("bob", None);
    assert!(matches!(
        h.app.meals.get_meal(&bob, &meal.id),
        Err(ListError::NotFound(_))
    ));

    h.app.meals.delete_meal(&alice, &meal.id).unwrap();
    assert!(h.app.meals.meals_for(&alice).unwrap().is_empty());
}

#[test]
fn test_meals_sorted_by_name() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    for name in ["waffles", "Apple Pie", "chili"] {
        h.app.meals.create_meal(&alice, name, "flour", None).unwrap();
    }
    let names: Vec<String> = h
        .app
        .meals
        .meals_for(&alice)
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Apple Pie", "chili", "waffles"]);
}

#[test]
fn test_catalog_filter_and_save() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);

    let all = h.app.meals.catalog(None).unwrap();
    assert!(!all.is_empty());
    let first = all[0].clone();
    let tag = first
        .tags
        .first()
        .cloned()
        .or(first.meal_type.clone())
        .unwrap();
    let filtered = h.app.meals.catalog(Some(tag.to_uppercase().as_str())).unwrap();
    assert!(filtered.contains(&first));
    assert!(filtered.iter().all(|m| m.matches(&tag)));

    let saved = h
        .app
        .meals
        .save_catalog_meal(&alice, &first.name.to_lowercase())
        .unwrap();
    assert_eq!(saved.name, first.name);
    assert_eq!(saved.ingredients, first.ingredients);

    let err: Error = h
        .app
        .meals
        .save_catalog_meal(&alice, "No Such Dish")
        .unwrap_err();
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn test_plan_is_created_lazily_and_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    assert!(MealPlanRepository::get(h.store.as_ref(), &alice.uid)
        .unwrap()
        .is_none());

    let plan = h.app.meal_plan.plan(&alice).unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.plan_version, 2);
    assert_eq!(
        MealPlanRepository::get(h.store.as_ref(), &alice.uid).unwrap(),
        Some(plan)
    );
}

#[test]
fn test_add_and_remove_planned_meals() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let meal = h
        .app
        .meals
        .create_meal(&alice, "Pancakes", "flour, milk, eggs", None)
        .unwrap();

    // 同じ枠に 2 回入れてもよい
    h.app
        .meal_plan
        .add_to_plan(&alice, &meal.id, Weekday::Monday, MealSlot::Breakfast)
        .unwrap();
    let plan = h
        .app
        .meal_plan
        .add_to_plan(&alice, &meal.id, Weekday::Monday, MealSlot::Breakfast)
        .unwrap();
    assert_eq!(plan.day(Weekday::Monday).slot(MealSlot::Breakfast).len(), 2);
    assert_eq!(
        plan.day(Weekday::Monday).slot(MealSlot::Breakfast)[0].name,
        "Pancakes"
    );

    let plan = h
        .app
        .meal_plan
        .remove_from_plan(&alice, Weekday::Monday, MealSlot::Breakfast, 0)
        .unwrap();
    assert_eq!(plan.day(Weekday::Monday).slot(MealSlot::Breakfast).len(), 1);
    assert!(matches!(
        h.app
            .meal_plan
            .remove_from_plan(&alice, Weekday::Monday, MealSlot::Dinner, 0),
        Err(ListError::NotFound(_))
    ));

    let missing = crate::domain::MealId::parse("nope").unwrap();
    assert!(matches!(
        h.app
            .meal_plan
            .add_to_plan(&alice, &missing, Weekday::Friday, MealSlot::Lunch),
        Err(ListError::NotFound(_))
    ));

    let plan = h.app.meal_plan.clear_plan(&alice).unwrap();
    assert!(plan.is_empty());
    assert_eq!(h.app.meal_plan.plan(&alice).unwrap(), plan);
}

#[test]
fn test_generate_shopping_list_from_plan() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    let pancakes = h
        .app
        .meals
        .create_meal(&alice, "Pancakes", "flour, milk, eggs", None)
        .unwrap();
    let omelette = h
        .app
        .meals
        .create_meal(&alice, "Omelette", "eggs, cheese", None)
        .unwrap();
    let gone = h
        .app
        .meals
        .create_meal(&alice, "Gone", "saffron", None)
        .unwrap();
    for (meal, day, slot) in [
        (&omelette, Weekday::Tuesday, MealSlot::Lunch),
        (&pancakes, Weekday::Sunday, MealSlot::Breakfast),
        (&pancakes, Weekday::Wednesday, MealSlot::Breakfast),
        (&gone, Weekday::Friday, MealSlot::Dinner),
    ] {
        h.app.meal_plan.add_to_plan(&alice, &meal.id, day, slot).unwrap();
    }
    // 削除済みの食事は飛ばす
    h.app.meals.delete_meal(&alice, &gone.id).unwrap();

    let session = h.app.meal_plan.generate_shopping_list(&alice).unwrap();

    assert_eq!(
        sorted(session.items().unwrap().flatten_names()),
        vec!["cheese", "eggs", "flour", "milk"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(
        session.planned_meals(),
        &["Pancakes".to_string(), "Omelette".to_string()]
    );
    let ListTarget::Account { list, .. } = session.target() else {
        panic!("expected an account list");
    };
    let stored = ListRepository::get(h.store.as_ref(), list).unwrap().unwrap();
    assert_eq!(stored.name, "Shopping List for 2026-02-07");
    assert_eq!(stored.owner_id, alice.uid);
    assert_eq!(stored.planned_meals, vec!["Pancakes", "Omelette"]);
}

#[test]
fn test_shopping_list_needs_ingredients() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    assert!(matches!(
        h.app.meal_plan.generate_shopping_list(&alice),
        Err(ListError::EmptyInput)
    ));
    assert!(h.app.lists.lists_for(&alice).unwrap().is_empty());
    assert!(h.generator.prompts().is_empty());
}
