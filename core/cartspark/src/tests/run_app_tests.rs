use super::*;
use crate::cli::{parse_args_from, Config, ParseOutcome};
use crate::domain::billing::compute_signature;
use crate::domain::command::Command;
use crate::domain::{Category, ItemAddress, SubscriptionStatus};
use crate::ports::inbound::RunCartSpark;
use crate::ports::outbound::ListRepository;

/// スタブで組み立てた App を Runner で run する（テスト用の入口）
fn run_app(h: Harness, args: &[&str]) -> (Result<i32, Error>, Harness) {
    let config = match parse_args_from(std::iter::once("cartspark").chain(args.iter().copied())) {
        Ok(ParseOutcome::Config(c)) => c,
        other => panic!("unexpected parse outcome: {:?}", other),
    };
    run_config(h, config)
}

fn run_config(h: Harness, config: Config) -> (Result<i32, Error>, Harness) {
    let Harness {
        app,
        generator,
        store,
        auth,
        clock,
    } = h;
    let runner = crate::Runner { app };
    let result = runner.run(config);
    let h = Harness {
        app: runner.app,
        generator,
        store,
        auth,
        clock,
    };
    (result, h)
}

#[test]
fn test_run_app_with_help() {
    let tmp = tempfile::tempdir().unwrap();
    let (result, _) = run_config(Harness::new(tmp.path()), Config::default());
    assert_eq!(result.unwrap(), 0);
}

#[test]
fn test_guest_add_then_check() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());

    let (result, h) = run_app(h, &["add", "milk", "bread"]);
    assert_eq!(result.unwrap(), 0);
    let (result, h) = run_app(h, &["check", "bakery:0"]);
    assert_eq!(result.unwrap(), 0);

    let session = h.guest_session();
    let items = session.items().unwrap();
    assert!(items.item(ItemAddress::new(Category::Bakery, 0)).unwrap().checked);
    assert!(!items.item(ItemAddress::new(Category::DairyEggs, 0)).unwrap().checked);
}

#[test]
fn test_account_commands_require_sign_in() {
    let tmp = tempfile::tempdir().unwrap();
    for args in [
        &["list", "ls"][..],
        &["meal", "ls"][..],
        &["plan", "show"][..],
        &["account", "status"][..],
        &["show", "-l", "abc"][..],
    ] {
        let (result, _) = run_app(Harness::new(tmp.path()), args);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 64, "{:?}", args);
        assert!(err.to_string().contains("sign in"), "{}", err);
    }
}

#[test]
fn test_signed_in_list_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    h.auth.set(Some(principal("alice", Some("alice@example.com"))));

    let (result, h) = run_app(h, &["account", "signup"]);
    assert_eq!(result.unwrap(), 0);
    let (result, h) = run_app(h, &["list", "create", "Weekly"]);
    assert_eq!(result.unwrap(), 0);

    let alice = principal("alice", None);
    let list = h.app.lists.lists_for(&alice).unwrap().remove(0);
    let id = list.id.to_string();
    let (result, h) = run_app(h, &["add", "-l", &id, "apples"]);
    assert_eq!(result.unwrap(), 0);

    let stored = ListRepository::get(h.store.as_ref(), &list.id).unwrap().unwrap();
    assert_eq!(stored.items.unwrap().flatten_names(), vec!["apples".to_string()]);
    assert_eq!(
        h.app.billing.subscription_status(&alice).unwrap(),
        SubscriptionStatus::Inactive
    );
}

#[test]
fn test_ai_failure_maps_to_io_exit_code() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    h.generator.push(Ok(GenerationOutcome::Empty));

    let (result, h) = run_app(h, &["add", "milk"]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 74);
    assert_eq!(h.guest_session().items(), None);
}

#[test]
fn test_webhook_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let h = Harness::new(tmp.path());
    let alice = principal("alice", None);
    h.app.billing.on_user_created(&alice).unwrap();

    let payload = r#"{"type":"checkout.session.completed","data":{"object":{"client_reference_id":"alice","customer":"cus_9"}}}"#;
    let payload_path = tmp.path().join("event.json");
    std::fs::write(&payload_path, payload).unwrap();
    let ts = (NOW_MS / 1000) as i64;
    let signature = format!("t={},v1={}", ts, compute_signature(SECRET, ts, payload).unwrap());

    let config = Config {
        home_dir: None,
        command: Command::Webhook {
            signature: "t=1,v1=00".to_string(),
            payload_file: Some(payload_path.clone()),
        },
    };
    let (result, h) = run_config(h, config);
    assert_eq!(result.unwrap_err().exit_code(), 64);

    let config = Config {
        home_dir: None,
        command: Command::Webhook {
            signature,
            payload_file: Some(payload_path),
        },
    };
    let (result, h) = run_config(h, config);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(
        h.app.billing.subscription_status(&alice).unwrap(),
        SubscriptionStatus::Active
    );
}
