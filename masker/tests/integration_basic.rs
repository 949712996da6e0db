//! End-to-end tests for the public masking API.
//!
//! These tests exercise the integration of:
//! - `#[derive(Mask)]` on structs, tuple structs, enums and generics,
//! - the ready-made leaves and their policies, and
//! - the properties every masked clone must have.

#![cfg(feature = "policy")]

use std::{
    collections::{BTreeMap, HashMap},
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use masker::{
    mask, mask_with_options, BankCard, Email, IdCard, Kind, Mask, MaskOptions, Maskable,
    MaskedString, Name, Password, Phone, Token,
};

#[derive(Clone, Debug, Default, PartialEq, Mask)]
#[cfg_attr(feature = "slog", derive(serde::Serialize))]
struct Profile {
    name: Name,
    email: Email,
    phone: Phone,
    age: u8,
    tags: Vec<String>,
}

fn profile() -> Profile {
    Profile {
        name: Name::from("Alice"),
        email: Email::from("alice@example.com"),
        phone: Phone::from("13800001234"),
        age: 31,
        tags: vec!["vip".into()],
    }
}

#[test]
fn derived_struct_masks_every_leaf() {
    let masked = mask(&profile());
    assert_eq!(masked.name.expose(), "A****");
    assert_eq!(masked.email.expose(), "a****@example.com");
    assert_eq!(masked.phone.expose(), "138****1234");
    assert_eq!(masked.age, 31);
    assert_eq!(masked.tags, ["vip"]);
}

#[test]
fn input_is_never_mutated() {
    let original = profile();
    let _ = original.masked();
    assert_eq!(original, profile());
}

#[test]
fn zero_values_come_back_unchanged() {
    assert_eq!(mask(&Profile::default()), Profile::default());
    assert!(Profile::default().is_zero());
    assert!(!profile().is_zero());
    assert_eq!(profile().kind(), Kind::Struct);
}

#[test]
fn values_without_capability_types_are_deep_copies() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Order {
        id: u64,
        note: String,
        lines: Vec<(String, u32)>,
        attributes: BTreeMap<String, Vec<String>>,
        discount: Option<f64>,
    }

    let mut attributes = BTreeMap::new();
    attributes.insert("color".to_string(), vec!["red".to_string()]);
    let order = Order {
        id: 7,
        note: "13800001234".into(),
        lines: vec![("apple".into(), 3), ("pear".into(), 1)],
        attributes,
        discount: Some(0.1),
    };

    assert_eq!(mask(&order), order);
}

#[test]
fn shape_is_preserved_at_depth() {
    let mut groups: HashMap<String, Vec<Vec<Phone>>> = HashMap::new();
    groups.insert(
        "team".into(),
        vec![
            vec![Phone::from("13800001234"), Phone::default()],
            vec![],
            vec![Phone::from("13900002222")],
        ],
    );
    groups.insert("empty".into(), Vec::new());

    let masked = mask(&groups);
    let mut keys: Vec<_> = masked.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["empty", "team"]);

    let team = &masked["team"];
    let lengths: Vec<_> = team.iter().map(Vec::len).collect();
    assert_eq!(lengths, [2, 0, 1]);
    assert_eq!(team[0][0].expose(), "138****1234");
    assert_eq!(team[0][1], Phone::default());
    assert_eq!(team[2][0].expose(), "139****2222");
}

#[test]
fn clone_shares_no_storage_with_the_input() {
    let shared = Rc::new(Phone::from("13800001234"));
    let masked = mask(&shared);
    assert!(!Rc::ptr_eq(&shared, &masked));
    assert_eq!(shared.expose(), "13800001234");

    let shared = Arc::new(vec![Token::from("sk_live_abcd1234")]);
    let masked = mask(&shared);
    assert!(!Arc::ptr_eq(&shared, &masked));

    let original = vec![vec![1_u8, 2], vec![3]];
    let mut copy = mask(&original);
    copy[0].push(9);
    assert_eq!(original, vec![vec![1_u8, 2], vec![3]]);
}

#[test]
fn masking_twice_never_reveals_more() {
    let phone = Phone::from("13800001234");
    let once = phone.masked();
    let twice = once.masked();
    assert_eq!(twice, once);

    #[derive(Clone, Debug, Default, PartialEq, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    #[mask(leaf)]
    struct Length(String);

    impl MaskedString for Length {
        fn masked_string(&self) -> String {
            format!("<{} chars>", self.0.chars().count())
        }
    }

    let once = Length("secret".into()).masked();
    assert_eq!(once.0, "<6 chars>");
    let twice = once.masked();
    assert_eq!(twice.0, "<9 chars>");
}

#[test]
fn tuple_structs_and_skipped_fields() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Card(BankCard, #[mask(skip)] Duration);

    let card = Card(BankCard::from("6222020200112233445"), Duration::from_secs(5));
    let masked = mask(&card);
    assert_eq!(masked.0.expose(), "***************3445");
    assert_eq!(masked.1, Duration::from_secs(5));

    // A skipped field does not count towards the zero check.
    assert!(Card(BankCard::default(), Duration::from_secs(5)).is_zero());
}

#[test]
fn enums_mask_the_active_variant() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    enum Credential {
        Anonymous,
        Password(Password),
        Identity { id: IdCard, verified: bool },
    }

    assert_eq!(mask(&Credential::Anonymous), Credential::Anonymous);
    assert_eq!(
        mask(&Credential::Password(Password::from("hunter2"))),
        Credential::Password(Password::from("******"))
    );
    assert_eq!(
        mask(&Credential::Identity {
            id: IdCard::from("110101199003071234"),
            verified: true,
        }),
        Credential::Identity {
            id: IdCard::from("110***********1234"),
            verified: true,
        }
    );
    assert!(Credential::Anonymous.is_zero());
}

#[test]
fn generic_containers_are_walked() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Page<T> {
        items: Vec<T>,
        total: usize,
    }

    let page = Page {
        items: vec![Email::from("bob@example.com"), Email::from("carol@example.org")],
        total: 2,
    };
    let masked = mask(&page);
    assert_eq!(masked.items[0].expose(), "b**@example.com");
    assert_eq!(masked.items[1].expose(), "c****@example.org");
    assert_eq!(masked.total, 2);
}

#[test]
fn report_counts_masked_leaves_and_depth() {
    let outcome = mask_with_options(&profile(), MaskOptions::new()).unwrap();
    assert_eq!(outcome.report.masked, 3);
    assert_eq!(outcome.report.dropped, 0);
    // profile -> tags -> element
    assert_eq!(outcome.report.deepest, 3);
    assert_eq!(outcome.into_inner(), mask(&profile()));
}
