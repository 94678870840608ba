use pretty_assertions::assert_eq;
use structmap::{Kind, Reflect, Struct, Type, Value, convert};

#[derive(Debug, Default, PartialEq, Reflect)]
struct Account {
    #[structmap(rename = "name")]
    display_name: String,
    #[structmap(skip)]
    secret: String,
    r#type: String,
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct AccountEntity {
    name: Option<String>,
    secret: Option<String>,
    r#type: Option<String>,
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct Page<T> {
    items: Vec<T>,
    total: u64,
}

#[test]
fn rename_and_skip_change_correlation() {
    let src = Account {
        display_name: "Emil".into(),
        secret: "hunter2".into(),
        r#type: "admin".into(),
    };

    let mut got = AccountEntity::default();
    convert(&src, &mut got);

    let want = AccountEntity {
        name: Some("Emil".into()),
        secret: None,
        r#type: Some("admin".into()),
    };
    assert_eq!(got, want);
}

#[test]
fn fields_are_listed_in_declaration_order() {
    let account = Account::default();
    let names: Vec<_> = account.fields().iter().map(|f| f.name).collect();

    assert_eq!(names, ["name", "type"]);
}

#[test]
fn field_lookup_is_case_sensitive() {
    let mut account = AccountEntity::default();

    assert!(account.field_mut("name").is_some());
    assert!(account.field_mut("Name").is_none());
}

#[test]
fn generic_structures() {
    let src = Page {
        items: vec![1u32, 2, 3],
        total: 3,
    };

    let mut got = Page::<u32>::default();
    convert(&src, &mut got);
    assert_eq!(got, src);

    assert_eq!(Type::of::<Page<u32>>().kind(), Kind::Struct);
    assert_ne!(Type::of::<Page<u32>>(), Type::of::<Page<u64>>());
}

#[test]
fn derived_structures_expose_struct_view() {
    let account = Account::default();
    assert!(matches!(account.value(), Value::Struct(_)));
}
