use std::sync::Arc;

use valueguard_objects::{
    ClassDecl, ClassRegistry, Object, SharedUniverse, Value, ValueObjectError, value_object,
};

value_object! {
    /// Money transfer between two accounts.
    pub struct Transfer as "App\\Transfer" {
        amount: "/** @var int */",
        money: "/** @var \\App\\Money|null */",
        currency: "/** @var Currency */",
        note: "/** @var string|null */",
        payload: "/** @var mixed */",
        meta,
    }
    aliases {
        "Currency" => "App\\Currency",
    }
}

fn universe() -> SharedUniverse {
    valueguard_observability::init_for_tests();
    Arc::new(
        ClassRegistry::new()
            .with(ClassDecl::class("App\\Money"))
            .with(ClassDecl::class("App\\Euro").extends("App\\Money"))
            .with(ClassDecl::class("App\\Currency"))
            .with(ClassDecl::class("App\\Unrelated")),
    )
}

fn object(class: &str) -> Value {
    Value::from(Object::new(class))
}

fn base() -> Vec<(&'static str, Value)> {
    vec![
        ("amount", Value::from(5)),
        ("currency", object("App\\Currency")),
        ("payload", Value::from("x")),
    ]
}

#[test]
fn typed_accessors_read_validated_fields() {
    let transfer = Transfer::new(universe(), base()).unwrap();

    assert_eq!(transfer.amount(), &Value::Int(5));
    assert_eq!(transfer.money(), &Value::Null);
    assert_eq!(transfer.note(), &Value::Null);
    assert_eq!(transfer.meta(), &Value::Null);
    assert!(!transfer.as_value_object().is_initialised("meta"));
    assert!(transfer.as_value_object().is_initialised("note"));
}

#[test]
fn definition_is_built_once() {
    assert!(Arc::ptr_eq(&Transfer::definition(), &Transfer::definition()));
    assert_eq!(Transfer::definition().fields().len(), 6);
}

#[test]
fn subclass_instances_satisfy_class_fields() {
    let mut params = base();
    params.push(("money", object("App\\Euro")));
    let transfer = Transfer::new(universe(), params).unwrap();
    assert_eq!(transfer.money(), &object("App\\Euro"));
}

#[test]
fn unrelated_instance_is_rejected_with_field_fqn() {
    let mut params = base();
    params.push(("money", object("App\\Unrelated")));
    let err = Transfer::new(universe(), params).unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid type: expected App\\Transfer::money to be of type \\App\\Money, null, \
         instead got value `App\\Unrelated` (object)"
    );
}

#[test]
fn mixed_field_rejects_null() {
    let mut params = base();
    params.retain(|(name, _)| *name != "payload");
    params.push(("payload", Value::Null));

    let err = Transfer::new(universe(), params).unwrap_err();
    assert!(matches!(err, ValueObjectError::InvalidType(m) if m.fqn == "App\\Transfer::payload"));
}

#[test]
fn alias_field_accepts_aliased_class_only() {
    let mut params = base();
    params.retain(|(name, _)| *name != "currency");
    params.push(("currency", object("App\\Money")));

    assert!(matches!(
        Transfer::new(universe(), params),
        Err(ValueObjectError::InvalidType(_))
    ));
}

#[test]
fn untyped_field_accepts_anything() {
    let mut params = base();
    params.push(("meta", object("Vendor\\Anything")));
    let transfer = Transfer::new(universe(), params).unwrap();

    let updated = transfer.with("meta", Value::Null).unwrap();
    assert_eq!(updated.meta(), &Value::Null);
    assert_eq!(transfer.meta(), &object("Vendor\\Anything"));
}

#[test]
fn to_json_exposes_assigned_fields() {
    let transfer = Transfer::new(universe(), base()).unwrap();
    assert_eq!(
        transfer.as_value_object().to_json(),
        serde_json::json!({
            "amount": 5,
            "money": null,
            "currency": {},
            "note": null,
            "payload": "x",
        })
    );
}
