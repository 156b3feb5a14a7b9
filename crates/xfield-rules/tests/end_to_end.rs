//! # End-to-End Rule Evaluation
//!
//! Declares rules through YAML documents and through the descriptor API,
//! then evaluates them against graphs snapshotted from ordinary Rust types.

use chrono::NaiveDate;
use xfield_core::{resolve_mut, Inspect, PropertyPath, Record, Value};
use xfield_rules::{
    ComparisonRule, ConditionDescriptor, PresenceRule, Rule, RuleDocument, RuleError, RuleSet,
};

fn path(raw: &str) -> PropertyPath {
    PropertyPath::parse(raw).unwrap()
}

#[derive(Clone, Copy)]
enum ContactMethod {
    Email,
    Phone,
}

struct Contact {
    method: Option<ContactMethod>,
    email: Option<String>,
    phone: String,
}

impl Inspect for Contact {
    fn inspect(&self) -> Value {
        let method = self.method.map(|m| match m {
            ContactMethod::Email => Value::enumeration("ContactMethod", "EMAIL"),
            ContactMethod::Phone => Value::enumeration("ContactMethod", "PHONE"),
        });
        Record::new("Contact")
            .with("method", method)
            .with("email", Inspect::inspect(&self.email))
            .with("phone", self.phone.inspect())
            .into()
    }
}

struct Booking {
    contact: Contact,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i32,
    max_guests: i64,
    allowed_rooms: Vec<Option<String>>,
    room: Option<String>,
}

impl Inspect for Booking {
    fn inspect(&self) -> Value {
        let allowed: Vec<Value> = self.allowed_rooms.iter().map(|r| r.inspect()).collect();
        Record::new("Booking")
            .with("contact", self.contact.inspect())
            .with("check_in", self.check_in.inspect())
            .with("check_out", self.check_out.inspect())
            .with("guests", self.guests.inspect())
            .with("max_guests", self.max_guests.inspect())
            .with("allowed_rooms", Value::array(allowed))
            .with("room", Inspect::inspect(&self.room))
            .into()
    }
}

fn booking() -> Booking {
    Booking {
        contact: Contact {
            method: Some(ContactMethod::Email),
            email: Some("guest@example.org".into()),
            phone: String::new(),
        },
        check_in: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        guests: 2,
        max_guests: 4,
        allowed_rooms: vec![None, Some("101".into()), Some("102".into())],
        room: Some("101".into()),
    }
}

const RULES: &str = r#"
rules:
  - name: email-required-for-email-contact
    presence:
      targets: [contact.email]
      condition:
        path: contact.method
        literals: [EMAIL]
  - name: phone-only-for-phone-contact
    presence:
      targets: [contact.phone]
      require_empty_when_satisfied: true
      condition:
        path: contact.method
        operator: not_equal_to
        literals: [PHONE]
  - name: check-out-after-check-in
    comparison:
      path: check_out
      basis: check_in
  - name: room-is-allowed
    presence:
      targets: [room]
      condition:
        path: room
        reference: allowed_rooms
"#;

fn compiled() -> RuleSet {
    RuleDocument::from_yaml_str(RULES).unwrap().compile().unwrap()
}

#[test]
fn valid_booking_passes_every_rule() {
    let outcomes = compiled().evaluate(&booking().inspect());
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert!(outcome.passed(), "{outcome:?}");
    }
}

#[test]
fn violations_are_reported_per_rule() {
    let mut b = booking();
    b.contact.email = Some(String::new());
    b.check_out = b.check_in;

    let outcomes = compiled().evaluate(&b.inspect());
    assert!(outcomes[0].is_violation());
    assert_eq!(outcomes[0].name.as_deref(), Some("email-required-for-email-contact"));
    assert_eq!(outcomes[0].property_path, "contact.email");
    assert!(outcomes[1].passed());
    assert!(outcomes[2].is_violation());
    assert!(outcomes[3].passed());
}

#[test]
fn switching_contact_method_flips_presence_requirements() {
    let mut b = booking();
    b.contact.method = Some(ContactMethod::Phone);
    b.contact.email = None;
    b.contact.phone = "555-0100".into();

    let outcomes = compiled().evaluate(&b.inspect());
    // Condition not satisfied: email must now be empty, and it is.
    assert!(outcomes[0].passed());
    assert!(outcomes[1].passed());

    b.contact.method = None;
    let outcomes = compiled().evaluate(&b.inspect());
    // No method: email must be empty, phone must be empty.
    assert!(outcomes[0].passed());
    assert!(outcomes[1].is_violation());
}

#[test]
fn null_reference_element_accepts_missing_room() {
    let set = compiled();
    let mut b = booking();

    b.room = None;
    // The condition matches via the null element, so the room must be filled.
    assert!(set.evaluate(&b.inspect())[3].is_violation());

    b.room = Some("999".into());
    // Unknown room: condition fails, so the room must be empty.
    assert!(set.evaluate(&b.inspect())[3].is_violation());
}

#[test]
fn mixed_integer_widths_are_a_configuration_error() {
    let set = RuleSet::new().with(ComparisonRule::at_most(path("guests"), path("max_guests")));
    let outcomes = set.evaluate(&booking().inspect());
    assert_eq!(
        outcomes[0].error(),
        Some(&RuleError::TypeMismatch {
            left: "i32".into(),
            right: "i64".into()
        })
    );
}

#[test]
fn comparison_follows_mutated_graph() {
    let rule: Rule = ComparisonRule::greater_than(path("field"), path("other")).into();
    let mut target = Value::from(
        Record::new("Pair")
            .with("field", 2i32)
            .with("other", 1i32),
    );
    assert!(rule.evaluate(&target).unwrap());

    *resolve_mut(&mut target, &path("other")).unwrap() = Value::I32(2);
    assert!(!rule.evaluate(&target).unwrap());

    target
        .as_record_mut()
        .unwrap()
        .set("other", 3i32)
        .unwrap();
    assert!(!rule.evaluate(&target).unwrap());
}

#[test]
fn presence_rule_over_inherited_members() {
    let base = Record::new("Party").with("tax_id", "");
    let company = Record::new("Company")
        .with("incorporated", true)
        .extends(base);
    let rule: Rule = PresenceRule::required_when(
        vec![path("tax_id")],
        ConditionDescriptor::is_true(path("incorporated")),
    )
    .unwrap()
    .into();

    let mut target = Value::from(company);
    assert!(!rule.evaluate(&target).unwrap());
    target.as_record_mut().unwrap().set("tax_id", "DE123").unwrap();
    assert!(rule.evaluate(&target).unwrap());
}

#[test]
fn rule_set_is_shareable_across_threads() {
    let set = std::sync::Arc::new(compiled());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let set = std::sync::Arc::clone(&set);
            std::thread::spawn(move || set.evaluate(&booking().inspect()).iter().all(|o| o.passed()))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
