//! Tests for introspect module

use super::*;
use crate::classify::{ClientError, ClientErrorKind};
use crate::error::Error;
use crate::fixtures::*;
use test_case::test_case;

// ============================================================================
// TypeKey Tests
// ============================================================================

#[test]
fn test_type_key_identity() {
    assert_eq!(TypeKey::of::<String>(), TypeKey::of::<String>());
    assert_ne!(TypeKey::of::<String>(), TypeKey::of::<&'static str>());
    assert_eq!(TypeKey::unit(), TypeKey::of::<()>());
    assert_eq!(TypeKey::of::<Vec<String>>().to_string(), "Vec<String>");
}

#[test_case("alloc::string::String", "String")]
#[test_case("alloc::vec::Vec<my_crate::model::Thing>", "Vec<Thing>")]
#[test_case("core::option::Option<alloc::string::String>", "Option<String>")]
#[test_case("(u8, a::B)", "(u8, B)")]
#[test_case("ListThingsRequest", "ListThingsRequest")]
fn test_short_name(full: &str, expected: &str) {
    assert_eq!(short_name(full), expected);
}

// ============================================================================
// Member Tests
// ============================================================================

#[test]
fn test_getter_call() {
    let member = Member::getter("things", |r: &ListThingsResponse| r.things.clone());
    let response = ListThingsResponse {
        things: vec!["a".to_string()],
        next_token: None,
    };

    let value = member.call(&response, None).unwrap();
    assert_eq!(*value.downcast::<Vec<String>>().unwrap(), vec!["a"]);
    assert_eq!(member.param(), None);
    assert_eq!(member.receiver(), TypeKey::of::<ListThingsResponse>());
    assert!(!member.mutates_receiver());
}

#[test]
fn test_function_call() {
    let member = Member::function("next_token", ListThingsRequest::with_next_token);
    let request = ListThingsRequest::default();

    let value = member
        .call(&request, Some(Box::new("t1".to_string())))
        .unwrap();
    let next = value.downcast::<ListThingsRequest>().unwrap();
    assert_eq!(next.next_token.as_deref(), Some("t1"));
    assert_eq!(member.param(), Some(TypeKey::of::<String>()));
}

#[test]
fn test_method_propagates_client_error() {
    let member = Member::method("list", |_: &ThingsClient, _: ListThingsRequest| {
        Err::<ListThingsResponse, _>(ClientError::new(ClientErrorKind::Rejected, "nope"))
    });
    let client = ThingsClient::new(Script::default());

    let err = member
        .call(&client, Some(Box::new(ListThingsRequest::default())))
        .unwrap_err();
    assert_eq!(
        err.client_error().map(ClientError::kind),
        Some(ClientErrorKind::Rejected)
    );
}

#[test]
fn test_setter_requires_mutable_receiver() {
    let member = Member::setter("set_next_token", |r: &mut ListQueuesRequest, t: String| {
        r.next_token = Some(t);
    });
    let mut request = ListQueuesRequest::default();

    assert!(member.mutates_receiver());
    assert_eq!(member.return_type(), TypeKey::unit());

    let err = member
        .call(&request, Some(Box::new("t".to_string())))
        .unwrap_err();
    assert!(matches!(err, Error::SignatureMismatch { .. }));

    member
        .call_mut(&mut request, Some(Box::new("t".to_string())))
        .unwrap();
    assert_eq!(request.next_token.as_deref(), Some("t"));
}

#[test]
fn test_call_with_wrong_receiver() {
    let member = Member::getter("things", |r: &ListThingsResponse| r.things.clone());

    let err = member.call(&ListBucketsResponse::default(), None).unwrap_err();
    match err {
        Error::SignatureMismatch { member, expected } => {
            assert_eq!(member, "things");
            assert_eq!(expected, "ListThingsResponse");
        }
        other => panic!("Expected SignatureMismatch, got {other:?}"),
    }
}

#[test]
fn test_call_with_wrong_or_missing_argument() {
    let member = Member::function("max_results", ListThingsRequest::with_max_results);
    let request = ListThingsRequest::default();

    let err = member
        .call(&request, Some(Box::new("ten".to_string())))
        .unwrap_err();
    assert!(err.to_string().contains("u32"));

    let err = member.call(&request, None).unwrap_err();
    assert!(matches!(err, Error::SignatureMismatch { .. }));
}

#[test]
fn test_member_display_and_visibility() {
    let member = Member::function("next_token", ListThingsRequest::with_next_token);
    assert_eq!(
        member.to_string(),
        "fn next_token(&self, String) -> ListThingsRequest"
    );
    assert!(member.is_public());

    let hidden = member.private();
    assert_eq!(hidden.visibility(), Visibility::Private);

    let setter = Member::setter("set_next_token", |r: &mut ListQueuesRequest, t: String| {
        r.next_token = Some(t);
    });
    assert_eq!(setter.to_string(), "fn set_next_token(&mut self, String) -> ()");
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_surface_of() {
    let surface = Surface::of::<ListThingsResponse>();

    assert_eq!(surface.key(), TypeKey::of::<ListThingsResponse>());
    assert!(surface.name().ends_with("::ListThingsResponse"));
    assert_eq!(surface.members().len(), 4);
}

#[test]
fn test_catalog_for_client() {
    let catalog = TypeCatalog::for_client::<ThingsClient>();

    assert_eq!(catalog.len(), 4);
    assert!(catalog.contains(std::any::type_name::<ListThingsResponse>()));
    assert!(!catalog.contains("ListThingsResponse"));

    let names: Vec<String> = catalog.names().into_iter().map(short_name).collect();
    assert_eq!(
        names,
        vec![
            "DescribeThingRequest",
            "DescribeThingResponse",
            "ListThingsRequest",
            "ListThingsResponse"
        ]
    );
}

#[test]
fn test_catalog_register_is_idempotent() {
    let mut catalog = TypeCatalog::new();
    assert!(catalog.is_empty());

    catalog
        .register::<ListQueuesResult>()
        .register::<ListQueuesResult>();
    assert_eq!(catalog.len(), 1);

    let surface = catalog
        .get(std::any::type_name::<ListQueuesResult>())
        .unwrap();
    assert_eq!(surface.key(), TypeKey::of::<ListQueuesResult>());
}

#[test_case("svc::ListThingsRequest", "Response", Some("svc::ListThingsResponse"))]
#[test_case("ListQueuesRequest", "Result", Some("ListQueuesResult"))]
#[test_case("svc::ListThings", "Response", None)]
#[test_case("Request", "Response", None)]
#[test_case("svc::Request", "Response", None)]
fn test_counterpart_name(request: &str, suffix: &str, expected: Option<&str>) {
    assert_eq!(counterpart_name(request, suffix).as_deref(), expected);
}
