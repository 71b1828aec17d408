//! Scripted clients shared by unit tests
//!
//! Each client serves `steps[n]` for a request carrying the token `page-n`
//! (no token means step 0) and records every call it receives.

use crate::binding::Convention;
use crate::classify::{ClientError, ClientErrorKind};
use crate::introspect::{Introspect, Member, ServiceClient, TypeCatalog};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Script
// ============================================================================

pub enum Step {
    Page(Vec<String>, Option<String>),
    Fail(ClientErrorKind),
}

pub fn page(items: &[&str], next: Option<&str>) -> Step {
    Step::Page(
        items.iter().map(ToString::to_string).collect(),
        next.map(ToString::to_string),
    )
}

#[derive(Default)]
pub struct Script {
    steps: Vec<Step>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<Option<String>>>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn respond(
        &self,
        token: Option<&str>,
    ) -> Result<(Vec<String>, Option<String>), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.map(ToString::to_string));

        let index = token
            .and_then(|t| t.strip_prefix("page-"))
            .map_or(0, |n| n.parse::<usize>().unwrap());

        match &self.steps[index] {
            Step::Page(items, next) => Ok((items.clone(), next.clone())),
            Step::Fail(kind) => Err(ClientError::new(*kind, "scripted failure")),
        }
    }
}

pub fn three_pages() -> Script {
    Script::new(vec![
        page(&["a", "b"], Some("page-1")),
        page(&["c", "d"], Some("page-2")),
        page(&["e"], None),
    ])
}

// ============================================================================
// Builder generation: things
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListThingsRequest {
    pub max_results: Option<u32>,
    pub next_token: Option<String>,
}

impl ListThingsRequest {
    pub fn with_next_token(&self, token: String) -> Self {
        Self {
            next_token: Some(token),
            ..self.clone()
        }
    }

    pub fn with_max_results(&self, max: u32) -> Self {
        Self {
            max_results: Some(max),
            ..self.clone()
        }
    }
}

impl Introspect for ListThingsRequest {
    fn members() -> Vec<Member> {
        vec![
            Member::function("next_token", ListThingsRequest::with_next_token),
            Member::function("max_results", ListThingsRequest::with_max_results),
            Member::getter("current_token", |r: &ListThingsRequest| r.next_token.clone()),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListThingsResponse {
    pub things: Vec<String>,
    pub next_token: Option<String>,
}

impl Introspect for ListThingsResponse {
    fn members() -> Vec<Member> {
        vec![
            Member::getter("things", |r: &ListThingsResponse| r.things.clone()),
            Member::getter("next_token", |r: &ListThingsResponse| r.next_token.clone()),
            // Same shape as `things`, never selected
            Member::getter("sdk_fields", |_: &ListThingsResponse| vec!["field".to_string()]),
            Member::getter("raw_token", |r: &ListThingsResponse| r.next_token.clone()).private(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct DescribeThingRequest;

impl Introspect for DescribeThingRequest {
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DescribeThingResponse;

impl Introspect for DescribeThingResponse {
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

pub struct ThingsClient {
    pub script: Script,
    pub page_size: Mutex<Vec<Option<u32>>>,
}

impl ThingsClient {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            page_size: Mutex::new(Vec::new()),
        }
    }

    pub fn list_things(
        &self,
        request: ListThingsRequest,
    ) -> Result<ListThingsResponse, ClientError> {
        self.page_size.lock().unwrap().push(request.max_results);
        let (things, next_token) = self.script.respond(request.next_token.as_deref())?;
        Ok(ListThingsResponse { things, next_token })
    }
}

impl Introspect for ThingsClient {
    fn members() -> Vec<Member> {
        vec![
            Member::method("list_things", ThingsClient::list_things),
            Member::method("describe_thing", |_: &ThingsClient, _: DescribeThingRequest| {
                Ok(DescribeThingResponse)
            }),
        ]
    }
}

impl ServiceClient for ThingsClient {
    const CONVENTION: Convention = Convention::Builder;

    fn model_types(catalog: &mut TypeCatalog) {
        catalog
            .register::<ListThingsRequest>()
            .register::<ListThingsResponse>()
            .register::<DescribeThingRequest>()
            .register::<DescribeThingResponse>();
    }
}

// ============================================================================
// Builder generation: buckets (single page, no token)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListBucketsRequest;

impl Introspect for ListBucketsRequest {
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBucketsResponse {
    pub buckets: Vec<String>,
}

impl Introspect for ListBucketsResponse {
    fn members() -> Vec<Member> {
        vec![Member::getter("buckets", |r: &ListBucketsResponse| r.buckets.clone())]
    }
}

// ============================================================================
// Builder generation: objects (secondary `marker` tier)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListObjectsRequest {
    pub marker: Option<String>,
}

impl Introspect for ListObjectsRequest {
    fn members() -> Vec<Member> {
        vec![Member::function("marker", |r: &ListObjectsRequest, marker: String| {
            ListObjectsRequest {
                marker: Some(marker),
                ..r.clone()
            }
        })]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListObjectsResponse {
    pub contents: Vec<String>,
    pub common_prefixes: Vec<String>,
    pub next_marker: Option<String>,
}

impl Introspect for ListObjectsResponse {
    fn members() -> Vec<Member> {
        vec![
            Member::getter("contents", |r: &ListObjectsResponse| r.contents.clone()),
            Member::getter("common_prefixes", |r: &ListObjectsResponse| {
                r.common_prefixes.clone()
            }),
            Member::getter("marker", |r: &ListObjectsResponse| r.next_marker.clone()),
        ]
    }
}

pub struct StorageClient {
    pub script: Script,
}

impl Introspect for StorageClient {
    fn members() -> Vec<Member> {
        vec![
            Member::method("list_buckets", |c: &StorageClient, _: ListBucketsRequest| {
                let (buckets, _) = c.script.respond(None)?;
                Ok(ListBucketsResponse { buckets })
            }),
            Member::method("list_objects", |c: &StorageClient, r: ListObjectsRequest| {
                let (contents, next_marker) = c.script.respond(r.marker.as_deref())?;
                Ok(ListObjectsResponse {
                    contents,
                    common_prefixes: vec!["prefix/".to_string()],
                    next_marker,
                })
            }),
        ]
    }
}

impl ServiceClient for StorageClient {
    const CONVENTION: Convention = Convention::Builder;

    fn model_types(catalog: &mut TypeCatalog) {
        catalog
            .register::<ListBucketsResponse>()
            .register::<ListObjectsResponse>();
    }
}

// ============================================================================
// Mutable generation: queues
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListQueuesRequest {
    pub next_token: Option<String>,
}

impl Introspect for ListQueuesRequest {
    fn members() -> Vec<Member> {
        vec![Member::setter("set_next_token", |r: &mut ListQueuesRequest, token: String| {
            r.next_token = Some(token);
        })]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQueuesResult {
    pub queue_urls: Vec<String>,
    pub next_token: Option<String>,
}

impl Introspect for ListQueuesResult {
    fn members() -> Vec<Member> {
        vec![
            Member::getter("get_queue_urls", |r: &ListQueuesResult| r.queue_urls.clone()),
            Member::getter("get_next_token", |r: &ListQueuesResult| r.next_token.clone()),
        ]
    }
}

pub struct QueuesClient {
    pub script: Script,
}

impl Introspect for QueuesClient {
    fn members() -> Vec<Member> {
        vec![Member::method("list_queues", |c: &QueuesClient, r: ListQueuesRequest| {
            let (queue_urls, next_token) = c.script.respond(r.next_token.as_deref())?;
            Ok(ListQueuesResult {
                queue_urls,
                next_token,
            })
        })]
    }
}

impl ServiceClient for QueuesClient {
    const CONVENTION: Convention = Convention::Mutable;

    fn model_types(catalog: &mut TypeCatalog) {
        catalog
            .register::<ListQueuesRequest>()
            .register::<ListQueuesResult>();
    }
}

// ============================================================================
// Non-conforming clients
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListWidgetsRequest {
    pub next_token: Option<String>,
}

impl Introspect for ListWidgetsRequest {
    fn members() -> Vec<Member> {
        vec![Member::function("next_token", |_: &ListWidgetsRequest, token: String| {
            ListWidgetsRequest {
                next_token: Some(token),
            }
        })]
    }
}

/// Two equally qualifying token accessors
#[derive(Debug, Clone, Default)]
pub struct ListWidgetsResponse {
    pub widgets: Vec<String>,
    pub next_token: Option<String>,
}

impl Introspect for ListWidgetsResponse {
    fn members() -> Vec<Member> {
        vec![
            Member::getter("widgets", |r: &ListWidgetsResponse| r.widgets.clone()),
            Member::getter("next_token", |r: &ListWidgetsResponse| r.next_token.clone()),
            Member::getter("next_marker", |r: &ListWidgetsResponse| r.next_token.clone()),
        ]
    }
}

/// Has no registered result type
#[derive(Debug, Clone, Default)]
pub struct ListOrphansRequest;

impl Introspect for ListOrphansRequest {
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

pub struct WidgetsClient {
    pub script: Script,
}

impl Introspect for WidgetsClient {
    fn members() -> Vec<Member> {
        vec![Member::method("list_widgets", |c: &WidgetsClient, r: ListWidgetsRequest| {
            let (widgets, next_token) = c.script.respond(r.next_token.as_deref())?;
            Ok(ListWidgetsResponse {
                widgets,
                next_token,
            })
        })]
    }
}

impl ServiceClient for WidgetsClient {
    const CONVENTION: Convention = Convention::Builder;

    fn model_types(catalog: &mut TypeCatalog) {
        catalog.register::<ListWidgetsResponse>();
    }
}

/// A mutable-generation client whose request has no token setter
pub struct BrokenQueuesClient;

#[derive(Debug, Clone, Default)]
pub struct ListDeadLettersRequest;

impl Introspect for ListDeadLettersRequest {
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListDeadLettersResult {
    pub queue_urls: Vec<String>,
}

impl Introspect for ListDeadLettersResult {
    fn members() -> Vec<Member> {
        vec![
            Member::getter("get_queue_urls", |r: &ListDeadLettersResult| r.queue_urls.clone()),
            Member::getter("get_next_token", |_: &ListDeadLettersResult| {
                Some("page-1".to_string())
            }),
        ]
    }
}

impl Introspect for BrokenQueuesClient {
    fn members() -> Vec<Member> {
        vec![Member::method(
            "list_dead_letter_queues",
            |_: &BrokenQueuesClient, _: ListDeadLettersRequest| {
                Ok(ListDeadLettersResult::default())
            },
        )]
    }
}

impl ServiceClient for BrokenQueuesClient {
    const CONVENTION: Convention = Convention::Mutable;

    fn model_types(catalog: &mut TypeCatalog) {
        catalog.register::<ListDeadLettersResult>();
    }
}
