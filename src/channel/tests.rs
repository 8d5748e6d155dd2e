//! Tests for the broadcast notification channel

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::broadcasting::{
    BroadcastDispatcher, BroadcastError, BroadcastMessage, BroadcastPayload, BroadcastResult,
    Channel, PendingBroadcast,
};
use crate::channel::{BroadcastChannel, dotted_kind, notifiable_channel_name};
use crate::notification::{
    AnonymousNotifiable, Entity, Notifiable, Notification, NotificationChannel,
    NotificationError, NotificationResult, Record, TableRegistry,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Dispatched {
    Sent(PendingBroadcast),
    Queued(String, PendingBroadcast),
}

#[derive(Default)]
struct RecordingDispatcher {
    dispatched: Mutex<Vec<Dispatched>>,
    fail_send: bool,
}

impl RecordingDispatcher {
    fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    fn dispatched(&self) -> Vec<Dispatched> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl BroadcastDispatcher for RecordingDispatcher {
    async fn send(&self, broadcast: PendingBroadcast) -> BroadcastResult<()> {
        if self.fail_send {
            return Err(BroadcastError::Connection("connection refused".to_string()));
        }
        self.dispatched.lock().unwrap().push(Dispatched::Sent(broadcast));
        Ok(())
    }

    fn queue(&self, broadcast: PendingBroadcast, queue: &str) -> BroadcastResult<()> {
        self.dispatched
            .lock()
            .unwrap()
            .push(Dispatched::Queued(queue.to_string(), broadcast));
        Ok(())
    }
}

fn channel_with(dispatcher: Arc<RecordingDispatcher>) -> BroadcastChannel {
    BroadcastChannel::new(Map::new(), dispatcher, Arc::new(TableRegistry::new()))
}

fn users_record(id: i64) -> Notifiable {
    Notifiable::from(Record::new("Users").set("id", id))
}

/// Notification with every broadcast capability set
struct TestBroadcastNotification {
    id: String,
}

impl Notification for TestBroadcastNotification {
    fn id(&self) -> &str {
        &self.id
    }

    fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
        vec!["broadcast".to_string()]
    }

    fn to_broadcast(&self, notifiable: &Notifiable) -> NotificationResult<Option<BroadcastPayload>> {
        let mut data = Map::new();
        data.insert("message".to_string(), json!("Test notification"));
        data.insert(
            "user_id".to_string(),
            notifiable.get("id").unwrap_or(Value::Null),
        );
        Ok(Some(BroadcastPayload::Data(data)))
    }

    fn broadcast_as(&self) -> Option<String> {
        Some("notification.test.broadcast".to_string())
    }

    fn broadcast_on(&self) -> Vec<Channel> {
        vec![Channel::private("test-channel")]
    }
}

/// Notification relying on every default
struct PlainNotification;

impl Notification for PlainNotification {
    fn id(&self) -> &str {
        "plain-1"
    }

    fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
        vec!["broadcast".to_string()]
    }
}

struct OrderShipped;

impl Notification for OrderShipped {
    fn id(&self) -> &str {
        "order-7"
    }

    fn kind(&self) -> &str {
        "App::Notifications::OrderShipped"
    }

    fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
        vec!["broadcast".to_string()]
    }

    fn to_broadcast(&self, _notifiable: &Notifiable) -> NotificationResult<Option<BroadcastPayload>> {
        let message = BroadcastMessage::default()
            .with("order", 7)
            .with("id", "spoofed")
            .with("type", "spoofed");
        Ok(Some(message.into()))
    }

    fn broadcast_queue(&self) -> Option<String> {
        Some("notifications".to_string())
    }
}

struct BrokenPayload;

impl Notification for BrokenPayload {
    fn id(&self) -> &str {
        "broken"
    }

    fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
        vec!["broadcast".to_string()]
    }

    fn to_broadcast(&self, _notifiable: &Notifiable) -> NotificationResult<Option<BroadcastPayload>> {
        Err(NotificationError::Payload("template missing".to_string()))
    }
}

/// Entity with an explicit broadcast channel
struct User {
    id: i64,
}

impl Entity for User {
    fn source(&self) -> &str {
        "Users"
    }

    fn get(&self, field: &str) -> Option<Value> {
        (field == "id").then(|| json!(self.id))
    }

    fn receives_broadcast_notifications_on(&self) -> Option<String> {
        Some(format!("users.{}", self.id))
    }
}

/// Entity relying on the default naming scheme
struct Admin {
    id: i64,
}

impl Entity for Admin {
    fn source(&self) -> &str {
        "Users"
    }

    fn get(&self, field: &str) -> Option<Value> {
        (field == "id").then(|| json!(self.id))
    }
}

// ============================================================================
// send()
// ============================================================================

#[tokio::test]
async fn test_send_broadcasts_notification() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));
    let notification = TestBroadcastNotification {
        id: "test-id-123".to_string(),
    };

    let result = channel.send(&users_record(1), &notification).await;
    assert!(result.is_ok());

    let dispatched = dispatcher.dispatched();
    assert_eq!(dispatched.len(), 1);
    let Dispatched::Sent(pending) = &dispatched[0] else {
        panic!("expected a synchronous send, got {:?}", dispatched[0]);
    };
    assert_eq!(pending.channels(), &[Channel::private("test-channel")]);
    assert_eq!(pending.event_name(), "notification.test.broadcast");

    let payload = pending.payload();
    assert_eq!(payload.get("message"), Some(&json!("Test notification")));
    assert_eq!(payload.get("user_id"), Some(&json!(1)));
    assert_eq!(payload.get("id"), Some(&json!("test-id-123")));
    assert_eq!(
        payload.get("type"),
        Some(&json!(std::any::type_name::<TestBroadcastNotification>()))
    );
}

#[tokio::test]
async fn test_send_defaults_to_recipient_private_channel() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));
    let notifiable = Notifiable::from(
        Record::new("Users")
            .with_kind("Cake::ORM::Entity")
            .set("id", 123),
    );

    channel.send(&notifiable, &PlainNotification).await.unwrap();

    let dispatched = dispatcher.dispatched();
    let Dispatched::Sent(pending) = &dispatched[0] else {
        panic!("expected a synchronous send");
    };
    assert_eq!(pending.channels(), &[Channel::private("Cake.ORM.Entity.123")]);
}

#[tokio::test]
async fn test_send_without_payload_capability_only_has_id_and_type() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));

    channel.send(&users_record(3), &PlainNotification).await.unwrap();

    let dispatched = dispatcher.dispatched();
    let Dispatched::Sent(pending) = &dispatched[0] else {
        panic!("expected a synchronous send");
    };
    let mut keys: Vec<&str> = pending.payload().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "type"]);
    assert_eq!(pending.payload()["id"], json!("plain-1"));
}

#[tokio::test]
async fn test_send_queues_when_queue_name_is_set() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));

    channel.send(&users_record(9), &OrderShipped).await.unwrap();

    let dispatched = dispatcher.dispatched();
    assert_eq!(dispatched.len(), 1);
    let Dispatched::Queued(queue, pending) = &dispatched[0] else {
        panic!("expected a queued broadcast, got {:?}", dispatched[0]);
    };
    assert_eq!(queue, "notifications");
    assert_eq!(pending.event_name(), "App.Notifications.OrderShipped");
}

#[tokio::test]
async fn test_id_and_type_overwrite_payload_keys() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));

    channel.send(&users_record(9), &OrderShipped).await.unwrap();

    let dispatched = dispatcher.dispatched();
    let Dispatched::Queued(_, pending) = &dispatched[0] else {
        panic!("expected a queued broadcast");
    };
    let payload = pending.payload();
    assert_eq!(payload.len(), 3);
    assert_eq!(payload["order"], json!(7));
    assert_eq!(payload["id"], json!("order-7"));
    assert_eq!(payload["type"], json!("App::Notifications::OrderShipped"));
}

#[tokio::test]
async fn test_transport_errors_propagate() {
    let channel = channel_with(Arc::new(RecordingDispatcher::failing()));

    let err = channel
        .send(&users_record(1), &PlainNotification)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NotificationError::Broadcast(BroadcastError::Connection(_))
    ));
}

#[tokio::test]
async fn test_payload_errors_propagate_before_dispatch() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let channel = channel_with(Arc::clone(&dispatcher));

    let err = channel
        .send(&users_record(1), &BrokenPayload)
        .await
        .unwrap_err();
    assert!(matches!(err, NotificationError::Payload(_)));
    assert!(dispatcher.dispatched().is_empty());
}

// ============================================================================
// Event names
// ============================================================================

#[test]
fn test_event_name_uses_broadcast_as() {
    let channel = channel_with(Arc::new(RecordingDispatcher::default()));
    let notification = TestBroadcastNotification { id: "x".to_string() };
    assert_eq!(channel.event_name(&notification), "notification.test.broadcast");
}

#[test]
fn test_event_name_derived_from_kind() {
    let channel = channel_with(Arc::new(RecordingDispatcher::default()));
    assert_eq!(channel.event_name(&OrderShipped), "App.Notifications.OrderShipped");

    let derived = channel.event_name(&PlainNotification);
    assert_eq!(
        derived,
        std::any::type_name::<PlainNotification>().replace("::", ".")
    );
    assert!(!derived.contains("::"));
    assert!(derived.ends_with(".PlainNotification"));
}

// ============================================================================
// Recipient channel names
// ============================================================================

#[test]
fn test_channel_name_for_generic_record() {
    let notifiable = Notifiable::from(
        Record::new("Users")
            .with_kind("Cake::ORM::Entity")
            .set("id", 789),
    );
    let name = notifiable_channel_name(&notifiable, &TableRegistry::new()).unwrap();
    assert_eq!(name, "Cake.ORM.Entity.789");
}

#[test]
fn test_channel_name_uses_receives_broadcast_notifications_on() {
    let channel = channel_with(Arc::new(RecordingDispatcher::default()));
    let name = channel
        .notifiable_channel_name(&Notifiable::entity(User { id: 456 }))
        .unwrap();
    assert_eq!(name, "users.456");
}

#[test]
fn test_channel_name_for_entity_type() {
    let name = notifiable_channel_name(&Notifiable::entity(Admin { id: 123 }), &TableRegistry::new())
        .unwrap();
    assert_eq!(
        name,
        format!("{}.123", std::any::type_name::<Admin>().replace("::", "."))
    );
    assert!(name.ends_with(".Admin.123"));
}

#[test]
fn test_channel_name_for_anonymous_recipient() {
    let locator = TableRegistry::new();

    let bare = Notifiable::from(AnonymousNotifiable::new());
    assert_eq!(notifiable_channel_name(&bare, &locator).unwrap(), "anonymous");

    let routed = Notifiable::from(AnonymousNotifiable::new().route("broadcast", "custom-route"));
    assert_eq!(notifiable_channel_name(&routed, &locator).unwrap(), "custom-route");

    let other_route = Notifiable::from(AnonymousNotifiable::new().route("mail", "a@example.com"));
    assert_eq!(notifiable_channel_name(&other_route, &locator).unwrap(), "anonymous");
}

#[test]
fn test_channel_name_uses_first_column_of_composite_key() {
    let locator = TableRegistry::new().with_table("Memberships", ["org_id", "user_id"]);
    let notifiable = Notifiable::from(
        Record::new("Memberships")
            .with_kind("App::Membership")
            .set("org_id", 5)
            .set("user_id", 8),
    );
    assert_eq!(
        notifiable_channel_name(&notifiable, &locator).unwrap(),
        "App.Membership.5"
    );
}

#[test]
fn test_channel_name_renders_string_keys_raw() {
    let locator = TableRegistry::new().with_table("Accounts", ["uuid"]);
    let notifiable = Notifiable::from(
        Record::new("Accounts")
            .with_kind("App::Account")
            .set("uuid", "9f1c"),
    );
    assert_eq!(
        notifiable_channel_name(&notifiable, &locator).unwrap(),
        "App.Account.9f1c"
    );
}

#[test]
fn test_channel_name_missing_primary_key() {
    let err = notifiable_channel_name(
        &Notifiable::from(Record::new("Users")),
        &TableRegistry::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        NotificationError::MissingPrimaryKey { source_name, field }
            if source_name == "Users" && field == "id"
    ));
}

#[test]
fn test_channel_name_unknown_table_in_strict_registry() {
    let err = notifiable_channel_name(&users_record(1), &TableRegistry::strict()).unwrap_err();
    assert!(matches!(err, NotificationError::UnknownTable(_)));
}

// ============================================================================
// Property tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_dotted_kind_joins_segments(
            segments in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,10}", 1..6)
        ) {
            let kind = segments.join("::");
            let dotted = dotted_kind(&kind);
            prop_assert!(!dotted.contains("::"));
            prop_assert_eq!(dotted.split('.').collect::<Vec<_>>(), segments.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn property_default_channel_name_ends_with_key(
            kind in "[A-Z][a-z]{1,8}(::[A-Z][a-z]{1,8}){0,3}",
            id in 0i64..1_000_000
        ) {
            let notifiable = Notifiable::from(Record::new("Things").with_kind(kind.clone()).set("id", id));
            let name = notifiable_channel_name(&notifiable, &TableRegistry::new()).unwrap();
            prop_assert_eq!(name, format!("{}.{}", kind.replace("::", "."), id));
        }
    }
}
