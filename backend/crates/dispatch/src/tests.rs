//! Use case tests against an in-memory repository.

use std::sync::{Arc, Mutex};

use auth::Principal;
use auth::models::ability::Ability;
use auth::models::user_role::UserRole;
use kernel::id::{IncidentId, MessageId, UserId};

use crate::application::{
    AlertsUseCase, CreateAlertInput, CreateIncidentInput, CreateMessageInput, CreateSosInput,
    IncidentsUseCase, MessagesUseCase, SosMessageInput, SosUseCase, UpdateIncidentInput,
};
use crate::domain::entity::{alert::Alert, incident::Incident, message::Message, sos_alert::SosAlert};
use crate::domain::repository::{
    AlertRepository, IncidentRepository, MessageRecord, MessageRepository, MessageStats,
    SosRepository,
};
use crate::domain::value_object::{
    incident_status::IncidentStatus,
    message_kind::MessageKind,
    pagination::{Page, PageRequest},
    severity::AlertSeverity,
    sos_status::SosStatus,
};
use crate::error::{DispatchError, DispatchResult};

#[derive(Clone, Default)]
struct MemoryDispatchRepo {
    incidents: Arc<Mutex<Vec<Incident>>>,
    sos_alerts: Arc<Mutex<Vec<SosAlert>>>,
    alerts: Arc<Mutex<Vec<Alert>>>,
    messages: Arc<Mutex<Vec<Message>>>,
}

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(items, total, page)
}

impl IncidentRepository for MemoryDispatchRepo {
    async fn create(&self, incident: &Incident) -> DispatchResult<()> {
        self.incidents.lock().unwrap().push(incident.clone());
        Ok(())
    }

    async fn find_by_id(&self, incident_id: &IncidentId) -> DispatchResult<Option<Incident>> {
        Ok(self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.incident_id == *incident_id)
            .cloned())
    }

    async fn find_owned(
        &self,
        incident_id: &IncidentId,
        owner: &UserId,
    ) -> DispatchResult<Option<Incident>> {
        Ok(self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.incident_id == *incident_id && i.user_id == *owner)
            .cloned())
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        let items: Vec<_> = self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == *owner)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn list_all(
        &self,
        status: Option<IncidentStatus>,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        let items: Vec<_> = self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .filter(|i| status.is_none_or(|s| i.status == s))
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn update(&self, incident: &Incident) -> DispatchResult<()> {
        let mut incidents = self.incidents.lock().unwrap();
        if let Some(existing) = incidents
            .iter_mut()
            .find(|i| i.incident_id == incident.incident_id)
        {
            *existing = incident.clone();
        }
        Ok(())
    }
}

impl SosRepository for MemoryDispatchRepo {
    async fn create(&self, alert: &SosAlert) -> DispatchResult<()> {
        self.sos_alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<SosAlert>> {
        let items: Vec<_> = self
            .sos_alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == *owner)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }
}

impl AlertRepository for MemoryDispatchRepo {
    async fn create(&self, alert: &Alert) -> DispatchResult<()> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> DispatchResult<Page<Alert>> {
        let items = self.alerts.lock().unwrap().clone();
        Ok(paginate(items, page))
    }
}

impl MessageRepository for MemoryDispatchRepo {
    async fn create(&self, message: &Message) -> DispatchResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, message_id: &MessageId) -> DispatchResult<Option<MessageRecord>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.message_id == *message_id)
            .cloned()
            .map(|message| MessageRecord {
                message,
                user_name: None,
            }))
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        let items: Vec<_> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == *owner)
            .cloned()
            .map(|message| MessageRecord {
                message,
                user_name: None,
            })
            .collect();
        Ok(paginate(items, page))
    }

    async fn list_all(
        &self,
        kind: Option<MessageKind>,
        is_read: Option<bool>,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        let items: Vec<_> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| kind.is_none_or(|k| m.kind == k))
            .filter(|m| is_read.is_none_or(|r| m.is_read == r))
            .cloned()
            .map(|message| MessageRecord {
                message,
                user_name: None,
            })
            .collect();
        Ok(paginate(items, page))
    }

    async fn mark_read(&self, message_id: &MessageId) -> DispatchResult<()> {
        let mut messages = self.messages.lock().unwrap();
        if let Some(message) = messages.iter_mut().find(|m| m.message_id == *message_id) {
            message.is_read = true;
        }
        Ok(())
    }

    async fn stats(&self) -> DispatchResult<MessageStats> {
        let messages = self.messages.lock().unwrap();
        Ok(MessageStats {
            total: messages.len() as i64,
            unread: messages.iter().filter(|m| !m.is_read).count() as i64,
            sos: messages.iter().filter(|m| m.kind == MessageKind::Sos).count() as i64,
            incident: messages
                .iter()
                .filter(|m| m.kind == MessageKind::Incident)
                .count() as i64,
            general: messages
                .iter()
                .filter(|m| m.kind == MessageKind::General)
                .count() as i64,
        })
    }

    async fn unread_count(&self) -> DispatchResult<i64> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !m.is_read)
            .count() as i64)
    }
}

fn citizen(name: &str) -> Principal {
    Principal {
        user_id: UserId::new(),
        name: name.to_string(),
        role: UserRole::User,
    }
}

fn dispatcher() -> Principal {
    Principal {
        user_id: UserId::new(),
        name: "Operator".to_string(),
        role: UserRole::Admin,
    }
}

fn default_page() -> PageRequest {
    PageRequest::new(None, None).unwrap()
}

fn incident_input() -> CreateIncidentInput {
    CreateIncidentInput {
        incident_type: "flood".to_string(),
        description: "Street flooded near the bridge".to_string(),
        lat: 40.7128,
        lng: -74.0060,
        image_url: None,
    }
}

#[tokio::test]
async fn test_incident_lookup_is_owner_scoped() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = IncidentsUseCase::new(repo);

    let alice = citizen("Alice");
    let bob = citizen("Bob");

    let incident = use_case.create(&alice, incident_input()).await.unwrap();
    assert_eq!(incident.status, IncidentStatus::Pending);

    // Owner sees it
    let found = use_case.get_owned(&alice, incident.incident_id).await.unwrap();
    assert_eq!(found.incident_id, incident.incident_id);

    // Someone else gets the same answer as for a missing record
    let err = use_case
        .get_owned(&bob, incident.incident_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NotFound("Incident")));
}

#[tokio::test]
async fn test_incident_create_validates_fields() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = IncidentsUseCase::new(repo);
    let alice = citizen("Alice");

    let short = CreateIncidentInput {
        description: "too short".to_string(),
        ..incident_input()
    };
    assert!(matches!(
        use_case.create(&alice, short).await.unwrap_err(),
        DispatchError::Validation(_)
    ));

    let bad_coords = CreateIncidentInput {
        lat: 91.0,
        ..incident_input()
    };
    assert!(matches!(
        use_case.create(&alice, bad_coords).await.unwrap_err(),
        DispatchError::Validation(_)
    ));
}

#[tokio::test]
async fn test_admin_incident_filter_rejects_unknown_status() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = IncidentsUseCase::new(repo);
    let alice = citizen("Alice");

    use_case.create(&alice, incident_input()).await.unwrap();

    let err = use_case
        .list_all(Some("NOT_A_STATUS"), default_page())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let pending = use_case
        .list_all(Some("PENDING"), default_page())
        .await
        .unwrap();
    assert_eq!(pending.total, 1);

    let resolved = use_case
        .list_all(Some("RESOLVED"), default_page())
        .await
        .unwrap();
    assert_eq!(resolved.total, 0);
}

#[tokio::test]
async fn test_admin_incident_update_and_status_shortcuts() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = IncidentsUseCase::new(repo);
    let alice = citizen("Alice");

    let incident = use_case.create(&alice, incident_input()).await.unwrap();

    let err = use_case
        .update(
            incident.incident_id,
            UpdateIncidentInput {
                status: Some("BOGUS".to_string()),
                risk_score: None,
                risk_level: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let err = use_case
        .update(
            incident.incident_id,
            UpdateIncidentInput {
                status: None,
                risk_score: Some(250.0),
                risk_level: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let updated = use_case
        .update(
            incident.incident_id,
            UpdateIncidentInput {
                status: Some("UNDER_REVIEW".to_string()),
                risk_score: Some(72.5),
                risk_level: Some("high".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, IncidentStatus::UnderReview);
    assert_eq!(updated.risk_score, Some(72.5));

    let verified = use_case
        .set_status(incident.incident_id, IncidentStatus::Verified)
        .await
        .unwrap();
    assert_eq!(verified.status, IncidentStatus::Verified);

    let resolved = use_case
        .set_status(incident.incident_id, IncidentStatus::Resolved)
        .await
        .unwrap();
    assert_eq!(resolved.status, IncidentStatus::Resolved);
}

#[tokio::test]
async fn test_sos_create_validates_battery_and_location() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = SosUseCase::new(repo);
    let alice = citizen("Alice");

    let err = use_case
        .create(
            &alice,
            CreateSosInput {
                ability: Ability::Blind,
                lat: 40.0,
                lng: -74.0,
                battery: 150,
                status: SosStatus::Trapped,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let alert = use_case
        .create(
            &alice,
            CreateSosInput {
                ability: Ability::Blind,
                lat: 40.0,
                lng: -74.0,
                battery: 45,
                status: SosStatus::Trapped,
            },
        )
        .await
        .unwrap();
    assert_eq!(alert.user_id, alice.user_id);

    let mine = use_case.list_for_user(&alice, default_page()).await.unwrap();
    assert_eq!(mine.total, 1);
}

#[tokio::test]
async fn test_alert_create_validates_title() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = AlertsUseCase::new(repo);

    let err = use_case
        .create(CreateAlertInput {
            title: "   ".to_string(),
            message: "Evacuate the riverside".to_string(),
            severity: AlertSeverity::High,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let alert = use_case
        .create(CreateAlertInput {
            title: "Flood warning".to_string(),
            message: "Evacuate the riverside".to_string(),
            severity: AlertSeverity::High,
        })
        .await
        .unwrap();
    assert_eq!(alert.severity, AlertSeverity::High);

    let feed = use_case.list(default_page()).await.unwrap();
    assert_eq!(feed.total, 1);
}

#[tokio::test]
async fn test_mark_read_allows_sender_and_admin_only() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = MessagesUseCase::new(repo);

    let alice = citizen("Alice");
    let bob = citizen("Bob");
    let operator = dispatcher();

    let record = use_case
        .create(
            &alice,
            CreateMessageInput {
                kind: MessageKind::General,
                title: "Road blocked".to_string(),
                content: "Tree down on Main St".to_string(),
                lat: None,
                lng: None,
                category: None,
                severity: None,
                ability: None,
                battery: None,
            },
        )
        .await
        .unwrap();
    assert!(!record.message.is_read);

    let message_id = record.message.message_id;

    // A stranger cannot mark it read
    let err = use_case.mark_read(&bob, message_id).await.unwrap_err();
    assert!(matches!(err, DispatchError::Forbidden));

    // The sender can
    let read = use_case.mark_read(&alice, message_id).await.unwrap();
    assert!(read.message.is_read);

    // So can a dispatcher
    let read = use_case.mark_read(&operator, message_id).await.unwrap();
    assert!(read.message.is_read);
}

#[tokio::test]
async fn test_message_lookup_is_owner_scoped() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = MessagesUseCase::new(repo);

    let alice = citizen("Alice");
    let bob = citizen("Bob");

    let record = use_case
        .create_sos(
            &alice,
            SosMessageInput {
                content: "Trapped on the second floor".to_string(),
                ability: Ability::Deaf,
                lat: 40.0,
                lng: -74.0,
                battery: 12,
            },
        )
        .await
        .unwrap();
    assert_eq!(record.message.title, "SOS Alert: DEAF");

    let err = use_case
        .get_owned(&bob, record.message.message_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NotFound("Message")));
}

#[tokio::test]
async fn test_message_stats_count_by_kind_and_read_state() {
    let repo = Arc::new(MemoryDispatchRepo::default());
    let use_case = MessagesUseCase::new(repo);

    let alice = citizen("Alice");
    let operator = dispatcher();

    let sos = use_case
        .create_sos(
            &alice,
            SosMessageInput {
                content: "Need help".to_string(),
                ability: Ability::None,
                lat: 40.0,
                lng: -74.0,
                battery: 80,
            },
        )
        .await
        .unwrap();
    use_case
        .create(
            &alice,
            CreateMessageInput {
                kind: MessageKind::General,
                title: "Status update".to_string(),
                content: "All clear in sector 4".to_string(),
                lat: None,
                lng: None,
                category: None,
                severity: None,
                ability: None,
                battery: None,
            },
        )
        .await
        .unwrap();

    use_case
        .mark_read(&operator, sos.message.message_id)
        .await
        .unwrap();

    let stats = use_case.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.unread, 1);
    assert_eq!(stats.read(), 1);
    assert_eq!(stats.sos, 1);
    assert_eq!(stats.general, 1);
    assert_eq!(stats.incident, 0);

    assert_eq!(use_case.unread_count().await.unwrap(), 1);

    let err = use_case
        .list_all(Some("NOT_A_KIND"), None, default_page())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let unread = use_case
        .list_all(None, Some(false), default_page())
        .await
        .unwrap();
    assert_eq!(unread.total, 1);
}
