//! Gym records and the CRUD layer the list pages read from.
//!
//! The real product keeps these in a document database. Here a
//! [`MemoryStore`] per collection stands in for it, seeded with the
//! same kind of sample data the dashboards are demoed with.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::NaiveDate;
use gymtable::{Row, Value};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{collection} record {id:?} not found")]
    NotFound { collection: &'static str, id: String },
    #[error("{collection} record {id:?} already exists")]
    Duplicate { collection: &'static str, id: String },
    #[error("{0} store unavailable")]
    Unavailable(&'static str),
}

/// A record kept in one of the gym's collections.
pub trait Entity: Row + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Short human label used in status messages.
    fn label(&self) -> String;
}

/// Typed CRUD access to one collection.
pub trait Store<T: Entity>: Send + Sync {
    fn list(&self) -> Result<Vec<T>, StoreError>;

    fn get(&self, id: &str) -> Result<T, StoreError>;

    fn insert(&self, item: T) -> Result<(), StoreError>;

    /// Remove a record, returning it.
    fn delete(&self, id: &str) -> Result<T, StoreError>;
}

/// In-memory collection with optional simulated latency.
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
    latency: Duration,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            latency: Duration::ZERO,
        }
    }

    /// Delay every `list` call, to exercise loading states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl<T: Entity> Store<T> for MemoryStore<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable(T::COLLECTION))?;
        Ok(items.clone())
    }

    fn get(&self, id: &str) -> Result<T, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable(T::COLLECTION))?;
        items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })
    }

    fn insert(&self, item: T) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Unavailable(T::COLLECTION))?;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(StoreError::Duplicate {
                collection: T::COLLECTION,
                id: item.id().to_string(),
            });
        }
        log::debug!("{}: inserted {}", T::COLLECTION, item.id());
        items.push(item);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<T, StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Unavailable(T::COLLECTION))?;
        let Some(pos) = items.iter().position(|item| item.id() == id) else {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            });
        };
        log::debug!("{}: deleted {id}", T::COLLECTION);
        Ok(items.remove(pos))
    }
}

/// All collections the dashboard pages read from.
#[derive(Clone)]
pub struct GymStore {
    pub members: Arc<dyn Store<Member>>,
    pub classes: Arc<dyn Store<GymClass>>,
    pub payments: Arc<dyn Store<Payment>>,
    pub equipment: Arc<dyn Store<Equipment>>,
}

impl GymStore {
    /// Store pre-filled with sample data. Each `list` call waits `latency`.
    pub fn seeded(latency: Duration) -> Self {
        Self {
            members: Arc::new(MemoryStore::new(seed::members()).with_latency(latency)),
            classes: Arc::new(MemoryStore::new(seed::classes()).with_latency(latency)),
            payments: Arc::new(MemoryStore::new(seed::payments()).with_latency(latency)),
            equipment: Arc::new(MemoryStore::new(seed::equipment()).with_latency(latency)),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Basic,
    Premium,
    Vip,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plan::Basic => "Basic",
            Plan::Premium => "Premium",
            Plan::Vip => "VIP",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub status: MemberStatus,
    pub joined: NaiveDate,
    pub trainer: Option<String>,
}

impl Row for Member {
    fn field(&self, key: &str) -> Option<Value> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "email" => self.email.as_str().into(),
            "plan" => self.plan.to_string().into(),
            "status" => self.status.as_str().into(),
            "joined" => self.joined.into(),
            "trainer" => self.trainer.clone().into(),
            _ => return None,
        })
    }
}

impl Entity for Member {
    const COLLECTION: &'static str = "members";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

// =============================================================================
// Classes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GymClass {
    pub id: String,
    pub name: String,
    pub trainer: String,
    pub schedule: String,
    pub duration_min: u32,
    pub capacity: u32,
    pub enrolled: u32,
}

impl GymClass {
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }
}

impl Row for GymClass {
    fn field(&self, key: &str) -> Option<Value> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "trainer" => self.trainer.as_str().into(),
            "schedule" => self.schedule.as_str().into(),
            "duration" => self.duration_min.into(),
            "capacity" => self.capacity.into(),
            "enrolled" => self.enrolled.into(),
            _ => return None,
        })
    }
}

impl Entity for GymClass {
    const COLLECTION: &'static str = "classes";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.schedule)
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: String,
    pub member: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: String,
    pub status: PaymentStatus,
}

impl Row for Payment {
    fn field(&self, key: &str) -> Option<Value> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "member" => self.member.as_str().into(),
            "amount" => self.amount.into(),
            "date" => self.date.into(),
            "method" => self.method.as_str().into(),
            "status" => self.status.as_str().into(),
            _ => return None,
        })
    }
}

impl Entity for Payment {
    const COLLECTION: &'static str = "payments";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} from {}", self.id, self.member)
    }
}

// =============================================================================
// Equipment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Good,
    Maintenance,
    Broken,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Maintenance => "maintenance",
            Condition::Broken => "broken",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub condition: Condition,
    pub last_service: Option<NaiveDate>,
}

impl Row for Equipment {
    fn field(&self, key: &str) -> Option<Value> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "category" => self.category.as_str().into(),
            "location" => self.location.as_str().into(),
            "condition" => self.condition.as_str().into(),
            "last_service" => self.last_service.into(),
            _ => return None,
        })
    }
}

impl Entity for Equipment {
    const COLLECTION: &'static str = "equipment";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

mod seed {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    fn member(
        id: &str,
        name: &str,
        plan: Plan,
        status: MemberStatus,
        joined: NaiveDate,
        trainer: Option<&str>,
    ) -> Member {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email,
            plan,
            status,
            joined,
            trainer: trainer.map(str::to_string),
        }
    }

    pub(super) fn members() -> Vec<Member> {
        use MemberStatus::*;
        use Plan::*;

        vec![
            member("M-001", "John Doe", Premium, Active, date(2023, 1, 15), Some("Sarah Connor")),
            member("M-002", "Jane Smith", Basic, Active, date(2023, 3, 2), None),
            member("M-003", "Mike Johnson", Vip, Inactive, date(2022, 11, 20), Some("Alex Rivera")),
            member("M-004", "Emily Davis", Premium, Pending, date(2024, 2, 8), None),
            member("M-005", "Chris Lee", Basic, Active, date(2023, 7, 30), Some("Sarah Connor")),
            member("M-006", "Ana Souza", Vip, Active, date(2021, 9, 12), Some("Priya Patel")),
            member("M-007", "Tom Becker", Basic, Inactive, date(2022, 4, 5), None),
        ]
    }

    fn class(
        id: &str,
        name: &str,
        trainer: &str,
        schedule: &str,
        duration_min: u32,
        capacity: u32,
        enrolled: u32,
    ) -> GymClass {
        GymClass {
            id: id.to_string(),
            name: name.to_string(),
            trainer: trainer.to_string(),
            schedule: schedule.to_string(),
            duration_min,
            capacity,
            enrolled,
        }
    }

    pub(super) fn classes() -> Vec<GymClass> {
        vec![
            class("C-01", "Morning Yoga", "Priya Patel", "Mon 07:00", 60, 20, 14),
            class("C-02", "HIIT Blast", "Alex Rivera", "Tue 18:30", 45, 15, 15),
            class("C-03", "Spin Class", "Sarah Connor", "Wed 12:00", 50, 25, 19),
            class("C-04", "Strength Basics", "Alex Rivera", "Thu 17:00", 60, 12, 6),
            class("C-05", "Pilates Core", "Priya Patel", "Sat 09:00", 55, 18, 18),
        ]
    }

    fn payment(
        id: &str,
        member: &str,
        cents: i64,
        date: NaiveDate,
        method: &str,
        status: PaymentStatus,
    ) -> Payment {
        Payment {
            id: id.to_string(),
            member: member.to_string(),
            amount: Decimal::new(cents, 2),
            date,
            method: method.to_string(),
            status,
        }
    }

    pub(super) fn payments() -> Vec<Payment> {
        use PaymentStatus::*;

        vec![
            payment("P-1001", "John Doe", 7999, date(2024, 3, 1), "Card", Paid),
            payment("P-1002", "Jane Smith", 2999, date(2024, 3, 1), "Cash", Paid),
            payment("P-1003", "Mike Johnson", 14999, date(2024, 2, 1), "Card", Overdue),
            payment("P-1004", "Emily Davis", 7999, date(2024, 3, 5), "Transfer", Pending),
            payment("P-1005", "Chris Lee", 2999, date(2024, 3, 2), "Card", Paid),
            payment("P-1006", "Ana Souza", 14999, date(2024, 3, 3), "Transfer", Paid),
        ]
    }

    fn item(
        id: &str,
        name: &str,
        category: &str,
        location: &str,
        condition: Condition,
        last_service: Option<NaiveDate>,
    ) -> Equipment {
        Equipment {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            condition,
            last_service,
        }
    }

    pub(super) fn equipment() -> Vec<Equipment> {
        use Condition::*;

        vec![
            item("E-01", "Treadmill T5", "Cardio", "Floor 1", Good, Some(date(2024, 1, 10))),
            item("E-02", "Rowing Machine", "Cardio", "Floor 1", Maintenance, Some(date(2023, 8, 2))),
            item("E-03", "Squat Rack", "Strength", "Floor 2", Good, Some(date(2023, 12, 1))),
            item("E-04", "Cable Crossover", "Strength", "Floor 2", Broken, None),
            item("E-05", "Spin Bike #7", "Cardio", "Studio B", Good, Some(date(2024, 2, 20))),
        ]
    }
}
