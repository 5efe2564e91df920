use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::domain::booking::{Booking, BookingDraft};
use crate::domain::calendar::Calendar;
use crate::domain::property::Property;
use crate::error::Result;
use crate::ports::booking_repository::BookingRepository;
use crate::ports::clock::Clock;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Calendar covering every day from `from` to `until`, both inclusive.
pub fn calendar_span(from: NaiveDate, until: NaiveDate) -> Calendar {
    from.iter_days().take_while(|d| *d <= until).collect()
}

// --- Clock ---

/// Clock pinned to a settable instant.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// --- Factory functions ---

pub fn make_property(id: &str, owner_id: &str) -> Property {
    Property {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: "Test Cottage".to_string(),
        description: "A wonderful test place".to_string(),
        location: "Test City".to_string(),
        nightly_rate: dec!(100),
        extra_guest_rate: dec!(20),
        calendar: Calendar::open(),
        image_url: None,
    }
}

pub fn make_booking(id: &str, property_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
    Booking {
        id: id.to_string(),
        property_id: property_id.to_string(),
        guest_user_id: None,
        check_in,
        check_out,
        number_of_guests: 2,
        total_price: dec!(240),
        guest_full_name: "Ada Lovelace".to_string(),
        guest_email: "ada@example.com".to_string(),
        guest_phone_number: "+31612345678".to_string(),
        created_at: utc(2025, 5, 1, 12, 0),
    }
}

pub fn make_draft(
    property_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
) -> BookingDraft {
    BookingDraft {
        property_id: property_id.to_string(),
        check_in: Some(check_in),
        check_out: Some(check_out),
        number_of_guests: guests,
        guest_full_name: "Ada Lovelace".to_string(),
        guest_email: "ada@example.com".to_string(),
        guest_phone_number: "+31612345678".to_string(),
    }
}

// --- Mock booking repository ---

type GetFn = Box<dyn Fn(&str) -> Result<Option<Booking>> + Send + Sync>;
type ListFn = Box<dyn Fn(&str) -> Result<Vec<Booking>> + Send + Sync>;
type WriteFn = Box<dyn Fn(Booking) -> Result<Booking> + Send + Sync>;
type DeleteFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

/// Closure-programmable repository for exercising lifecycle failure paths
/// the in-memory store cannot produce on demand.
pub struct MockBookingRepository {
    get_fn: Mutex<GetFn>,
    list_by_property_fn: Mutex<ListFn>,
    list_by_user_fn: Mutex<ListFn>,
    insert_fn: Mutex<WriteFn>,
    update_fn: Mutex<WriteFn>,
    delete_fn: Mutex<DeleteFn>,
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self {
            get_fn: Mutex::new(Box::new(|_| Ok(None))),
            list_by_property_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
            list_by_user_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
            insert_fn: Mutex::new(Box::new(Ok)),
            update_fn: Mutex::new(Box::new(Ok)),
            delete_fn: Mutex::new(Box::new(|_| Ok(()))),
        }
    }

    #[must_use]
    pub fn with_get(
        self,
        f: impl Fn(&str) -> Result<Option<Booking>> + Send + Sync + 'static,
    ) -> Self {
        *self.get_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_list_by_property(
        self,
        f: impl Fn(&str) -> Result<Vec<Booking>> + Send + Sync + 'static,
    ) -> Self {
        *self.list_by_property_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_list_by_user(
        self,
        f: impl Fn(&str) -> Result<Vec<Booking>> + Send + Sync + 'static,
    ) -> Self {
        *self.list_by_user_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_insert(
        self,
        f: impl Fn(Booking) -> Result<Booking> + Send + Sync + 'static,
    ) -> Self {
        *self.insert_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_update(
        self,
        f: impl Fn(Booking) -> Result<Booking> + Send + Sync + 'static,
    ) -> Self {
        *self.update_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_delete(self, f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        *self.delete_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Booking>> {
        let f = self.get_fn.lock().unwrap();
        f(id)
    }

    async fn list_by_property(&self, property_id: &str) -> Result<Vec<Booking>> {
        let f = self.list_by_property_fn.lock().unwrap();
        f(property_id)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let f = self.list_by_user_fn.lock().unwrap();
        f(user_id)
    }

    async fn insert(&self, booking: Booking) -> Result<Booking> {
        let f = self.insert_fn.lock().unwrap();
        f(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking> {
        let f = self.update_fn.lock().unwrap();
        f(booking)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let f = self.delete_fn.lock().unwrap();
        f(id)
    }
}
