//! dashboard.rs
//!
//! Figures behind the dashboard page.
//!
//! Everything is derived from the current room and booking collections:
//! - summary cards (bookings, pending bookings, available rooms, revenue);
//! - the recent transactions table (confirmed bookings, newest first);
//! - the bookings-per-date series the chart is drawn from.
//!
//! A booking names its room as free text. Prices are looked up by matching
//! that text against room names, ignoring case; a booking whose room matches
//! nothing has no amount.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Booking, BookingStatus, Room, RoomStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCards {
    pub bookings: usize,
    pub pending_bookings: usize,
    pub available_rooms: usize,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub date: Option<NaiveDate>,
    pub room: Option<String>,
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub bookings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub cards: SummaryCards,
    pub recent_transactions: Vec<TransactionRow>,
    pub bookings_per_date: Vec<DatePoint>,
}

pub fn summarize(rooms: &[Room], bookings: &[Booking], recent_limit: usize) -> DashboardSummary {
    let prices: HashMap<String, i64> = rooms
        .iter()
        .map(|room| (room.name.to_lowercase(), room.price))
        .collect();
    let price_of = |booking: &Booking| {
        booking
            .room
            .as_deref()
            .and_then(|name| prices.get(&name.to_lowercase()).copied())
    };

    let confirmed: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status == Some(BookingStatus::Confirmed))
        .collect();

    let cards = SummaryCards {
        bookings: bookings.len(),
        pending_bookings: bookings
            .iter()
            .filter(|b| b.status == Some(BookingStatus::Pending))
            .count(),
        available_rooms: rooms
            .iter()
            .filter(|r| r.status == Some(RoomStatus::Available))
            .count(),
        revenue: confirmed
            .iter()
            .filter_map(|b| price_of(*b))
            .fold(0i64, i64::saturating_add),
    };

    let mut recent = confirmed.clone();
    // Newest first; undated bookings go last, ties by id.
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
    let recent_transactions = recent
        .into_iter()
        .take(recent_limit)
        .map(|b| TransactionRow {
            id: b.id,
            date: b.date,
            room: b.room.clone(),
            amount: price_of(b),
        })
        .collect();

    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in bookings.iter().filter_map(|b| b.date) {
        *per_date.entry(date).or_default() += 1;
    }
    let bookings_per_date = per_date
        .into_iter()
        .map(|(date, bookings)| DatePoint { date, bookings })
        .collect();

    DashboardSummary { cards, recent_transactions, bookings_per_date }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u64, name: &str, price: i64, status: RoomStatus) -> Room {
        Room {
            id,
            name: name.into(),
            capacity: 10,
            category: "Meeting".into(),
            price,
            status: Some(status),
        }
    }

    fn booking(id: u64, room: &str, day: u32, status: BookingStatus) -> Booking {
        Booking {
            id,
            name: Some(format!("guest {}", id)),
            room: Some(room.into()),
            date: NaiveDate::from_ymd_opt(2025, 3, day),
            status: Some(status),
        }
    }

    fn fixture() -> (Vec<Room>, Vec<Booking>) {
        let rooms = vec![
            room(1, "Room A", 100, RoomStatus::Available),
            room(2, "Room B", 150, RoomStatus::Occupied),
            room(3, "Room C", 200, RoomStatus::Available),
        ];
        let bookings = vec![
            booking(1, "room a", 1, BookingStatus::Confirmed),
            booking(2, "Room B", 5, BookingStatus::Confirmed),
            booking(3, "Room C", 5, BookingStatus::Pending),
            booking(4, "Gazebo", 10, BookingStatus::Confirmed),
            booking(5, "Room C", 15, BookingStatus::Cancelled),
        ];
        (rooms, bookings)
    }

    #[test]
    fn cards_count_live_records() {
        let (rooms, bookings) = fixture();

        let summary = summarize(&rooms, &bookings, 5);

        assert_eq!(
            summary.cards,
            SummaryCards { bookings: 5, pending_bookings: 1, available_rooms: 2, revenue: 250 }
        );
    }

    #[test]
    fn recent_transactions_are_confirmed_newest_first() {
        let (rooms, bookings) = fixture();

        let summary = summarize(&rooms, &bookings, 2);

        let rows: Vec<(u64, Option<i64>)> =
            summary.recent_transactions.iter().map(|t| (t.id, t.amount)).collect();
        assert_eq!(rows, [(4, None), (2, Some(150))]);
    }

    #[test]
    fn series_counts_bookings_per_day() {
        let (rooms, mut bookings) = fixture();
        bookings.push(Booking { id: 6, name: None, room: None, date: None, status: None });

        let summary = summarize(&rooms, &bookings, 5);

        let points: Vec<(u32, usize)> = summary
            .bookings_per_date
            .iter()
            .map(|p| (chrono::Datelike::day(&p.date), p.bookings))
            .collect();
        assert_eq!(points, [(1, 1), (5, 2), (10, 1), (15, 1)]);
    }

    #[test]
    fn revenue_saturates_instead_of_overflowing() {
        let rooms = vec![room(1, "Aula", i64::MAX, RoomStatus::Available)];
        let bookings = vec![
            booking(1, "Aula", 1, BookingStatus::Confirmed),
            booking(2, "Aula", 2, BookingStatus::Confirmed),
        ];

        let summary = summarize(&rooms, &bookings, 5);

        assert_eq!(summary.cards.revenue, i64::MAX);
    }

    #[test]
    fn empty_collections_give_zeroes() {
        let summary = summarize(&[], &[], 5);
        assert_eq!(summary.cards.revenue, 0);
        assert!(summary.recent_transactions.is_empty());
        assert!(summary.bookings_per_date.is_empty());
    }
}
