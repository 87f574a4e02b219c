pub mod cli;

use std::time::Instant;

use anyhow::Result;
use chrono::{Duration, Months, NaiveDateTime};
use events_dao::EventStore;
use events_models::{Category, EventDraft};
use fake::{
    Fake,
    faker::{internet::en::DomainSuffix, lorem::en::{Sentence, Word}},
};
use rand::{Rng, seq::IndexedRandom};
use tracing::{info, instrument};
use uuid::Uuid;

/// Longest generated duration, in minutes.
const MAX_LENGTH_MINUTES: i64 = 6 * 60;

fn maybe<R: Rng>(rng: &mut R, probability: f64, value: impl FnOnce(&mut R) -> String) -> Option<String> {
    if rng.random_bool(probability) {
        Some(value(rng))
    }
    else {
        None
    }
}

fn fake_url<R: Rng>(rng: &mut R) -> String {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    let path: String = Word().fake_with_rng(rng);
    format!("https://{host}.{suffix}/{path}")
}

/// One plausible event around `now`: starts between a month ago and two
/// months ahead, usually has an end within six hours.
pub fn fake_event<R: Rng>(rng: &mut R, now: NaiveDateTime) -> EventDraft {
    let earliest = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    let latest = now.checked_add_months(Months::new(2)).unwrap_or(now);
    let span = (latest - earliest).num_minutes().max(1);
    let start = earliest + Duration::minutes(rng.random_range(0..span));

    let end = rng
        .random_bool(0.8)
        .then(|| start + Duration::minutes(rng.random_range(1..=MAX_LENGTH_MINUTES)));

    let name: String = Sentence(3..4).fake_with_rng(rng);
    let category = *Category::ALL.choose(rng).unwrap_or(&Category::Umum);

    EventDraft {
        name: name.trim_end_matches('.').to_string(),
        start_datetime: start,
        end_datetime: end,
        image: maybe(rng, 0.6, |_| format!("events/{}.jpg", Uuid::now_v7())),
        video_link: maybe(rng, 0.4, fake_url),
        web_link: maybe(rng, 0.5, fake_url),
        category,
    }
}

pub struct EventSeeder<S> {
    store: S,
    count: usize,
}

impl<S: EventStore> EventSeeder<S> {
    pub fn new(store: S, count: usize) -> Self { Self { store, count } }

    #[instrument(skip(self, rng))]
    pub async fn seed<R: Rng>(&self, rng: &mut R, now: NaiveDateTime) -> Result<usize> {
        let started = Instant::now();
        info!("Seeding {} events", self.count);

        for i in 0..self.count {
            self.store.create(fake_event(rng, now)).await?;

            if (i + 1) % 100 == 0 {
                info!("Seeded {} events", i + 1);
            }
        }

        info!(
            "Seeded {} events in {:.2}s",
            self.count,
            started.elapsed().as_secs_f64()
        );
        Ok(self.count)
    }
}
