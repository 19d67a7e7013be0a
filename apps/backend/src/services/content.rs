//! Typed client for the third-party content APIs.
//!
//! Quran text and editions come from alquran.cloud, hadith collections from
//! the fawazahmed0 hadith-api CDN, adhkar from a static JSON dataset and
//! prayer timings from Aladhan. The static datasets are cached in memory.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;

use recitation_core::catalog::{juz_name, language_label, JUZ_COUNT};
use recitation_core::hadith::{flatten_editions, readable};
use recitation_core::types::{
    AdhkarEntry, AyahText, DailyAyah, EditionGroup, Hadith, HadithEdition, JuzDetail, JuzSummary,
    JuzVerse, PrayerTimings, SurahSummary, TranslationEdition,
};

use crate::config::UpstreamUrls;
use crate::error::ApiError;

/// Arabic edition used for recitation practice.
pub const ARABIC_EDITION: &str = "quran-simple-min";
/// Arabic edition used for juz reading.
pub const JUZ_ARABIC_EDITION: &str = "quran-uthmani";
/// Translation shown with the ayah of the day.
pub const DAILY_TRANSLATION: &str = "en.sahih";
/// Aladhan calculation method (University of Islamic Sciences, Karachi).
const PRAYER_METHOD: u8 = 1;
/// Number of hadith editions kept in memory.
const EDITION_CACHE_SIZE: usize = 4;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Content client errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, ContentError>;

// === alquran.cloud wire types ===

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSurah {
    number: u16,
    name: String,
    english_name: String,
    #[serde(default)]
    english_name_translation: String,
    #[serde(default)]
    number_of_ayahs: u32,
    #[serde(default)]
    revelation_type: String,
}

impl From<WireSurah> for SurahSummary {
    fn from(s: WireSurah) -> Self {
        SurahSummary {
            number: s.number,
            name: s.name,
            english_name: s.english_name,
            english_name_translation: s.english_name_translation,
            number_of_ayahs: s.number_of_ayahs,
            revelation_type: s.revelation_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAyah {
    number: u32,
    text: String,
    number_in_surah: u32,
    #[serde(default)]
    surah: Option<WireSurah>,
}

impl WireAyah {
    fn to_text(&self) -> AyahText {
        AyahText {
            number: self.number,
            number_in_surah: self.number_in_surah,
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireSurahEdition {
    #[serde(flatten)]
    surah: WireSurah,
    ayahs: Vec<WireAyah>,
}

#[derive(Debug, Deserialize)]
struct WireJuz {
    number: u8,
    ayahs: Vec<WireAyah>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEdition {
    identifier: String,
    language: String,
    english_name: String,
}

// === Aladhan / geocode wire types ===

#[derive(Debug, Deserialize)]
struct WirePrayerDay {
    timings: PrayerTimings,
    date: WirePrayerDate,
}

#[derive(Debug, Deserialize)]
struct WirePrayerDate {
    hijri: WireHijri,
}

#[derive(Debug, Deserialize)]
struct WireHijri {
    day: String,
    month: WireHijriMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct WireHijriMonth {
    en: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    #[serde(default)]
    city: String,
    #[serde(default)]
    locality: String,
    #[serde(default)]
    country_name: String,
}

#[derive(Debug, Deserialize)]
struct WireHadithEdition {
    #[serde(default)]
    hadiths: Vec<Hadith>,
}

/// Surah text in Arabic together with one translation.
#[derive(Debug, Clone)]
pub struct SurahWithTranslation {
    pub summary: SurahSummary,
    pub arabic: Vec<AyahText>,
    pub translation: Vec<AyahText>,
}

/// Prayer timings for a day plus its Hijri date.
#[derive(Debug, Clone)]
pub struct PrayerDay {
    pub timings: PrayerTimings,
    pub hijri_day: String,
    pub hijri_month: String,
    pub hijri_year: String,
}

/// Adhkar dataset, categories in source order.
pub type AdhkarCategories = Vec<(String, Vec<AdhkarEntry>)>;

type EditionCache = VecDeque<(String, Arc<Vec<Hadith>>)>;

/// Look up an edition and mark it most recently used.
fn touch(cache: &mut EditionCache, name: &str) -> Option<Arc<Vec<Hadith>>> {
    let pos = cache.iter().position(|(cached, _)| cached == name)?;
    let entry = cache.remove(pos)?;
    let hadiths = entry.1.clone();
    cache.push_back(entry);
    Some(hadiths)
}

/// Store a fetched edition, evicting the least recently used one when full.
/// If another request stored the edition meanwhile, that copy is kept.
fn insert(cache: &mut EditionCache, name: &str, hadiths: Arc<Vec<Hadith>>) -> Arc<Vec<Hadith>> {
    if let Some(cached) = touch(cache, name) {
        return cached;
    }
    if cache.len() >= EDITION_CACHE_SIZE {
        if let Some((evicted, _)) = cache.pop_front() {
            tracing::debug!("Evicting hadith edition {}", evicted);
        }
    }
    cache.push_back((name.to_string(), hadiths.clone()));
    hadiths
}

struct ContentClientInner {
    client: Client,
    urls: UpstreamUrls,
    hadith_index: RwLock<Option<Arc<Vec<HadithEdition>>>>,
    hadith_editions: RwLock<EditionCache>,
    adhkar: RwLock<Option<Arc<AdhkarCategories>>>,
}

/// Client for all upstream content. Cheap to clone.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

impl ContentClient {
    pub fn new(urls: UpstreamUrls) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContentError::Network(e.to_string()))?;
        Ok(Self::with_client(urls, client))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(urls: UpstreamUrls, client: Client) -> Self {
        let trim = |s: String| s.trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ContentClientInner {
                client,
                urls: UpstreamUrls {
                    quran: trim(urls.quran),
                    hadith: trim(urls.hadith),
                    adhkar: urls.adhkar,
                    prayer: trim(urls.prayer),
                    geocode: urls.geocode,
                },
                hadith_index: RwLock::new(None),
                hadith_editions: RwLock::new(VecDeque::new()),
                adhkar: RwLock::new(None),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let resp = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(ContentError::NotFound(what.to_string())),
            s => {
                tracing::warn!("Upstream {} returned {}", url, s);
                return Err(ContentError::Status {
                    status: s.as_u16(),
                    url: url.to_string(),
                });
            }
        }

        resp.json()
            .await
            .map_err(|e| ContentError::Parse(format!("{}: {}", what, e)))
    }

    async fn quran<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}/{}", self.inner.urls.quran, path);
        let envelope: Envelope<T> = self.get_json(&url, what).await?;
        Ok(envelope.data)
    }

    // === Quran ===

    /// All 114 surahs.
    pub async fn surahs(&self) -> Result<Vec<SurahSummary>> {
        let surahs: Vec<WireSurah> = self.quran("surah", "surah list").await?;
        Ok(surahs.into_iter().map(SurahSummary::from).collect())
    }

    /// Arabic text of a surah with one translation edition.
    pub async fn surah_with_translation(
        &self,
        number: u16,
        translation: &str,
    ) -> Result<SurahWithTranslation> {
        let path = format!("surah/{}/editions/{},{}", number, ARABIC_EDITION, translation);
        let mut editions: Vec<WireSurahEdition> =
            self.quran(&path, &format!("surah {}", number)).await?;

        if editions.len() < 2 {
            return Err(ContentError::NotFound(format!("translation {}", translation)));
        }
        let translated = editions.remove(1);
        let arabic = editions.remove(0);

        Ok(SurahWithTranslation {
            arabic: arabic.ayahs.iter().map(WireAyah::to_text).collect(),
            translation: translated.ayahs.iter().map(WireAyah::to_text).collect(),
            summary: arabic.surah.into(),
        })
    }

    /// Translation editions with their picker labels.
    pub async fn translations(&self) -> Result<Vec<TranslationEdition>> {
        let editions: Vec<WireEdition> = self
            .quran("edition?format=text&type=translation", "translation editions")
            .await?;

        Ok(editions
            .into_iter()
            .map(|e| TranslationEdition {
                label: format!("{} ({})", language_label(&e.language), e.english_name),
                identifier: e.identifier,
                language: e.language,
                english_name: e.english_name,
            })
            .collect())
    }

    async fn juz_edition(&self, number: u8, edition: Option<&str>) -> Result<WireJuz> {
        let path = match edition {
            Some(e) => format!("juz/{}/{}", number, e),
            None => format!("juz/{}", number),
        };
        self.quran(&path, &format!("juz {}", number)).await
    }

    /// Summaries of all 30 juz, fetched concurrently.
    pub async fn juz_list(&self) -> Result<Vec<JuzSummary>> {
        let requests = (1..=JUZ_COUNT).map(|n| self.juz_edition(n, None));
        let juz = try_join_all(requests).await?;

        Ok(juz
            .into_iter()
            .map(|j| JuzSummary {
                number: j.number,
                name: juz_name(j.number).unwrap_or_default().to_string(),
                ayah_count: j.ayahs.len(),
                first_surah: j
                    .ayahs
                    .first()
                    .and_then(|a| a.surah.as_ref())
                    .map(|s| s.english_name.clone()),
            })
            .collect())
    }

    /// Verses of one juz, optionally paired with a translation.
    pub async fn juz(&self, number: u8, translation: Option<&str>) -> Result<JuzDetail> {
        let arabic = self.juz_edition(number, Some(JUZ_ARABIC_EDITION)).await?;
        let translated = match translation {
            Some(t) => Some(self.juz_edition(number, Some(t)).await?),
            None => None,
        };

        let verses = arabic
            .ayahs
            .iter()
            .enumerate()
            .map(|(idx, ayah)| JuzVerse {
                global_number: ayah.number,
                number_in_surah: ayah.number_in_surah,
                surah_number: ayah.surah.as_ref().map(|s| s.number).unwrap_or_default(),
                surah_name: ayah
                    .surah
                    .as_ref()
                    .map(|s| s.english_name.clone())
                    .unwrap_or_default(),
                arabic: ayah.text.clone(),
                translation: translated
                    .as_ref()
                    .and_then(|t| t.ayahs.get(idx))
                    .map(|a| a.text.clone()),
            })
            .collect();

        Ok(JuzDetail {
            number,
            name: juz_name(number).unwrap_or_default().to_string(),
            translation: translation.map(str::to_string),
            verses,
        })
    }

    /// A random ayah with its English translation.
    pub async fn random_ayah(&self) -> Result<DailyAyah> {
        let ayah: WireAyah = self.quran("ayah/random", "random ayah").await?;
        let translated: WireAyah = self
            .quran(
                &format!("ayah/{}/{}", ayah.number, DAILY_TRANSLATION),
                "ayah translation",
            )
            .await?;

        let surah_name = ayah
            .surah
            .as_ref()
            .map(|s| s.english_name.as_str())
            .unwrap_or_default();

        Ok(DailyAyah {
            global_number: ayah.number,
            reference: format!("Surah {}, Ayah {}", surah_name, ayah.number_in_surah),
            arabic: ayah.text,
            translation: translated.text,
        })
    }

    // === Hadith ===

    /// All hadith editions from the editions index (cached).
    pub async fn hadith_editions(&self) -> Result<Arc<Vec<HadithEdition>>> {
        if let Some(cached) = self.inner.hadith_index.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let url = format!("{}/editions.json", self.inner.urls.hadith);
        let index: serde_json::Map<String, serde_json::Value> =
            self.get_json(&url, "hadith editions").await?;

        let groups: Vec<EditionGroup> = index
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(group) => Some(group),
                Err(e) => {
                    tracing::warn!("Skipping hadith edition group {}: {}", key, e);
                    None
                }
            })
            .collect();

        let editions = Arc::new(flatten_editions(&groups));
        tracing::info!("Loaded {} hadith editions", editions.len());
        *self.inner.hadith_index.write().await = Some(editions.clone());
        Ok(editions)
    }

    /// Readable hadiths of one edition, e.g. "eng-bukhari".
    pub async fn hadiths(&self, edition_name: &str) -> Result<(HadithEdition, Arc<Vec<Hadith>>)> {
        let edition = self
            .hadith_editions()
            .await?
            .iter()
            .find(|e| e.name == edition_name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(format!("hadith edition {}", edition_name)))?;

        let cached = touch(&mut *self.inner.hadith_editions.write().await, edition_name);
        if let Some(hadiths) = cached {
            return Ok((edition, hadiths));
        }

        let wire: WireHadithEdition = self
            .get_json(edition.fetch_link(), &format!("hadith edition {}", edition_name))
            .await?;
        let hadiths = Arc::new(readable(wire.hadiths));

        let hadiths = insert(&mut *self.inner.hadith_editions.write().await, edition_name, hadiths);
        Ok((edition, hadiths))
    }

    // === Adhkar ===

    /// Adhkar grouped by category (cached).
    pub async fn adhkar(&self) -> Result<Arc<AdhkarCategories>> {
        if let Some(cached) = self.inner.adhkar.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let raw: serde_json::Map<String, serde_json::Value> =
            self.get_json(&self.inner.urls.adhkar, "adhkar").await?;

        let categories: AdhkarCategories = raw
            .into_iter()
            .map(|(category, value)| {
                let entries = match value {
                    serde_json::Value::Array(items) => items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value::<AdhkarEntry>(item).ok())
                        .collect(),
                    _ => Vec::new(),
                };
                (category, entries)
            })
            .collect();

        let categories = Arc::new(categories);
        *self.inner.adhkar.write().await = Some(categories.clone());
        Ok(categories)
    }

    // === Prayer times ===

    /// Timings for the day containing `timestamp` at a location.
    pub async fn prayer_day(&self, latitude: f64, longitude: f64, timestamp: i64) -> Result<PrayerDay> {
        let url = format!(
            "{}/timings/{}?latitude={}&longitude={}&method={}",
            self.inner.urls.prayer, timestamp, latitude, longitude, PRAYER_METHOD
        );
        let envelope: Envelope<WirePrayerDay> = self.get_json(&url, "prayer timings").await?;
        let day = envelope.data;

        Ok(PrayerDay {
            timings: day.timings,
            hijri_day: day.date.hijri.day,
            hijri_month: day.date.hijri.month.en,
            hijri_year: day.date.hijri.year,
        })
    }

    /// Human-readable place name for coordinates. Failures are not fatal.
    pub async fn locate(&self, latitude: f64, longitude: f64) -> Option<String> {
        let url = format!(
            "{}?latitude={}&longitude={}&localityLanguage=en",
            self.inner.urls.geocode, latitude, longitude
        );
        match self.get_json::<WireLocation>(&url, "location").await {
            Ok(loc) => {
                let place = if loc.city.is_empty() { loc.locality } else { loc.city };
                match (place.is_empty(), loc.country_name.is_empty()) {
                    (true, true) => None,
                    (false, true) => Some(place),
                    (true, false) => Some(loc.country_name),
                    (false, false) => Some(format!("{}, {}", place, loc.country_name)),
                }
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surah_edition_wire_format() {
        let json = r#"{
            "number": 1, "name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha",
            "englishNameTranslation": "The Opening", "numberOfAyahs": 7,
            "revelationType": "Meccan",
            "ayahs": [{"number": 1, "text": "بسم الله الرحمن الرحيم", "numberInSurah": 1, "juz": 1}]
        }"#;
        let edition: WireSurahEdition = serde_json::from_str(json).unwrap();
        assert_eq!(edition.surah.english_name, "Al-Faatiha");
        assert_eq!(edition.ayahs[0].to_text().number_in_surah, 1);
    }

    #[test]
    fn test_prayer_day_wire_format() {
        let json = r#"{"data": {
            "timings": {"Fajr": "04:31", "Sunrise": "06:02", "Dhuhr": "12:10", "Asr": "15:40",
                        "Sunset": "18:17", "Maghrib": "18:17", "Isha": "19:48"},
            "date": {"readable": "01 Mar 2026", "hijri": {"day": "12", "month": {"number": 9, "en": "Ramaḍān"}, "year": "1447"}}
        }}"#;
        let envelope: Envelope<WirePrayerDay> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.timings.isha, "19:48");
        assert_eq!(envelope.data.date.hijri.month.en, "Ramaḍān");
    }

    #[test]
    fn test_touch_refreshes_recency() {
        let mut cache: EditionCache = ["a", "b", "c"]
            .into_iter()
            .map(|name| (name.to_string(), Arc::new(Vec::new())))
            .collect();

        assert!(touch(&mut cache, "a").is_some());
        assert!(touch(&mut cache, "z").is_none());

        let order: Vec<&str> = cache.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_insert_keeps_one_copy_per_edition() {
        let mut cache = EditionCache::new();
        let first = insert(&mut cache, "eng-bukhari", Arc::new(Vec::new()));
        let second = insert(&mut cache, "eng-bukhari", Arc::new(Vec::new()));

        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_insert_evicts_oldest_when_full() {
        let mut cache = EditionCache::new();
        for name in ["a", "b", "c", "d", "e"] {
            insert(&mut cache, name, Arc::new(Vec::new()));
        }

        let order: Vec<&str> = cache.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_content_error_mapping() {
        let not_found: ApiError = ContentError::NotFound("juz 40".into()).into();
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let status: ApiError = ContentError::Status {
            status: 503,
            url: "http://x".into(),
        }
        .into();
        assert!(matches!(status, ApiError::Upstream(_)));
    }
}
