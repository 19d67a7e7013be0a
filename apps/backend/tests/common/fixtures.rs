//! Test fixtures: request bodies and an in-process fake of the content APIs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// First verse of Al-Fatiha with full diacritics.
pub const FATIHA_1: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";

/// Fatiha 1 as a speech-to-text engine returns it.
pub const FATIHA_1_SPOKEN: &str = "بسم الله الرحمن الرحيم";

/// Fatiha 1 with two wrong letters.
pub const FATIHA_1_TWO_SLIPS: &str = "بسن الله الرحمن الرحين";

/// Number of readable hadiths served for "eng-bukhari".
pub const BUKHARI_READABLE: usize = 12;

/// Body for POST /api/recitation/check.
pub fn check_request(transcript: &str) -> Value {
    json!({
        "reference": FATIHA_1,
        "transcript": transcript,
        "ayah_number": 1,
    })
}

/// Body for POST /api/recitation/check that also records the attempt.
pub fn tracked_check_request(transcript: &str, surah: &str, verse: u32) -> Value {
    json!({
        "reference": FATIHA_1,
        "transcript": transcript,
        "surah": surah,
        "verse": verse,
        "ayah_number": 1,
    })
}

/// Body for POST /api/bookmarks.
pub fn bookmark_request(number: u16, name: &str, english_name: &str) -> Value {
    json!({
        "surah_number": number,
        "name": name,
        "english_name": english_name,
    })
}

// === Fake upstream ===

/// Hadith editions the fake serves besides "eng-bukhari".
const SHORT_EDITIONS: [&str; 4] = ["ara-bukhari", "eng-abudawud", "ara-muslim", "eng-muslim"];

/// Requests received by the fake upstream, per path.
#[derive(Debug, Default)]
pub struct UpstreamHits {
    counts: Mutex<HashMap<String, usize>>,
}

impl UpstreamHits {
    fn record(&self, path: &str) {
        let mut counts = self.counts.lock().expect("hit counter poisoned");
        *counts.entry(path.to_string()).or_default() += 1;
    }

    /// How many times `path` was requested.
    pub fn count(&self, path: &str) -> usize {
        let counts = self.counts.lock().expect("hit counter poisoned");
        counts.get(path).copied().unwrap_or_default()
    }
}

async fn record_hit(
    State(hits): State<Arc<UpstreamHits>>,
    request: Request,
    next: Next,
) -> Response {
    hits.record(request.uri().path());
    next.run(request).await
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "code": 200, "status": "OK", "data": data }))
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": 404, "status": "NOT FOUND", "data": "Not found" })),
    )
}

fn surah_meta(number: u16) -> Value {
    let (name, english, translation, ayahs, revelation) = match number {
        1 => ("سُورَةُ ٱلْفَاتِحَةِ", "Al-Faatiha", "The Opening", 7, "Meccan"),
        2 => ("سُورَةُ البَقَرَةِ", "Al-Baqara", "The Cow", 286, "Medinan"),
        _ => ("سُورَةُ الإِخۡلَاصِ", "Al-Ikhlaas", "Sincerity", 4, "Meccan"),
    };
    json!({
        "number": number,
        "name": name,
        "englishName": english,
        "englishNameTranslation": translation,
        "numberOfAyahs": ayahs,
        "revelationType": revelation,
    })
}

async fn surah_list() -> Json<Value> {
    envelope(json!([surah_meta(1), surah_meta(2), surah_meta(112)]))
}

async fn surah_editions(Path((number, editions)): Path<(u16, String)>) -> impl IntoResponse {
    if number != 1 {
        return not_found().into_response();
    }
    let Some((_, translation)) = editions.split_once(',') else {
        return not_found().into_response();
    };
    if translation == "broken.edition" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let mut arabic = surah_meta(1);
    arabic["ayahs"] = json!([
        { "number": 1, "text": FATIHA_1_SPOKEN, "numberInSurah": 1 },
        { "number": 2, "text": "الحمد لله رب العالمين", "numberInSurah": 2 },
    ]);
    let mut translated = surah_meta(1);
    translated["ayahs"] = json!([
        { "number": 1, "text": format!("[{}] In the name of God", translation), "numberInSurah": 1 },
        { "number": 2, "text": "All praise is due to God", "numberInSurah": 2 },
    ]);

    envelope(json!([arabic, translated])).into_response()
}

async fn translation_editions() -> Json<Value> {
    envelope(json!([
        { "identifier": "en.asad", "language": "en", "name": "Asad", "englishName": "Muhammad Asad", "format": "text", "type": "translation" },
        { "identifier": "ur.jalandhry", "language": "ur", "name": "جالندہری", "englishName": "Fateh Muhammad Jalandhry", "format": "text", "type": "translation" },
    ]))
}

fn juz_body(number: u8, edition: &str) -> Value {
    let first_surah = if number == 1 { 1 } else { 2 };
    json!({
        "number": number,
        "ayahs": [
            { "number": 1, "text": format!("{} ayah one", edition), "numberInSurah": 1, "surah": surah_meta(first_surah) },
            { "number": 2, "text": format!("{} ayah two", edition), "numberInSurah": 2, "surah": surah_meta(first_surah) },
        ],
    })
}

async fn juz(Path(number): Path<u8>) -> impl IntoResponse {
    if !(1..=30).contains(&number) {
        return not_found().into_response();
    }
    envelope(juz_body(number, "quran-simple")).into_response()
}

async fn juz_edition(Path((number, edition)): Path<(u8, String)>) -> Json<Value> {
    envelope(juz_body(number, &edition))
}

async fn random_ayah() -> Json<Value> {
    envelope(json!({
        "number": 262,
        "text": "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ الْحَيُّ الْقَيُّومُ",
        "numberInSurah": 255,
        "surah": surah_meta(2),
    }))
}

async fn ayah_edition(Path((number, edition)): Path<(u32, String)>) -> Json<Value> {
    envelope(json!({
        "number": number,
        "text": format!("{}: Allah - there is no deity except Him", edition),
        "numberInSurah": 255,
    }))
}

fn hadith_edition(base: &str, name: &str, book: &str, language: &str) -> Value {
    let direction = if language == "Arabic" { "rtl" } else { "ltr" };
    json!({
        "name": name,
        "book": book,
        "author": "Unknown",
        "language": language,
        "direction": direction,
        "source": "",
        "comments": "",
        "link": format!("{}/hadith/editions/{}.json", base, name),
        "linkmin": format!("{}/hadith/editions/{}.min.json", base, name),
    })
}

async fn hadith_index(State(base): State<String>) -> Json<Value> {
    Json(json!({
        "bukhari": {
            "name": "Sahih al Bukhari",
            "collection": [
                hadith_edition(&base, "ara-bukhari", "bukhari", "Arabic"),
                hadith_edition(&base, "eng-bukhari", "bukhari", "English"),
            ],
        },
        "abudawud": {
            "name": "Sunan Abu Dawud",
            "collection": [hadith_edition(&base, "eng-abudawud", "abudawud", "English")],
        },
        "muslim": {
            "name": "Sahih Muslim",
            "collection": [
                hadith_edition(&base, "ara-muslim", "muslim", "Arabic"),
                hadith_edition(&base, "eng-muslim", "muslim", "English"),
            ],
        },
    }))
}

async fn hadith_file(Path(file): Path<String>) -> impl IntoResponse {
    let Some(name) = file.strip_suffix(".min.json") else {
        return not_found().into_response();
    };
    if SHORT_EDITIONS.contains(&name) {
        let hadiths: Vec<Value> = (1..=3)
            .map(|n| json!({ "hadithnumber": n, "text": format!("{} narration {}", name, n) }))
            .collect();
        return Json(json!({ "hadiths": hadiths })).into_response();
    }
    if name != "eng-bukhari" {
        return not_found().into_response();
    }

    let mut hadiths: Vec<Value> = (1..=BUKHARI_READABLE)
        .map(|n| {
            let text = match n {
                1 => "Actions are judged by intentions".to_string(),
                5 => "Give charity without delay, for it stands in the way of calamity".to_string(),
                _ => format!("Narration number {}", n),
            };
            json!({ "hadithnumber": n, "arabicnumber": n, "text": text, "grades": [] })
        })
        .collect();
    hadiths.push(json!({ "hadithnumber": 99, "text": "   " }));

    Json(json!({ "metadata": { "name": "Sahih al Bukhari" }, "hadiths": hadiths })).into_response()
}

async fn adhkar() -> Json<Value> {
    Json(json!({
        "أذكار الصباح": [
            { "category": "أذكار الصباح", "count": "3", "description": "", "reference": "", "content": "سبحان الله وبحمده\\n" },
            { "category": "أذكار الصباح", "count": "", "description": "", "reference": "", "content": "," },
        ],
        "أذكار المساء": [
            { "category": "أذكار المساء", "count": 1, "description": "", "reference": "", "content": "\"أمسينا وأمسى الملك لله\"" },
        ],
    }))
}

async fn prayer_timings(Path(_timestamp): Path<i64>) -> Json<Value> {
    envelope(json!({
        "timings": {
            "Fajr": "05:00", "Sunrise": "06:20", "Dhuhr": "12:30", "Asr": "15:45",
            "Sunset": "18:10", "Maghrib": "18:10", "Isha": "19:40",
            "Imsak": "04:50", "Midnight": "00:25",
        },
        "date": {
            "readable": "01 Mar 2026",
            "timestamp": "1772323200",
            "hijri": { "day": "14", "month": { "number": 9, "en": "Ramaḍān", "ar": "رَمَضان" }, "year": "1447" },
        },
    }))
}

async fn geocode() -> Json<Value> {
    Json(json!({ "city": "Makkah", "locality": "Makkah", "countryName": "Saudi Arabia" }))
}

/// Start the fake content APIs on a random local port. Returns their base
/// URL and the per-path request counter.
pub async fn spawn_upstream() -> (String, Arc<UpstreamHits>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let base = format!("http://{}", listener.local_addr().expect("No local addr"));
    let hits = Arc::new(UpstreamHits::default());

    let router = Router::new()
        .route("/quran/surah", get(surah_list))
        .route("/quran/surah/:number/editions/:editions", get(surah_editions))
        .route("/quran/edition", get(translation_editions))
        .route("/quran/juz/:number", get(juz))
        .route("/quran/juz/:number/:edition", get(juz_edition))
        .route("/quran/ayah/random", get(random_ayah))
        .route("/quran/ayah/:number/:edition", get(ayah_edition))
        .route("/hadith/editions.json", get(hadith_index))
        .route("/hadith/editions/:file", get(hadith_file))
        .route("/adhkar.json", get(adhkar))
        .route("/prayer/timings/:timestamp", get(prayer_timings))
        .route("/geocode", get(geocode))
        .with_state(base.clone())
        .layer(middleware::from_fn_with_state(hits.clone(), record_hit));

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake upstream stopped");
    });

    (base, hits)
}
