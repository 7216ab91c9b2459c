//! Synthetic seed data for the document store.
//!
//! A generated document holds posts, categories with their products,
//! students, cities, works, a tag list, transactions and the singular
//! `public-profile`. Output depends only on the seed and the timestamp
//! passed in, so fixtures are reproducible.

pub mod faker;

use serde_json::{json, Map, Value};

use crate::store::Document;

pub use faker::Faker;

pub const DEFAULT_POSTS: usize = 50;
pub const DEFAULT_STUDENTS: usize = 50;
pub const PRODUCTS_PER_CATEGORY: usize = 20;
pub const WORKS: usize = 20;
pub const TRANSACTIONS: usize = 10;

const CATEGORIES: &[(&str, &str)] = &[
    ("Fashion", "shirts"),
    ("Face masks", "face mask"),
    ("Beauty", "beauty"),
    ("Laptops", "laptop"),
    ("Storage", "ssd"),
    ("Phones", "phone"),
];

const CITY_CODES: &[(&str, &str)] = &[
    ("hcm", "Ho Chi Minh"),
    ("hn", "Ha Noi"),
    ("dn", "Da Nang"),
    ("pt", "Phan Thiet"),
];

const TAGS: &[&str] = &[
    "Design",
    "Dashboard",
    "User Experience",
    "Computer Science",
    "ReactJS",
    "Frontend Development",
    "NextJS",
];

const THUMBNAILS: &[&str] = &[
    "https://picsum.photos/id/20/640/480",
    "https://picsum.photos/id/48/640/480",
    "https://picsum.photos/id/180/640/480",
];

const TRANSACTION_STATUSES: &[&str] = &["pending", "processing", "completed", "cancelled"];

const WORK_SUMMARY: &str = "Amet minim mollit non deserunt ullamco est sit aliqua dolor do amet sint. \
Velit officia consequat duis enim velit mollit. Exercitation veniam consequat sunt nostrud amet.";

const WORK_BODY: &str = "<h2>Case study</h2><p>Built with <strong>care</strong> and shipped \
<span style=\"color: rgb(255, 153, 0);\">on time</span>.</p><blockquote>super cool</blockquote>";

#[derive(Debug, Clone)]
pub struct FixtureOptions {
    /// `None` draws a random seed
    pub seed: Option<u64>,
    pub posts: usize,
    pub students: usize,
    /// Stamped into every `createdAt`/`updatedAt`
    pub now_ms: i64,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            seed: None,
            posts: DEFAULT_POSTS,
            students: DEFAULT_STUDENTS,
            now_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

pub fn generate(options: &FixtureOptions) -> Document {
    let mut faker = match options.seed {
        Some(seed) => Faker::seeded(seed),
        None => Faker::default(),
    };
    let now = options.now_ms;

    let posts: Vec<Value> = (0..options.posts).map(|_| post(&mut faker, now)).collect();

    let categories: Vec<Value> = CATEGORIES
        .iter()
        .map(|(name, search_term)| {
            json!({
                "id": faker.uid(),
                "name": name,
                "searchTerm": search_term,
                "createdAt": now,
                "updatedAt": now,
            })
        })
        .collect();

    let products: Vec<Value> = categories
        .iter()
        .flat_map(|category| {
            let category_id = category["id"].clone();
            (0..PRODUCTS_PER_CATEGORY)
                .map(|_| product(&mut faker, &category_id, now))
                .collect::<Vec<_>>()
        })
        .collect();

    let students: Vec<Value> = (0..options.students).map(|_| student(&mut faker, now)).collect();

    let cities: Vec<Value> = CITY_CODES
        .iter()
        .map(|(code, name)| json!({ "code": code, "name": name }))
        .collect();

    let works: Vec<Value> = (1..=WORKS).map(|i| work(&mut faker, i, now)).collect();

    let transactions: Vec<Value> = (0..TRANSACTIONS).map(|_| transaction(&mut faker, now)).collect();

    let profile = json!({
        "id": "public-profile",
        "name": faker.full_name(),
        "city": faker.city(),
        "email": faker.email().to_lowercase(),
    });

    let mut document = Map::new();
    document.insert("posts".into(), Value::Array(posts));
    document.insert("categories".into(), Value::Array(categories));
    document.insert("products".into(), Value::Array(products));
    document.insert("students".into(), Value::Array(students));
    document.insert("cities".into(), Value::Array(cities));
    document.insert("works".into(), Value::Array(works));
    document.insert("tags".into(), json!(TAGS));
    document.insert("transactions".into(), Value::Array(transactions));
    document.insert("public-profile".into(), profile);

    tracing::debug!(
        "Generated fixtures: {} posts, {} products, {} students",
        options.posts,
        CATEGORIES.len() * PRODUCTS_PER_CATEGORY,
        options.students
    );

    document
}

fn post(faker: &mut Faker, now: i64) -> Value {
    json!({
        "id": faker.uid(),
        "title": faker.title(),
        "author": faker.full_name(),
        "description": faker.words(50),
        "createdAt": now,
        "updatedAt": now,
        "imageUrl": format!("https://picsum.photos/id/{}/1368/400", faker.integer(1, 1000)),
    })
}

fn product(faker: &mut Faker, category_id: &Value, now: i64) -> Value {
    let original_price = faker.integer(10, 500) * 1000;
    let promotion_percent = *faker.pick(&[0, 0, 5, 10, 15, 20, 30]);
    let sale_price = original_price * (100 - promotion_percent) / 100;
    let image_count = faker.integer(1, 4);

    json!({
        "id": faker.uid(),
        "categoryId": category_id,
        "name": faker.title(),
        "shortDescription": faker.sentence(),
        "description": faker.words(40),
        "originalPrice": original_price,
        "salePrice": sale_price,
        "isPromotion": promotion_percent > 0,
        "promotionPercent": promotion_percent,
        "isFreeShip": faker.integer(0, 1) == 1,
        "images": (0..image_count)
            .map(|_| format!("https://picsum.photos/id/{}/400/400", faker.integer(1, 1000)))
            .collect::<Vec<_>>(),
        "createdAt": now,
        "updatedAt": now,
    })
}

fn student(faker: &mut Faker, now: i64) -> Value {
    let mark = (faker.double(3.0, 10.0) * 10.0).round() / 10.0;
    json!({
        "id": faker.uid(),
        "name": faker.full_name(),
        "age": faker.integer(18, 27),
        "mark": mark,
        "gender": faker.pick(&["male", "female"]),
        "city": faker.pick(CITY_CODES).0,
        "createdAt": now,
        "updatedAt": now,
    })
}

fn work(faker: &mut Faker, index: usize, now: i64) -> Value {
    let from = faker.integer(0, TAGS.len() as i64 - 1) as usize;
    let to = faker.integer(from as i64, TAGS.len() as i64 - 1) as usize;
    json!({
        "id": faker.uid(),
        "title": faker.title(),
        "tagList": &TAGS[from..to],
        "shortDescription": WORK_SUMMARY,
        "fullDescription": WORK_BODY,
        "thumbnailUrl": THUMBNAILS[index % THUMBNAILS.len()],
        "createdAt": now,
        "updatedAt": now,
    })
}

fn transaction(faker: &mut Faker, now: i64) -> Value {
    json!({
        "id": faker.uid(),
        "date": faker.date(),
        // Two decimals, kept as a string
        "amount": format!("{:.2}", faker.double(0.01, 10_000.0)),
        "description": faker.sentence(),
        "sender": faker.full_name(),
        "receiver": faker.full_name(),
        "status": faker.pick(TRANSACTION_STATUSES),
        "createdAt": now,
        "updatedAt": now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(seed: u64) -> FixtureOptions {
        FixtureOptions { seed: Some(seed), now_ms: 1_700_000_000_000, ..FixtureOptions::default() }
    }

    #[test]
    fn document_has_every_resource() {
        let doc = generate(&options(1));
        for key in ["posts", "categories", "products", "students", "cities", "works", "tags", "transactions"] {
            assert!(doc[key].is_array(), "{} should be a collection", key);
        }
        assert!(doc["public-profile"].is_object());
        assert_eq!(doc["posts"].as_array().unwrap().len(), DEFAULT_POSTS);
        assert_eq!(doc["products"].as_array().unwrap().len(), 6 * PRODUCTS_PER_CATEGORY);
        assert_eq!(doc["cities"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn same_seed_is_deterministic() {
        assert_eq!(generate(&options(9)), generate(&options(9)));
        assert_ne!(generate(&options(9))["posts"], generate(&options(10))["posts"]);
    }

    #[test]
    fn records_carry_ordered_timestamps() {
        let doc = generate(&options(3));
        for key in ["posts", "products", "students", "works", "transactions", "categories"] {
            for record in doc[key].as_array().unwrap() {
                let created = record["createdAt"].as_i64().unwrap();
                let updated = record["updatedAt"].as_i64().unwrap();
                assert!(created <= updated);
            }
        }
    }

    #[test]
    fn products_reference_their_category() {
        let doc = generate(&options(4));
        let category_ids: Vec<&Value> = doc["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| &c["id"])
            .collect();
        for product in doc["products"].as_array().unwrap() {
            assert!(category_ids.contains(&&product["categoryId"]));
            assert!(product["salePrice"].as_i64() <= product["originalPrice"].as_i64());
        }
    }

    #[test]
    fn counts_are_configurable() {
        let doc = generate(&FixtureOptions { posts: 3, students: 0, ..options(5) });
        assert_eq!(doc["posts"].as_array().unwrap().len(), 3);
        assert!(doc["students"].as_array().unwrap().is_empty());
    }
}
